//! Slot listing and booking admission.
//!
//! This is the decision core of the engine. The admission check is a pure
//! function of repository state returning a structured [`Admission`] value;
//! callers that only need a yes/no use [`can_create_booking`], and logging
//! happens in that wrapper, never inside the decision itself.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{BookingId, SalonId, StylistId};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::{Salon, Service, Stylist, TimeRange};

use super::schedule_resolver::applicable_hours;
use super::slots::CandidateSlots;

/// Why an admission check rejected a booking.
///
/// The reason stays inside the engine: the HTTP layer collapses every
/// rejection into one generic "slot unavailable" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Start instant is not strictly in the future.
    InPast,
    /// The stylist does not work in the given salon.
    StylistNotInSalon,
    /// The stylist is not skilled for the service.
    MissingSkill,
    /// The interval is not contained in a single opening range.
    OutsideOpeningHours,
    /// The salon or the stylist is exception-closed that day.
    ExceptionClosed,
    /// An active booking overlaps the interval.
    SlotTaken,
}

/// Outcome of the single-slot admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Rejected(RejectionReason),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }
}

/// Feasible start times for one stylist on the requested date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylistSlots {
    pub stylist_id: StylistId,
    /// Start times formatted "HH:MM", ascending.
    pub slots: Vec<String>,
}

/// Conflict checker: true when no active booking of the stylist overlaps
/// `[start, end)` under the half-open test. Cancelled bookings never block.
pub async fn is_slot_available(
    repo: &dyn FullRepository,
    stylist_id: StylistId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<BookingId>,
) -> RepositoryResult<bool> {
    let overlapping = repo
        .find_overlapping_bookings(stylist_id, start, end, exclude)
        .await?;
    Ok(overlapping.is_empty())
}

/// Exception gate: true when any exception dated on `date` and scoped to
/// the salon or to this stylist carries `closed == true`.
///
/// `closed == false` entries never re-open a day; they simply do not
/// trigger closure.
pub async fn is_exception_closed(
    repo: &dyn FullRepository,
    date: NaiveDate,
    salon_id: SalonId,
    stylist_id: StylistId,
) -> RepositoryResult<bool> {
    let exceptions = repo.exceptions_for_date(date, salon_id, stylist_id).await?;
    Ok(exceptions.iter().any(|e| e.closed))
}

/// Whether `[start_at, end_at)` fits entirely inside a single opening range
/// anchored to `start_at`'s date. Spanning the gap between two ranges fails.
fn fits_opening_hours(
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    ranges: &[TimeRange],
) -> bool {
    let date = start_at.date_naive();
    ranges.iter().any(|range| {
        let range_start = date.and_time(range.start).and_utc();
        let range_end = date.and_time(range.end).and_utc();
        start_at >= range_start && end_at <= range_end
    })
}

/// The authoritative single-slot admission check.
///
/// Checks run in fixed order and short-circuit on the first failure:
/// future start, salon membership, skill, opening-hours containment,
/// exception closure, booking conflict.
pub async fn admission(
    repo: &dyn FullRepository,
    salon: &Salon,
    stylist: &Stylist,
    service: &Service,
    start_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> RepositoryResult<Admission> {
    use RejectionReason::*;

    let end_at = start_at + service.duration();

    if start_at <= now {
        return Ok(Admission::Rejected(InPast));
    }

    if stylist.salon_id != salon.id {
        return Ok(Admission::Rejected(StylistNotInSalon));
    }

    if !stylist.is_skilled_for(service.id) {
        return Ok(Admission::Rejected(MissingSkill));
    }

    let hours = applicable_hours(salon, stylist, start_at.date_naive());
    if !fits_opening_hours(start_at, end_at, &hours) {
        return Ok(Admission::Rejected(OutsideOpeningHours));
    }

    if is_exception_closed(repo, start_at.date_naive(), salon.id, stylist.id).await? {
        return Ok(Admission::Rejected(ExceptionClosed));
    }

    if !is_slot_available(repo, stylist.id, start_at, end_at, None).await? {
        return Ok(Admission::Rejected(SlotTaken));
    }

    Ok(Admission::Accepted)
}

/// Boolean wrapper around [`admission`] with diagnostic logging.
pub async fn can_create_booking(
    repo: &dyn FullRepository,
    salon: &Salon,
    stylist: &Stylist,
    service: &Service,
    start_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> RepositoryResult<bool> {
    let decision = admission(repo, salon, stylist, service, start_at, now).await?;
    match decision {
        Admission::Accepted => {
            tracing::debug!(
                salon = %salon.id,
                stylist = %stylist.id,
                service = %service.id,
                %start_at,
                "booking admission accepted"
            );
            Ok(true)
        }
        Admission::Rejected(reason) => {
            tracing::debug!(
                salon = %salon.id,
                stylist = %stylist.id,
                service = %service.id,
                %start_at,
                ?reason,
                "booking admission rejected"
            );
            Ok(false)
        }
    }
}

/// List feasible start times per stylist for a salon/service/date.
///
/// A date strictly before `now`'s date yields no slots at all. Stylists
/// without the required skill, exception-closed stylists, and stylists with
/// zero feasible slots are omitted from the result entirely. Slots are
/// emitted in generation order (ascending) and never re-sorted.
pub async fn list_available_slots(
    repo: &dyn FullRepository,
    salon: &Salon,
    service: &Service,
    date: NaiveDate,
    duration_minutes: u32,
    specific_stylist: Option<&Stylist>,
    now: DateTime<Utc>,
) -> RepositoryResult<Vec<StylistSlots>> {
    if date < now.date_naive() {
        return Ok(Vec::new());
    }

    let stylists = match specific_stylist {
        Some(stylist) => vec![stylist.clone()],
        None => repo.stylists_for_salon(salon.id).await?,
    };

    let duration = Duration::minutes(i64::from(duration_minutes));
    let mut result = Vec::new();

    for stylist in stylists {
        if !stylist.is_skilled_for(service.id) {
            continue;
        }

        if is_exception_closed(repo, date, salon.id, stylist.id).await? {
            continue;
        }

        let hours = applicable_hours(salon, &stylist, date);
        let mut slots = Vec::new();
        for candidate in CandidateSlots::new(date, hours, duration, now) {
            if is_slot_available(repo, stylist.id, candidate, candidate + duration, None).await? {
                slots.push(candidate.format("%H:%M").to_string());
            }
        }

        if !slots.is_empty() {
            result.push(StylistSlots {
                stylist_id: stylist.id,
                slots,
            });
        }
    }

    Ok(result)
}
