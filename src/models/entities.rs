//! Domain entities persisted by the repository layer.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    BookingId, ExceptionId, SalonId, ServiceId, StylistId, UserId, WaitlistEntryId,
};
use super::schedule::WeeklySchedule;

/// A user account. Owners, stylists and clients all resolve to a `User`.
///
/// Authentication is out of scope; the entity exists for lookups and
/// notification addressing only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A salon with its weekly opening schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salon {
    pub id: SalonId,
    pub owner_id: UserId,
    pub name: String,
    pub open_hours: WeeklySchedule,
}

/// A stylist working in exactly one salon.
///
/// `override_hours` replaces the salon schedule per weekday: a weekday whose
/// override entry is absent or empty falls back to the salon's entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylist {
    pub id: StylistId,
    pub salon_id: SalonId,
    pub user_id: UserId,
    pub override_hours: Option<WeeklySchedule>,
    pub skills: HashSet<ServiceId>,
}

impl Stylist {
    pub fn is_skilled_for(&self, service: ServiceId) -> bool {
        self.skills.contains(&service)
    }
}

/// A service offered by a salon.
///
/// `duration_minutes` is always positive; a booking's end time is derived as
/// `start + duration`, never supplied independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub salon_id: SalonId,
    pub name: String,
    pub duration_minutes: u32,
    pub price_cents: i64,
}

impl Service {
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Booking lifecycle status.
///
/// Only `Pending` and `Confirmed` bookings are *active* and count toward
/// conflicts; `Cancelled` bookings never block a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// A booking of one stylist, for one service, by one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub salon_id: SalonId,
    pub stylist_id: StylistId,
    pub service_id: ServiceId,
    pub client_id: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Half-open overlap test against another interval.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_at < end && start < self.end_at
    }
}

/// Payload for reserving a new booking via the repository.
///
/// The repository inserts it atomically with the conflict re-check; see
/// `BookingRepository::try_reserve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub salon_id: SalonId,
    pub stylist_id: StylistId,
    pub service_id: ServiceId,
    pub client_id: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: BookingStatus,
}

/// What an availability exception applies to.
///
/// Exactly one of salon or stylist, by construction: a salon-scoped closure
/// affects every stylist in the salon, a stylist-scoped one only that
/// stylist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionScope {
    Salon(SalonId),
    Stylist(StylistId),
}

/// A date-scoped closure flag.
///
/// `closed == false` entries exist for bookkeeping; they never re-open an
/// otherwise closed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityException {
    pub id: ExceptionId,
    pub scope: ExceptionScope,
    pub date: NaiveDate,
    pub closed: bool,
    pub reason: Option<String>,
}

impl AvailabilityException {
    /// Whether this exception applies to the given salon/stylist pair.
    pub fn applies_to(&self, salon_id: SalonId, stylist_id: StylistId) -> bool {
        match self.scope {
            ExceptionScope::Salon(id) => id == salon_id,
            ExceptionScope::Stylist(id) => id == stylist_id,
        }
    }
}

/// A client waiting for a slot on a salon/service, within a desired window.
///
/// `created_at` establishes FIFO priority for promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: WaitlistEntryId,
    pub salon_id: SalonId,
    pub service_id: ServiceId,
    pub client_id: UserId,
    pub desired_start_range_start: DateTime<Utc>,
    pub desired_start_range_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Whether the desired window overlaps a vacated `[start, end)` slot.
    ///
    /// Both bounds are inclusive here, matching the range query the
    /// persistence layer runs.
    pub fn desires(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.desired_start_range_start <= end && self.desired_start_range_end >= start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 2, h, m, 0).unwrap()
    }

    fn booking(start: DateTime<Utc>, end: DateTime<Utc>, status: BookingStatus) -> Booking {
        Booking {
            id: BookingId::new(1),
            salon_id: SalonId::new(1),
            stylist_id: StylistId::new(1),
            service_id: ServiceId::new(1),
            client_id: UserId::new(1),
            start_at: start,
            end_at: end,
            status,
        }
    }

    #[test]
    fn test_status_activity() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn test_overlap_is_half_open() {
        let existing = booking(at(10, 0), at(11, 0), BookingStatus::Confirmed);

        assert!(existing.overlaps(at(10, 30), at(11, 0)));
        assert!(existing.overlaps(at(9, 30), at(10, 15)));
        // Touching at the boundary is not an overlap.
        assert!(!existing.overlaps(at(11, 0), at(11, 30)));
        assert!(!existing.overlaps(at(9, 0), at(10, 0)));
    }

    #[test]
    fn test_exception_scope_applies() {
        let salon_wide = AvailabilityException {
            id: ExceptionId::new(1),
            scope: ExceptionScope::Salon(SalonId::new(5)),
            date: NaiveDate::from_ymd_opt(2026, 9, 2).unwrap(),
            closed: true,
            reason: None,
        };
        assert!(salon_wide.applies_to(SalonId::new(5), StylistId::new(99)));
        assert!(!salon_wide.applies_to(SalonId::new(6), StylistId::new(99)));

        let stylist_only = AvailabilityException {
            scope: ExceptionScope::Stylist(StylistId::new(3)),
            ..salon_wide
        };
        assert!(stylist_only.applies_to(SalonId::new(5), StylistId::new(3)));
        assert!(!stylist_only.applies_to(SalonId::new(5), StylistId::new(4)));
    }

    #[test]
    fn test_waitlist_window_overlap_is_inclusive() {
        let entry = WaitlistEntry {
            id: WaitlistEntryId::new(1),
            salon_id: SalonId::new(1),
            service_id: ServiceId::new(1),
            client_id: UserId::new(1),
            desired_start_range_start: at(12, 0),
            desired_start_range_end: at(14, 0),
            created_at: at(8, 0),
        };

        assert!(entry.desires(at(14, 0), at(15, 0)));
        assert!(entry.desires(at(11, 0), at(12, 0)));
        assert!(!entry.desires(at(14, 1), at(15, 0)));
    }

    #[test]
    fn test_service_duration() {
        let service = Service {
            id: ServiceId::new(1),
            salon_id: SalonId::new(1),
            name: "Cut".to_string(),
            duration_minutes: 45,
            price_cents: 3500,
        };
        assert_eq!(service.duration(), Duration::minutes(45));
    }
}
