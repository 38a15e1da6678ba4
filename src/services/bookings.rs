//! Booking creation and cancellation workflows.
//!
//! These functions orchestrate the admission engine, the repository and the
//! notification collaborator. Creation only persists through the
//! repository's atomic `try_reserve`, so the admission check and the insert
//! cannot be interleaved by a concurrent request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{BookingId, SalonId, ServiceId, StylistId, UserId};
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{Booking, BookingStatus, NewBooking};

use super::availability::admission;
use super::notifications::Notifier;
use super::waitlist::{process_replacement, PromotionPolicy};

/// Errors surfaced by the booking workflows.
///
/// Which of the admission sub-checks failed is deliberately not exposed:
/// every rejection is the single generic `SlotUnavailable`.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("slot unavailable")]
    SlotUnavailable,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A client's request to book a slot. The end time is derived from the
/// service duration, never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub salon_id: SalonId,
    pub stylist_id: StylistId,
    pub service_id: ServiceId,
    pub client_id: UserId,
    pub start_at: DateTime<Utc>,
}

/// Admit and persist a new CONFIRMED booking.
///
/// Unknown ids surface as distinct not-found errors; any admission failure
/// or reservation conflict collapses into [`BookingError::SlotUnavailable`].
pub async fn create_booking(
    repo: &dyn FullRepository,
    notifier: &dyn Notifier,
    request: &BookingRequest,
    now: DateTime<Utc>,
) -> Result<Booking, BookingError> {
    let salon = repo.get_salon(request.salon_id).await?;
    let stylist = repo.get_stylist(request.stylist_id).await?;
    let service = repo.get_service(request.service_id).await?;
    let client = repo.get_user(request.client_id).await?;

    let decision = admission(repo, &salon, &stylist, &service, request.start_at, now).await?;
    if !decision.is_accepted() {
        tracing::debug!(?decision, client = %client.id, "booking rejected");
        return Err(BookingError::SlotUnavailable);
    }

    let reservation = repo
        .try_reserve(NewBooking {
            salon_id: salon.id,
            stylist_id: stylist.id,
            service_id: service.id,
            client_id: client.id,
            start_at: request.start_at,
            end_at: request.start_at + service.duration(),
            status: BookingStatus::Confirmed,
        })
        .await;

    let booking = match reservation {
        Ok(booking) => booking,
        // Lost the race against a concurrent reservation.
        Err(e) if e.is_conflict() => return Err(BookingError::SlotUnavailable),
        Err(e) => return Err(e.into()),
    };

    if let Err(e) = notifier.notify_booking_confirmed(&booking).await {
        tracing::warn!(booking = %booking.id, error = %e, "confirmation notification failed");
    }

    Ok(booking)
}

/// Cancel a booking and run the waitlist replacement pass.
///
/// The replacement pass is best-effort: once the CANCELLED status is
/// persisted the cancellation has succeeded, whatever happens downstream.
/// Cancelling an already cancelled booking is a no-op and does not trigger
/// a second replacement pass.
pub async fn cancel_booking(
    repo: &dyn FullRepository,
    notifier: &dyn Notifier,
    booking_id: BookingId,
    reason: &str,
    policy: PromotionPolicy,
    now: DateTime<Utc>,
) -> Result<Booking, BookingError> {
    let booking = repo.get_booking(booking_id).await?;
    if booking.status == BookingStatus::Cancelled {
        return Ok(booking);
    }

    let cancelled = repo.cancel_booking(booking_id).await?;

    if let Err(e) = notifier.notify_booking_cancelled(&cancelled, reason).await {
        tracing::warn!(booking = %cancelled.id, error = %e, "cancellation notification failed");
    }

    match process_replacement(repo, notifier, &cancelled, policy, now).await {
        Ok(outcome) => {
            tracing::debug!(booking = %cancelled.id, ?outcome, "waitlist replacement finished")
        }
        Err(e) => {
            tracing::warn!(booking = %cancelled.id, error = %e, "waitlist replacement failed")
        }
    }

    Ok(cancelled)
}
