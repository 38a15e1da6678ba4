//! Waitlist replacement after a cancellation.
//!
//! When a booking is cancelled, the vacated slot is offered to the waitlist:
//! entries for the same (salon, service) whose desired window overlaps the
//! slot are considered oldest-first. The promotion re-validates admission
//! for the exact vacated slot, because state may have shifted since the
//! cancellation request came in.
//!
//! The whole pass is best-effort: the caller logs and swallows any error so
//! a promotion failure can never fail the cancellation that triggered it.

use std::str::FromStr;

use crate::api::WaitlistEntryId;
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::{Booking, BookingStatus, NewBooking};

use super::availability::can_create_booking;
use super::notifications::Notifier;

/// How many waitlist entries a single cancellation may attempt.
///
/// `FirstMatchOnly` offers the slot to the earliest matching entry only,
/// discarding it on failure without trying the next in line. `TryInOrder`
/// keeps discarding failed entries and attempting the next-oldest until one
/// promotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionPolicy {
    #[default]
    FirstMatchOnly,
    TryInOrder,
}

impl FromStr for PromotionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first-only" | "first" => Ok(Self::FirstMatchOnly),
            "in-order" => Ok(Self::TryInOrder),
            _ => Err(format!("Unknown promotion policy: {}", s)),
        }
    }
}

/// Result of one waitlist replacement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionOutcome {
    /// No waitlist entry desired the vacated slot.
    NoOp,
    /// An entry was promoted into a confirmed booking; any entries discarded
    /// on the way are listed too.
    Promoted {
        booking: Booking,
        entry: WaitlistEntryId,
        discarded: Vec<WaitlistEntryId>,
    },
    /// Matching entries existed but none could take the slot; all attempted
    /// entries were removed as stale.
    Discarded(Vec<WaitlistEntryId>),
}

/// Offer the vacated slot of `cancelled` to the waitlist.
///
/// Runs after the cancellation has been persisted. Errors propagate to the
/// caller, which treats the whole pass as best-effort.
pub async fn process_replacement(
    repo: &dyn FullRepository,
    notifier: &dyn Notifier,
    cancelled: &Booking,
    policy: PromotionPolicy,
    now: chrono::DateTime<chrono::Utc>,
) -> RepositoryResult<PromotionOutcome> {
    let entries = repo
        .waitlist_entries_overlapping(
            cancelled.salon_id,
            cancelled.service_id,
            cancelled.start_at,
            cancelled.end_at,
        )
        .await?;

    if entries.is_empty() {
        return Ok(PromotionOutcome::NoOp);
    }

    let salon = repo.get_salon(cancelled.salon_id).await?;
    let stylist = repo.get_stylist(cancelled.stylist_id).await?;
    let service = repo.get_service(cancelled.service_id).await?;

    let attempts: usize = match policy {
        PromotionPolicy::FirstMatchOnly => 1,
        PromotionPolicy::TryInOrder => entries.len(),
    };

    let mut discarded = Vec::new();
    for entry in entries.into_iter().take(attempts) {
        // Same salon/stylist/service/time as the cancelled booking; only the
        // client changes.
        let admitted = can_create_booking(
            repo,
            &salon,
            &stylist,
            &service,
            cancelled.start_at,
            now,
        )
        .await?;

        if admitted {
            let reservation = repo
                .try_reserve(NewBooking {
                    salon_id: cancelled.salon_id,
                    stylist_id: cancelled.stylist_id,
                    service_id: cancelled.service_id,
                    client_id: entry.client_id,
                    start_at: cancelled.start_at,
                    end_at: cancelled.end_at,
                    status: BookingStatus::Confirmed,
                })
                .await;

            match reservation {
                Ok(booking) => {
                    repo.remove_waitlist_entry(entry.id).await?;
                    if let Err(e) = notifier.notify_waitlist_promoted(&booking, &entry).await {
                        tracing::warn!(error = %e, "waitlist promotion notification failed");
                    }
                    return Ok(PromotionOutcome::Promoted {
                        booking,
                        entry: entry.id,
                        discarded,
                    });
                }
                Err(e) if e.is_conflict() => {
                    // Slot was re-taken between the admission check and the
                    // reservation; treat like any other failed re-validation.
                    tracing::debug!(entry = %entry.id, "slot re-taken before promotion");
                }
                Err(e) => return Err(e),
            }
        }

        // Re-validation failed: the slot is no longer takeable for this
        // entry. Remove it as stale.
        repo.remove_waitlist_entry(entry.id).await?;
        discarded.push(entry.id);
    }

    Ok(PromotionOutcome::Discarded(discarded))
}
