//! Notification collaborator.
//!
//! Notifications are fire-and-forget: the engine calls the trait and logs a
//! warning when a notifier fails, but its own success never depends on
//! delivery. Email templating is out of scope, so the shipped implementation
//! writes structured log events.

use async_trait::async_trait;

use crate::models::{Booking, WaitlistEntry};

/// Outbound notification hooks invoked by the booking workflows.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_booking_confirmed(&self, booking: &Booking) -> anyhow::Result<()>;

    async fn notify_booking_cancelled(&self, booking: &Booking, reason: &str)
        -> anyhow::Result<()>;

    async fn notify_waitlist_promoted(
        &self,
        booking: &Booking,
        entry: &WaitlistEntry,
    ) -> anyhow::Result<()>;
}

/// Notifier that records events to the log stream.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_booking_confirmed(&self, booking: &Booking) -> anyhow::Result<()> {
        tracing::info!(
            booking = %booking.id,
            client = %booking.client_id,
            start = %booking.start_at,
            "booking confirmed"
        );
        Ok(())
    }

    async fn notify_booking_cancelled(
        &self,
        booking: &Booking,
        reason: &str,
    ) -> anyhow::Result<()> {
        tracing::info!(
            booking = %booking.id,
            client = %booking.client_id,
            reason,
            "booking cancelled"
        );
        Ok(())
    }

    async fn notify_waitlist_promoted(
        &self,
        booking: &Booking,
        entry: &WaitlistEntry,
    ) -> anyhow::Result<()> {
        tracing::info!(
            booking = %booking.id,
            waitlist_entry = %entry.id,
            client = %booking.client_id,
            "waitlist entry promoted to booking"
        );
        Ok(())
    }
}
