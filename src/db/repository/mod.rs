//! Repository trait definitions.
//!
//! The traits are the seam between the booking engine and storage. The
//! engine only ever talks to `&dyn FullRepository`; the shipped backend is
//! the in-memory [`LocalRepository`](crate::db::repositories::LocalRepository),
//! and a SQL implementation would plug in behind the same traits.

pub mod error;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::api::{BookingId, SalonId, ServiceId, StylistId, UserId, WaitlistEntryId};
use crate::models::{
    AvailabilityException, Booking, NewBooking, Salon, Service, Stylist, User, WaitlistEntry,
};

/// Entity lookups and relationship navigation.
///
/// Every getter returns a distinct `NotFound` error for an unknown id, so
/// callers can surface "salon not found" separately from "slot unavailable".
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn get_salon(&self, id: SalonId) -> RepositoryResult<Salon>;

    async fn get_stylist(&self, id: StylistId) -> RepositoryResult<Stylist>;

    async fn get_service(&self, id: ServiceId) -> RepositoryResult<Service>;

    async fn get_user(&self, id: UserId) -> RepositoryResult<User>;

    /// All stylists employed by a salon, in insertion order.
    async fn stylists_for_salon(&self, salon_id: SalonId) -> RepositoryResult<Vec<Stylist>>;
}

/// Booking storage and the overlap queries the conflict checker needs.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_booking(&self, id: BookingId) -> RepositoryResult<Booking>;

    /// Active (pending or confirmed) bookings of a stylist overlapping
    /// `[start, end)` under the half-open test, optionally excluding one
    /// booking id.
    async fn find_overlapping_bookings(
        &self,
        stylist_id: StylistId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<BookingId>,
    ) -> RepositoryResult<Vec<Booking>>;

    /// Atomically insert a booking, re-checking the stylist's active
    /// bookings for overlap inside the same critical section.
    ///
    /// Returns `RepositoryError::Conflict` when the slot was taken between
    /// the caller's admission check and this insert. This is the single
    /// write path that protects the non-overlap invariant.
    async fn try_reserve(&self, booking: NewBooking) -> RepositoryResult<Booking>;

    /// Transition an active booking to CANCELLED and return the updated
    /// booking. Cancelling an already cancelled booking is a no-op that
    /// returns the booking unchanged.
    async fn cancel_booking(&self, id: BookingId) -> RepositoryResult<Booking>;
}

/// Date-scoped availability exceptions.
#[async_trait]
pub trait ExceptionRepository: Send + Sync {
    /// Exceptions dated exactly on `date` whose scope is the given salon or
    /// the given stylist. Exceptions scoped to *other* stylists of the same
    /// salon are not returned.
    async fn exceptions_for_date(
        &self,
        date: NaiveDate,
        salon_id: SalonId,
        stylist_id: StylistId,
    ) -> RepositoryResult<Vec<AvailabilityException>>;
}

/// Waitlist entries and the window-overlap query promotion runs on.
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Entries for (salon, service) whose desired window overlaps
    /// `[start, end]` (inclusive bounds), ordered by `created_at` ascending
    /// so the head of the list is the FIFO winner.
    async fn waitlist_entries_overlapping(
        &self,
        salon_id: SalonId,
        service_id: ServiceId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<WaitlistEntry>>;

    /// Remove an entry, either after promotion or when found stale.
    async fn remove_waitlist_entry(&self, id: WaitlistEntryId) -> RepositoryResult<()>;
}

/// Convenience supertrait combining every repository capability.
///
/// The application state holds an `Arc<dyn FullRepository>`.
pub trait FullRepository:
    DirectoryRepository + BookingRepository + ExceptionRepository + WaitlistRepository
{
}

impl<T> FullRepository for T where
    T: DirectoryRepository + BookingRepository + ExceptionRepository + WaitlistRepository
{
}
