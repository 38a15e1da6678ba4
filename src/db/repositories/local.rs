//! In-memory repository implementation.
//!
//! `LocalRepository` backs unit tests and local development. All state lives
//! behind a single `parking_lot::RwLock`, which also gives `try_reserve` its
//! critical section: the overlap re-check and the insert happen under one
//! write lock, so two concurrent reservations for the same stylist can never
//! both succeed.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;

use crate::api::{
    BookingId, ExceptionId, SalonId, ServiceId, StylistId, UserId, WaitlistEntryId,
};
use crate::db::repository::{
    BookingRepository, DirectoryRepository, ErrorContext, ExceptionRepository, RepositoryError,
    RepositoryResult, WaitlistRepository,
};
use crate::models::{
    AvailabilityException, Booking, BookingStatus, ExceptionScope, NewBooking, Salon, Service,
    Stylist, User, WaitlistEntry, WeeklySchedule,
};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, User>,
    salons: HashMap<SalonId, Salon>,
    // BTreeMaps where iteration order matters: ids are assigned from one
    // monotonically increasing counter, so id order is insertion order.
    stylists: BTreeMap<StylistId, Stylist>,
    services: HashMap<ServiceId, Service>,
    bookings: BTreeMap<BookingId, Booking>,
    exceptions: Vec<AvailabilityException>,
    waitlist: BTreeMap<WaitlistEntryId, WaitlistEntry>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn active_overlaps(
        &self,
        stylist_id: StylistId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<BookingId>,
    ) -> Vec<Booking> {
        self.bookings
            .values()
            .filter(|b| b.stylist_id == stylist_id)
            .filter(|b| b.is_active())
            .filter(|b| exclude != Some(b.id))
            .filter(|b| b.overlaps(start, end))
            .cloned()
            .collect()
    }
}

/// In-memory implementation of the full repository surface.
#[derive(Debug, Default)]
pub struct LocalRepository {
    inner: RwLock<Inner>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Seeding (plumbing CRUD, out of engine scope) ====

    pub fn add_user(&self, first_name: &str, last_name: &str, email: &str) -> User {
        let mut inner = self.inner.write();
        let user = User {
            id: UserId::new(inner.next_id()),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        };
        inner.users.insert(user.id, user.clone());
        user
    }

    pub fn add_salon(&self, owner_id: UserId, name: &str, open_hours: WeeklySchedule) -> Salon {
        let mut inner = self.inner.write();
        let salon = Salon {
            id: SalonId::new(inner.next_id()),
            owner_id,
            name: name.to_string(),
            open_hours,
        };
        inner.salons.insert(salon.id, salon.clone());
        salon
    }

    pub fn add_stylist(
        &self,
        salon_id: SalonId,
        user_id: UserId,
        override_hours: Option<WeeklySchedule>,
        skills: impl IntoIterator<Item = ServiceId>,
    ) -> Stylist {
        let mut inner = self.inner.write();
        let stylist = Stylist {
            id: StylistId::new(inner.next_id()),
            salon_id,
            user_id,
            override_hours,
            skills: skills.into_iter().collect::<HashSet<_>>(),
        };
        inner.stylists.insert(stylist.id, stylist.clone());
        stylist
    }

    pub fn add_service(
        &self,
        salon_id: SalonId,
        name: &str,
        duration_minutes: u32,
        price_cents: i64,
    ) -> Service {
        let mut inner = self.inner.write();
        let service = Service {
            id: ServiceId::new(inner.next_id()),
            salon_id,
            name: name.to_string(),
            duration_minutes,
            price_cents,
        };
        inner.services.insert(service.id, service.clone());
        service
    }

    pub fn add_exception(
        &self,
        scope: ExceptionScope,
        date: NaiveDate,
        closed: bool,
        reason: Option<&str>,
    ) -> AvailabilityException {
        let mut inner = self.inner.write();
        let exception = AvailabilityException {
            id: ExceptionId::new(inner.next_id()),
            scope,
            date,
            closed,
            reason: reason.map(str::to_string),
        };
        inner.exceptions.push(exception.clone());
        exception
    }

    pub fn add_waitlist_entry(
        &self,
        salon_id: SalonId,
        service_id: ServiceId,
        client_id: UserId,
        desired_start_range_start: DateTime<Utc>,
        desired_start_range_end: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> WaitlistEntry {
        let mut inner = self.inner.write();
        let entry = WaitlistEntry {
            id: WaitlistEntryId::new(inner.next_id()),
            salon_id,
            service_id,
            client_id,
            desired_start_range_start,
            desired_start_range_end,
            created_at,
        };
        inner.waitlist.insert(entry.id, entry.clone());
        entry
    }

    /// Insert a booking directly, bypassing the reservation check. Test and
    /// seed helper for constructing pre-existing state.
    pub fn add_booking(&self, booking: NewBooking) -> Booking {
        let mut inner = self.inner.write();
        let booking = Booking {
            id: BookingId::new(inner.next_id()),
            salon_id: booking.salon_id,
            stylist_id: booking.stylist_id,
            service_id: booking.service_id,
            client_id: booking.client_id,
            start_at: booking.start_at,
            end_at: booking.end_at,
            status: booking.status,
        };
        inner.bookings.insert(booking.id, booking.clone());
        booking
    }

    /// Snapshot of all bookings, in id order. Test helper.
    pub fn bookings(&self) -> Vec<Booking> {
        self.inner.read().bookings.values().cloned().collect()
    }

    /// Snapshot of all waitlist entries, in id order. Test helper.
    pub fn waitlist_entries(&self) -> Vec<WaitlistEntry> {
        self.inner.read().waitlist.values().cloned().collect()
    }
}

#[async_trait]
impl DirectoryRepository for LocalRepository {
    async fn get_salon(&self, id: SalonId) -> RepositoryResult<Salon> {
        self.inner.read().salons.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("salon {}", id),
                ErrorContext::new("get_salon")
                    .with_entity("salon")
                    .with_entity_id(id),
            )
        })
    }

    async fn get_stylist(&self, id: StylistId) -> RepositoryResult<Stylist> {
        self.inner.read().stylists.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("stylist {}", id),
                ErrorContext::new("get_stylist")
                    .with_entity("stylist")
                    .with_entity_id(id),
            )
        })
    }

    async fn get_service(&self, id: ServiceId) -> RepositoryResult<Service> {
        self.inner.read().services.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("service {}", id),
                ErrorContext::new("get_service")
                    .with_entity("service")
                    .with_entity_id(id),
            )
        })
    }

    async fn get_user(&self, id: UserId) -> RepositoryResult<User> {
        self.inner.read().users.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("user {}", id),
                ErrorContext::new("get_user")
                    .with_entity("user")
                    .with_entity_id(id),
            )
        })
    }

    async fn stylists_for_salon(&self, salon_id: SalonId) -> RepositoryResult<Vec<Stylist>> {
        Ok(self
            .inner
            .read()
            .stylists
            .values()
            .filter(|s| s.salon_id == salon_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn get_booking(&self, id: BookingId) -> RepositoryResult<Booking> {
        self.inner.read().bookings.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("booking {}", id),
                ErrorContext::new("get_booking")
                    .with_entity("booking")
                    .with_entity_id(id),
            )
        })
    }

    async fn find_overlapping_bookings(
        &self,
        stylist_id: StylistId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<BookingId>,
    ) -> RepositoryResult<Vec<Booking>> {
        Ok(self
            .inner
            .read()
            .active_overlaps(stylist_id, start, end, exclude))
    }

    async fn try_reserve(&self, booking: NewBooking) -> RepositoryResult<Booking> {
        if booking.start_at >= booking.end_at {
            return Err(RepositoryError::validation(format!(
                "booking interval is empty or inverted: {} >= {}",
                booking.start_at, booking.end_at
            )));
        }

        // Overlap re-check and insert under one write lock.
        let mut inner = self.inner.write();
        let clash = inner
            .active_overlaps(booking.stylist_id, booking.start_at, booking.end_at, None)
            .into_iter()
            .next();
        if let Some(existing) = clash {
            return Err(RepositoryError::conflict_with_context(
                format!(
                    "slot [{}, {}) already taken for stylist {}",
                    booking.start_at, booking.end_at, booking.stylist_id
                ),
                ErrorContext::new("try_reserve")
                    .with_entity("booking")
                    .with_entity_id(existing.id),
            ));
        }

        let booking = Booking {
            id: BookingId::new(inner.next_id()),
            salon_id: booking.salon_id,
            stylist_id: booking.stylist_id,
            service_id: booking.service_id,
            client_id: booking.client_id,
            start_at: booking.start_at,
            end_at: booking.end_at,
            status: booking.status,
        };
        inner.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn cancel_booking(&self, id: BookingId) -> RepositoryResult<Booking> {
        let mut inner = self.inner.write();
        let booking = inner.bookings.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("booking {}", id),
                ErrorContext::new("cancel_booking")
                    .with_entity("booking")
                    .with_entity_id(id),
            )
        })?;
        booking.status = BookingStatus::Cancelled;
        Ok(booking.clone())
    }
}

#[async_trait]
impl ExceptionRepository for LocalRepository {
    async fn exceptions_for_date(
        &self,
        date: NaiveDate,
        salon_id: SalonId,
        stylist_id: StylistId,
    ) -> RepositoryResult<Vec<AvailabilityException>> {
        Ok(self
            .inner
            .read()
            .exceptions
            .iter()
            .filter(|e| e.date == date)
            .filter(|e| e.applies_to(salon_id, stylist_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl WaitlistRepository for LocalRepository {
    async fn waitlist_entries_overlapping(
        &self,
        salon_id: SalonId,
        service_id: ServiceId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<WaitlistEntry>> {
        let mut entries: Vec<WaitlistEntry> = self
            .inner
            .read()
            .waitlist
            .values()
            .filter(|w| w.salon_id == salon_id && w.service_id == service_id)
            .filter(|w| w.desires(start, end))
            .cloned()
            .collect();
        // FIFO by registration time; ties fall back to id (insertion) order.
        entries.sort_by_key(|w| (w.created_at, w.id));
        Ok(entries)
    }

    async fn remove_waitlist_entry(&self, id: WaitlistEntryId) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        if inner.waitlist.remove(&id).is_none() {
            return Err(RepositoryError::not_found_with_context(
                format!("waitlist entry {}", id),
                ErrorContext::new("remove_waitlist_entry")
                    .with_entity("waitlist_entry")
                    .with_entity_id(id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 2, h, m, 0).unwrap()
    }

    fn new_booking(stylist: StylistId, start: DateTime<Utc>, end: DateTime<Utc>) -> NewBooking {
        NewBooking {
            salon_id: SalonId::new(1),
            stylist_id: stylist,
            service_id: ServiceId::new(1),
            client_id: UserId::new(1),
            start_at: start,
            end_at: end,
            status: BookingStatus::Confirmed,
        }
    }

    #[tokio::test]
    async fn test_get_salon_not_found() {
        let repo = LocalRepository::new();
        let err = repo.get_salon(SalonId::new(404)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_try_reserve_rejects_overlap() {
        let repo = LocalRepository::new();
        let stylist = StylistId::new(1);

        repo.try_reserve(new_booking(stylist, at(10, 0), at(11, 0)))
            .await
            .unwrap();
        let err = repo
            .try_reserve(new_booking(stylist, at(10, 30), at(11, 30)))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // Back-to-back is fine: boundaries are exclusive.
        repo.try_reserve(new_booking(stylist, at(11, 0), at(12, 0)))
            .await
            .unwrap();
        assert_eq!(repo.bookings().len(), 2);
    }

    #[tokio::test]
    async fn test_try_reserve_ignores_cancelled_bookings() {
        let repo = LocalRepository::new();
        let stylist = StylistId::new(1);

        let first = repo
            .try_reserve(new_booking(stylist, at(10, 0), at(11, 0)))
            .await
            .unwrap();
        repo.cancel_booking(first.id).await.unwrap();

        repo.try_reserve(new_booking(stylist, at(10, 0), at(11, 0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_try_reserve_rejects_inverted_interval() {
        let repo = LocalRepository::new();
        let err = repo
            .try_reserve(new_booking(StylistId::new(1), at(11, 0), at(10, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_other_stylists_do_not_conflict() {
        let repo = LocalRepository::new();
        repo.try_reserve(new_booking(StylistId::new(1), at(10, 0), at(11, 0)))
            .await
            .unwrap();
        repo.try_reserve(new_booking(StylistId::new(2), at(10, 0), at(11, 0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancel_booking_is_idempotent() {
        let repo = LocalRepository::new();
        let booking = repo
            .try_reserve(new_booking(StylistId::new(1), at(10, 0), at(11, 0)))
            .await
            .unwrap();

        let cancelled = repo.cancel_booking(booking.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        let again = repo.cancel_booking(booking.id).await.unwrap();
        assert_eq!(again.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_find_overlapping_respects_exclude() {
        let repo = LocalRepository::new();
        let stylist = StylistId::new(1);
        let booking = repo
            .try_reserve(new_booking(stylist, at(10, 0), at(11, 0)))
            .await
            .unwrap();

        let hits = repo
            .find_overlapping_bookings(stylist, at(10, 0), at(11, 0), None)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let hits = repo
            .find_overlapping_bookings(stylist, at(10, 0), at(11, 0), Some(booking.id))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_exceptions_scoped_to_other_stylists_are_filtered() {
        let repo = LocalRepository::new();
        let date = NaiveDate::from_ymd_opt(2026, 9, 2).unwrap();
        let salon = SalonId::new(1);

        repo.add_exception(
            ExceptionScope::Stylist(StylistId::new(7)),
            date,
            true,
            Some("vacation"),
        );
        repo.add_exception(ExceptionScope::Salon(salon), date, false, None);

        let for_other = repo
            .exceptions_for_date(date, salon, StylistId::new(8))
            .await
            .unwrap();
        assert_eq!(for_other.len(), 1);
        assert!(matches!(for_other[0].scope, ExceptionScope::Salon(_)));

        let for_seven = repo
            .exceptions_for_date(date, salon, StylistId::new(7))
            .await
            .unwrap();
        assert_eq!(for_seven.len(), 2);
    }

    #[tokio::test]
    async fn test_waitlist_entries_come_back_fifo() {
        let repo = LocalRepository::new();
        let salon = SalonId::new(1);
        let service = ServiceId::new(2);

        let later = repo.add_waitlist_entry(
            salon,
            service,
            UserId::new(10),
            at(9, 0),
            at(18, 0),
            at(8, 30),
        );
        let earlier = repo.add_waitlist_entry(
            salon,
            service,
            UserId::new(11),
            at(9, 0),
            at(18, 0),
            at(8, 0),
        );

        let entries = repo
            .waitlist_entries_overlapping(salon, service, at(14, 0), at(15, 0))
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, earlier.id);
        assert_eq!(entries[1].id, later.id);
    }

    #[tokio::test]
    async fn test_waitlist_window_filter() {
        let repo = LocalRepository::new();
        let salon = SalonId::new(1);
        let service = ServiceId::new(2);

        repo.add_waitlist_entry(
            salon,
            service,
            UserId::new(10),
            at(9, 0),
            at(10, 0),
            at(8, 0),
        );

        let entries = repo
            .waitlist_entries_overlapping(salon, service, at(14, 0), at(15, 0))
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_remove_waitlist_entry_twice_fails() {
        let repo = LocalRepository::new();
        let entry = repo.add_waitlist_entry(
            SalonId::new(1),
            ServiceId::new(1),
            UserId::new(1),
            at(9, 0),
            at(18, 0),
            at(8, 0),
        );

        repo.remove_waitlist_entry(entry.id).await.unwrap();
        assert!(repo
            .remove_waitlist_entry(entry.id)
            .await
            .unwrap_err()
            .is_not_found());
    }
}
