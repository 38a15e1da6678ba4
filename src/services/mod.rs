//! Business logic for availability, bookings and the waitlist.
//!
//! Services are free async functions over repository references. They hold
//! no state of their own; everything durable lives behind the repository
//! traits and everything outbound behind [`notifications::Notifier`].

pub mod availability;
pub mod bookings;
pub mod notifications;
pub mod schedule_resolver;
pub mod slots;
pub mod waitlist;

pub use availability::{
    admission, can_create_booking, is_exception_closed, is_slot_available, list_available_slots,
    Admission, RejectionReason, StylistSlots,
};
pub use bookings::{cancel_booking, create_booking, BookingError, BookingRequest};
pub use notifications::{LogNotifier, Notifier};
pub use schedule_resolver::applicable_hours;
pub use slots::{CandidateSlots, SLOT_STEP_MINUTES};
pub use waitlist::{process_replacement, PromotionOutcome, PromotionPolicy};
