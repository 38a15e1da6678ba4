//! Domain model for the booking engine.
//!
//! The model keeps time handling strongly typed: opening hours are parsed
//! once into [`TimeRange`] values at the boundary, weekly schedules are
//! indexed by [`chrono::Weekday`] so an unknown weekday is unrepresentable,
//! and every instant is a `DateTime<Utc>`.

pub mod entities;
pub mod schedule;
pub mod time;

pub use entities::{
    AvailabilityException, Booking, BookingStatus, ExceptionScope, NewBooking, Salon, Service,
    Stylist, User, WaitlistEntry,
};
pub use schedule::WeeklySchedule;
pub use time::TimeRange;
