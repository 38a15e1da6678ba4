//! # Salon Booking Backend
//!
//! Availability and booking-conflict engine for a salon booking service.
//!
//! The crate decides, for a salon/stylist/service/time combination, whether a
//! booking may exist, computes the set of free time slots for a day, and
//! resolves the consequence of a cancellation (waitlist promotion). The REST
//! API is exposed via Axum.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes shared across layers
//! - [`models`]: Domain model (schedules, entities, time ranges)
//! - [`db`]: Repository pattern and persistence layer
//! - [`services`]: Business logic (slot listing, admission, waitlist)
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Core invariant
//!
//! For a given stylist, the set of active (pending or confirmed) bookings is
//! pairwise non-overlapping in time. Every admission path funnels through
//! [`services::availability`] and the repository's atomic `try_reserve` to
//! protect that property.

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
