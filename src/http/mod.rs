//! HTTP server module for the booking backend.
//!
//! This module exposes the availability and booking engine as a REST API
//! built on axum. It reuses the service layer and repository pattern from
//! the core library; handlers only parse requests, delegate, and map
//! results to JSON.

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
