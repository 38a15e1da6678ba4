//! Repository implementations module.
//!
//! This module contains implementations of the repository traits:
//! - `local`: In-memory implementation for unit testing and local development
//!
//! A SQL-backed implementation would live here as a sibling module behind
//! its own feature flag.
pub mod local;

pub use local::LocalRepository;
