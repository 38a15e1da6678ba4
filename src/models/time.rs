//! Time-of-day ranges for opening hours.
//!
//! Opening hours arrive at the boundary as `"HH:MM-HH:MM"` strings. They are
//! parsed once into [`TimeRange`] values; malformed strings are skipped, not
//! fatal, so a single bad entry never takes a whole schedule down.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A time-of-day interval within a single day, `start..end`.
///
/// The range carries no date; it is anchored to a concrete date when slots
/// are generated or a booking is checked for containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parse a `"HH:MM-HH:MM"` string.
    ///
    /// Returns `None` when the separator is missing or either side does not
    /// parse as a time of day. Callers skip `None` entries.
    pub fn parse(raw: &str) -> Option<Self> {
        let (start, end) = raw.split_once('-')?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
        Some(Self { start, end })
    }

    /// Parse a list of raw range strings, dropping malformed entries.
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Vec<Self> {
        raw.iter().filter_map(|s| Self::parse(s.as_ref())).collect()
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
