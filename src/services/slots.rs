//! Candidate slot generation.
//!
//! Given a day's opening ranges and a service duration, candidate start
//! instants are offered on a fixed 15-minute grid, independent of the
//! duration: a 90-minute service still gets a candidate every 15 minutes.
//! The iterator is lazy and finite; each range contributes candidates only
//! while the full service fits before the range closes, and candidates at
//! or before `now` are dropped.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::TimeRange;

/// Spacing between candidate start times, in minutes.
pub const SLOT_STEP_MINUTES: i64 = 15;

/// Lazy iterator over candidate start instants for one day.
#[derive(Debug)]
pub struct CandidateSlots {
    date: NaiveDate,
    ranges: std::vec::IntoIter<TimeRange>,
    duration: Duration,
    now: DateTime<Utc>,
    // Cursor within the current range; None until the next range is opened.
    cursor: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl CandidateSlots {
    pub fn new(
        date: NaiveDate,
        ranges: Vec<TimeRange>,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            date,
            ranges: ranges.into_iter(),
            duration,
            now,
            cursor: None,
        }
    }

    fn open_next_range(&mut self) -> bool {
        for range in self.ranges.by_ref() {
            let start = self.date.and_time(range.start).and_utc();
            let end = self.date.and_time(range.end).and_utc();
            if start + self.duration <= end {
                self.cursor = Some((start, end));
                return true;
            }
            // Range too short for the service (or inverted); skip entirely.
        }
        false
    }
}

impl Iterator for CandidateSlots {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (candidate, end) = match self.cursor {
                Some(cursor) => cursor,
                None => {
                    if !self.open_next_range() {
                        return None;
                    }
                    continue;
                }
            };

            if candidate + self.duration > end {
                // Current range exhausted; move on.
                self.cursor = None;
                continue;
            }

            self.cursor = Some((candidate + Duration::minutes(SLOT_STEP_MINUTES), end));

            // Candidates at or before the current instant are never offered.
            if candidate > self.now {
                return Some(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 2).unwrap()
    }

    fn early_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 2, 6, 0, 0).unwrap()
    }

    fn slot_strings(slots: CandidateSlots) -> Vec<String> {
        slots.map(|s| s.format("%H:%M").to_string()).collect()
    }

    #[test]
    fn test_fifteen_minute_grid_for_sixty_minute_service() {
        let slots = CandidateSlots::new(
            date(),
            TimeRange::parse_all(&["09:00-12:00"]),
            Duration::minutes(60),
            early_now(),
        );
        let starts = slot_strings(slots);

        // First 09:00, last 11:00, every 15 minutes.
        assert_eq!(starts.first().unwrap(), "09:00");
        assert_eq!(starts.last().unwrap(), "11:00");
        assert_eq!(starts.len(), 9);
        assert_eq!(starts[1], "09:15");
    }

    #[test]
    fn test_step_is_independent_of_duration() {
        let slots = CandidateSlots::new(
            date(),
            TimeRange::parse_all(&["09:00-12:00"]),
            Duration::minutes(90),
            early_now(),
        );
        let starts = slot_strings(slots);

        assert_eq!(starts.first().unwrap(), "09:00");
        assert_eq!(starts[1], "09:15");
        // Last candidate where 90 minutes still fit before 12:00.
        assert_eq!(starts.last().unwrap(), "10:30");
    }

    #[test]
    fn test_candidates_at_or_before_now_are_dropped() {
        let now = Utc.with_ymd_and_hms(2026, 9, 2, 9, 30, 0).unwrap();
        let slots = CandidateSlots::new(
            date(),
            TimeRange::parse_all(&["09:00-12:00"]),
            Duration::minutes(60),
            now,
        );
        let starts = slot_strings(slots);

        // 09:30 itself is excluded ("exactly now" never qualifies).
        assert_eq!(starts.first().unwrap(), "09:45");
    }

    #[test]
    fn test_multiple_ranges_in_order() {
        let slots = CandidateSlots::new(
            date(),
            TimeRange::parse_all(&["09:00-10:00", "14:00-15:00"]),
            Duration::minutes(30),
            early_now(),
        );
        let starts = slot_strings(slots);

        assert_eq!(starts, vec!["09:00", "09:15", "09:30", "14:00", "14:15", "14:30"]);
    }

    #[test]
    fn test_range_shorter_than_duration_yields_nothing() {
        let slots = CandidateSlots::new(
            date(),
            TimeRange::parse_all(&["09:00-09:30"]),
            Duration::minutes(60),
            early_now(),
        );
        assert_eq!(slots.count(), 0);
    }

    #[test]
    fn test_inverted_range_yields_nothing() {
        let slots = CandidateSlots::new(
            date(),
            TimeRange::parse_all(&["12:00-09:00"]),
            Duration::minutes(30),
            early_now(),
        );
        assert_eq!(slots.count(), 0);
    }

    #[test]
    fn test_exact_fit_emits_single_candidate() {
        let slots = CandidateSlots::new(
            date(),
            TimeRange::parse_all(&["09:00-10:00"]),
            Duration::minutes(60),
            early_now(),
        );
        let starts = slot_strings(slots);
        assert_eq!(starts, vec!["09:00"]);
    }
}
