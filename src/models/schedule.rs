//! Weekly opening schedules.
//!
//! A schedule maps each weekday to an ordered list of opening ranges. The
//! storage is a fixed 7-entry array indexed by [`chrono::Weekday`] (Monday
//! first), so there is no way to address an unknown weekday. A day with no
//! entry means closed.

use std::collections::HashMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::time::TimeRange;

/// Opening hours for a full week, one entry per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: [Vec<TimeRange>; 7],
}

impl WeeklySchedule {
    /// An empty schedule: closed every day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schedule from a weekday-name keyed map of raw range strings,
    /// the shape the persistence boundary and the public API use.
    ///
    /// Unknown weekday keys and malformed range strings are skipped.
    pub fn from_map<S: AsRef<str>>(map: &HashMap<String, Vec<S>>) -> Self {
        let mut schedule = Self::new();
        for (day, ranges) in map {
            if let Some(weekday) = parse_weekday(day) {
                schedule.days[day_index(weekday)] = TimeRange::parse_all(ranges);
            }
        }
        schedule
    }

    /// Replace the ranges for one weekday.
    pub fn set(&mut self, weekday: Weekday, ranges: Vec<TimeRange>) {
        self.days[day_index(weekday)] = ranges;
    }

    /// Builder-style variant of [`set`](Self::set), handy in tests and seeds.
    pub fn with_day(mut self, weekday: Weekday, ranges: Vec<TimeRange>) -> Self {
        self.set(weekday, ranges);
        self
    }

    /// Opening ranges for a weekday. Empty slice means closed that day.
    pub fn ranges_for(&self, weekday: Weekday) -> &[TimeRange] {
        &self.days[day_index(weekday)]
    }

    /// True when the schedule has no open ranges on the given weekday.
    pub fn is_closed_on(&self, weekday: Weekday) -> bool {
        self.ranges_for(weekday).is_empty()
    }
}

fn day_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.trim().to_ascii_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(day, ranges)| {
                (
                    day.to_string(),
                    ranges.iter().map(|r| r.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_schedule_is_closed_all_week() {
        let schedule = WeeklySchedule::new();
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert!(schedule.is_closed_on(weekday));
        }
    }

    #[test]
    fn test_from_map_parses_known_days() {
        let schedule = WeeklySchedule::from_map(&map(&[
            ("wednesday", &["09:00-12:00", "14:00-18:00"]),
            ("saturday", &["10:00-16:00"]),
        ]));

        assert_eq!(schedule.ranges_for(Weekday::Wed).len(), 2);
        assert_eq!(schedule.ranges_for(Weekday::Sat).len(), 1);
        assert!(schedule.is_closed_on(Weekday::Mon));
    }

    #[test]
    fn test_from_map_skips_unknown_day_and_bad_ranges() {
        let schedule = WeeklySchedule::from_map(&map(&[
            ("funday", &["09:00-12:00"]),
            ("monday", &["not-a-range", "09:00-17:00"]),
        ]));

        assert_eq!(schedule.ranges_for(Weekday::Mon).len(), 1);
        // The unknown key contributed nothing anywhere.
        assert!(schedule.is_closed_on(Weekday::Sun));
    }

    #[test]
    fn test_from_map_is_case_insensitive() {
        let schedule = WeeklySchedule::from_map(&map(&[("Tuesday", &["08:00-13:00"])]));
        assert_eq!(schedule.ranges_for(Weekday::Tue).len(), 1);
    }

    #[test]
    fn test_set_replaces_existing_ranges() {
        let mut schedule =
            WeeklySchedule::new().with_day(Weekday::Fri, TimeRange::parse_all(&["09:00-12:00"]));
        schedule.set(Weekday::Fri, TimeRange::parse_all(&["13:00-20:00"]));

        let ranges = schedule.ranges_for(Weekday::Fri);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].to_string(), "13:00-20:00");
    }
}
