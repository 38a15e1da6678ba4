//! Opening-hours resolution.
//!
//! For a stylist on a given date, the applicable opening ranges are the
//! stylist's override entry for that weekday when it is non-empty, otherwise
//! the salon's entry. The substitution is per weekday: a stylist can
//! override Tuesday and still inherit the salon's Wednesday.

use chrono::{Datelike, NaiveDate};

use crate::models::{Salon, Stylist, TimeRange};

/// Resolve the opening ranges applicable to `stylist` on `date`.
///
/// An empty result means closed that day. The override, when present for
/// the weekday, fully replaces the salon schedule; ranges are never merged.
pub fn applicable_hours(salon: &Salon, stylist: &Stylist, date: NaiveDate) -> Vec<TimeRange> {
    let weekday = date.weekday();

    if let Some(override_hours) = &stylist.override_hours {
        let ranges = override_hours.ranges_for(weekday);
        if !ranges.is_empty() {
            return ranges.to_vec();
        }
    }

    salon.open_hours.ranges_for(weekday).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SalonId, StylistId, UserId};
    use crate::models::WeeklySchedule;
    use chrono::Weekday;

    fn salon(open_hours: WeeklySchedule) -> Salon {
        Salon {
            id: SalonId::new(1),
            owner_id: UserId::new(1),
            name: "Chez Nous".to_string(),
            open_hours,
        }
    }

    fn stylist(override_hours: Option<WeeklySchedule>) -> Stylist {
        Stylist {
            id: StylistId::new(2),
            salon_id: SalonId::new(1),
            user_id: UserId::new(2),
            override_hours,
            skills: Default::default(),
        }
    }

    // 2026-09-02 is a Wednesday.
    const WEDNESDAY: (i32, u32, u32) = (2026, 9, 2);

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(WEDNESDAY.0, WEDNESDAY.1, WEDNESDAY.2).unwrap()
    }

    #[test]
    fn test_salon_hours_when_no_override() {
        let salon = salon(
            WeeklySchedule::new().with_day(Weekday::Wed, TimeRange::parse_all(&["09:00-12:00"])),
        );
        let hours = applicable_hours(&salon, &stylist(None), date());
        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0].to_string(), "09:00-12:00");
    }

    #[test]
    fn test_override_replaces_salon_hours() {
        let salon = salon(
            WeeklySchedule::new()
                .with_day(Weekday::Wed, TimeRange::parse_all(&["09:00-12:00", "14:00-18:00"])),
        );
        let stylist = stylist(Some(
            WeeklySchedule::new().with_day(Weekday::Wed, TimeRange::parse_all(&["10:00-13:00"])),
        ));

        let hours = applicable_hours(&salon, &stylist, date());
        // Full replacement, not a merge with the salon's two ranges.
        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0].to_string(), "10:00-13:00");
    }

    #[test]
    fn test_empty_override_day_falls_back_to_salon() {
        let salon = salon(
            WeeklySchedule::new().with_day(Weekday::Wed, TimeRange::parse_all(&["09:00-12:00"])),
        );
        // Override schedule exists but has no Wednesday entry.
        let stylist = stylist(Some(
            WeeklySchedule::new().with_day(Weekday::Thu, TimeRange::parse_all(&["08:00-16:00"])),
        ));

        let hours = applicable_hours(&salon, &stylist, date());
        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0].to_string(), "09:00-12:00");
    }

    #[test]
    fn test_closed_everywhere_yields_empty() {
        let salon = salon(WeeklySchedule::new());
        assert!(applicable_hours(&salon, &stylist(None), date()).is_empty());
    }

    #[test]
    fn test_override_can_open_a_day_the_salon_is_closed() {
        let salon = salon(WeeklySchedule::new());
        let stylist = stylist(Some(
            WeeklySchedule::new().with_day(Weekday::Wed, TimeRange::parse_all(&["11:00-15:00"])),
        ));

        let hours = applicable_hours(&salon, &stylist, date());
        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0].to_string(), "11:00-15:00");
    }
}
