use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use crate::tour::Tour;

/// Window used for tours authored without a schedule
pub const FALLBACK_WINDOW_DAYS: u32 = 60;

/// Compute the bookable calendar dates for a tour.
///
/// `reference_now` is injected rather than read from the clock; its UTC calendar
/// date is "today" and time of day is discarded. Exactly `advance_booking_days`
/// consecutive days starting today are examined (60 when the tour has no
/// schedule), and the result is ordered ascending.
///
/// Never cached: today moves, so callers recompute on every query.
pub fn compute_available_dates(tour: &Tour, reference_now: DateTime<Utc>) -> BTreeSet<NaiveDate> {
    let today = reference_now.date_naive();

    match &tour.schedule {
        None => window(today, FALLBACK_WINDOW_DAYS)
            .filter(|date| date.weekday() != Weekday::Sun)
            .collect(),
        Some(schedule) => window(today, schedule.advance_booking_days)
            .filter(|date| schedule.runs_on(date.weekday()))
            .filter(|date| !schedule.is_blocked(*date))
            .collect(),
    }
}

/// Whether `date` is bookable for `tour` as of `reference_now`
pub fn is_date_available(tour: &Tour, date: NaiveDate, reference_now: DateTime<Utc>) -> bool {
    compute_available_dates(tour, reference_now).contains(&date)
}

fn window(start: NaiveDate, days: u32) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(days as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::{TimeSlot, TourSchedule};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tour_with(schedule: Option<TourSchedule>) -> Tour {
        Tour {
            id: "test-tour".to_string(),
            title: "Test Tour".to_string(),
            short_description: "For testing".to_string(),
            price: 100,
            duration_hours: 2.0,
            image: "/test.jpg".to_string(),
            details: "Details".to_string(),
            schedule,
        }
    }

    fn saturday_march_8() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 8, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_blocked_date_and_sunday_excluded() {
        let schedule = TourSchedule {
            available_days: [1, 2, 3, 4, 5, 6].into_iter().collect(),
            time_slots: vec![TimeSlot::new("09:00", 10)],
            blocked_dates: [date(2025, 3, 10)].into_iter().collect(),
            advance_booking_days: 5,
        };
        let dates = compute_available_dates(&tour_with(Some(schedule)), saturday_march_8());

        let expected: BTreeSet<_> = [date(2025, 3, 8), date(2025, 3, 11), date(2025, 3, 12)]
            .into_iter()
            .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_scheduled_window_bounds() {
        let schedule = TourSchedule {
            available_days: (0..=6).collect(),
            time_slots: vec![],
            blocked_dates: BTreeSet::new(),
            advance_booking_days: 14,
        };
        let now = saturday_march_8();
        let dates = compute_available_dates(&tour_with(Some(schedule)), now);

        // Every day runs, so the result is exactly the examined window.
        assert_eq!(dates.len(), 14);
        assert_eq!(dates.first(), Some(&date(2025, 3, 8)));
        assert_eq!(dates.last(), Some(&date(2025, 3, 21)));
    }

    #[test]
    fn test_never_returns_unscheduled_weekday_or_blocked_date() {
        let blocked: BTreeSet<_> = [date(2025, 3, 12), date(2025, 3, 26)].into_iter().collect();
        let schedule = TourSchedule {
            available_days: [3, 5].into_iter().collect(),
            time_slots: vec![],
            blocked_dates: blocked.clone(),
            advance_booking_days: 45,
        };
        let dates = compute_available_dates(&tour_with(Some(schedule)), saturday_march_8());

        assert!(!dates.is_empty());
        for d in &dates {
            assert!(matches!(d.weekday(), Weekday::Wed | Weekday::Fri), "{d} is a {}", d.weekday());
            assert!(!blocked.contains(d));
        }
    }

    #[test]
    fn test_fallback_excludes_sundays_over_sixty_days() {
        let dates = compute_available_dates(&tour_with(None), saturday_march_8());

        // 2025-03-08 ..= 2025-05-06 holds nine Sundays.
        assert_eq!(dates.len(), 51);
        assert_eq!(dates.first(), Some(&date(2025, 3, 8)));
        assert_eq!(dates.last(), Some(&date(2025, 5, 6)));
        assert!(dates.iter().all(|d| d.weekday() != Weekday::Sun));
    }

    #[test]
    fn test_empty_available_days_yields_empty_set() {
        let schedule = TourSchedule {
            available_days: BTreeSet::new(),
            time_slots: vec![TimeSlot::new("09:00", 10)],
            blocked_dates: BTreeSet::new(),
            advance_booking_days: 60,
        };
        assert!(compute_available_dates(&tour_with(Some(schedule)), saturday_march_8()).is_empty());
    }

    #[test]
    fn test_time_of_day_is_discarded() {
        let late = Utc.with_ymd_and_hms(2025, 3, 8, 23, 59, 59).unwrap();
        let tour = tour_with(None);
        assert!(is_date_available(&tour, date(2025, 3, 8), late));
        assert!(!is_date_available(&tour, date(2025, 3, 7), late));
        assert!(!is_date_available(&tour, date(2025, 3, 9), late));
    }
}
