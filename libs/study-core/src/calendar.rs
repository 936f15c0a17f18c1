//! Study-day arithmetic.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Calendar date of the study day containing `at`.
///
/// A study day starts at `daily_reset_hour` (UTC), so a timestamp before the
/// reset hour belongs to the previous date.
pub fn study_day(at: DateTime<Utc>, daily_reset_hour: u32) -> NaiveDate {
    (at - Duration::hours(i64::from(daily_reset_hour.min(23)))).date_naive()
}

/// Length of the run of consecutive study days ending at the latest date.
///
/// Today's date is left out before scanning. Dates are deduplicated, then
/// walked from the most recent backward while each step is exactly one day.
pub fn streak_days<I>(dates: I, now: DateTime<Utc>, daily_reset_hour: u32) -> usize
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let today = study_day(now, daily_reset_hour);
    let days: BTreeSet<NaiveDate> = dates
        .into_iter()
        .map(|at| study_day(at, daily_reset_hour))
        .filter(|day| *day != today)
        .collect();

    let mut newest_first = days.iter().rev();
    let Some(mut current) = newest_first.next() else {
        return 0;
    };

    let mut streak = 1;
    for previous in newest_first {
        if current.signed_duration_since(*previous).num_days() != 1 {
            break;
        }
        streak += 1;
        current = previous;
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn midnight_reset_uses_calendar_date() {
        assert_eq!(study_day(at(2024, 6, 1, 0), 0), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn before_reset_hour_counts_as_previous_day() {
        assert_eq!(study_day(at(2024, 6, 1, 3), 4), NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert_eq!(study_day(at(2024, 6, 1, 4), 4), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn empty_dates_have_no_streak() {
        assert_eq!(streak_days(Vec::<DateTime<Utc>>::new(), at(2024, 6, 1, 12), 0), 0);
    }

    #[test]
    fn only_today_has_no_streak() {
        let now = at(2024, 6, 1, 12);
        assert_eq!(streak_days(vec![at(2024, 6, 1, 8), at(2024, 6, 1, 20)], now, 0), 0);
    }

    #[test]
    fn single_other_day_is_one() {
        let now = at(2024, 6, 1, 12);
        assert_eq!(streak_days(vec![at(2024, 6, 20, 8)], now, 0), 1);
    }

    #[test]
    fn counts_back_from_latest_date() {
        let now = at(2024, 6, 1, 12);
        let dates = vec![
            at(2024, 5, 20, 9),
            at(2024, 6, 2, 9),
            at(2024, 6, 4, 9),
            at(2024, 6, 3, 9),
            at(2024, 6, 3, 18),
        ];
        // 06-04, 06-03, 06-02 then a gap to 05-20
        assert_eq!(streak_days(dates, now, 0), 3);
    }

    #[test]
    fn removing_today_can_break_a_run() {
        let now = at(2024, 6, 2, 12);
        let dates = vec![at(2024, 6, 1, 9), at(2024, 6, 2, 9), at(2024, 6, 3, 9)];
        // 06-02 is removed, leaving 06-03 and 06-01 which are two days apart
        assert_eq!(streak_days(dates, now, 0), 1);
    }

    #[test]
    fn crosses_month_boundaries() {
        let now = at(2024, 1, 1, 12);
        let dates = vec![at(2024, 2, 28, 9), at(2024, 2, 29, 9), at(2024, 3, 1, 9)];
        assert_eq!(streak_days(dates, now, 0), 3);
    }
}
