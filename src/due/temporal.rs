//! Signed deltas between instants, floored toward negative infinity.

use chrono::{DateTime, Utc};

pub const MINUTE_MILLIS: i64 = 60_000;
const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 1_440;

/// Milliseconds from `reference` (default: now) until `target`. Negative once
/// `target` has passed.
pub fn time_until(target: DateTime<Utc>, reference: Option<DateTime<Utc>>) -> i64 {
    let reference = reference.unwrap_or_else(Utc::now);
    target.signed_duration_since(reference).num_milliseconds()
}

pub fn minutes_until(target: DateTime<Utc>, reference: Option<DateTime<Utc>>) -> i64 {
    time_until(target, reference).div_euclid(MINUTE_MILLIS)
}

pub fn hours_until(target: DateTime<Utc>, reference: Option<DateTime<Utc>>) -> i64 {
    minutes_until(target, reference).div_euclid(MINUTES_PER_HOUR)
}

pub fn days_until(target: DateTime<Utc>, reference: Option<DateTime<Utc>>) -> i64 {
    minutes_until(target, reference).div_euclid(MINUTES_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_time_until_is_signed() {
        let due = at(2024, 1, 10, 0, 0);
        assert_eq!(time_until(due, Some(at(2024, 1, 9, 23, 59))), 60_000);
        assert_eq!(time_until(due, Some(at(2024, 1, 10, 0, 1))), -60_000);
    }

    #[test]
    fn test_same_instant_is_zero_everywhere() {
        let due = at(2024, 1, 10, 0, 0);
        assert_eq!(minutes_until(due, Some(due)), 0);
        assert_eq!(hours_until(due, Some(due)), 0);
        assert_eq!(days_until(due, Some(due)), 0);
    }

    #[test]
    fn test_last_instant_before_due_rounds_to_zero() {
        let due = at(2024, 1, 10, 0, 0);
        let just_before = due - Duration::milliseconds(1);
        assert_eq!(minutes_until(due, Some(just_before)), 0);
        assert_eq!(days_until(due, Some(just_before)), 0);
    }

    #[test]
    fn test_past_due_floors_to_negative() {
        let due = at(2024, 1, 10, 0, 0);
        let just_after = due + Duration::milliseconds(1);
        assert_eq!(minutes_until(due, Some(just_after)), -1);
        assert_eq!(hours_until(due, Some(just_after)), -1);
        assert_eq!(days_until(due, Some(just_after)), -1);
    }

    #[test]
    fn test_one_minute_late_is_minus_one_hour() {
        let due = at(2024, 1, 10, 0, 0);
        let late = at(2024, 1, 10, 0, 1);
        assert_eq!(minutes_until(due, Some(late)), -1);
        assert_eq!(hours_until(due, Some(late)), -1);
        assert_eq!(days_until(due, Some(late)), -1);
    }

    #[test]
    fn test_whole_units() {
        let due = at(2024, 1, 10, 0, 0);
        let now = at(2024, 1, 7, 21, 30);
        assert_eq!(minutes_until(due, Some(now)), 2 * 1440 + 150);
        assert_eq!(hours_until(due, Some(now)), 50);
        assert_eq!(days_until(due, Some(now)), 2);
    }

    #[test]
    fn test_monotonically_non_increasing() {
        let due = at(2024, 1, 10, 0, 0);
        let mut reference = at(2024, 1, 5, 0, 0);
        let mut last = (i64::MAX, i64::MAX, i64::MAX);
        while reference < at(2024, 1, 15, 0, 0) {
            let current = (
                minutes_until(due, Some(reference)),
                hours_until(due, Some(reference)),
                days_until(due, Some(reference)),
            );
            assert!(current.0 <= last.0);
            assert!(current.1 <= last.1);
            assert!(current.2 <= last.2);
            last = current;
            reference += Duration::seconds(2_917);
        }
    }

    #[test]
    fn test_default_reference_is_now() {
        let target = Utc::now() + Duration::days(10);
        let days = days_until(target, None);
        assert!(days == 9 || days == 10);
    }
}
