use chrono::{DateTime, FixedOffset, Utc};

use super::temporal::{days_until, hours_until, minutes_until};

/// Whether a reminder at `reminder` should fire at `now`.
///
/// Both instants must fall on the same calendar day in `zone`, and the
/// reminder must be between 0 and `window_minutes` minutes away (inclusive).
pub fn should_fire(
    reminder: DateTime<Utc>,
    now: DateTime<Utc>,
    zone: FixedOffset,
    window_minutes: i64,
) -> bool {
    let same_day =
        reminder.with_timezone(&zone).date_naive() == now.with_timezone(&zone).date_naive();
    let minutes = minutes_until(reminder, Some(now));

    same_day && (0..=window_minutes).contains(&minutes)
}

/// First reminder, in the order written, that fires at `now`.
pub fn first_due_reminder(
    reminders: &[DateTime<Utc>],
    now: DateTime<Utc>,
    zone: FixedOffset,
    window_minutes: i64,
) -> Option<DateTime<Utc>> {
    reminders
        .iter()
        .copied()
        .find(|reminder| should_fire(*reminder, now, zone, window_minutes))
}

/// Reminder comment body: assignee mentions, then the time left until `due`.
pub fn compose_comment<S: AsRef<str>>(
    assignees: &[S],
    due: DateTime<Utc>,
    now: DateTime<Utc>,
) -> String {
    let days = days_until(due, Some(now));
    let hours = hours_until(due, Some(now)).rem_euclid(24);
    let minutes = minutes_until(due, Some(now)).rem_euclid(60);

    let line = format!("This issue is due in {days} days, {hours} hours, {minutes} minutes.");

    if assignees.is_empty() {
        return line;
    }

    let mentions = assignees
        .iter()
        .map(|login| format!("@{}", login.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{mentions}\n{line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_fires_at_exact_instant() {
        let reminder = instant("2024-01-09T00:00:00Z");
        assert!(should_fire(reminder, reminder, utc(), 0));
    }

    #[test]
    fn test_window_is_inclusive() {
        let reminder = instant("2024-01-09T12:00:00Z");
        assert!(should_fire(reminder, instant("2024-01-09T11:30:00Z"), utc(), 30));
        assert!(!should_fire(reminder, instant("2024-01-09T11:29:00Z"), utc(), 30));
    }

    #[test]
    fn test_does_not_fire_after_reminder_instant() {
        let reminder = instant("2024-01-09T12:00:00Z");
        assert!(!should_fire(reminder, instant("2024-01-09T12:00:01Z"), utc(), 30));
    }

    #[test]
    fn test_requires_same_calendar_day() {
        let reminder = instant("2024-01-10T00:10:00Z");
        let now = instant("2024-01-09T23:50:00Z");
        assert!(!should_fire(reminder, now, utc(), 60));

        let plus_one = FixedOffset::east_opt(3600).unwrap();
        assert!(should_fire(reminder, now, plus_one, 60));
    }

    #[test]
    fn test_first_eligible_reminder_wins() {
        let now = instant("2024-01-09T10:00:00Z");
        let reminders = [
            instant("2024-01-08T10:00:00Z"),
            instant("2024-01-09T10:20:00Z"),
            instant("2024-01-09T10:05:00Z"),
        ];
        assert_eq!(
            first_due_reminder(&reminders, now, utc(), 30),
            Some(instant("2024-01-09T10:20:00Z"))
        );
        assert_eq!(first_due_reminder(&reminders, now, utc(), 1), None);
    }

    #[test]
    fn test_comment_mentions_assignees() {
        let due = instant("2024-01-10T14:30:00Z");
        let now = instant("2024-01-09T12:00:00Z");
        let comment = compose_comment(&["alice", "bob"], due, now);
        assert_eq!(
            comment,
            "@alice, @bob\nThis issue is due in 1 days, 2 hours, 30 minutes."
        );
    }

    #[test]
    fn test_comment_without_assignees() {
        let due = instant("2024-01-10T00:00:00Z");
        let comment = compose_comment::<&str>(&[], due, due);
        assert_eq!(comment, "This issue is due in 0 days, 0 hours, 0 minutes.");
    }

    #[test]
    fn test_comment_components_floor_past_due() {
        let due = instant("2024-01-10T00:00:00Z");
        let now = instant("2024-01-10T00:01:00Z");
        let comment = compose_comment(&["carol"], due, now);
        assert_eq!(
            comment,
            "@carol\nThis issue is due in -1 days, 23 hours, 59 minutes."
        );
    }
}
