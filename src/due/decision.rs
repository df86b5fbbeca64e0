use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use super::header::DueSpec;
use super::notify::{compose_comment, first_due_reminder};
use super::reminder::resolve_reminders;
use super::temporal::days_until;
use super::urgency::{plan_label_change, BucketLabels, LabelChange, UrgencyBucket};

/// Settings every decision is made against.
#[derive(Debug, Clone)]
pub struct DuePolicy {
    pub labels: BucketLabels,
    /// Zone for naive header values and calendar-day comparison.
    pub zone: FixedOffset,
    pub window_minutes: i64,
}

/// Everything a run would do to one issue, computed from a single `now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub days_until_due: i64,
    pub bucket: UrgencyBucket,
    pub label: String,
    pub label_change: Option<LabelChange>,
    pub reminders: Vec<DateTime<Utc>>,
    pub fired: Option<DateTime<Utc>>,
    pub comment: Option<String>,
}

impl Decision {
    pub fn evaluate(
        spec: &DueSpec,
        current_labels: &[&str],
        assignees: &[&str],
        policy: &DuePolicy,
        now: DateTime<Utc>,
    ) -> Self {
        let days_until_due = days_until(spec.due, Some(now));
        let bucket = UrgencyBucket::classify(days_until_due);
        let label = policy.labels.name(bucket).to_string();
        let label_change = plan_label_change(current_labels, &label, &policy.labels.all());

        let reminders = resolve_reminders(spec.due, &spec.reminders);
        let fired = first_due_reminder(&reminders, now, policy.zone, policy.window_minutes);
        let comment = fired.map(|_| compose_comment(assignees, spec.due, now));

        Self {
            days_until_due,
            bucket,
            label,
            label_change,
            reminders,
            fired,
            comment,
        }
    }
}
