use std::collections::BTreeSet;
use std::fmt;

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Days-until-due above which an issue is no longer "soon".
pub const DUE_SOON_DAYS: i64 = 3;

/// Urgency of an issue, derived from whole days until its due instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyBucket {
    Overdue,
    DueToday,
    DueSoon,
    DueLater,
}

impl UrgencyBucket {
    pub const ALL: [UrgencyBucket; 4] = [
        UrgencyBucket::Overdue,
        UrgencyBucket::DueToday,
        UrgencyBucket::DueSoon,
        UrgencyBucket::DueLater,
    ];

    pub fn classify(days_until_due: i64) -> Self {
        match days_until_due {
            d if d < 0 => UrgencyBucket::Overdue,
            0 => UrgencyBucket::DueToday,
            d if d <= DUE_SOON_DAYS => UrgencyBucket::DueSoon,
            _ => UrgencyBucket::DueLater,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UrgencyBucket::Overdue => "Overdue",
            UrgencyBucket::DueToday => "Due today",
            UrgencyBucket::DueSoon => "Due soon",
            UrgencyBucket::DueLater => "Due later",
        }
    }

    /// Get the colored label for terminal output.
    pub fn colored(self) -> String {
        let label = self.label();
        match self {
            UrgencyBucket::Overdue => label.red().bold().to_string(),
            UrgencyBucket::DueToday => label.yellow().bold().to_string(),
            UrgencyBucket::DueSoon => label.blue().to_string(),
            UrgencyBucket::DueLater => label.bright_black().to_string(),
        }
    }
}

impl fmt::Display for UrgencyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Issue label names, one per bucket.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BucketLabels {
    pub overdue: String,
    pub due_today: String,
    pub due_soon: String,
    pub due_later: String,
}

impl Default for BucketLabels {
    fn default() -> Self {
        Self {
            overdue: "overdue".to_string(),
            due_today: "due-today".to_string(),
            due_soon: "due-soon".to_string(),
            due_later: "due-later".to_string(),
        }
    }
}

impl BucketLabels {
    pub fn name(&self, bucket: UrgencyBucket) -> &str {
        match bucket {
            UrgencyBucket::Overdue => &self.overdue,
            UrgencyBucket::DueToday => &self.due_today,
            UrgencyBucket::DueSoon => &self.due_soon,
            UrgencyBucket::DueLater => &self.due_later,
        }
    }

    pub fn all(&self) -> BTreeSet<String> {
        UrgencyBucket::ALL
            .iter()
            .map(|bucket| self.name(*bucket).to_string())
            .collect()
    }
}

/// Labels to take off and put on an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelChange {
    pub remove: BTreeSet<String>,
    pub add: BTreeSet<String>,
}

/// Work out how `current` must change so the only bucket label left is
/// `resolved`. Returns `None` when nothing would change.
pub fn plan_label_change<S: AsRef<str>>(
    current: &[S],
    resolved: &str,
    bucket_labels: &BTreeSet<String>,
) -> Option<LabelChange> {
    let current: BTreeSet<&str> = current.iter().map(|name| name.as_ref()).collect();

    let remove: BTreeSet<String> = current
        .iter()
        .filter(|name| **name != resolved && bucket_labels.contains(**name))
        .map(|name| name.to_string())
        .collect();

    let mut add = BTreeSet::new();
    if !current.contains(resolved) {
        add.insert(resolved.to_string());
    }

    if remove.is_empty() && add.is_empty() {
        None
    } else {
        Some(LabelChange { remove, add })
    }
}
