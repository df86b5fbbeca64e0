use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::RunArgs;
use crate::client::GithubClient;
use crate::commands::parse_now;
use crate::config::Config;
use crate::due::{parse_header, Decision, DuePolicy, DueSpec, LabelChange, UrgencyBucket};
use crate::error::{DueError, Result};
use crate::output::{self, format_instant, is_json_output, truncate};
use crate::repository::IssueRepository;
use crate::types::{IssueRecord, IssueState};

pub struct RunSettings {
    pub policy: DuePolicy,
    pub dry_run: bool,
}

/// An issue paired with the due data parsed from its body.
pub struct Candidate<'a> {
    pub issue: &'a IssueRecord,
    pub spec: DueSpec,
}

impl<'a> Candidate<'a> {
    pub fn from_issue(issue: &'a IssueRecord, zone: FixedOffset) -> Option<Self> {
        if issue.is_pull_request() || issue.state != IssueState::Open {
            return None;
        }
        let spec = parse_header(issue.body_text(), zone)?;
        Some(Self { issue, spec })
    }
}

/// What happened to one candidate issue during a run.
#[derive(Serialize, Debug, Clone)]
pub struct IssueReport {
    pub number: u64,
    pub title: String,
    pub due: Option<DateTime<Utc>>,
    pub bucket: Option<UrgencyBucket>,
    pub label_change: Option<LabelChange>,
    pub reminder: Option<DateTime<Utc>>,
    pub comment_posted: bool,
    pub dry_run: bool,
    pub error: Option<String>,
}

impl IssueReport {
    fn failed(issue: &IssueRecord, error: &DueError) -> Self {
        Self {
            number: issue.number,
            title: issue.title.clone(),
            due: None,
            bucket: None,
            label_change: None,
            reminder: None,
            comment_posted: false,
            dry_run: false,
            error: Some(error.to_string()),
        }
    }
}

/// Classify one issue at `now` and apply the resulting label and comment
/// changes. `Ok(None)` means the issue has no usable due date.
pub async fn process_issue<R: IssueRepository + ?Sized>(
    repo: &R,
    issue: &IssueRecord,
    settings: &RunSettings,
    now: DateTime<Utc>,
) -> Result<Option<IssueReport>> {
    let Some(candidate) = Candidate::from_issue(issue, settings.policy.zone) else {
        log::debug!("#{} has no due date, skipping", issue.number);
        return Ok(None);
    };

    let decision = Decision::evaluate(
        &candidate.spec,
        &candidate.issue.label_names(),
        &candidate.issue.assignee_logins(),
        &settings.policy,
        now,
    );

    if let Some(change) = &decision.label_change {
        if settings.dry_run {
            log::info!("#{} would be labeled '{}'", issue.number, decision.label);
        } else {
            repo.set_labels(issue, &change.remove, &change.add).await?;
            log::info!("#{} labeled '{}'", issue.number, decision.label);
        }
    }

    let mut comment_posted = false;
    if let Some(comment) = &decision.comment {
        if settings.dry_run {
            log::info!("#{} would receive a reminder comment", issue.number);
        } else {
            repo.post_comment(issue.number, comment).await?;
            comment_posted = true;
            log::info!("#{} reminder comment posted", issue.number);
        }
    }

    Ok(Some(IssueReport {
        number: issue.number,
        title: issue.title.clone(),
        due: Some(candidate.spec.due),
        bucket: Some(decision.bucket),
        label_change: decision.label_change,
        reminder: decision.fired,
        comment_posted,
        dry_run: settings.dry_run,
        error: None,
    }))
}

/// List open issues once and process each in turn. `clock` is sampled once
/// per issue. A failing issue is reported and the batch moves on.
pub async fn run_batch<R, C>(repo: &R, settings: &RunSettings, clock: C) -> Result<Vec<IssueReport>>
where
    R: IssueRepository + ?Sized,
    C: Fn() -> DateTime<Utc>,
{
    let issues = repo.list_open_issues().await?;
    let mut reports = Vec::new();

    for issue in &issues {
        let now = clock();
        match process_issue(repo, issue, settings, now).await {
            Ok(Some(report)) => reports.push(report),
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to update #{}: {e}", issue.number);
                reports.push(IssueReport::failed(issue, &e));
            }
        }
    }

    Ok(reports)
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "#")]
    number: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Labels")]
    labels: String,
    #[tabled(rename = "Reminder")]
    reminder: String,
}

impl IssueRow {
    fn from_report(report: &IssueReport, zone: FixedOffset) -> Self {
        let labels = match (&report.error, &report.label_change) {
            (Some(e), _) => format!("error: {}", truncate(e, 40)),
            (None, Some(change)) => describe_change(change),
            (None, None) => "unchanged".to_string(),
        };

        let reminder = match (report.reminder, report.comment_posted) {
            (Some(_), true) => "posted".to_string(),
            (Some(_), false) => "pending (dry run)".to_string(),
            (None, _) => String::new(),
        };

        Self {
            number: report.number,
            title: truncate(&report.title, 40),
            due: report
                .due
                .map(|due| format_instant(due, zone))
                .unwrap_or_default(),
            bucket: report
                .bucket
                .map(|bucket| {
                    if is_json_output() {
                        bucket.label().to_string()
                    } else {
                        bucket.colored()
                    }
                })
                .unwrap_or_default(),
            labels,
            reminder,
        }
    }
}

fn describe_change(change: &LabelChange) -> String {
    let removed = change.remove.iter().map(|l| format!("-{l}"));
    let added = change.add.iter().map(|l| format!("+{l}"));
    removed.chain(added).collect::<Vec<_>>().join(" ")
}

pub async fn run(config: &Config, args: RunArgs) -> Result<()> {
    let repo_ref = config.resolve_repository(args.repo.as_deref())?;
    let client = GithubClient::new(config.api_base()?, config.token()?, repo_ref);
    let fixed_now = parse_now(args.now.as_deref())?;

    let settings = RunSettings {
        policy: DuePolicy {
            labels: config.labels.clone(),
            zone: config.reference_zone()?,
            window_minutes: i64::from(config.resolve_window(args.window)),
        },
        dry_run: args.dry_run,
    };

    let reports = run_batch(&client, &settings, || fixed_now.unwrap_or_else(Utc::now)).await?;

    if reports.is_empty() {
        output::print_message("No open issues with a due date");
        return Ok(());
    }

    let zone = settings.policy.zone;
    output::print_table(&reports, |report| IssueRow::from_report(report, zone));

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        return Err(DueError::IssueFailures { count: failed });
    }

    Ok(())
}
