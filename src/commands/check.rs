use std::io::{self, Read};

use chrono::{DateTime, FixedOffset, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::cli::CheckArgs;
use crate::commands::parse_now;
use crate::config::Config;
use crate::due::notify::should_fire;
use crate::due::{format_utc_offset, Decision, DuePolicy, HeaderFields, Offset};
use crate::error::{DueError, Result};
use crate::output::{self, format_instant};

#[derive(Serialize)]
struct CheckReport {
    now: DateTime<Utc>,
    date: Option<String>,
    time: Option<String>,
    time_zone: Option<String>,
    reminders: Vec<ReminderCheck>,
    due: Option<DateTime<Utc>>,
    decision: Option<Decision>,
}

#[derive(Serialize)]
struct ReminderCheck {
    offset: Offset,
    at: Option<DateTime<Utc>>,
    fires: bool,
}

fn build_report(body: &str, policy: &DuePolicy, now: DateTime<Utc>) -> CheckReport {
    let fields = HeaderFields::scan(body);
    let due = fields.due_instant(policy.zone);

    let reminders = fields
        .reminders
        .iter()
        .map(|offset| {
            let at = due.and_then(|due| offset.resolve(due));
            ReminderCheck {
                offset: *offset,
                at,
                fires: at
                    .map(|at| should_fire(at, now, policy.zone, policy.window_minutes))
                    .unwrap_or(false),
            }
        })
        .collect();

    let date = fields.date.map(|d| d.format("%Y-%m-%d").to_string());
    let time = fields.time.map(|t| t.format("%H:%M").to_string());
    let time_zone = fields.zone.map(format_utc_offset);
    let decision = fields
        .into_spec(policy.zone)
        .map(|spec| Decision::evaluate(&spec, &[], &[], policy, now));

    CheckReport {
        now,
        date,
        time,
        time_zone,
        reminders,
        due,
        decision,
    }
}

fn read_body(args: &CheckArgs) -> Result<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path).map_err(DueError::Io),
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn display(report: &CheckReport, zone: FixedOffset) {
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("Now:        {}", format_instant(report.now, zone));
    println!("Due date:   {}", or_dash(&report.date));
    println!("Due time:   {}", or_dash(&report.time));
    println!(
        "Time zone:  {}",
        report
            .time_zone
            .clone()
            .unwrap_or_else(|| format!("{} (reference)", format_utc_offset(zone)))
    );

    let Some(decision) = &report.decision else {
        println!();
        println!("{}", "No valid due-date in header; the issue would be skipped.".yellow());
        return;
    };

    if let Some(due) = report.due {
        println!("Due:        {}", format_instant(due, zone));
    }
    println!("Days left:  {}", decision.days_until_due);
    println!("Bucket:     {} (label '{}')", decision.bucket.colored(), decision.label);

    if report.reminders.is_empty() {
        println!("Reminders:  none");
    } else {
        println!("Reminders:");
        for reminder in &report.reminders {
            let at = reminder
                .at
                .map(|at| format_instant(at, zone))
                .unwrap_or_else(|| "out of range".to_string());
            let status = if reminder.fires {
                "fires now".green().to_string()
            } else {
                String::new()
            };
            println!("  {:>6}  {at}  {status}", reminder.offset.to_string());
        }
    }

    if let Some(comment) = &decision.comment {
        println!();
        println!("Comment:");
        for line in comment.lines() {
            println!("  {line}");
        }
    }
}

pub async fn run(config: &Config, args: CheckArgs) -> Result<()> {
    let body = read_body(&args)?;
    let now = parse_now(args.now.as_deref())?.unwrap_or_else(Utc::now);

    let policy = DuePolicy {
        labels: config.labels.clone(),
        zone: config.reference_zone()?,
        window_minutes: i64::from(config.resolve_window(args.window)),
    };

    let report = build_report(&body, &policy, now);
    output::print_item(&report, |report| display(report, policy.zone));

    Ok(())
}
