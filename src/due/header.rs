//! Scanner for the metadata block at the top of an issue body.
//!
//! ```text
//! due-date: 2024-06-01
//! due-time: 09:00
//! time-zone: UTC-05:00
//! reminders: 10m 2h 3d 1w
//! ---
//! free-form issue text
//! ```
//!
//! Only text before the first `---` is considered. Keys are case-sensitive
//! and the first line carrying a key wins. `due-date` is the only required
//! field; a malformed time, zone, or reminder token is dropped with a warning.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use serde::Serialize;

use super::reminder::Offset;

const HEADER_DELIMITER: &str = "---";

static DUE_DATE_LINE: LazyLock<Regex> = LazyLock::new(|| field_pattern("due-date"));
static DUE_TIME_LINE: LazyLock<Regex> = LazyLock::new(|| field_pattern("due-time"));
static TIME_ZONE_LINE: LazyLock<Regex> = LazyLock::new(|| field_pattern("time-zone"));
static REMINDERS_LINE: LazyLock<Regex> = LazyLock::new(|| field_pattern("reminders"));

static DATE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));
static TIME_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("valid time pattern"));
static ZONE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^UTC([+-])([0-9]{2}):([0-9]{2})$").expect("valid time zone pattern")
});

fn field_pattern(key: &str) -> Regex {
    Regex::new(&format!(r"(?m)^[ \t]*{key}[ \t]*:[ \t]*(.*?)[ \t]*\r?$"))
        .expect("valid field pattern")
}

/// Due instant plus the reminder offsets written for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueSpec {
    pub due: DateTime<Utc>,
    pub reminders: Vec<Offset>,
}

/// Raw values recognized in a header, before the due instant is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub zone: Option<FixedOffset>,
    pub reminders: Vec<Offset>,
}

impl HeaderFields {
    pub fn scan(body: &str) -> Self {
        let header = header_segment(body);

        let date = first_value(&DUE_DATE_LINE, header).and_then(parse_date);

        let time = first_value(&DUE_TIME_LINE, header).and_then(|value| {
            let parsed = parse_time(value);
            if parsed.is_none() {
                log::warn!("Ignoring malformed due-time '{value}'");
            }
            parsed
        });

        let zone = first_value(&TIME_ZONE_LINE, header).and_then(|value| {
            let parsed = parse_utc_offset(value);
            if parsed.is_none() {
                log::warn!("Ignoring malformed time-zone '{value}'");
            }
            parsed
        });

        let reminders = first_value(&REMINDERS_LINE, header)
            .map(parse_reminder_tokens)
            .unwrap_or_default();

        Self {
            date,
            time,
            zone,
            reminders,
        }
    }

    /// Combine the fields into an absolute instant. Naive values are read in
    /// `reference`.
    pub fn due_instant(&self, reference: FixedOffset) -> Option<DateTime<Utc>> {
        let date = self.date?;
        let midnight = NaiveTime::MIN;

        let (time, zone) = match (self.time, self.zone) {
            (Some(time), Some(zone)) => (time, zone),
            (Some(time), None) => (time, reference),
            (None, Some(zone)) => (midnight, zone),
            (None, None) => (midnight, reference),
        };

        zone.from_local_datetime(&date.and_time(time))
            .single()
            .map(|local| local.with_timezone(&Utc))
    }

    pub fn into_spec(self, reference: FixedOffset) -> Option<DueSpec> {
        let due = self.due_instant(reference)?;
        Some(DueSpec {
            due,
            reminders: self.reminders,
        })
    }
}

/// Parse the header of `body`. `None` means the issue has no usable due date.
pub fn parse_header(body: &str, reference: FixedOffset) -> Option<DueSpec> {
    HeaderFields::scan(body).into_spec(reference)
}

/// Parse `UTC+HH:MM` / `UTC-HH:MM`.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let caps = ZONE_VALUE.captures(value)?;
    let hours: i32 = caps[2].parse().ok()?;
    let minutes: i32 = caps[3].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    let seconds = (hours * 60 + minutes) * 60;
    if &caps[1] == "-" {
        FixedOffset::west_opt(seconds)
    } else {
        FixedOffset::east_opt(seconds)
    }
}

/// Render an offset in the same `UTC±HH:MM` form the header uses.
pub fn format_utc_offset(zone: FixedOffset) -> String {
    let seconds = zone.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("UTC{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

fn header_segment(body: &str) -> &str {
    match body.find(HEADER_DELIMITER) {
        Some(end) => &body[..end],
        None => body,
    }
}

fn first_value<'a>(pattern: &Regex, header: &'a str) -> Option<&'a str> {
    pattern
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if !DATE_VALUE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    if !TIME_VALUE.is_match(value) {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

fn parse_reminder_tokens(value: &str) -> Vec<Offset> {
    value
        .split_whitespace()
        .filter_map(|token| match token.parse::<Offset>() {
            Ok(offset) => Some(offset),
            Err(e) => {
                log::warn!("Skipping {e}");
                None
            }
        })
        .collect()
}
