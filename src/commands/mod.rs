pub mod check;
pub mod init;
pub mod run;

use chrono::{DateTime, Utc};

use crate::error::{DueError, Result};

/// Parse an optional `--now` override.
pub fn parse_now(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| DueError::InvalidNow(raw.to_string()))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_now() {
        assert_eq!(parse_now(None).unwrap(), None);
        assert_eq!(
            parse_now(Some("2024-01-09T08:00:00+02:00")).unwrap(),
            Some("2024-01-09T06:00:00Z".parse().unwrap())
        );
        assert!(matches!(
            parse_now(Some("yesterday")),
            Err(DueError::InvalidNow(_))
        ));
    }
}
