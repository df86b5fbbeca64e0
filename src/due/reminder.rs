use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::temporal::MINUTE_MILLIS;

/// Unit suffix of a reminder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    /// `m`
    Minutes,
    /// `h`
    Hours,
    /// `d`
    Days,
    /// `w`
    Weeks,
}

impl OffsetUnit {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "m" => Some(OffsetUnit::Minutes),
            "h" => Some(OffsetUnit::Hours),
            "d" => Some(OffsetUnit::Days),
            "w" => Some(OffsetUnit::Weeks),
            _ => None,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            OffsetUnit::Minutes => "m",
            OffsetUnit::Hours => "h",
            OffsetUnit::Days => "d",
            OffsetUnit::Weeks => "w",
        }
    }

    /// Exact length of one unit. No calendar adjustment.
    pub fn millis(self) -> i64 {
        match self {
            OffsetUnit::Minutes => MINUTE_MILLIS,
            OffsetUnit::Hours => 60 * MINUTE_MILLIS,
            OffsetUnit::Days => 1_440 * MINUTE_MILLIS,
            OffsetUnit::Weeks => 10_080 * MINUTE_MILLIS,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OffsetError {
    #[error("reminder token '{0}' is missing a unit (m, h, d, w)")]
    MissingUnit(String),

    #[error("reminder token '{token}' has unknown unit '{unit}'")]
    UnknownUnit { token: String, unit: String },

    #[error("reminder token '{0}' has no valid integer magnitude")]
    InvalidMagnitude(String),

    #[error("reminder token '{0}' is out of range")]
    OutOfRange(String),
}

/// A signed, unit-tagged distance before the due instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub magnitude: i64,
    pub unit: OffsetUnit,
}

impl Offset {
    pub fn new(magnitude: i64, unit: OffsetUnit) -> Self {
        Self { magnitude, unit }
    }

    /// Length in milliseconds, or `None` if it does not fit a `Duration`.
    pub fn millis(&self) -> Option<i64> {
        self.magnitude
            .checked_mul(self.unit.millis())
            .filter(|ms| Duration::try_milliseconds(*ms).is_some())
    }

    /// `due - self`, or `None` when the result is not representable.
    pub fn resolve(&self, due: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let delta = Duration::try_milliseconds(self.millis()?)?;
        due.checked_sub_signed(delta)
    }
}

impl FromStr for Offset {
    type Err = OffsetError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let split = token
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| OffsetError::MissingUnit(token.to_string()))?;
        let (number, suffix) = token.split_at(split);

        let unit = OffsetUnit::from_suffix(suffix).ok_or_else(|| OffsetError::UnknownUnit {
            token: token.to_string(),
            unit: suffix.to_string(),
        })?;

        let magnitude: i64 = number
            .parse()
            .map_err(|_| OffsetError::InvalidMagnitude(token.to_string()))?;

        let offset = Offset::new(magnitude, unit);
        if offset.millis().is_none() {
            return Err(OffsetError::OutOfRange(token.to_string()));
        }
        Ok(offset)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}

impl Serialize for Offset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Reminder instants for `offsets`, in the order given. Duplicates are kept.
pub fn resolve_reminders(due: DateTime<Utc>, offsets: &[Offset]) -> Vec<DateTime<Utc>> {
    offsets
        .iter()
        .filter_map(|offset| match offset.resolve(due) {
            Some(instant) => Some(instant),
            None => {
                log::warn!("Reminder {offset} before {due} is out of range, skipping");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_each_unit() {
        assert_eq!("10m".parse(), Ok(Offset::new(10, OffsetUnit::Minutes)));
        assert_eq!("2h".parse(), Ok(Offset::new(2, OffsetUnit::Hours)));
        assert_eq!("3d".parse(), Ok(Offset::new(3, OffsetUnit::Days)));
        assert_eq!("1w".parse(), Ok(Offset::new(1, OffsetUnit::Weeks)));
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!("-30m".parse(), Ok(Offset::new(-30, OffsetUnit::Minutes)));
        assert_eq!("+2d".parse(), Ok(Offset::new(2, OffsetUnit::Days)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            "10x".parse::<Offset>(),
            Err(OffsetError::UnknownUnit { .. })
        ));
        assert!(matches!(
            "15".parse::<Offset>(),
            Err(OffsetError::MissingUnit(_))
        ));
        assert!(matches!(
            "h".parse::<Offset>(),
            Err(OffsetError::InvalidMagnitude(_))
        ));
        assert!(matches!(
            "1.5h".parse::<Offset>(),
            Err(OffsetError::InvalidMagnitude(_))
        ));
        assert!(matches!(
            "2dd".parse::<Offset>(),
            Err(OffsetError::UnknownUnit { .. })
        ));
        assert!(matches!(
            "99999999999999w".parse::<Offset>(),
            Err(OffsetError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_display_round_trips_token() {
        assert_eq!(Offset::new(-5, OffsetUnit::Hours).to_string(), "-5h");
    }

    #[test]
    fn test_resolve_is_linear() {
        let offset = Offset::new(5, OffsetUnit::Days);
        let expected = due() - Duration::milliseconds(5 * 86_400_000);
        assert_eq!(offset.resolve(due()), Some(expected));
    }

    #[test]
    fn test_unit_millis_are_exact() {
        assert_eq!(OffsetUnit::Minutes.millis(), 60_000);
        assert_eq!(OffsetUnit::Hours.millis(), 3_600_000);
        assert_eq!(OffsetUnit::Days.millis(), 86_400_000);
        assert_eq!(OffsetUnit::Weeks.millis(), 604_800_000);
    }

    #[test]
    fn test_negative_offset_lands_after_due() {
        let offset = Offset::new(-1, OffsetUnit::Hours);
        assert_eq!(
            offset.resolve(due()),
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 1, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_resolve_reminders_keeps_order_and_duplicates() {
        let offsets = [
            Offset::new(1, OffsetUnit::Days),
            Offset::new(2, OffsetUnit::Hours),
            Offset::new(1, OffsetUnit::Days),
        ];
        let reminders = resolve_reminders(due(), &offsets);
        assert_eq!(
            reminders,
            vec![
                Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 9, 22, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap(),
            ]
        );
    }
}
