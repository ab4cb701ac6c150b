//! Time zone setting and timestamp rendering for citations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, TimeZone, Utc};

use crate::error::TimeZoneError;

/// Time zone used when rendering block timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZoneSetting {
    /// The zone of the machine running the import.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl FromStr for TimeZoneSetting {
    type Err = TimeZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();

        if value.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if value.eq_ignore_ascii_case("utc") {
            return Ok(Self::Utc);
        }

        parse_offset(value).map(Self::Fixed)
    }
}

/// Parse `+HH:MM`, `-HH:MM` or `+HHMM`.
fn parse_offset(value: &str) -> Result<FixedOffset, TimeZoneError> {
    let invalid = || TimeZoneError::Invalid {
        value: value.to_string(),
    };

    let (sign, rest) = match value.chars().next() {
        Some('+') => (1, &value[1..]),
        Some('-') => (-1, &value[1..]),
        _ => return Err(invalid()),
    };
    if !rest.is_ascii() {
        return Err(invalid());
    }

    let digits = match rest.len() {
        5 if rest.as_bytes()[2] == b':' => format!("{}{}", &rest[..2], &rest[3..]),
        4 => rest.to_string(),
        _ => return Err(invalid()),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(|| {
        TimeZoneError::OutOfRange {
            value: value.to_string(),
        }
    })
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Renders epoch milliseconds as ISO-8601 with millisecond precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeFormatter {
    zone: TimeZoneSetting,
}

impl TimeFormatter {
    pub fn new(zone: TimeZoneSetting) -> Self {
        Self { zone }
    }

    /// `None` when the timestamp is outside the representable range.
    pub fn format(&self, millis: i64) -> Option<String> {
        let utc = Utc.timestamp_millis_opt(millis).single()?;

        Some(match self.zone {
            TimeZoneSetting::Local => rfc3339(utc.with_timezone(&Local)),
            TimeZoneSetting::Utc => rfc3339(utc),
            TimeZoneSetting::Fixed(offset) => rfc3339(utc.with_timezone(&offset)),
        })
    }
}

fn rfc3339<Tz: TimeZone>(time: DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    time.to_rfc3339_opts(SecondsFormat::Millis, false)
}
