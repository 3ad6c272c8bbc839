//! Publication date parsing
//!
//! Source descriptions carry dates typed by hand, so several layouts are
//! accepted. Everything that parses is reduced to a calendar date and
//! written back as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Canonical output layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time layouts with a numeric offset (`+0000`, `+05:30`)
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
];

/// Date-time layouts without an offset
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S", // European
    "%d/%m/%Y %H:%M",
];

/// Date-only layouts, in order of preference
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%d/%m/%Y",  // European: 15/01/2024
    "%m/%d/%Y",  // US: 01/15/2024
    "%d.%m.%Y",  // German: 15.01.2024
    "%d-%m-%Y",  // 15-01-2024
    "%Y%m%d",    // Compact: 20240115
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%b %d %Y",  // Jan 15 2024
    "%B %d %Y",  // January 15 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%Y-%b-%d",  // 2024-Jan-15
];

/// Outcome of parsing a `publication_date` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationDate {
    /// The value was understood as a calendar date
    Parsed(NaiveDate),
    /// The value matched no accepted layout (original text preserved)
    Unparseable(String),
}

impl PublicationDate {
    /// The date as `YYYY-MM-DD`, if it parsed
    pub fn to_iso8601(&self) -> Option<String> {
        match self {
            Self::Parsed(date) => Some(date.format(DATE_FORMAT).to_string()),
            Self::Unparseable(_) => None,
        }
    }
}

/// Parse a raw `publication_date` value.
///
/// Strings are matched against the accepted layouts. Integers are read as
/// their decimal text, so a bare `2020` or `20200115` in YAML still parses.
/// Any other value is unparseable.
pub fn parse_publication_date(raw: &Value) -> PublicationDate {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) if n.is_u64() || n.is_i64() => n.to_string(),
        other => return PublicationDate::Unparseable(other.to_string()),
    };

    match parse_date(&text) {
        Some(date) => PublicationDate::Parsed(date),
        None => PublicationDate::Unparseable(text),
    }
}

/// Parse a date string against every accepted layout.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    // Offset-aware values keep the calendar date of their own offset
    let with_offset = DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .ok()
        .or_else(|| {
            OFFSET_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        });
    if let Some(dt) = with_offset {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
        .or_else(|| parse_partial(value))
}

/// `YYYY-MM` and `YYYY` resolve to the first day of the period.
fn parse_partial(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    match bytes.len() {
        7 if bytes[4] == b'-' => {
            let year = value[0..4].parse::<i32>().ok()?;
            let month = value[5..7].parse::<u32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1)
        }
        4 if bytes.iter().all(u8::is_ascii_digit) => {
            let year = value.parse::<i32>().ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        }
        _ => None,
    }
}
