//! Date parsing and formatting for frontmatter timestamps.
//!
//! Content metadata spells dates in a handful of fixed, locale-independent
//! patterns. [`parse`] tries them in order and returns the first match;
//! [`format`] always writes the calendar date alone (`2024-01-15`), so the
//! time of day is not preserved through a serialize/parse cycle.
//!
//! Inputs without a zone are taken to be UTC.
//!
//! ## Examples
//!
//! ```rust
//! use sitedoc::date;
//!
//! let ts = date::parse("2024-01-15T10:30:00+02:00").unwrap();
//! assert_eq!(date::format(&ts), "2024-01-15");
//!
//! assert!(date::parse("next tuesday").is_none());
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// A point in time with the offset it was written in.
pub type Timestamp = DateTime<FixedOffset>;

/// Zoned patterns, most specific first.
const ZONED: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S %z"];

/// Zone-less patterns, read as UTC.
const NAIVE: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a frontmatter date, or returns `None` when no pattern matches.
///
/// Accepted forms, tried in this order:
///
/// 1. RFC 3339 / `2024-01-15T10:30:00+0200`
/// 2. `2024-01-15T10:30:00` (UTC)
/// 3. `2024-01-15 10:30:00 +0200`
/// 4. `2024-01-15` (midnight UTC)
/// 5. remaining ISO 8601 spellings: fractional seconds, minutes only, or a
///    space instead of `T`
///
/// # Examples
///
/// ```rust
/// use sitedoc::date;
///
/// let ts = date::parse("2024-01-15").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2024-01-15T00:00:00+00:00");
/// ```
#[must_use]
pub fn parse(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_str(text, ZONED[0]) {
        return Some(ts);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, NAIVE[0]) {
        return Some(utc(naive));
    }
    if let Ok(ts) = DateTime::parse_from_str(text, ZONED[1]) {
        return Some(ts);
    }
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(utc);
    }
    NAIVE[1..]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
        .map(utc)
}

/// Formats a timestamp as `yyyy-MM-dd` in its own offset.
///
/// # Examples
///
/// ```rust
/// use sitedoc::date;
///
/// let late = date::parse("2024-01-15T23:30:00-05:00").unwrap();
/// assert_eq!(date::format(&late), "2024-01-15");
/// ```
#[must_use]
pub fn format(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn utc(naive: NaiveDateTime) -> Timestamp {
    Utc.from_utc_datetime(&naive).fixed_offset()
}
