//! DateTime parsing and display utilities.
//!
//! Stored records keep `created_at` as the ISO-8601 text they were written
//! with. These helpers interpret that text for sorting and display without
//! ever rewriting it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Display format for record timestamps in list views.
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Local date-time forms accepted when no offset is given.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC3339 (including the millisecond form written by
/// `Date.prototype.toISOString`), date-times without an offset such as
/// Python's `datetime.isoformat()`, and plain dates. Values without an
/// offset are read as UTC.
///
/// # Examples
///
/// ```
/// use issuedraft_domain::common::parse_datetime;
/// use chrono::Datelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00.000Z").unwrap();
/// assert_eq!(dt.year(), 2024);
/// assert!(parse_datetime("2024-01-15T10:30:00.123456").is_some());
/// ```
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
        })
        .map(|naive| naive.and_utc())
}

/// Formats a timestamp the way `Date.prototype.toISOString` does.
pub fn to_iso_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats a stored timestamp for list rows.
///
/// Text that does not parse is shown as stored.
pub fn display_timestamp(raw: &str) -> String {
    match parse_datetime(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => raw.trim().to_string(),
    }
}
