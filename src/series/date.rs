//! Calendar date parsing
//!
//! Dates arrive as plain `YYYY-MM-DD` from the API, but older exports and
//! hand-edited fixtures carry timestamps or the `20-May-87` style of the
//! Brent source CSV. Any time-of-day component is discarded.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only layouts, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%y", "%d-%b-%Y", "%b %d, %Y"];

/// Date-time layouts without an offset
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a date string into a calendar date
///
/// Returns `None` when no supported layout matches.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    // Offset-carrying timestamps keep the calendar date as written
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}
