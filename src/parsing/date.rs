//! Best-effort timestamps for raw chat date tokens.
//!
//! Exports carry dates in whatever locale the phone was set to, so the token
//! is tried against a fixed list of layouts: month-first US layouts first,
//! then ISO, then day-first European ones. All results are read as UTC.
//! When nothing fits, callers substitute the clock value captured at the
//! start of the parse. Ordering is a nicety, so a wrong guess is not an
//! error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Layouts with a time component, in priority order.
const DATE_TIME_FORMATS: &[&str] = &[
    // US, 12h
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    // US, 24h
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    // ISO-ish
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    // Day-first
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d.%m.%y %H:%M:%S",
    "%d.%m.%y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

/// Date-only layouts, read as midnight.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%y", "%d/%m/%Y", "%d.%m.%y",
    "%d.%m.%Y", "%d-%m-%Y",
];

/// Strips bracket and comma punctuation and normalises whitespace.
///
/// iOS exports put a narrow no-break space before `AM`/`PM`.
pub fn clean_date_token(date: &str) -> String {
    let replaced: String = date
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ','))
        .map(|c| match c {
            '\u{202F}' | '\u{00A0}' => ' ',
            other => other,
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a raw date token, returning `None` when no layout fits.
pub fn parse_chat_timestamp(date: &str) -> Option<DateTime<Utc>> {
    let cleaned = clean_date_token(date);
    if cleaned.is_empty() {
        return None;
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&cleaned, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

/// Milliseconds since the Unix epoch for `date`, or `fallback_ms`.
pub fn timestamp_millis_or(date: &str, fallback_ms: i64) -> i64 {
    parse_chat_timestamp(date).map_or(fallback_ms, |dt| dt.timestamp_millis())
}
