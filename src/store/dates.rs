//! Lenient created-date normalization for the Explorer store.
//!
//! The Explorer tool writes whatever the host locale produced at the time,
//! and older libraries mix epoch milliseconds with several human-readable
//! forms. The catalog needs one comparable number, so everything funnels
//! through [`created_at_millis`]: first match wins, and anything
//! unrecognized becomes epoch zero rather than an error. A record with a
//! broken date is still a record the user owns.
//!
//! Naive timestamps are interpreted as UTC. The source never records an
//! offset, and pinning a zone keeps sort order identical across machines.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

/// Timestamp formats observed in real Explorer libraries, most common first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y年%m月%d日 %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y-%m-%d", "%Y年%m月%d日"];

/// Normalize a raw created-date string to epoch milliseconds.
///
/// Accepts bare millisecond epochs, RFC 3339, and the formats above; an
/// empty or unrecognized string maps to zero.
pub fn created_at_millis(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(millis) = trimmed.parse::<i64>() {
            return millis;
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.timestamp_millis();
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return parsed.and_utc().timestamp_millis();
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
                return midnight.and_utc().timestamp_millis();
            }
        }
    }

    debug!(raw = trimmed, "created-date in no known format, using epoch zero");
    0
}
