//! # Time Utilities
//!
//! Timestamps in the two shapes the API emits: ISO-8601 strings with
//! millisecond precision and Unix epoch milliseconds.

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current time as `2024-01-01T00:00:00.000Z`.
pub fn now_iso() -> String {
    format_iso(now_utc())
}

/// Format a time as ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current Unix time in milliseconds.
pub fn now_millis() -> i64 {
    now_utc().timestamp_millis()
}
