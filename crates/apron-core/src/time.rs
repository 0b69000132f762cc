//! Timestamp helpers. All persisted timestamps are unix epoch milliseconds.

use chrono::{DateTime, Utc};

/// Current time as unix epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert stored milliseconds back into a UTC datetime.
/// Out-of-range values clamp to the unix epoch.
pub fn to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

/// RFC 3339 rendering of stored milliseconds.
pub fn format_millis(millis: i64) -> String {
    to_datetime(millis).to_rfc3339()
}
