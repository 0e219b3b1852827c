//! Timestamp normalization boundary.
//!
//! Every component that needs an epoch timestamp from stored data goes
//! through this module. Records arrive from the document store with one of
//! several timestamp field names and occasionally with values that do not
//! parse; the fallback rules live here and nowhere else.

use chrono::DateTime;
use serde_json::Value;

/// Field names checked on raw store records, in preference order.
pub const TIMESTAMP_FIELDS: [&str; 3] = ["createdAt", "created_at", "timestamp"];

/// Parse an RFC 3339 timestamp into epoch milliseconds.
///
/// Unparsable input maps to epoch 0. Callers that treat "before cutoff" as
/// delete-eligible therefore treat unparsable timestamps as maximally old;
/// retention behavior depends on this exact fallback.
pub fn parse_timestamp_ms(raw: &str) -> i64 {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Best-effort epoch milliseconds for a raw store record.
///
/// Checks `createdAt`, `created_at`, then `timestamp`; accepts either an
/// RFC 3339 string or a numeric epoch-milliseconds value. Records with no
/// usable timestamp sort as earliest.
pub fn record_timestamp_ms(record: &Value) -> i64 {
    for field in TIMESTAMP_FIELDS {
        match record.get(field) {
            Some(Value::String(raw)) => return parse_timestamp_ms(raw),
            Some(Value::Number(n)) => return n.as_i64().unwrap_or(0),
            _ => continue,
        }
    }
    0
}
