//! Record identifiers and timestamps.

use chrono::Utc;
use uuid::Uuid;

/// Stored timestamp format (second precision); sorts lexicographically.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// New time-ordered identifier: a UUIDv7 rendered as 36 lowercase hyphenated characters.
/// Identifiers from later milliseconds sort after earlier ones as plain strings.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

pub fn timestamp_now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Canonical form of a client-supplied identifier, or `None` if it is not one of ours.
pub fn parse_id(raw: &str) -> Option<String> {
    Uuid::parse_str(raw).ok().map(|u| u.to_string())
}
