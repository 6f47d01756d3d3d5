use crate::record::{Timestamp, parse_timestamp};
use serde::Serialize;

/// A well-ordered `[start, end]` query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    /// Swaps the bounds when given in reverse.
    pub fn new(a: Timestamp, b: Timestamp) -> Self {
        if a > b {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unrecognized timestamp `{0}` (expected `yyyy-MM-dd HH:mm:ss[,SSS]` or RFC 3339)")]
pub struct InstantParseError(pub String);

/// Parses a caller-supplied instant. RFC 3339 values are converted to UTC.
pub fn parse_instant(raw: &str) -> Result<Timestamp, InstantParseError> {
    if let Some(ts) = parse_timestamp(raw) {
        return Ok(ts);
    }

    chrono::DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.naive_utc())
        .map_err(|_| InstantParseError(raw.to_string()))
}
