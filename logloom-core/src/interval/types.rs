use crate::record::{EntityKey, StreamKey, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One start-to-end (or still open) span of an entity within a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub entity: EntityKey,
    pub stream: StreamKey,
    pub start: Timestamp,
    /// `None` while the interval is open.
    pub end: Option<Timestamp>,
}

impl Interval {
    pub fn open(entity: EntityKey, stream: StreamKey, start: Timestamp) -> Self {
        Self {
            entity,
            stream,
            start,
            end: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whole seconds between start and end, sub-second precision truncated.
    pub fn duration_secs(&self) -> Option<i64> {
        self.end
            .map(|end| (end - self.start).num_milliseconds() / 1000)
    }
}

/// An entity's intervals, per stream, in the order they were opened.
pub type EntityIntervals = BTreeMap<StreamKey, Vec<Interval>>;

/// Payload values that open and close an interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: "**START**".to_string(),
            end: "**END**".to_string(),
        }
    }
}
