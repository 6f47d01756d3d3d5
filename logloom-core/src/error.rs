use crate::record::{EntityKey, StreamKey, Timestamp};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    // Input
    #[error("malformed record in {source_name} at line {line}: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: MalformedReason,
    },

    #[error("source {name} is unavailable: {source}")]
    SourceUnavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    // Interval building
    #[error("ordering violation for {entity} on stream {stream} at {at}: {reason}")]
    OrderingViolation {
        entity: EntityKey,
        stream: StreamKey,
        at: Timestamp,
        reason: OrderingReason,
    },

    // Statistics
    #[error("no closed intervals to aggregate")]
    EmptyAggregation,

    // Output
    #[error("failed to write entity log {path}: {source}")]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub fn malformed(source_name: impl Into<String>, line: usize, reason: MalformedReason) -> Self {
        Self::MalformedRecord {
            source_name: source_name.into(),
            line,
            reason,
        }
    }

    pub fn unavailable(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            name: name.into(),
            source,
        }
    }

    pub fn sink_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SinkWrite {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("missing `{0}` delimiter")]
    MissingDelimiter(&'static str),

    #[error("invalid stream key `{0}`")]
    InvalidStreamKey(String),

    #[error("unparseable timestamp `{0}`")]
    InvalidTimestamp(String),

    #[error("continuation line before any record")]
    OrphanContinuation,

    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderingReason {
    #[error("end marker with no preceding start")]
    EndWithoutStart,

    #[error("start marker while the previous interval is still open")]
    StartWhileOpen,

    #[error("end marker for an interval that is already closed")]
    EndAfterClose,
}
