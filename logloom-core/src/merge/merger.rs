use crate::error::EngineError;
use crate::record::{Record, RecordSource, Timestamp};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    /// Index of the source this record came from.
    pub source: usize,
    pub record: Record,
}

/// A source that stopped producing records because it failed mid-stream.
#[derive(Debug, thiserror::Error)]
#[error("source {name} aborted: {error}")]
pub struct SourceFailure {
    pub source: usize,
    pub name: String,
    #[source]
    pub error: EngineError,
}

struct Pending {
    timestamp: Timestamp,
    source: usize,
    record: Record,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.source == other.source
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the earliest record surfaces first.
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Merges N timestamp-sorted sources into one timestamp-sorted stream.
///
/// Yields `Err(SourceFailure)` once for each source that fails; the failed
/// source is dropped and the remaining sources keep merging.
pub struct KWayMerger<S> {
    sources: Vec<Option<S>>,
    heap: BinaryHeap<Pending>,
    failures: VecDeque<SourceFailure>,
}

impl<S: RecordSource> KWayMerger<S> {
    pub fn new(sources: impl IntoIterator<Item = S>) -> Self {
        let sources: Vec<Option<S>> = sources.into_iter().map(Some).collect();
        let mut merger = Self {
            heap: BinaryHeap::with_capacity(sources.len()),
            sources,
            failures: VecDeque::new(),
        };

        for idx in 0..merger.sources.len() {
            merger.advance(idx);
        }

        debug!(
            sources = merger.sources.len(),
            seeded = merger.heap.len(),
            "merger seeded"
        );

        merger
    }

    /// Sources still holding an open handle.
    pub fn live_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.is_some()).count()
    }

    fn advance(&mut self, idx: usize) {
        let result = match self.sources[idx].as_mut() {
            Some(source) => source.next_record(),
            None => return,
        };

        match result {
            Ok(Some(record)) => self.heap.push(Pending {
                timestamp: record.timestamp,
                source: idx,
                record,
            }),
            Ok(None) => {
                if let Some(source) = self.sources[idx].take() {
                    debug!(source = source.name(), "source exhausted");
                }
            }
            Err(error) => {
                if let Some(source) = self.sources[idx].take() {
                    warn!(source = source.name(), error = %error, "source aborted");
                    self.failures.push_back(SourceFailure {
                        source: idx,
                        name: source.name().to_string(),
                        error,
                    });
                }
            }
        }
    }
}

impl<S: RecordSource> Iterator for KWayMerger<S> {
    type Item = Result<MergedRecord, SourceFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(failure) = self.failures.pop_front() {
            return Some(Err(failure));
        }

        let pending = self.heap.pop()?;
        self.advance(pending.source);

        Some(Ok(MergedRecord {
            source: pending.source,
            record: pending.record,
        }))
    }
}
