use crate::record::{EntityKey, Record, Timestamp};
use ahash::AHashSet;
use chrono::SubsecRound;
use serde::{Deserialize, Serialize};

/// What to do with the bucket still open when the stream ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingBucket {
    /// A bucket is only compared once a later second supersedes it.
    #[default]
    Discard,
    /// The final bucket is compared at end of stream like any other.
    Flush,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConcurrencyPeak {
    /// Second at which the peak was observed; `None` if no bucket was ever compared.
    pub epoch: Option<Timestamp>,
    pub max_concurrent: usize,
}

struct Bucket {
    second: Timestamp,
    entities: AHashSet<EntityKey>,
}

impl Bucket {
    fn seeded(second: Timestamp, entity: &EntityKey) -> Self {
        let mut entities = AHashSet::new();
        entities.insert(entity.clone());
        Self { second, entities }
    }
}

/// Tracks distinct entities per one-second bucket over a chronologically
/// ordered stream and remembers the largest bucket.
pub struct ConcurrencyTracker {
    trailing: TrailingBucket,
    current: Option<Bucket>,
    peak: ConcurrencyPeak,
}

impl ConcurrencyTracker {
    pub fn new(trailing: TrailingBucket) -> Self {
        Self {
            trailing,
            current: None,
            peak: ConcurrencyPeak::default(),
        }
    }

    pub fn observe(&mut self, record: &Record) {
        let second = record.timestamp.trunc_subsecs(0);

        match self.current.as_mut() {
            Some(bucket) if bucket.second == second => {
                bucket.entities.insert(record.entity.clone());
            }
            _ => {
                if let Some(closed) = self.current.take() {
                    self.close(closed);
                }
                self.current = Some(Bucket::seeded(second, &record.entity));
            }
        }
    }

    fn close(&mut self, bucket: Bucket) {
        // Strictly greater: on ties the earliest epoch wins.
        if bucket.entities.len() > self.peak.max_concurrent {
            self.peak = ConcurrencyPeak {
                epoch: Some(bucket.second),
                max_concurrent: bucket.entities.len(),
            };
        }
    }

    /// Peak over the buckets closed so far.
    pub fn peak(&self) -> &ConcurrencyPeak {
        &self.peak
    }

    pub fn finish(mut self) -> ConcurrencyPeak {
        if self.trailing == TrailingBucket::Flush {
            if let Some(last) = self.current.take() {
                self.close(last);
            }
        }
        self.peak
    }
}
