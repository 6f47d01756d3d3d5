use crate::concurrency::ConcurrencyPeak;
use crate::demux::DemuxSummary;
use crate::error::EngineError;
use crate::interval::{IntervalCounts, IntervalIndex};
use crate::merge::SourceFailure;
use crate::query::ActiveEntities;
use crate::stats::LifetimeSummary;

/// A source that was excluded from, or dropped out of, a merge.
#[derive(Debug)]
pub struct FailedSource {
    pub name: String,
    pub error: EngineError,
}

impl FailedSource {
    /// Failure raised before the source ever joined the merge.
    pub fn excluded(error: EngineError) -> Self {
        let name = match &error {
            EngineError::SourceUnavailable { name, .. } => name.clone(),
            EngineError::MalformedRecord { source_name, .. } => source_name.clone(),
            other => other.to_string(),
        };
        Self { name, error }
    }
}

impl From<SourceFailure> for FailedSource {
    fn from(failure: SourceFailure) -> Self {
        Self {
            name: failure.name,
            error: failure.error,
        }
    }
}

#[derive(Debug)]
pub struct SanitizeOutcome {
    pub peak: ConcurrencyPeak,
    pub demux: DemuxSummary,
    pub failures: Vec<FailedSource>,
}

impl SanitizeOutcome {
    pub fn records(&self) -> usize {
        self.demux.records
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub active: ActiveEntities,
    /// `Err(EmptyAggregation)` when the corpus holds no closed interval.
    pub lifetimes: Result<LifetimeSummary, EngineError>,
}

/// Everything a fully in-memory run produces.
#[derive(Debug)]
pub struct RunOutcome {
    pub sanitize: SanitizeOutcome,
    pub index: IntervalIndex,
    pub intervals: IntervalCounts,
    pub analysis: AnalysisOutcome,
}
