use crate::concurrency::ConcurrencyPeak;
use crate::demux::DemuxSummary;
use crate::error::EngineError;
use crate::interval::IntervalCounts;
use crate::pipeline::{AnalysisOutcome, FailedSource, RunOutcome, SanitizeOutcome};
use crate::query::ActiveEntities;
use crate::stats::LifetimeSummary;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FailureView<'a> {
    pub name: &'a str,
    pub error: String,
}

impl<'a> From<&'a FailedSource> for FailureView<'a> {
    fn from(failure: &'a FailedSource) -> Self {
        Self {
            name: &failure.name,
            error: failure.error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SanitizeView<'a> {
    pub peak: &'a ConcurrencyPeak,
    #[serde(flatten)]
    pub demux: &'a DemuxSummary,
    pub failures: Vec<FailureView<'a>>,
}

impl<'a> From<&'a SanitizeOutcome> for SanitizeView<'a> {
    fn from(outcome: &'a SanitizeOutcome) -> Self {
        Self {
            peak: &outcome.peak,
            demux: &outcome.demux,
            failures: outcome.failures.iter().map(FailureView::from).collect(),
        }
    }
}

/// `lifetimes` is `null` and `lifetimes_error` set when nothing could be aggregated.
#[derive(Debug, Serialize)]
pub struct LifetimesView<'a> {
    pub lifetimes: Option<&'a LifetimeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetimes_error: Option<String>,
}

impl<'a> From<&'a Result<LifetimeSummary, EngineError>> for LifetimesView<'a> {
    fn from(result: &'a Result<LifetimeSummary, EngineError>) -> Self {
        match result {
            Ok(summary) => Self {
                lifetimes: Some(summary),
                lifetimes_error: None,
            },
            Err(e) => Self {
                lifetimes: None,
                lifetimes_error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisView<'a> {
    pub active: &'a ActiveEntities,
    #[serde(flatten)]
    pub lifetimes: LifetimesView<'a>,
}

impl<'a> From<&'a AnalysisOutcome> for AnalysisView<'a> {
    fn from(outcome: &'a AnalysisOutcome) -> Self {
        Self {
            active: &outcome.active,
            lifetimes: LifetimesView::from(&outcome.lifetimes),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunView<'a> {
    pub sanitize: SanitizeView<'a>,
    pub intervals: IntervalCounts,
    #[serde(flatten)]
    pub analysis: AnalysisView<'a>,
}

impl<'a> From<&'a RunOutcome> for RunView<'a> {
    fn from(outcome: &'a RunOutcome) -> Self {
        Self {
            sanitize: SanitizeView::from(&outcome.sanitize),
            intervals: outcome.intervals,
            analysis: AnalysisView::from(&outcome.analysis),
        }
    }
}

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
