use crate::error::EngineError;
use crate::interval::IntervalIndex;
use serde::Serialize;

/// Append-only durations, in seconds, with a running sum.
#[derive(Debug, Clone, Default)]
pub struct LifetimeSamples {
    durations: Vec<f64>,
    sum: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifetimeSummary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divisor is `count`).
    pub stddev: f64,
}

impl LifetimeSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations of every closed interval in the index; open intervals are skipped.
    pub fn from_index(index: &IntervalIndex) -> Self {
        let mut samples = Self::new();
        for secs in index.intervals().filter_map(|i| i.duration_secs()) {
            samples.push(secs as f64);
        }
        samples
    }

    pub fn push(&mut self, seconds: f64) {
        self.durations.push(seconds);
        self.sum += seconds;
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Mean, then a second pass for the population variance.
    pub fn summarize(&self) -> Result<LifetimeSummary, EngineError> {
        if self.durations.is_empty() {
            return Err(EngineError::EmptyAggregation);
        }

        let count = self.durations.len();
        let mean = self.sum / count as f64;
        let squared: f64 = self.durations.iter().map(|d| (d - mean).powi(2)).sum();

        Ok(LifetimeSummary {
            count,
            mean,
            stddev: (squared / count as f64).sqrt(),
        })
    }
}

impl Extend<f64> for LifetimeSamples {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for seconds in iter {
            self.push(seconds);
        }
    }
}

pub fn lifetime_summary(index: &IntervalIndex) -> Result<LifetimeSummary, EngineError> {
    LifetimeSamples::from_index(index).summarize()
}
