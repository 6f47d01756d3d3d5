use crate::concurrency::{ConcurrencyTracker, TrailingBucket};
use crate::conf::LogloomConfig;
use crate::demux::{Demultiplexer, EntitySink, MemorySink, load_entity_logs};
use crate::error::EngineError;
use crate::interval::{IntervalBuilder, IntervalIndex, Markers};
use crate::merge::KWayMerger;
use crate::pipeline::{AnalysisOutcome, FailedSource, RunOutcome, SanitizeOutcome};
use crate::query::{TimeWindow, active_entities};
use crate::record::{RecordSource, open_file_sources};
use crate::stats::lifetime_summary;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct Pipeline {
    builder: IntervalBuilder,
    trailing: TrailingBucket,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(IntervalBuilder::new(Markers::default()), TrailingBucket::default())
    }
}

impl Pipeline {
    pub fn new(builder: IntervalBuilder, trailing: TrailingBucket) -> Self {
        Self { builder, trailing }
    }

    pub fn from_config(config: &LogloomConfig) -> Self {
        Self::new(config.interval_builder(), config.trailing_bucket())
    }

    pub fn builder(&self) -> &IntervalBuilder {
        &self.builder
    }

    /// Merges `sources` in timestamp order, feeding the concurrency tracker and
    /// the demultiplexer in lockstep.
    ///
    /// A failing source is dropped and recorded in the outcome while the others
    /// keep merging. A sink failure aborts the run.
    pub fn sanitize<S, K>(
        &self,
        sources: impl IntoIterator<Item = S>,
        sink: K,
    ) -> Result<(K, SanitizeOutcome), EngineError>
    where
        S: RecordSource,
        K: EntitySink,
    {
        let started = Instant::now();
        let mut tracker = ConcurrencyTracker::new(self.trailing);
        let mut demux = Demultiplexer::new(sink);
        let mut failures = Vec::new();

        for merged in KWayMerger::new(sources) {
            match merged {
                Ok(merged) => {
                    tracker.observe(&merged.record);
                    demux.route(&merged.record)?;
                }
                Err(failure) => failures.push(FailedSource::from(failure)),
            }
        }

        let (sink, demux) = demux.finish()?;
        let peak = tracker.finish();

        info!(
            records = demux.records,
            entities = demux.per_entity.len(),
            failed_sources = failures.len(),
            max_concurrent = peak.max_concurrent,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "sanitize finished"
        );

        Ok((
            sink,
            SanitizeOutcome {
                peak,
                demux,
                failures,
            },
        ))
    }

    /// Opens every path and sanitizes the ones that could be opened.
    /// Unopenable paths are reported as failures in the outcome.
    pub fn sanitize_paths<K: EntitySink>(
        &self,
        paths: &[PathBuf],
        sink: K,
    ) -> Result<(K, SanitizeOutcome), EngineError> {
        let (sources, unavailable) = open_file_sources(paths);
        debug!(
            requested = paths.len(),
            opened = sources.len(),
            "sources opened"
        );

        let (sink, mut outcome) = self.sanitize(sources, sink)?;

        let mut failures: Vec<FailedSource> =
            unavailable.into_iter().map(FailedSource::excluded).collect();
        failures.append(&mut outcome.failures);
        outcome.failures = failures;

        Ok((sink, outcome))
    }

    /// Builds intervals from per-entity logs previously written to `dir`.
    pub fn index_dir(&self, dir: &Path) -> Result<IntervalIndex, EngineError> {
        let logs = load_entity_logs(dir)?;
        IntervalIndex::build(&self.builder, &logs)
    }

    pub fn analyze(&self, index: &IntervalIndex, window: TimeWindow) -> AnalysisOutcome {
        let active = active_entities(index, window);
        let lifetimes = lifetime_summary(index);

        match &lifetimes {
            Ok(summary) => info!(
                active = active.count,
                closed = summary.count,
                mean_secs = summary.mean,
                stddev_secs = summary.stddev,
                "analysis finished"
            ),
            Err(e) => warn!(active = active.count, error = %e, "analysis finished without lifetimes"),
        }

        AnalysisOutcome { active, lifetimes }
    }

    /// The whole pipeline without touching disk for entity logs.
    pub fn run<S: RecordSource>(
        &self,
        sources: impl IntoIterator<Item = S>,
        window: TimeWindow,
    ) -> Result<RunOutcome, EngineError> {
        let (sink, sanitize) = self.sanitize(sources, MemorySink::new())?;
        self.finish_run(sink, sanitize, window)
    }

    /// [`Pipeline::run`] over files, reporting unopenable paths like [`Pipeline::sanitize_paths`].
    pub fn run_paths(
        &self,
        paths: &[PathBuf],
        window: TimeWindow,
    ) -> Result<RunOutcome, EngineError> {
        let (sink, sanitize) = self.sanitize_paths(paths, MemorySink::new())?;
        self.finish_run(sink, sanitize, window)
    }

    fn finish_run(
        &self,
        sink: MemorySink,
        sanitize: SanitizeOutcome,
        window: TimeWindow,
    ) -> Result<RunOutcome, EngineError> {
        let index = IntervalIndex::build(&self.builder, sink.logs())?;
        let analysis = self.analyze(&index, window);

        Ok(RunOutcome {
            sanitize,
            intervals: index.counts(),
            index,
            analysis,
        })
    }
}
