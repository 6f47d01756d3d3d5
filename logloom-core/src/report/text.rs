use crate::concurrency::ConcurrencyPeak;
use crate::demux::entity_log_path;
use crate::error::EngineError;
use crate::pipeline::{FailedSource, SanitizeOutcome};
use crate::query::ActiveEntities;
use crate::record::format_timestamp;
use crate::stats::LifetimeSummary;
use std::path::Path;

pub fn render_peak(peak: &ConcurrencyPeak) -> String {
    let mut out = String::from("Highest count of concurrent entities in any second\n");
    match &peak.epoch {
        Some(epoch) => out.push_str(&format!(
            "{} : {}\n",
            format_timestamp(epoch),
            peak.max_concurrent
        )),
        None => out.push_str("none\n"),
    }
    out
}

pub fn render_failures(failures: &[FailedSource]) -> String {
    let mut out = String::new();
    for failure in failures {
        out.push_str(&format!("Excluded source {}: {}\n", failure.name, failure.error));
    }
    out
}

pub fn render_sanitize(outcome: &SanitizeOutcome) -> String {
    let mut out = format!(
        "Sanitized {} records into {} entity logs\n\n",
        outcome.records(),
        outcome.demux.per_entity.len()
    );
    out.push_str(&render_peak(&outcome.peak));

    if !outcome.is_clean() {
        out.push('\n');
        out.push_str(&render_failures(&outcome.failures));
    }
    out
}

/// One line per active entity, with its streams and, when `log_dir` is
/// known, the path of its persisted log. Ends with the total.
pub fn render_active(active: &ActiveEntities, log_dir: Option<&Path>) -> String {
    let mut out = String::new();

    for (entity, streams) in &active.entities {
        let streams: Vec<String> = streams.iter().map(|s| s.to_string()).collect();
        out.push_str(&format!("{entity}:[{}]", streams.join(", ")));
        if let Some(dir) = log_dir {
            out.push_str(&format!(" - {}", entity_log_path(dir, entity).display()));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Number of active entities in the time range {} - {} : {}\n",
        format_timestamp(&active.window.start),
        format_timestamp(&active.window.end),
        active.count
    ));
    out
}

pub fn render_lifetimes(lifetimes: &Result<LifetimeSummary, EngineError>) -> String {
    match lifetimes {
        Ok(summary) => format!(
            "Average lifetime over {} closed intervals : {} s\n\
             Standard deviation of lifetime : {} s\n",
            summary.count, summary.mean, summary.stddev
        ),
        Err(e) => format!("Lifetime statistics unavailable: {e}\n"),
    }
}
