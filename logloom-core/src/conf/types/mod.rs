use crate::concurrency::TrailingBucket;
use crate::interval::{IntervalBuilder, Markers};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level `logloom.hcl`. Every block and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogloomConfig {
    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub entity_logs: EntityLogsConfig,

    #[serde(default)]
    pub intervals: IntervalsConfig,

    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
}

/// Where the raw producer logs live.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    #[serde(default = "default_sources_dir")]
    pub dir: PathBuf,

    /// Glob relative to `dir`.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            dir: default_sources_dir(),
            pattern: default_pattern(),
        }
    }
}

/// Where per-entity logs are persisted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntityLogsConfig {
    #[serde(default = "default_entity_logs_dir")]
    pub dir: PathBuf,
}

impl Default for EntityLogsConfig {
    fn default() -> Self {
        Self {
            dir: default_entity_logs_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntervalsConfig {
    #[serde(default = "default_start_marker")]
    pub start_marker: String,

    #[serde(default = "default_end_marker")]
    pub end_marker: String,

    /// Reject repeated starts and repeated ends instead of trusting the input.
    #[serde(default)]
    pub strict: bool,
}

impl Default for IntervalsConfig {
    fn default() -> Self {
        Self {
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConcurrencyConfig {
    /// Compare the last one-second bucket against the peak at end of stream.
    #[serde(default)]
    pub flush_trailing_bucket: bool,
}

fn default_sources_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_pattern() -> String {
    "*.log".to_string()
}

fn default_entity_logs_dir() -> PathBuf {
    PathBuf::from("entity-logs")
}

fn default_start_marker() -> String {
    Markers::default().start
}

fn default_end_marker() -> String {
    Markers::default().end
}

impl LogloomConfig {
    /// Makes relative directories relative to `base` (the config file's directory).
    pub fn resolve_paths(&mut self, base: &Path) {
        for dir in [&mut self.sources.dir, &mut self.entity_logs.dir] {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    pub fn markers(&self) -> Markers {
        Markers {
            start: self.intervals.start_marker.clone(),
            end: self.intervals.end_marker.clone(),
        }
    }

    pub fn interval_builder(&self) -> IntervalBuilder {
        IntervalBuilder::new(self.markers()).strict(self.intervals.strict)
    }

    pub fn trailing_bucket(&self) -> TrailingBucket {
        if self.concurrency.flush_trailing_bucket {
            TrailingBucket::Flush
        } else {
            TrailingBucket::Discard
        }
    }
}
