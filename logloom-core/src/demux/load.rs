use super::sink::is_entity_log_name;
use crate::error::EngineError;
use crate::record::{EntityKey, FileSource, Record, RecordSource};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads persisted per-entity logs back from a directory of `*.log` files.
///
/// An entry that cannot be inspected fails the load as `SourceUnavailable`;
/// a `*.log` entry that is not a regular file is skipped with a warning.
pub fn load_entity_logs(dir: &Path) -> Result<BTreeMap<EntityKey, Vec<Record>>, EngineError> {
    let name = dir.display().to_string();
    let entries = fs::read_dir(dir).map_err(|e| EngineError::unavailable(name.clone(), e))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| EngineError::unavailable(name.clone(), e))?
            .path();
        if !is_entity_log_name(&path) {
            continue;
        }

        let meta = fs::metadata(&path)
            .map_err(|e| EngineError::unavailable(path.display().to_string(), e))?;
        if meta.is_file() {
            paths.push(path);
        } else {
            warn!(path = %path.display(), "skipping entity log entry that is not a file");
        }
    }
    paths.sort();

    let mut logs: BTreeMap<EntityKey, Vec<Record>> = BTreeMap::new();
    for path in &paths {
        let mut source = FileSource::open(path)?;
        while let Some(record) = source.next_record()? {
            logs.entry(record.entity.clone()).or_default().push(record);
        }
    }

    debug!(dir = %dir.display(), files = paths.len(), entities = logs.len(), "entity logs loaded");
    Ok(logs)
}
