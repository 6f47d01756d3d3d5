use crate::conf::ConfigError;
use glob::glob;
use std::path::{Path, PathBuf};

/// Discovers input log files matching a glob pattern under `root`.
///
/// Directories matching the pattern are skipped and unreadable glob entries are
/// dropped. Paths come back sorted so that source indices are stable between runs.
///
/// # Errors
///
/// Returns `ConfigError::Glob` if the pattern is malformed.
pub fn discover(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let pattern = root.join(pattern).to_string_lossy().into_owned();
    let mut paths: Vec<_> = glob(&pattern)
        .map_err(|e| ConfigError::Glob {
            pattern: pattern.clone(),
            source: e,
        })?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}
