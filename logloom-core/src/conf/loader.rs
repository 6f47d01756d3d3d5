use crate::conf::ConfigError;
use crate::conf::types::LogloomConfig;
use crate::conf::validation::validate_config;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "logloom.hcl";

/// Loads `<root>/logloom.hcl`, resolves its directories against `root` and validates it.
///
/// Validation warnings are logged; any validation error fails the load.
pub fn load_config(root: &Path) -> Result<LogloomConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let path = root.join(CONFIG_FILE_NAME);
    let raw = fs::read_to_string(&path).map_err(|e| ConfigError::read_file(&path, e))?;
    let config: LogloomConfig = hcl::from_str(&raw).map_err(|e| ConfigError::parse(&path, e))?;

    finalize(config, root)
}

/// Like [`load_config`], but falls back to built-in defaults when `root`
/// holds no config file.
pub fn load_or_default(root: &Path) -> Result<LogloomConfig, ConfigError> {
    if root.join(CONFIG_FILE_NAME).is_file() {
        return load_config(root);
    }

    debug!(root = %root.display(), "no config file found, using defaults");
    finalize(LogloomConfig::default(), root)
}

fn finalize(mut config: LogloomConfig, root: &Path) -> Result<LogloomConfig, ConfigError> {
    config.resolve_paths(root);

    let report = validate_config(&config);
    for issue in &report.warnings {
        warn!(field = %issue.field, "{}", issue.message);
    }
    if report.has_errors() {
        return Err(ConfigError::Invalid { report });
    }

    Ok(config)
}
