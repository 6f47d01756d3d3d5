pub mod conf;

mod active;
mod run;
mod sanitize;
mod stats;

pub use active::active;
pub use run::run;
pub use sanitize::sanitize;
pub use stats::stats;

use crate::conf::{LogloomConfig, load_or_default};
use crate::query::{TimeWindow, parse_instant};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalOpts {
    /// Directory holding `logloom.hcl`.
    pub config: PathBuf,
    /// Print reports as JSON instead of text.
    pub json: bool,
}

impl GlobalOpts {
    fn load(&self) -> Result<LogloomConfig> {
        load_or_default(&self.config)
            .with_context(|| format!("failed to load config from {}", self.config.display()))
    }
}

fn window(from: &str, to: &str) -> Result<TimeWindow> {
    let from = parse_instant(from).context("invalid --from")?;
    let to = parse_instant(to).context("invalid --to")?;
    Ok(TimeWindow::new(from, to))
}
