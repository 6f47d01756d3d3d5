use crate::cli::GlobalOpts;
use crate::conf::discover;
use crate::demux::FileSink;
use crate::pipeline::Pipeline;
use crate::report::{SanitizeView, render_sanitize, to_json};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Merges every source log and writes one log per entity.
pub fn sanitize(opts: &GlobalOpts) -> Result<()> {
    let cfg = opts.load()?;
    let paths = discover(&cfg.sources.dir, &cfg.sources.pattern)?;
    if paths.is_empty() {
        warn!(
            dir = %cfg.sources.dir.display(),
            pattern = %cfg.sources.pattern,
            "no source logs matched"
        );
    }

    let sink = FileSink::create(&cfg.entity_logs.dir)?;
    let (sink, outcome) = Pipeline::from_config(&cfg)
        .sanitize_paths(&paths, sink)
        .context("sanitize failed")?;

    info!(dir = %sink.dir().display(), "entity logs written");

    if opts.json {
        println!("{}", to_json(&SanitizeView::from(&outcome))?);
    } else {
        print!("{}", render_sanitize(&outcome));
    }
    Ok(())
}
