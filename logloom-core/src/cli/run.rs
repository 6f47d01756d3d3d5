use crate::cli::{GlobalOpts, window};
use crate::conf::discover;
use crate::pipeline::Pipeline;
use crate::report::{RunView, render_active, render_lifetimes, render_sanitize, to_json};
use anyhow::{Context, Result};

/// Sanitize, query and aggregate in one pass, keeping entity logs in memory.
pub fn run(opts: &GlobalOpts, from: &str, to: &str) -> Result<()> {
    let cfg = opts.load()?;
    let window = window(from, to)?;
    let paths = discover(&cfg.sources.dir, &cfg.sources.pattern)?;

    let outcome = Pipeline::from_config(&cfg)
        .run_paths(&paths, window)
        .context("pipeline run failed")?;

    if opts.json {
        println!("{}", to_json(&RunView::from(&outcome))?);
    } else {
        print!("{}", render_sanitize(&outcome.sanitize));
        println!();
        print!("{}", render_active(&outcome.analysis.active, None));
        println!();
        print!("{}", render_lifetimes(&outcome.analysis.lifetimes));
    }
    Ok(())
}
