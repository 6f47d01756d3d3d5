use crate::cli::GlobalOpts;
use crate::pipeline::Pipeline;
use crate::report::{render_lifetimes, to_json};
use crate::stats::lifetime_summary;
use anyhow::{Context, Result};

/// Mean and standard deviation of every closed interval's lifetime.
pub fn stats(opts: &GlobalOpts) -> Result<()> {
    let cfg = opts.load()?;
    let index = Pipeline::from_config(&cfg)
        .index_dir(&cfg.entity_logs.dir)
        .context("failed to build intervals from entity logs")?;

    let summary = lifetime_summary(&index).context("cannot compute lifetime statistics")?;

    if opts.json {
        println!("{}", to_json(&summary)?);
    } else {
        print!("{}", render_lifetimes(&Ok(summary)));
    }
    Ok(())
}
