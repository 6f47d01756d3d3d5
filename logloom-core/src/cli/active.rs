use crate::cli::{GlobalOpts, window};
use crate::pipeline::Pipeline;
use crate::query::active_entities;
use crate::report::{render_active, to_json};
use anyhow::{Context, Result};

/// Lists the entities active in `[from, to]`, read from persisted entity logs.
pub fn active(opts: &GlobalOpts, from: &str, to: &str) -> Result<()> {
    let cfg = opts.load()?;
    let window = window(from, to)?;

    let index = Pipeline::from_config(&cfg)
        .index_dir(&cfg.entity_logs.dir)
        .context("failed to build intervals from entity logs")?;
    let active = active_entities(&index, window);

    if opts.json {
        println!("{}", to_json(&active)?);
    } else {
        print!("{}", render_active(&active, Some(&cfg.entity_logs.dir)));
    }
    Ok(())
}
