use crate::conf::CONFIG_FILE_NAME;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

const TEMPLATE: &str = include_str!("../../../config-templates/logloom.hcl");

/// Writes the starter config into `dir`, creating it if needed.
pub fn init(dir: &Path) -> Result<()> {
    let path = dir.join(CONFIG_FILE_NAME);

    // Refuse to overwrite an existing config
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    fs::write(&path, TEMPLATE.trim_start())
        .with_context(|| format!("failed to create {}", path.display()))?;

    println!("✔ Initialized logloom config in {}", path.display());
    println!();
    println!("Next steps:");
    println!("  logloom config check");
    println!("  logloom sanitize");

    Ok(())
}
