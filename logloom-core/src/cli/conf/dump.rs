use crate::cli::GlobalOpts;
use crate::conf::load_or_default;
use serde::Serialize;

pub fn dump(opts: &GlobalOpts, yaml: bool) -> anyhow::Result<()> {
    let cfg = load_or_default(&opts.config)?;
    if yaml {
        dump_yaml(&cfg)?;
    } else {
        dump_json(&cfg)?;
    }

    Ok(())
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_yaml::to_string(value)?;
    println!("{s}");
    Ok(())
}
