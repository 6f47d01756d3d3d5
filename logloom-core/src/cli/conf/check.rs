use crate::cli::GlobalOpts;
use crate::conf::{ConfigError, discover, load_config};
use anyhow::{Result, bail};

pub fn check(opts: &GlobalOpts, plain: bool) -> Result<()> {
    match load_config(&opts.config) {
        Ok(cfg) => {
            let matched = discover(&cfg.sources.dir, &cfg.sources.pattern)?.len();
            println!("✔ Config loaded successfully");
            println!(
                "✔ sources: {} ({}, {} files matched)",
                cfg.sources.dir.display(),
                cfg.sources.pattern,
                matched
            );
            println!("✔ entity logs: {}", cfg.entity_logs.dir.display());
            println!(
                "✔ markers: {} / {}{}",
                cfg.intervals.start_marker,
                cfg.intervals.end_marker,
                if cfg.intervals.strict { " (strict)" } else { "" }
            );
            Ok(())
        }
        Err(err) => {
            print_config_error(&err, plain, opts.json);
            bail!("configuration check failed");
        }
    }
}

fn print_config_error(err: &ConfigError, plain: bool, json: bool) {
    let ConfigError::Invalid { report } = err else {
        eprintln!("{err}");
        if let Some(hint) = config_error_hint(err) {
            eprintln!();
            eprintln!("{hint}");
        }
        return;
    };

    if json {
        match report.render_json() {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("failed to render report: {e}"),
        }
    } else if plain {
        eprint!("{}", report.render_plain());
    } else {
        eprint!("{}", report.render_pretty());
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "No logloom.hcl found in the config directory.\n\
             \n\
             Create one with:\n\
             \n\
             logloom config init",
        ),

        ConfigError::Parse { .. } => Some(
            "Only these blocks are accepted:\n\
             \n\
             sources      { dir, pattern }\n\
             entity_logs  { dir }\n\
             intervals    { start_marker, end_marker, strict }\n\
             concurrency  { flush_trailing_bucket }",
        ),

        ConfigError::Glob { .. } => Some(
            "sources.pattern must be a valid glob, for example \"*.log\".",
        ),

        ConfigError::Invalid { .. } => None,
    }
}
