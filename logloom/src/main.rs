use clap::{Parser, Subcommand};
use logloom_core::cli::{self, GlobalOpts, conf::ConfigCmd};
use logloom_core::logging::{LogFormat, default_log_format, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logloom",
    version,
    about = "logloom: merge interleaved producer logs into per-entity timelines"
)]
struct Cli {
    /// Directory holding logloom.hcl
    #[arg(long, global = true, default_value = ".")]
    config: PathBuf,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Diagnostic log format on stderr (defaults to pretty on a terminal, JSON otherwise)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge source logs and write one log per entity
    Sanitize,

    /// List entities active in a time window
    Active {
        /// Window start, `yyyy-MM-dd HH:mm:ss[,SSS]` or RFC 3339
        #[arg(long)]
        from: String,

        /// Window end
        #[arg(long)]
        to: String,
    },

    /// Mean and standard deviation of entity lifetimes
    Stats,

    /// Sanitize, query and aggregate in one pass without writing entity logs
    Run {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    let opts = GlobalOpts {
        config: cli.config,
        json: cli.json,
    };

    let result = match cli.command {
        Command::Sanitize => cli::sanitize(&opts),
        Command::Active { from, to } => cli::active(&opts, &from, &to),
        Command::Stats => cli::stats(&opts),
        Command::Run { from, to } => cli::run(&opts, &from, &to),
        Command::Config { cmd } => match cmd {
            ConfigCmd::Check { plain } => cli::conf::check(&opts, plain),
            ConfigCmd::Dump { yaml } => cli::conf::dump(&opts, yaml),
            ConfigCmd::Init => cli::conf::init(&opts.config),
        },
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
