mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Print issues without colors
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print resolved configuration
    Dump {
        /// Output as YAML instead of JSON
        #[arg(long)]
        yaml: bool,
    },

    /// Write a starter logloom.hcl into the config directory
    Init,
}
