// NOTE: Command Organization
//
// Subcommands are namespaced by screen (client, product, inventory, order,
// report) so `--help` mirrors the console's navigation. Session commands
// (login, logout, whoami) stay top-level.

mod commands;
mod enums;

pub use commands::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "posadmin")]
#[command(about = "Admin console for a Point-of-Sale backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (config.toml, cached credentials). Defaults to
    /// $POSADMIN_PATH, then the platform data dir
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Backend base URL; overrides config.toml and $POSADMIN_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}
