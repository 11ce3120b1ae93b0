//! Config subcommand implementations
//!
//! Provides `dockyard config` subcommands for viewing configuration.

mod show;

use anyhow::Result;
use clap::{Args, Subcommand};
use dockyard_core::{Config, config};

pub use show::cmd_config_show;

/// Configuration command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Output as JSON instead of table format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show current configuration
    Show {
        /// Output as JSON instead of table format
        #[arg(long)]
        json: bool,
    },
    /// Print the config file path
    Path,
}

/// Handle config command
///
/// Defaults to Show when no subcommand is given.
pub fn cmd_config(args: ConfigArgs, config: &Config, quiet: bool) -> Result<()> {
    match args.command {
        Some(ConfigSubcommands::Show { json }) => cmd_config_show(config, json, quiet),
        Some(ConfigSubcommands::Path) => {
            let path = config::paths::get_config_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
            println!("{}", path.display());
            Ok(())
        }
        None => cmd_config_show(config, args.json, quiet),
    }
}
