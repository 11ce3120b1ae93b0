//! dockyard CLI - Provision remote hosts into Docker engine hosts
//!
//! This module contains the CLI implementation used by the binary.

mod backends;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use dockyard_core::{Config, config, get_version, get_version_long, load_config};
use tracing_subscriber::EnvFilter;

/// Provision remote hosts into TLS-secured Docker engine hosts
#[derive(Parser)]
#[command(name = "dockyard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Provision remote hosts into TLS-secured Docker engine hosts", long_about = None)]
#[command(after_help = get_banner())]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the host inventory
    Host(commands::HostArgs),
    /// Provision one or more hosts
    Provision(commands::ProvisionArgs),
    /// Print generated files without touching any host
    Render(commands::RenderArgs),
    /// Manage configuration
    Config(commands::ConfigArgs),
}

/// Get the ASCII banner for help display
fn get_banner() -> &'static str {
    r#"
     _            _                          _
  __| | ___   ___| | ___   _  __ _ _ __ __| |
 / _` |/ _ \ / __| |/ / | | |/ _` | '__/ _` |
| (_| | (_) | (__|   <| |_| | (_| | | | (_| |
 \__,_|\___/ \___|_|\_\\__, |\__,_|_|  \__,_|
                       |___/
"#
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `-v` raises the level from warn to
/// debug for both crates. Lines go to stderr above any live spinners.
fn init_tracing(verbose: u8) {
    let level = if verbose > 0 { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dockyard={level},dockyard_core={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(output::LogWriter::default)
        .with_target(false)
        .init();
}

/// Load config (creates default if missing), exiting with a rich error
/// when the file is invalid
fn load_config_or_exit(verbose: u8) -> Result<Config> {
    let config_path = config::paths::get_config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

    match load_config() {
        Ok(config) => {
            if verbose > 0 {
                eprintln!(
                    "{} Config loaded from: {}",
                    style("[info]").cyan(),
                    config_path.display()
                );
            }
            Ok(config)
        }
        Err(e) => {
            eprintln!("{} Configuration error", style("Error:").red().bold());
            eprintln!();
            eprintln!("  {e:#}");
            eprintln!();
            eprintln!("  Config file: {}", style(config_path.display()).yellow());
            eprintln!();
            eprintln!(
                "  {} Check the config file for syntax errors or unknown fields.",
                style("Tip:").cyan()
            );
            eprintln!(
                "  {} Run {} to see the effective configuration.",
                style("Tip:").cyan(),
                style("dockyard config show").green()
            );
            std::process::exit(1);
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Configure color output
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if cli.verbose > 0 {
        eprintln!("{} dockyard {}", style("[info]").cyan(), get_version_long());
    }

    match cli.command {
        Some(Commands::Host(args)) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(commands::cmd_host(&args, cli.quiet, cli.verbose))
        }
        Some(Commands::Provision(args)) => {
            let config = load_config_or_exit(cli.verbose)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(commands::cmd_provision(
                &args,
                &config,
                cli.quiet,
                cli.verbose,
            ))
        }
        Some(Commands::Render(args)) => {
            let config = load_config_or_exit(cli.verbose)?;
            commands::cmd_render(&args, &config)
        }
        Some(Commands::Config(args)) => {
            let config = load_config_or_exit(cli.verbose)?;
            commands::cmd_config(args, &config, cli.quiet)
        }
        None => {
            // No command - show a welcome message and hint to use --help
            if !cli.quiet {
                println!(
                    "{} {}",
                    style("dockyard").cyan().bold(),
                    style(get_version()).dim()
                );
                println!();
                println!("Run {} for available commands.", style("--help").green());
            }
            Ok(())
        }
    }
}
