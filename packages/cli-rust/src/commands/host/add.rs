//! dockyard host add - Add a new remote host

use anyhow::{Result, bail};
use clap::Args;
use console::style;
use dialoguer::Confirm;
use dockyard_core::host::{HostConfig, HostError, load_hosts, save_hosts, test_connection};

use crate::output::CommandSpinner;

/// Arguments for host add command
#[derive(Args)]
pub struct HostAddArgs {
    /// Name to identify this host; also becomes its hostname when provisioned
    pub name: String,

    /// SSH hostname or IP address
    pub hostname: String,

    /// SSH username (default: current user)
    #[arg(short, long)]
    pub user: Option<String>,

    /// SSH port (default: 22)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to SSH identity file (private key)
    #[arg(short, long)]
    pub identity_file: Option<String>,

    /// Jump host for ProxyJump (user@host:port format)
    #[arg(short = 'J', long)]
    pub jump_host: Option<String>,

    /// Group/tag for organization (can be specified multiple times)
    #[arg(short, long)]
    pub group: Vec<String>,

    /// Description for this host
    #[arg(short, long)]
    pub description: Option<String>,

    /// Skip connection verification
    #[arg(long)]
    pub no_verify: bool,

    /// Overwrite if host already exists
    #[arg(long)]
    pub force: bool,
}

impl HostAddArgs {
    fn to_config(&self) -> HostConfig {
        let mut config = HostConfig::new(&self.hostname);
        if let Some(user) = &self.user {
            config = config.with_user(user);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(key) = &self.identity_file {
            config = config.with_identity_file(key);
        }
        if let Some(jump) = &self.jump_host {
            config = config.with_jump_host(jump);
        }
        for group in &self.group {
            config = config.with_group(group);
        }
        if let Some(desc) = &self.description {
            config = config.with_description(desc);
        }
        config
    }
}

pub async fn cmd_host_add(args: &HostAddArgs, quiet: bool, _verbose: u8) -> Result<()> {
    let mut hosts = load_hosts()?;

    if hosts.has_host(&args.name) && !args.force {
        bail!(
            "Host '{}' already exists. Use --force to overwrite, or choose a different name.",
            args.name
        );
    }

    let config = args.to_config();
    if let Err(msg) = config.validate() {
        return Err(HostError::InvalidConfig(msg).into());
    }

    if !args.no_verify {
        let spinner = CommandSpinner::new_maybe(
            &format!("Testing connection to {}...", config.target()),
            quiet,
        );

        let probe = config.clone();
        match tokio::task::spawn_blocking(move || test_connection(&probe)).await? {
            Ok(kernel) => spinner.success(&format!("Connected ({kernel})")),
            Err(e) => {
                spinner.fail("Connection failed");
                if quiet {
                    return Err(e.into());
                }

                eprintln!();
                eprintln!("  {e}");
                eprintln!();
                print_connection_failure_tips(&config);

                let save_anyway = Confirm::new()
                    .with_prompt("Save the host anyway?")
                    .default(false)
                    .interact()?;
                if !save_anyway {
                    bail!("Connection verification failed");
                }
            }
        }
    }

    let is_overwrite = hosts.has_host(&args.name);
    hosts.add_host(&args.name, config);
    save_hosts(&hosts)?;

    if !quiet {
        if is_overwrite {
            println!(
                "{} Host '{}' updated ({}).",
                style("Updated:").yellow(),
                style(&args.name).cyan(),
                args.hostname
            );
        } else {
            println!(
                "{} Host '{}' added ({}).",
                style("Added:").green(),
                style(&args.name).cyan(),
                args.hostname
            );
        }

        if args.no_verify {
            println!(
                "  {} Connection not verified. Run {} to test.",
                style("Note:").dim(),
                style(format!("dockyard host test {}", args.name)).yellow()
            );
        }
    }

    Ok(())
}

fn print_connection_failure_tips(config: &HostConfig) {
    eprintln!("{}", style("Troubleshooting:").yellow());
    eprintln!("  1. Verify SSH access: ssh {}", config.target());
    match &config.identity_file {
        Some(key) => eprintln!("  2. Ensure key is loaded: ssh-add {key}"),
        None => eprintln!("  2. Pass a key with --identity-file or load one with ssh-add"),
    }
    if !config.is_root() {
        eprintln!(
            "  3. Provisioning needs passwordless sudo for {}",
            style(&config.user).cyan()
        );
    }
}
