//! dockyard host remove - Remove a host from the inventory

use anyhow::Result;
use clap::Args;
use console::style;
use dialoguer::Confirm;
use dockyard_core::host::{HostError, load_hosts, save_hosts};

/// Arguments for host remove command
#[derive(Args)]
pub struct HostRemoveArgs {
    /// Name of the host to remove
    pub name: String,

    /// Skip confirmation prompt
    #[arg(long, short)]
    pub force: bool,
}

pub fn cmd_host_remove(args: &HostRemoveArgs, quiet: bool, _verbose: u8) -> Result<()> {
    let mut hosts = load_hosts()?;

    if !hosts.has_host(&args.name) {
        return Err(HostError::NotFound(args.name.clone()).into());
    }

    // The machine itself is left untouched
    if !args.force && !quiet {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove '{}' from the inventory?", args.name))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    hosts.remove_host(&args.name);
    save_hosts(&hosts)?;

    if !quiet {
        println!(
            "{} Host '{}' removed.",
            style("Removed:").green(),
            style(&args.name).cyan()
        );
    }

    Ok(())
}
