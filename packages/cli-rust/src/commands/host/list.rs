//! dockyard host list - List all configured hosts

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};
use console::style;
use dockyard_core::config::get_hosts_path;
use dockyard_core::host::{HostConfig, load_hosts};

/// Arguments for host list command
#[derive(Args)]
pub struct HostListArgs {
    /// Filter by group
    #[arg(short, long)]
    pub group: Option<String>,

    /// Show only host names (for scripting)
    #[arg(long)]
    pub names_only: bool,
}

fn in_group(config: &HostConfig, group: Option<&str>) -> bool {
    group.is_none_or(|g| config.groups.iter().any(|candidate| candidate == g))
}

pub fn cmd_host_list(args: &HostListArgs, quiet: bool, _verbose: u8) -> Result<()> {
    let hosts = load_hosts()?;

    if hosts.hosts.is_empty() {
        if !quiet && !args.names_only {
            println!("No hosts configured.");
            println!();
            println!(
                "  {} {}",
                style("Add one with:").dim(),
                style("dockyard host add <name> <hostname>").yellow()
            );
        }
        return Ok(());
    }

    let filtered: Vec<_> = hosts
        .hosts
        .iter()
        .filter(|(_, config)| in_group(config, args.group.as_deref()))
        .collect();

    if filtered.is_empty() {
        if !quiet && !args.names_only {
            println!(
                "No hosts found in group '{}'.",
                args.group.as_deref().unwrap_or("")
            );
        }
        return Ok(());
    }

    // Names only mode (for scripting)
    if args.names_only || quiet {
        for (name, _) in &filtered {
            println!("{name}");
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Hostname", "User", "Port", "Groups"]);

    for (name, config) in filtered {
        let port_str = config
            .port
            .map(|p| p.to_string())
            .unwrap_or_else(|| "22".to_string());
        let groups_str = if config.groups.is_empty() {
            "-".to_string()
        } else {
            config.groups.join(", ")
        };

        table.add_row(vec![
            Cell::new(name),
            Cell::new(&config.hostname),
            Cell::new(&config.user),
            Cell::new(port_str),
            Cell::new(groups_str),
        ]);
    }

    println!("{table}");

    if let Some(path) = get_hosts_path() {
        println!();
        println!(
            "  {} {}",
            style("Inventory file:").dim(),
            style(path.display()).dim()
        );
    }

    Ok(())
}
