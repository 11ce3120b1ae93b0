//! Host inventory subcommand implementations
//!
//! Provides `dockyard host` subcommands for managing the machines that can
//! be provisioned.

mod add;
mod list;
mod remove;
mod show;

use anyhow::Result;
use clap::{Args, Subcommand};

pub use add::cmd_host_add;
pub use list::cmd_host_list;
pub use remove::cmd_host_remove;
pub use show::cmd_host_show;
pub use test::cmd_host_test;

/// Host inventory command arguments
#[derive(Args)]
pub struct HostArgs {
    #[command(subcommand)]
    pub command: HostCommands,
}

/// Host inventory subcommands
#[derive(Subcommand)]
pub enum HostCommands {
    /// Add a remote host to the inventory
    Add(add::HostAddArgs),
    /// List hosts in the inventory
    List(list::HostListArgs),
    /// Show details for a host
    Show(show::HostShowArgs),
    /// Remove a host from the inventory
    Remove(remove::HostRemoveArgs),
    /// Test the SSH connection and detect the host's OS
    Test(test::HostTestArgs),
}

/// Handle host command
///
/// Routes to the appropriate handler based on the subcommand.
pub async fn cmd_host(args: &HostArgs, quiet: bool, verbose: u8) -> Result<()> {
    match &args.command {
        HostCommands::Add(add_args) => cmd_host_add(add_args, quiet, verbose).await,
        HostCommands::List(list_args) => cmd_host_list(list_args, quiet, verbose),
        HostCommands::Show(show_args) => cmd_host_show(show_args, quiet, verbose),
        HostCommands::Remove(remove_args) => cmd_host_remove(remove_args, quiet, verbose),
        HostCommands::Test(test_args) => cmd_host_test(test_args, quiet, verbose).await,
    }
}
