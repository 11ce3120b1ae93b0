//! dockyard-core - Core library for dockyard
//!
//! Provisions Docker engine hosts over SSH. The CLI in `packages/cli-rust`
//! is a thin front end over this crate.

pub mod config;
pub mod host;
pub mod provision;
pub mod version;

// Re-export the types most consumers need
pub use config::{Config, load_config, save_config};
pub use host::{CommandChannel, HostConfig, HostError, HostsFile, SshChannel};
pub use provision::{
    FamilyRegistry, ProvisionError, ProvisionInput, ProvisionReport, Provisioner, RemoteHost, Step,
};
pub use version::{get_version, get_version_long};
