//! Docker engine provisioning
//!
//! Takes an existing machine reachable over a [`CommandChannel`] from a bare
//! OS image to a running, TLS-secured Docker engine:
//! - OS detection and per-family command building ([`OsFamily`])
//! - Repository, hostname and engine unit rendering
//! - Readiness polling of the daemon
//! - The [`Provisioner`] state machine that sequences it all
//!
//! [`CommandChannel`]: crate::host::CommandChannel

mod action;
mod backend;
mod command;
mod driver;
mod engine;
mod error;
mod family;
mod hostname;
mod options;
mod orchestrator;
mod os_release;
mod poll;
mod redhat;
mod repository;
mod state;
mod systemd;

#[cfg(test)]
mod testing;

// Public exports
pub use action::{PackageAction, ServiceAction};
pub use backend::{AuthBackend, ExistingCerts, Standalone, SwarmBackend};
pub use command::{FileUpload, RemoteCommand, shell_quote};
pub use driver::{Driver, RemoteHost, StaticDriver};
pub use engine::{DockerOptions, EngineConfigContext, render_engine_unit};
pub use error::ProvisionError;
pub use family::{FamilyRegistry, OsFamily};
pub use hostname::{loopback_entry_script, validate_hostname};
pub use options::{AuthOptions, EngineOptions, ProvisionInput, SwarmOptions};
pub use orchestrator::{
    DEFAULT_DOCKER_PORT, ProvisionReport, Provisioner, StepTiming, detect,
};
pub use os_release::{OsReleaseInfo, parse_os_release};
pub use poll::Poller;
pub use redhat::RedHat;
pub use repository::{REPO_FILE_PATH, RepoCoordinate, RepositoryConfig};
pub use state::{ProvisionState, Step};
