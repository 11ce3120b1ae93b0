//! OS family abstraction and registry
//!
//! An [`OsFamily`] knows how a distribution family installs packages,
//! controls services and lays out Docker's files. Families only build
//! commands; running them is the orchestrator's job.

use std::sync::Arc;

use super::action::{PackageAction, ServiceAction};
use super::command::{FileUpload, RemoteCommand};
use super::engine::{DockerOptions, EngineConfigContext, render_engine_unit};
use super::error::ProvisionError;
use super::hostname;
use super::os_release::OsReleaseInfo;
use super::redhat::RedHat;
use super::repository::RepositoryConfig;

/// Provisioning behaviour of one OS family
pub trait OsFamily: Send + Sync {
    /// Registry name (e.g. "redhat")
    fn name(&self) -> &'static str;

    /// Whether this family handles the given OS release
    fn matches(&self, info: &OsReleaseInfo) -> bool;

    /// Whether remote commands need a pseudo-terminal
    fn requires_pty(&self) -> bool {
        false
    }

    /// Packages installed before anything else
    fn base_packages(&self) -> &[&'static str];

    /// Storage driver used when the caller sets none
    fn default_storage_driver(&self) -> &'static str;

    /// Remote directory holding engine options and certificates
    fn docker_options_dir(&self) -> &'static str;

    /// Remote path of the engine unit file
    fn daemon_options_file(&self) -> &'static str;

    /// Name of the Docker engine package
    fn engine_package(&self) -> &'static str;

    /// Package manager command for `action` on `name`
    fn package_command(&self, name: &str, action: PackageAction) -> RemoteCommand;

    /// Full OS upgrade
    fn os_update_command(&self) -> RemoteCommand;

    /// Install the Docker engine package
    fn engine_install_command(&self, package: &str) -> RemoteCommand;

    /// Service manager commands for `action` on `name`, in order
    fn service_commands(&self, name: &str, action: ServiceAction) -> Vec<RemoteCommand>;

    /// Commands that set the hostname and its loopback entry
    fn hostname_commands(&self, name: &str) -> Result<Vec<RemoteCommand>, ProvisionError> {
        hostname::hostname_commands(name)
    }

    /// Package repository definition for `info`, if the family needs one
    fn repository_file(
        &self,
        repos: &RepositoryConfig,
        info: &OsReleaseInfo,
    ) -> Result<Option<FileUpload>, ProvisionError>;

    /// Probe run to check the daemon answers
    fn engine_probe_command(&self) -> RemoteCommand {
        RemoteCommand::new("docker").arg("version").privileged()
    }

    /// Create the options directory
    fn options_dir_command(&self) -> RemoteCommand {
        RemoteCommand::new("mkdir")
            .args(["-p", self.docker_options_dir()])
            .privileged()
    }

    /// Render the engine configuration for this family
    fn render_engine_config(
        &self,
        context: &EngineConfigContext<'_>,
    ) -> Result<DockerOptions, ProvisionError> {
        render_engine_unit(context, self.daemon_options_file())
    }
}

/// Known OS families, looked up by name or by OS release
#[derive(Clone, Default)]
pub struct FamilyRegistry {
    families: Vec<Arc<dyn OsFamily>>,
}

impl FamilyRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in family
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(RedHat));
        registry
    }

    /// Add a family, replacing any family registered under the same name
    pub fn register(&mut self, family: Arc<dyn OsFamily>) {
        self.families.retain(|existing| existing.name() != family.name());
        self.families.push(family);
    }

    /// Family registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<dyn OsFamily>> {
        self.families
            .iter()
            .find(|family| family.name() == name)
            .cloned()
    }

    /// First registered family that handles `info`
    pub fn find_for(&self, info: &OsReleaseInfo) -> Result<Arc<dyn OsFamily>, ProvisionError> {
        self.families
            .iter()
            .find(|family| family.matches(info))
            .cloned()
            .ok_or_else(|| ProvisionError::UnsupportedOs {
                id: info.id.clone(),
            })
    }

    /// Names of registered families, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.families.iter().map(|family| family.name()).collect()
    }
}

impl std::fmt::Debug for FamilyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FamilyRegistry")
            .field("families", &self.names())
            .finish()
    }
}
