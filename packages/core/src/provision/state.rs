//! Provisioning steps and the states they lead to

use serde::Serialize;

/// One transition of the bootstrap sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Read /etc/os-release to pick an OS family (runs before the sequence)
    DetectOs,
    SetHostname,
    InstallBasePackages,
    UpdateOs,
    ConfigureRepository,
    InstallEngine,
    WaitForEngine,
    CreateOptionsDir,
    ConfigureAuth,
    ConfigureSwarm,
}

impl Step {
    /// The bootstrap sequence, in execution order
    pub const SEQUENCE: [Step; 9] = [
        Step::SetHostname,
        Step::InstallBasePackages,
        Step::UpdateOs,
        Step::ConfigureRepository,
        Step::InstallEngine,
        Step::WaitForEngine,
        Step::CreateOptionsDir,
        Step::ConfigureAuth,
        Step::ConfigureSwarm,
    ];

    /// State the host is in once this step has succeeded
    pub fn reaches(self) -> ProvisionState {
        match self {
            Step::DetectOs => ProvisionState::Init,
            Step::SetHostname => ProvisionState::HostnameSet,
            Step::InstallBasePackages => ProvisionState::BasePackagesInstalled,
            Step::UpdateOs => ProvisionState::OsUpdated,
            Step::ConfigureRepository => ProvisionState::RepoConfigured,
            Step::InstallEngine => ProvisionState::EngineInstalled,
            Step::WaitForEngine => ProvisionState::EngineRunning,
            Step::CreateOptionsDir => ProvisionState::OptionsDirReady,
            Step::ConfigureAuth => ProvisionState::AuthConfigured,
            Step::ConfigureSwarm => ProvisionState::SwarmConfigured,
        }
    }

    /// Short human-readable description, used for progress output
    pub fn description(self) -> &'static str {
        match self {
            Step::DetectOs => "Detecting operating system",
            Step::SetHostname => "Setting hostname",
            Step::InstallBasePackages => "Installing base packages",
            Step::UpdateOs => "Updating operating system",
            Step::ConfigureRepository => "Configuring Docker repository",
            Step::InstallEngine => "Installing Docker engine",
            Step::WaitForEngine => "Waiting for Docker daemon",
            Step::CreateOptionsDir => "Creating Docker options directory",
            Step::ConfigureAuth => "Configuring TLS and engine options",
            Step::ConfigureSwarm => "Configuring swarm",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Step::DetectOs => "detect-os",
            Step::SetHostname => "set-hostname",
            Step::InstallBasePackages => "install-base-packages",
            Step::UpdateOs => "update-os",
            Step::ConfigureRepository => "configure-repository",
            Step::InstallEngine => "install-engine",
            Step::WaitForEngine => "wait-for-engine",
            Step::CreateOptionsDir => "create-options-dir",
            Step::ConfigureAuth => "configure-auth",
            Step::ConfigureSwarm => "configure-swarm",
        };
        write!(f, "{name}")
    }
}

/// Where a host is in the bootstrap sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionState {
    Init,
    HostnameSet,
    BasePackagesInstalled,
    OsUpdated,
    RepoConfigured,
    EngineInstalled,
    EngineRunning,
    OptionsDirReady,
    AuthConfigured,
    SwarmConfigured,
    Done,
}
