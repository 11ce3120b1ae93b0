//! Engine, auth and swarm option records
//!
//! These are plain data: the caller fills them (usually from the config
//! file) and the orchestrator threads them through the run as one
//! [`ProvisionInput`].

use serde::{Deserialize, Serialize};

/// Docker daemon settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOptions {
    /// Storage driver; the OS family default applies when unset
    pub storage_driver: Option<String>,

    /// Daemon labels (`--label`)
    pub labels: Vec<String>,

    /// Registries reachable without TLS verification (`--insecure-registry`)
    pub insecure_registry: Vec<String>,

    /// Registry mirrors (`--registry-mirror`)
    pub registry_mirror: Vec<String>,

    /// Extra daemon flags, given without the leading `--`
    pub arbitrary_flags: Vec<String>,

    /// `KEY=value` pairs for the unit's `Environment=` line
    pub env: Vec<String>,

    /// Engine package name override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_package: Option<String>,
}

impl EngineOptions {
    /// Builder pattern: set the storage driver
    pub fn with_storage_driver(mut self, driver: impl Into<String>) -> Self {
        self.storage_driver = Some(driver.into());
        self
    }

    /// Builder pattern: add a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Builder pattern: add an environment entry
    pub fn with_env(mut self, entry: impl Into<String>) -> Self {
        self.env.push(entry.into());
        self
    }
}

/// Remote locations of the daemon's TLS material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthOptions {
    pub ca_cert_remote_path: String,
    pub server_cert_remote_path: String,
    pub server_key_remote_path: String,
}

impl AuthOptions {
    pub const CA_CERT_FILE: &'static str = "ca.pem";
    pub const SERVER_CERT_FILE: &'static str = "server.pem";
    pub const SERVER_KEY_FILE: &'static str = "server-key.pem";

    /// Certificate paths inside a remote options directory
    pub fn for_options_dir(dir: &str) -> Self {
        let dir = dir.trim_end_matches('/');
        Self {
            ca_cert_remote_path: format!("{dir}/{}", Self::CA_CERT_FILE),
            server_cert_remote_path: format!("{dir}/{}", Self::SERVER_CERT_FILE),
            server_key_remote_path: format!("{dir}/{}", Self::SERVER_KEY_FILE),
        }
    }

    /// (file name, remote path) for each certificate
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (Self::CA_CERT_FILE, self.ca_cert_remote_path.as_str()),
            (Self::SERVER_CERT_FILE, self.server_cert_remote_path.as_str()),
            (Self::SERVER_KEY_FILE, self.server_key_remote_path.as_str()),
        ]
    }
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self::for_options_dir("/etc/docker")
    }
}

/// Swarm membership settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwarmOptions {
    pub is_swarm: bool,
    pub master: bool,
    pub discovery: String,
    pub host: String,
    pub strategy: String,
    pub arbitrary_flags: Vec<String>,
}

/// Options threaded through a provisioning run
///
/// Each step takes the record by value and hands back the record the next
/// step sees.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProvisionInput {
    pub engine: EngineOptions,
    pub auth: AuthOptions,
    pub swarm: SwarmOptions,
}

impl ProvisionInput {
    pub fn new(engine: EngineOptions, auth: AuthOptions, swarm: SwarmOptions) -> Self {
        Self {
            engine,
            auth,
            swarm,
        }
    }

    /// Fill in the storage driver when the caller left it unset
    pub fn with_default_storage_driver(mut self, driver: &str) -> Self {
        if self.engine.storage_driver.as_deref().is_none_or(str::is_empty) {
            self.engine.storage_driver = Some(driver.to_string());
        }
        self
    }

    /// Add `label` unless it is already present
    pub fn with_label(mut self, label: String) -> Self {
        if !self.engine.labels.contains(&label) {
            self.engine.labels.push(label);
        }
        self
    }

    /// Replace the auth options
    pub fn with_auth(mut self, auth: AuthOptions) -> Self {
        self.auth = auth;
        self
    }
}
