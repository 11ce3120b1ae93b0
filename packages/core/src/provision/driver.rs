//! Machine driver interface
//!
//! The machine backend is external; provisioning only needs the machine's
//! name, the backend's name, and how to escalate privileges on it.

use crate::host::HostConfig;

/// What the provisioner needs to know about the machine it is working on
pub trait Driver: Send + Sync {
    /// Logical machine name, applied as the remote hostname
    fn machine_name(&self) -> &str;

    /// Name of the backend that created the machine (e.g. "generic")
    fn driver_name(&self) -> &str;

    /// Wrap a command line with the privilege-escalation prefix
    fn sudo(&self, command: &str) -> String {
        format!("sudo {command}")
    }
}

/// Driver with fixed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDriver {
    machine_name: String,
    driver_name: String,
    root: bool,
}

impl StaticDriver {
    pub fn new(machine_name: impl Into<String>, driver_name: impl Into<String>) -> Self {
        Self {
            machine_name: machine_name.into(),
            driver_name: driver_name.into(),
            root: false,
        }
    }

    /// Builder pattern: commands already run as root
    pub fn as_root(mut self) -> Self {
        self.root = true;
        self
    }
}

impl Driver for StaticDriver {
    fn machine_name(&self) -> &str {
        &self.machine_name
    }

    fn driver_name(&self) -> &str {
        &self.driver_name
    }

    fn sudo(&self, command: &str) -> String {
        if self.root {
            command.to_string()
        } else {
            format!("sudo {command}")
        }
    }
}

/// Driver for an existing machine from the host inventory
#[derive(Debug, Clone)]
pub struct RemoteHost {
    name: String,
    config: HostConfig,
}

impl RemoteHost {
    /// Backend name reported for inventory machines
    pub const DRIVER_NAME: &'static str = "generic";

    pub fn new(name: impl Into<String>, config: HostConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

impl Driver for RemoteHost {
    fn machine_name(&self) -> &str {
        &self.name
    }

    fn driver_name(&self) -> &str {
        Self::DRIVER_NAME
    }

    fn sudo(&self, command: &str) -> String {
        if self.config.is_root() {
            command.to_string()
        } else {
            format!("sudo {command}")
        }
    }
}
