//! Host inventory schema
//!
//! Data structures for the machines dockyard knows how to reach.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// SSH connection settings for one remote machine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// SSH hostname or IP address
    pub hostname: String,

    /// SSH username (default: current user from whoami)
    #[serde(default = "default_user")]
    pub user: String,

    /// SSH port (default: 22)
    #[serde(default)]
    pub port: Option<u16>,

    /// Path to SSH identity file (private key)
    #[serde(default)]
    pub identity_file: Option<String>,

    /// Jump host for ProxyJump (user@host:port format)
    #[serde(default)]
    pub jump_host: Option<String>,

    /// Organization groups/tags for this host
    #[serde(default)]
    pub groups: Vec<String>,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

fn default_user() -> String {
    whoami::username()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            user: default_user(),
            port: None,
            identity_file: None,
            jump_host: None,
            groups: Vec::new(),
            description: None,
        }
    }
}

impl HostConfig {
    /// Create a new host config with just hostname
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    /// Builder pattern: set user
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Builder pattern: set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Builder pattern: set identity file
    pub fn with_identity_file(mut self, path: impl Into<String>) -> Self {
        self.identity_file = Some(path.into());
        self
    }

    /// Builder pattern: set jump host
    pub fn with_jump_host(mut self, jump: impl Into<String>) -> Self {
        self.jump_host = Some(jump.into());
        self
    }

    /// Builder pattern: add group
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Builder pattern: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// `user@hostname` target string
    pub fn target(&self) -> String {
        format!("{}@{}", self.user, self.hostname)
    }

    /// Whether commands run as root and need no privilege escalation
    pub fn is_root(&self) -> bool {
        self.user == "root"
    }

    /// Host-specific ssh arguments, ending with the `user@host` target
    pub fn ssh_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        if let Some(key) = &self.identity_file {
            args.push("-i".to_string());
            args.push(key.clone());
        }
        if let Some(jump) = &self.jump_host {
            args.push("-J".to_string());
            args.push(jump.clone());
        }

        args.push(self.target());
        args
    }

    /// Check the fields a connection cannot work without
    pub fn validate(&self) -> Result<(), String> {
        if self.hostname.trim().is_empty() {
            return Err("hostname must not be empty".to_string());
        }
        if self.user.trim().is_empty() {
            return Err("user must not be empty".to_string());
        }
        if self.port == Some(0) {
            return Err("port must be between 1 and 65535".to_string());
        }
        Ok(())
    }
}

/// Root structure for hosts.json file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HostsFile {
    /// Schema version for future migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Machine name to connection settings; the name becomes the remote hostname
    #[serde(default)]
    pub hosts: BTreeMap<String, HostConfig>,
}

fn default_version() -> u32 {
    1
}

impl HostsFile {
    /// Create empty hosts file
    pub fn new() -> Self {
        Self {
            version: default_version(),
            hosts: BTreeMap::new(),
        }
    }

    /// Add or replace a host
    pub fn add_host(&mut self, name: impl Into<String>, config: HostConfig) {
        self.hosts.insert(name.into(), config);
    }

    /// Remove a host
    pub fn remove_host(&mut self, name: &str) -> Option<HostConfig> {
        self.hosts.remove(name)
    }

    /// Get a host by name
    pub fn get_host(&self, name: &str) -> Option<&HostConfig> {
        self.hosts.get(name)
    }

    /// Check if host exists
    pub fn has_host(&self, name: &str) -> bool {
        self.hosts.contains_key(name)
    }

    /// Host names in sorted order
    pub fn host_names(&self) -> Vec<&str> {
        self.hosts.keys().map(|s| s.as_str()).collect()
    }
}
