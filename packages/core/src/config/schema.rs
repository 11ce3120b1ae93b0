//! Configuration schema for dockyard
//!
//! Defines the structure and defaults for the config.json file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::provision::{
    DEFAULT_DOCKER_PORT, EngineOptions, Poller, ProvisionInput, RepositoryConfig, SwarmOptions,
};

/// Main configuration structure for dockyard
///
/// Serialized to/from `~/.config/dockyard/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config file version for migrations
    pub version: u32,

    /// TLS port the Docker daemon listens on (default: 2376)
    #[serde(default = "default_docker_port")]
    pub docker_port: u16,

    /// Give up waiting for the daemon after this many seconds (default: 180)
    #[serde(default = "default_readiness_timeout_secs")]
    pub readiness_timeout_secs: u64,

    /// Seconds between daemon readiness probes (default: 3)
    #[serde(default = "default_readiness_interval_secs")]
    pub readiness_interval_secs: u64,

    /// Docker package repository URLs and OS release table
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Daemon options applied to every provisioned host
    #[serde(default)]
    pub engine: EngineOptions,

    /// Swarm settings applied to every provisioned host
    #[serde(default)]
    pub swarm: SwarmOptions,

    /// Local directory with ca.pem, server.pem and server-key.pem to upload
    /// (default: None, certificates are expected on the host already)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_dir: Option<PathBuf>,
}

fn default_docker_port() -> u16 {
    DEFAULT_DOCKER_PORT
}

fn default_readiness_timeout_secs() -> u64 {
    180
}

fn default_readiness_interval_secs() -> u64 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            docker_port: default_docker_port(),
            readiness_timeout_secs: default_readiness_timeout_secs(),
            readiness_interval_secs: default_readiness_interval_secs(),
            repository: RepositoryConfig::default(),
            engine: EngineOptions::default(),
            swarm: SwarmOptions::default(),
            cert_dir: None,
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Readiness poller built from the configured timings
    ///
    /// A zero interval is raised to one second so the host is not hammered.
    pub fn poller(&self) -> Poller {
        Poller::new(
            Duration::from_secs(self.readiness_interval_secs.max(1)),
            Duration::from_secs(self.readiness_timeout_secs),
        )
    }

    /// Provisioning input seeded from the configured engine and swarm options
    pub fn provision_input(&self) -> ProvisionInput {
        ProvisionInput {
            engine: self.engine.clone(),
            swarm: self.swarm.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::RepoCoordinate;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.docker_port, 2376);
        assert_eq!(config.readiness_timeout_secs, 180);
        assert_eq!(config.readiness_interval_secs, 3);
        assert_eq!(config.repository, RepositoryConfig::default());
        assert!(config.engine.storage_driver.is_none());
        assert!(!config.swarm.is_swarm);
        assert!(config.cert_dir.is_none());
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let config: Config = serde_json::from_str(r#"{"version": 1}"#).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let mut config = Config {
            docker_port: 2377,
            cert_dir: Some(PathBuf::from("/srv/certs")),
            engine: EngineOptions::default()
                .with_storage_driver("overlay")
                .with_label("env=staging"),
            ..Config::default()
        };
        config
            .repository
            .releases
            .insert("almalinux".to_string(), RepoCoordinate::new("centos", "8"));

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_reject_unknown_fields() {
        let json = r#"{"version": 1, "docker_prot": 2376}"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_unknown_nested_fields() {
        let json = r#"{"version": 1, "engine": {"storage": "overlay"}}"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_poller_uses_configured_timings() {
        let config = Config {
            readiness_timeout_secs: 60,
            readiness_interval_secs: 0,
            ..Config::default()
        };
        let poller = config.poller();
        assert_eq!(poller.timeout(), Duration::from_secs(60));
        assert_eq!(poller.interval(), Duration::from_secs(1));
        assert_eq!(Config::default().poller(), Poller::default());
    }

    #[test]
    fn test_provision_input_copies_engine_options() {
        let config = Config {
            engine: EngineOptions::default().with_env("HTTP_PROXY=http://proxy:3128"),
            ..Config::default()
        };
        let input = config.provision_input();
        assert_eq!(input.engine.env, vec!["HTTP_PROXY=http://proxy:3128"]);
        assert_eq!(input.auth.ca_cert_remote_path, "/etc/docker/ca.pem");
    }
}
