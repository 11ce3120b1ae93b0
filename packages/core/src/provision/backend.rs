//! Pluggable certificate and swarm setup
//!
//! Certificate issuance and cluster membership live outside this crate. The
//! orchestrator calls these hooks once each, at the matching step.

use super::driver::Driver;
use super::options::{AuthOptions, SwarmOptions};
use crate::host::CommandChannel;

/// Puts TLS material in place on the remote host
pub trait AuthBackend: Send {
    fn configure(
        &mut self,
        auth: &AuthOptions,
        channel: &mut dyn CommandChannel,
        driver: &dyn Driver,
    ) -> anyhow::Result<()>;
}

/// Joins the host to a swarm cluster
pub trait SwarmBackend: Send {
    fn configure(
        &mut self,
        swarm: &SwarmOptions,
        auth: &AuthOptions,
        channel: &mut dyn CommandChannel,
        driver: &dyn Driver,
    ) -> anyhow::Result<()>;
}

/// Certificates are already at their remote paths
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistingCerts;

impl AuthBackend for ExistingCerts {
    fn configure(
        &mut self,
        auth: &AuthOptions,
        _channel: &mut dyn CommandChannel,
        driver: &dyn Driver,
    ) -> anyhow::Result<()> {
        tracing::debug!(
            "Using existing certificates on {} ({})",
            driver.machine_name(),
            auth.ca_cert_remote_path
        );
        Ok(())
    }
}

/// No swarm support; only accepts standalone hosts
#[derive(Debug, Clone, Copy, Default)]
pub struct Standalone;

impl SwarmBackend for Standalone {
    fn configure(
        &mut self,
        swarm: &SwarmOptions,
        _auth: &AuthOptions,
        _channel: &mut dyn CommandChannel,
        driver: &dyn Driver,
    ) -> anyhow::Result<()> {
        if swarm.is_swarm {
            anyhow::bail!(
                "swarm mode requested for {} but no swarm backend is configured",
                driver.machine_name()
            );
        }
        Ok(())
    }
}
