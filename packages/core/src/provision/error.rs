//! Provisioning error types
//!
//! Every error is terminal for the current run. Callers can tell a daemon
//! that never came up (`ReadinessTimeout`) apart from a setup command that
//! failed (`CommandFailed`).

use std::time::Duration;

use thiserror::Error;

use super::state::Step;
use crate::host::HostError;

/// Errors that abort a provisioning run
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// OS identifier has no entry in the repository table
    #[error("Unknown OS for Docker repository: {id}")]
    UnknownOsRelease { id: String },

    /// No registered OS family handles this host
    #[error("Unsupported operating system: {id}")]
    UnsupportedOs { id: String },

    /// A remote command failed
    #[error("{} failed: {source}", step_label(.step))]
    CommandFailed {
        step: Option<Step>,
        command: String,
        #[source]
        source: HostError,
    },

    /// Template input could not be rendered into a valid file
    #[error("Template render error: {0}")]
    TemplateRender(String),

    /// The Docker daemon never answered the readiness probe
    #[error("Docker daemon not responding after {attempts} attempts ({elapsed:?})")]
    ReadinessTimeout {
        step: Option<Step>,
        attempts: u32,
        elapsed: Duration,
    },

    /// Hostname is not safe to apply to the remote host
    #[error("Invalid hostname '{0}': use letters, digits, '-' and '.'")]
    InvalidHostname(String),

    /// An auth or swarm backend reported a failure
    #[error("{step} failed: {message}")]
    Backend { step: Step, message: String },
}

impl ProvisionError {
    /// Step the error happened in, when the error carries it
    ///
    /// [`Provisioner::failed_step`](super::Provisioner::failed_step) knows
    /// the step for every error of a run.
    pub fn step(&self) -> Option<Step> {
        match self {
            ProvisionError::CommandFailed { step, .. }
            | ProvisionError::ReadinessTimeout { step, .. } => *step,
            ProvisionError::Backend { step, .. } => Some(*step),
            _ => None,
        }
    }
}

fn step_label(step: &Option<Step>) -> String {
    match step {
        Some(step) => format!("Step {step}"),
        None => "Remote command".to_string(),
    }
}
