//! Host-specific error types
//!
//! Errors that can occur while talking to a remote host or managing the
//! host inventory.

use thiserror::Error;

/// Errors that can occur during host operations
#[derive(Error, Debug)]
pub enum HostError {
    /// Failed to spawn SSH process
    #[error("Failed to spawn SSH: {0}")]
    SshSpawn(String),

    /// SSH connection failed
    #[error("SSH connection failed: {0}")]
    ConnectionFailed(String),

    /// SSH authentication failed (key not in agent, passphrase needed)
    #[error("SSH authentication failed. Ensure your key is loaded: ssh-add {}", .key_hint.as_deref().unwrap_or("~/.ssh/id_rsa"))]
    AuthFailed { key_hint: Option<String> },

    /// Remote command ran but exited non-zero
    #[error("Remote command exited with {}: {stderr}", exit_label(.status))]
    CommandFailed {
        status: Option<i32>,
        stderr: String,
    },

    /// Host not found in hosts.json
    #[error("Host not found: {0}")]
    NotFound(String),

    /// Host already exists
    #[error("Host already exists: {0}")]
    AlreadyExists(String),

    /// Failed to load hosts file
    #[error("Failed to load hosts file: {0}")]
    LoadFailed(String),

    /// Failed to save hosts file
    #[error("Failed to save hosts file: {0}")]
    SaveFailed(String),

    /// Invalid host configuration
    #[error("Invalid host configuration: {0}")]
    InvalidConfig(String),
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}
