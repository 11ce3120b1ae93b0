//! Recording command channel for orchestrator tests

use crate::host::{CommandChannel, HostError};

pub const CENTOS_OS_RELEASE: &str = "NAME=\"CentOS Linux\"\nID=\"centos\"\nID_LIKE=\"rhel fedora\"\nVERSION_ID=\"7\"\nPRETTY_NAME=\"CentOS Linux 7 (Core)\"\n";

/// Temp file every staged upload reports
pub const STAGED_PATH: &str = "/tmp/tmp.dockyard";

/// Records every command line and answers from canned rules
#[derive(Debug, Default)]
pub struct RecordingChannel {
    pub commands: Vec<String>,
    pub pty: Vec<bool>,
    /// Payloads received over stdin, in order
    pub inputs: Vec<String>,
    os_release: String,
    fail_on: Option<String>,
    probe_failures: usize,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self {
            os_release: CENTOS_OS_RELEASE.to_string(),
            ..Default::default()
        }
    }

    pub fn with_os_release(mut self, content: &str) -> Self {
        self.os_release = content.to_string();
        self
    }

    /// Fail every command containing `needle`
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    /// Fail the first `count` `docker version` probes
    pub fn with_probe_failures(mut self, count: usize) -> Self {
        self.probe_failures = count;
        self
    }

    fn respond(&mut self, command: &str, pty: bool) -> Result<String, HostError> {
        self.commands.push(command.to_string());
        self.pty.push(pty);

        if let Some(needle) = &self.fail_on {
            if command.contains(needle.as_str()) {
                return Err(HostError::CommandFailed {
                    status: Some(1),
                    stderr: format!("failed: {command}"),
                });
            }
        }

        if command.ends_with("docker version") && self.probe_failures > 0 {
            self.probe_failures -= 1;
            return Err(HostError::CommandFailed {
                status: Some(1),
                stderr: "Cannot connect to the Docker daemon".to_string(),
            });
        }

        if command == "cat /etc/os-release" {
            return Ok(self.os_release.clone());
        }
        Ok(String::new())
    }
}

impl CommandChannel for RecordingChannel {
    fn output(&mut self, command: &str) -> Result<String, HostError> {
        self.respond(command, false)
    }

    fn output_with_pty(&mut self, command: &str) -> Result<String, HostError> {
        self.respond(command, true)
    }

    fn output_with_input(&mut self, command: &str, input: &[u8]) -> Result<String, HostError> {
        self.inputs.push(String::from_utf8_lossy(input).into_owned());
        self.respond(command, false)?;
        Ok(format!("{STAGED_PATH}\n"))
    }
}
