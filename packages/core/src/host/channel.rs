//! Remote command channel abstraction
//!
//! The provisioner only ever needs "run this command line on the host and
//! give me its output". Anything that can do that (the system ssh client,
//! a test double) implements [`CommandChannel`].

use super::error::HostError;

/// Executes command lines on one remote host
///
/// Methods take `&mut self`: a channel belongs to a single provisioning run
/// and is never shared between hosts.
pub trait CommandChannel {
    /// Run a command and return its standard output
    fn output(&mut self, command: &str) -> Result<String, HostError>;

    /// Run a command with a pseudo-terminal allocated
    ///
    /// Transports that need no explicit TTY allocation can keep the default.
    fn output_with_pty(&mut self, command: &str) -> Result<String, HostError> {
        self.output(command)
    }

    /// Run a command with `input` on its standard input
    ///
    /// Never allocates a pseudo-terminal; a terminal would echo and rewrite
    /// the bytes. `input` must not appear in logs.
    fn output_with_input(&mut self, command: &str, input: &[u8]) -> Result<String, HostError>;
}

impl<T: CommandChannel + ?Sized> CommandChannel for Box<T> {
    fn output(&mut self, command: &str) -> Result<String, HostError> {
        (**self).output(command)
    }

    fn output_with_pty(&mut self, command: &str) -> Result<String, HostError> {
        (**self).output_with_pty(command)
    }

    fn output_with_input(&mut self, command: &str, input: &[u8]) -> Result<String, HostError> {
        (**self).output_with_input(command, input)
    }
}
