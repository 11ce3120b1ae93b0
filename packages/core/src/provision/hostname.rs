//! Hostname configuration
//!
//! Sets the kernel hostname, persists it, and keeps a single
//! `127.0.1.1 <name>` loopback entry in the hosts file.

use super::command::{RemoteCommand, shell_quote};
use super::error::ProvisionError;

/// Hosts file the loopback entry is kept in
pub const HOSTS_FILE: &str = "/etc/hosts";

/// Persistent hostname file
pub const HOSTNAME_FILE: &str = "/etc/hostname";

const MAX_HOSTNAME_LEN: usize = 253;

/// Check that a hostname is safe to pass to `hostname`, `echo` and `sed`
pub fn validate_hostname(name: &str) -> Result<(), ProvisionError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_HOSTNAME_LEN
        && !name.starts_with(['-', '.'])
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(ProvisionError::InvalidHostname(name.to_string()))
    }
}

/// Set the running hostname and write it to /etc/hostname
pub fn set_hostname_command(name: &str) -> Result<RemoteCommand, ProvisionError> {
    validate_hostname(name)?;
    Ok(RemoteCommand::script(format!(
        "hostname {name} && echo {name} | tee {HOSTNAME_FILE}"
    ))
    .privileged())
}

/// Replace or append the loopback entry for `name` in `hosts_path`
///
/// The check and the edit happen in one remote script, so running it again
/// leaves the file unchanged. When the file already holds several
/// `127.0.1.1` lines, the first is rewritten and the rest are dropped; the
/// hold space counts matches.
pub fn loopback_entry_script(name: &str, hosts_path: &str) -> Result<String, ProvisionError> {
    validate_hostname(name)?;
    let path = shell_quote(hosts_path);
    Ok(format!(
        "if grep -xq '127.0.1.1.*' {path}; then \
         sed -i -e 's/^127.0.1.1.*/127.0.1.1 {name}/' \
         -e '/^127.0.1.1/{{x;s/^/x/;/^xx/{{x;d;}};x;}}' {path}; \
         else echo '127.0.1.1 {name}' | tee -a {path}; fi"
    ))
}

/// Privileged command updating the loopback entry in /etc/hosts
pub fn loopback_entry_command(name: &str) -> Result<RemoteCommand, ProvisionError> {
    Ok(RemoteCommand::script(loopback_entry_script(name, HOSTS_FILE)?).privileged())
}

/// Both hostname commands, in the order they must run
pub fn hostname_commands(name: &str) -> Result<Vec<RemoteCommand>, ProvisionError> {
    Ok(vec![set_hostname_command(name)?, loopback_entry_command(name)?])
}
