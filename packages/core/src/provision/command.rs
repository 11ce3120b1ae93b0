//! Structured remote commands
//!
//! Commands are assembled from a program and an argument list and only
//! turned into a shell line at the last moment, with every argument quoted.
//! File payloads never appear on a command line: a [`FileUpload`] streams
//! them over stdin, byte for byte.

use std::fmt;

use super::driver::Driver;
use crate::host::{CommandChannel, HostError};

/// A command to run on the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    program: String,
    args: Vec<String>,
    privileged: bool,
}

impl RemoteCommand {
    /// Start a command for `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            privileged: false,
        }
    }

    /// Run a shell script with `sh -c`
    pub fn script(script: impl Into<String>) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }

    /// Builder pattern: append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Builder pattern: append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Builder pattern: run with privilege escalation
    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Shell line without privilege escalation
    pub fn to_shell(&self) -> String {
        let mut line = shell_quote(&self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(&shell_quote(arg));
        }
        line
    }

    /// Final shell line, wrapped by the driver when privileged
    pub fn render(&self, driver: &dyn Driver) -> String {
        let line = self.to_shell();
        if self.privileged {
            driver.sudo(&line)
        } else {
            line
        }
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.privileged {
            write!(f, "sudo {}", self.to_shell())
        } else {
            write!(f, "{}", self.to_shell())
        }
    }
}

/// Copy stdin into a fresh private temp file and print its path
const STAGE_SCRIPT: &str =
    r#"umask 077 && tmp=$(mktemp) && cat > "$tmp" && printf '%s\n' "$tmp""#;

/// `$1` mode, `$2` staged file, `$3` destination; the staged file is always removed
const INSTALL_SCRIPT: &str =
    r#"install -m "$1" "$2" "$3"; status=$?; rm -f "$2"; exit $status"#;

/// A file to place on the remote host, replacing any existing one
///
/// The content goes to a private temp file as the SSH user over stdin, then
/// a privileged `install` moves it into place with its final mode. Only the
/// paths ever show up in command lines and logs.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    path: String,
    content: String,
    mode: u32,
}

impl FileUpload {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mode: 0o644,
        }
    }

    /// Builder pattern: set the permission bits of the installed file
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Unprivileged command reading the content from stdin
    pub fn stage_command() -> RemoteCommand {
        RemoteCommand::script(STAGE_SCRIPT)
    }

    /// Privileged command moving a staged file into place
    pub fn install_command(&self, staged: &str) -> RemoteCommand {
        RemoteCommand::script(INSTALL_SCRIPT)
            .args([
                "sh".to_string(),
                format!("{:04o}", self.mode),
                staged.to_string(),
                self.path.clone(),
            ])
            .privileged()
    }

    /// Stream the content to the host and install it
    pub fn upload(
        &self,
        channel: &mut dyn CommandChannel,
        driver: &dyn Driver,
    ) -> Result<(), HostError> {
        let staged = channel.output_with_input(
            &Self::stage_command().render(driver),
            self.content.as_bytes(),
        )?;
        let staged = staged.trim();
        if !staged.starts_with('/') || staged.contains(['\n', '\r']) {
            return Err(HostError::CommandFailed {
                status: None,
                stderr: format!("Unexpected staging path from remote: {staged:?}"),
            });
        }

        channel.output(&self.install_command(staged).render(driver))?;
        tracing::debug!("Installed {} ({} bytes)", self.path, self.content.len());
        Ok(())
    }
}

impl fmt::Display for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload {} (mode {:04o})", self.path, self.mode)
    }
}

// Content stays out of debug output too
impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("path", &self.path)
            .field("mode", &format_args!("{:04o}", self.mode))
            .field("len", &self.content.len())
            .finish()
    }
}

/// Quote a word for a POSIX shell
///
/// Words made only of safe characters pass through unchanged; everything
/// else is wrapped in single quotes with embedded quotes spliced as `'\''`.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '+' | '@' | '%')
        });
    if safe {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}
