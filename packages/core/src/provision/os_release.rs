//! Remote operating system identification
//!
//! Parses `/etc/os-release` as read from the target host.

use super::error::ProvisionError;

/// Identity of the target operating system
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OsReleaseInfo {
    /// Lower-cased `ID` (e.g. "centos", "fedora")
    pub id: String,
    /// `VERSION_ID` (e.g. "7", "22"); empty when absent
    pub version: String,
    /// Lower-cased `ID_LIKE` entries
    pub id_like: Vec<String>,
    /// `PRETTY_NAME`; empty when absent
    pub pretty_name: String,
}

impl OsReleaseInfo {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Whether `id` is this OS or one it declares itself like
    pub fn is_like(&self, id: &str) -> bool {
        self.id == id || self.id_like.iter().any(|like| like == id)
    }

    /// Name for display, falling back to `id version`
    pub fn display_name(&self) -> String {
        if self.pretty_name.is_empty() {
            format!("{} {}", self.id, self.version).trim().to_string()
        } else {
            self.pretty_name.clone()
        }
    }
}

/// Command that prints the os-release file
pub const OS_RELEASE_COMMAND: &str = "cat /etc/os-release";

/// Parse /etc/os-release content
pub fn parse_os_release(content: &str) -> Result<OsReleaseInfo, ProvisionError> {
    let mut info = OsReleaseInfo::default();

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            match key.trim() {
                "ID" => info.id = value.to_lowercase(),
                "ID_LIKE" => {
                    info.id_like = value
                        .split_whitespace()
                        .map(|s| s.to_lowercase())
                        .collect()
                }
                "VERSION_ID" => info.version = value.to_string(),
                "PRETTY_NAME" => info.pretty_name = value.to_string(),
                _ => {}
            }
        }
    }

    if info.id.is_empty() {
        return Err(ProvisionError::UnsupportedOs {
            id: "unknown (no ID in /etc/os-release)".to_string(),
        });
    }

    Ok(info)
}
