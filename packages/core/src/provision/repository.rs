//! Docker package repository resolution and rendering
//!
//! Maps an OS release onto a repository coordinate through a lookup table
//! and renders the yum repository definition for it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ProvisionError;
use super::os_release::OsReleaseInfo;

/// Where the yum repository definition is installed
pub const REPO_FILE_PATH: &str = "/etc/yum.repos.d/docker.repo";

/// Repository family and release the packages are taken from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoCoordinate {
    pub family: String,
    pub version: String,
}

impl RepoCoordinate {
    pub fn new(family: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            version: version.into(),
        }
    }
}

/// Repository settings: URLs plus the OS id to coordinate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Base URL; the coordinate is appended as `/<family>/<version>`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// URL of the repository signing key
    #[serde(default = "default_gpg_key_url")]
    pub gpg_key_url: String,

    /// OS release id to repository coordinate
    #[serde(default = "default_releases")]
    pub releases: BTreeMap<String, RepoCoordinate>,
}

fn default_base_url() -> String {
    "https://yum.dockerproject.org/repo/main".to_string()
}

fn default_gpg_key_url() -> String {
    "https://yum.dockerproject.org/gpg".to_string()
}

fn default_releases() -> BTreeMap<String, RepoCoordinate> {
    // rhel and centos both use the centos repo
    BTreeMap::from([
        ("rhel".to_string(), RepoCoordinate::new("centos", "7")),
        ("centos".to_string(), RepoCoordinate::new("centos", "7")),
        ("fedora".to_string(), RepoCoordinate::new("fedora", "22")),
    ])
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            gpg_key_url: default_gpg_key_url(),
            releases: default_releases(),
        }
    }
}

impl RepositoryConfig {
    /// Look up the coordinate for an OS release
    ///
    /// Unlisted ids fail; there is no fallback coordinate.
    pub fn resolve(&self, info: &OsReleaseInfo) -> Result<RepoCoordinate, ProvisionError> {
        self.releases
            .get(&info.id)
            .cloned()
            .ok_or_else(|| ProvisionError::UnknownOsRelease {
                id: info.id.clone(),
            })
    }

    /// Render the repository definition file for a coordinate
    pub fn render(&self, coordinate: &RepoCoordinate) -> Result<String, ProvisionError> {
        for (field, value) in [
            ("family", coordinate.family.as_str()),
            ("version", coordinate.version.as_str()),
            ("base_url", self.base_url.as_str()),
            ("gpg_key_url", self.gpg_key_url.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(ProvisionError::TemplateRender(format!(
                    "repository {field} is empty"
                )));
            }
            if value.contains(['\n', '\r']) {
                return Err(ProvisionError::TemplateRender(format!(
                    "repository {field} contains a line break"
                )));
            }
        }

        Ok(format!(
            "[docker]\n\
             name=Docker Stable Repository\n\
             baseurl={base}/{family}/{version}\n\
             priority=1\n\
             enabled=1\n\
             gpgkey={gpg}\n",
            base = self.base_url.trim_end_matches('/'),
            family = coordinate.family,
            version = coordinate.version,
            gpg = self.gpg_key_url,
        ))
    }
}
