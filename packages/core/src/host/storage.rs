//! Host inventory storage
//!
//! Load and save the hosts.json file.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use super::error::HostError;
use super::schema::HostsFile;
use crate::config::paths::get_hosts_path;

/// Load the inventory from `~/.config/dockyard/hosts.json`
///
/// Returns an empty inventory if the file doesn't exist.
pub fn load_hosts() -> Result<HostsFile, HostError> {
    let hosts_path = get_hosts_path()
        .ok_or_else(|| HostError::LoadFailed("Could not determine hosts file path".to_string()))?;
    load_hosts_from(&hosts_path)
}

/// Save the inventory to `~/.config/dockyard/hosts.json`
pub fn save_hosts(hosts: &HostsFile) -> Result<(), HostError> {
    let hosts_path = get_hosts_path()
        .ok_or_else(|| HostError::SaveFailed("Could not determine hosts file path".to_string()))?;
    save_hosts_to(hosts, &hosts_path)
}

/// Load an inventory from an explicit path
pub fn load_hosts_from(hosts_path: &Path) -> Result<HostsFile, HostError> {
    if !hosts_path.exists() {
        tracing::debug!(
            "Hosts file not found, returning empty: {}",
            hosts_path.display()
        );
        return Ok(HostsFile::new());
    }

    let mut file = File::open(hosts_path).map_err(|e| {
        HostError::LoadFailed(format!("Failed to open {}: {}", hosts_path.display(), e))
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        HostError::LoadFailed(format!("Failed to read {}: {}", hosts_path.display(), e))
    })?;

    let hosts: HostsFile = serde_json::from_str(&contents).map_err(|e| {
        HostError::LoadFailed(format!("Invalid JSON in {}: {}", hosts_path.display(), e))
    })?;

    tracing::debug!(
        "Loaded {} hosts from {}",
        hosts.hosts.len(),
        hosts_path.display()
    );
    Ok(hosts)
}

/// Save an inventory to an explicit path
///
/// Creates the parent directory if needed and keeps a `.bak` copy of the
/// previous file.
pub fn save_hosts_to(hosts: &HostsFile, hosts_path: &Path) -> Result<(), HostError> {
    if let Some(parent) = hosts_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| HostError::SaveFailed(format!("Failed to create directory: {e}")))?;
        }
    }

    if hosts_path.exists() {
        let backup_path = hosts_path.with_extension("json.bak");
        fs::copy(hosts_path, &backup_path)
            .map_err(|e| HostError::SaveFailed(format!("Failed to create backup: {e}")))?;
        tracing::debug!("Created hosts backup: {}", backup_path.display());
    }

    let json = serde_json::to_string_pretty(hosts)
        .map_err(|e| HostError::SaveFailed(format!("Failed to serialize: {e}")))?;

    let mut file = File::create(hosts_path).map_err(|e| {
        HostError::SaveFailed(format!("Failed to create {}: {}", hosts_path.display(), e))
    })?;

    file.write_all(json.as_bytes()).map_err(|e| {
        HostError::SaveFailed(format!("Failed to write {}: {}", hosts_path.display(), e))
    })?;

    tracing::debug!(
        "Saved {} hosts to {}",
        hosts.hosts.len(),
        hosts_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::schema::HostConfig;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = TempDir::new().unwrap();
        let hosts = load_hosts_from(&dir.path().join("hosts.json")).unwrap();
        assert!(hosts.hosts.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("hosts.json");

        let mut hosts = HostsFile::new();
        hosts.add_host(
            "engine-1",
            HostConfig::new("192.168.56.10").with_user("centos"),
        );
        save_hosts_to(&hosts, &path).unwrap();

        let loaded = load_hosts_from(&path).unwrap();
        assert_eq!(loaded, hosts);
    }

    #[test]
    fn test_save_keeps_backup_of_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hosts.json");

        let mut hosts = HostsFile::new();
        hosts.add_host("old", HostConfig::new("10.0.0.1").with_user("root"));
        save_hosts_to(&hosts, &path).unwrap();

        hosts.remove_host("old");
        hosts.add_host("new", HostConfig::new("10.0.0.2").with_user("root"));
        save_hosts_to(&hosts, &path).unwrap();

        let backup = load_hosts_from(&path.with_extension("json.bak")).unwrap();
        assert!(backup.has_host("old"));
        assert!(!backup.has_host("new"));
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hosts.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_hosts_from(&path).unwrap_err();
        assert!(matches!(err, HostError::LoadFailed(_)));
    }
}
