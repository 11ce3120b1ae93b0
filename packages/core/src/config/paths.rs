//! Path resolution for dockyard
//!
//! Linux and macOS use `~/.config/dockyard/` (XDG style, also on macOS);
//! Windows uses `%APPDATA%\dockyard\`.

use std::path::PathBuf;

const APP_DIR: &str = "dockyard";

/// Get the configuration directory path
pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join(APP_DIR))
    }
    #[cfg(target_os = "windows")]
    {
        directories::BaseDirs::new().map(|dirs| dirs.config_dir().join(APP_DIR))
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        None
    }
}

/// Get the full path to the config file
///
/// Returns: `{config_dir}/config.json`
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|d| d.join("config.json"))
}

/// Get the full path to the host inventory
///
/// Returns: `{config_dir}/hosts.json`
pub fn get_hosts_path() -> Option<PathBuf> {
    get_config_dir().map(|d| d.join("hosts.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_app_name() {
        let dir = get_config_dir().unwrap();
        assert!(dir.ends_with("dockyard"));
    }

    #[test]
    fn test_file_paths_live_in_config_dir() {
        let dir = get_config_dir().unwrap();
        let config = get_config_path().unwrap();
        let hosts = get_hosts_path().unwrap();
        assert_eq!(config, dir.join("config.json"));
        assert_eq!(hosts, dir.join("hosts.json"));
    }
}
