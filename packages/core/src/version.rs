//! Version information for dockyard

/// Get the current version string
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the long version string with build information
///
/// Build metadata comes from `DOCKYARD_GIT_HASH` and `DOCKYARD_BUILD_DATE`
/// at compile time and reads "unknown" when they were not set.
pub fn get_version_long() -> String {
    let git_hash = option_env!("DOCKYARD_GIT_HASH").unwrap_or("unknown");
    let build_date = option_env!("DOCKYARD_BUILD_DATE").unwrap_or("unknown");

    format!(
        "{} (git: {git_hash}, built: {build_date})",
        get_version()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version_is_semver_like() {
        let version = get_version();
        let parts: Vec<&str> = version.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_get_version_long_includes_build_info() {
        let long = get_version_long();
        assert!(long.starts_with(&get_version()));
        assert!(long.contains("git: "));
    }
}
