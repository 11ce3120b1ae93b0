//! RedHat family: RHEL, CentOS and Fedora with yum and systemd

use super::action::{PackageAction, ServiceAction};
use super::command::{FileUpload, RemoteCommand};
use super::error::ProvisionError;
use super::family::OsFamily;
use super::os_release::OsReleaseInfo;
use super::repository::{REPO_FILE_PATH, RepositoryConfig};
use super::systemd;

/// yum/systemd based distributions
#[derive(Debug, Clone, Copy, Default)]
pub struct RedHat;

impl RedHat {
    pub const NAME: &'static str = "redhat";

    const RELEASE_IDS: [&'static str; 3] = ["rhel", "centos", "fedora"];
}

impl OsFamily for RedHat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn matches(&self, info: &OsReleaseInfo) -> bool {
        Self::RELEASE_IDS.iter().any(|id| info.is_like(id))
    }

    // CentOS 7 refuses sudo without a tty
    fn requires_pty(&self) -> bool {
        true
    }

    fn base_packages(&self) -> &[&'static str] {
        &["curl"]
    }

    fn default_storage_driver(&self) -> &'static str {
        "devicemapper"
    }

    fn docker_options_dir(&self) -> &'static str {
        "/etc/docker"
    }

    fn daemon_options_file(&self) -> &'static str {
        "/etc/systemd/system/docker.service"
    }

    fn engine_package(&self) -> &'static str {
        "docker-engine"
    }

    fn package_command(&self, name: &str, action: PackageAction) -> RemoteCommand {
        RemoteCommand::new("yum")
            .args([action.verb(), "-y", name])
            .privileged()
    }

    fn os_update_command(&self) -> RemoteCommand {
        RemoteCommand::new("yum").args(["-y", "update"]).privileged()
    }

    fn engine_install_command(&self, package: &str) -> RemoteCommand {
        RemoteCommand::new("yum")
            .args(["install", "-y", package])
            .privileged()
    }

    fn service_commands(&self, name: &str, action: ServiceAction) -> Vec<RemoteCommand> {
        systemd::service_commands(name, action)
    }

    fn repository_file(
        &self,
        repos: &RepositoryConfig,
        info: &OsReleaseInfo,
    ) -> Result<Option<FileUpload>, ProvisionError> {
        let coordinate = repos.resolve(info)?;
        let content = repos.render(&coordinate)?;
        tracing::debug!(
            "Using Docker repository {}/{} for {}",
            coordinate.family,
            coordinate.version,
            info.id
        );
        Ok(Some(FileUpload::new(REPO_FILE_PATH, content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::driver::StaticDriver;

    #[test]
    fn matches_redhat_derivatives() {
        assert!(RedHat.matches(&OsReleaseInfo::new("centos", "7")));
        assert!(RedHat.matches(&OsReleaseInfo::new("fedora", "22")));

        let mut rocky = OsReleaseInfo::new("rocky", "9");
        rocky.id_like = vec!["rhel".into(), "centos".into(), "fedora".into()];
        assert!(RedHat.matches(&rocky));

        assert!(!RedHat.matches(&OsReleaseInfo::new("debian", "12")));
    }

    #[test]
    fn yum_commands() {
        let driver = StaticDriver::new("engine-1", "generic");
        assert_eq!(
            RedHat.package_command("curl", PackageAction::Install).render(&driver),
            "sudo yum install -y curl"
        );
        assert_eq!(
            RedHat.package_command("docker-engine", PackageAction::Remove).render(&driver),
            "sudo yum remove -y docker-engine"
        );
        assert_eq!(RedHat.os_update_command().render(&driver), "sudo yum -y update");
        assert_eq!(
            RedHat.engine_install_command("docker-engine").render(&driver),
            "sudo yum install -y docker-engine"
        );
    }

    #[test]
    fn repository_is_written_to_yum_repos_d() {
        let file = RedHat
            .repository_file(&RepositoryConfig::default(), &OsReleaseInfo::new("rhel", "7.9"))
            .unwrap()
            .unwrap();
        assert_eq!(file.path(), "/etc/yum.repos.d/docker.repo");
        assert_eq!(file.mode(), 0o644);
        assert!(file.content().contains("baseurl=https://yum.dockerproject.org/repo/main/centos/7\n"));
    }

    #[test]
    fn unknown_release_has_no_repository() {
        let mut rocky = OsReleaseInfo::new("rocky", "9");
        rocky.id_like = vec!["rhel".into()];
        let err = RedHat
            .repository_file(&RepositoryConfig::default(), &rocky)
            .unwrap_err();
        assert!(matches!(err, ProvisionError::UnknownOsRelease { .. }));
    }

    #[test]
    fn engine_unit_goes_to_systemd() {
        assert_eq!(RedHat.daemon_options_file(), "/etc/systemd/system/docker.service");
        assert!(RedHat.requires_pty());
    }
}
