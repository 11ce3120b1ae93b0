//! Single-host provisioning state machine
//!
//! A [`Provisioner`] owns the command channel to one host and drives it
//! through [`Step::SEQUENCE`], aborting on the first failure. There is no
//! rollback: a failed host is provisioned again from the start.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use super::action::{PackageAction, ServiceAction};
use super::backend::{AuthBackend, ExistingCerts, Standalone, SwarmBackend};
use super::command::{FileUpload, RemoteCommand};
use super::driver::Driver;
use super::engine::{DockerOptions, EngineConfigContext};
use super::error::ProvisionError;
use super::family::{FamilyRegistry, OsFamily};
use super::options::{AuthOptions, EngineOptions, ProvisionInput};
use super::os_release::{OS_RELEASE_COMMAND, OsReleaseInfo, parse_os_release};
use super::poll::Poller;
use super::repository::RepositoryConfig;
use super::state::{ProvisionState, Step};
use crate::host::{CommandChannel, HostError};

/// Default TLS port of the Docker daemon
pub const DEFAULT_DOCKER_PORT: u16 = 2376;

const DOCKER_SERVICE: &str = "docker";

/// How long one step took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTiming {
    pub step: Step,
    pub elapsed: Duration,
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub machine_name: String,
    pub family: &'static str,
    pub os_release: OsReleaseInfo,
    pub state: ProvisionState,
    pub started_at: DateTime<Utc>,
    pub steps: Vec<StepTiming>,
    pub engine: EngineOptions,
    pub auth: AuthOptions,
    pub docker_options: DockerOptions,
}

impl ProvisionReport {
    /// Wall time across all steps
    pub fn total_elapsed(&self) -> Duration {
        self.steps.iter().map(|timing| timing.elapsed).sum()
    }
}

/// Read the host's OS release and pick the family that handles it
pub fn detect<C>(
    channel: &mut C,
    registry: &FamilyRegistry,
) -> Result<(OsReleaseInfo, Arc<dyn OsFamily>), ProvisionError>
where
    C: CommandChannel + ?Sized,
{
    let content =
        channel
            .output(OS_RELEASE_COMMAND)
            .map_err(|source| ProvisionError::CommandFailed {
                step: Some(Step::DetectOs),
                command: OS_RELEASE_COMMAND.to_string(),
                source,
            })?;
    let info = parse_os_release(&content)?;
    let family = registry.find_for(&info)?;
    tracing::info!("Detected {} ({} family)", info.display_name(), family.name());
    Ok((info, family))
}

/// Routes plain commands through the PTY variant when the family needs it
struct FamilyChannel<'a, C: ?Sized> {
    inner: &'a mut C,
    pty: bool,
}

impl<C: CommandChannel + ?Sized> CommandChannel for FamilyChannel<'_, C> {
    fn output(&mut self, command: &str) -> Result<String, HostError> {
        if self.pty {
            self.inner.output_with_pty(command)
        } else {
            self.inner.output(command)
        }
    }

    fn output_with_pty(&mut self, command: &str) -> Result<String, HostError> {
        self.inner.output_with_pty(command)
    }

    fn output_with_input(&mut self, command: &str, input: &[u8]) -> Result<String, HostError> {
        self.inner.output_with_input(command, input)
    }
}

/// Provisions one host
pub struct Provisioner<C: CommandChannel> {
    channel: C,
    driver: Box<dyn Driver>,
    family: Arc<dyn OsFamily>,
    os_release: OsReleaseInfo,
    repositories: RepositoryConfig,
    poller: Poller,
    docker_port: u16,
    auth_backend: Box<dyn AuthBackend>,
    swarm_backend: Box<dyn SwarmBackend>,
    current: Option<Step>,
    failed: Option<Step>,
}

impl<C: CommandChannel> Provisioner<C> {
    /// Create a provisioner for a host whose family is already known
    pub fn new(
        channel: C,
        driver: Box<dyn Driver>,
        family: Arc<dyn OsFamily>,
        os_release: OsReleaseInfo,
    ) -> Self {
        Self {
            channel,
            driver,
            family,
            os_release,
            repositories: RepositoryConfig::default(),
            poller: Poller::default(),
            docker_port: DEFAULT_DOCKER_PORT,
            auth_backend: Box::new(ExistingCerts),
            swarm_backend: Box::new(Standalone),
            current: None,
            failed: None,
        }
    }

    /// Detect the host's OS family and create a provisioner for it
    pub fn detect(
        mut channel: C,
        driver: Box<dyn Driver>,
        registry: &FamilyRegistry,
    ) -> Result<Self, ProvisionError> {
        let (os_release, family) = detect(&mut channel, registry)?;
        Ok(Self::new(channel, driver, family, os_release))
    }

    /// Builder pattern: set the repository table
    pub fn with_repositories(mut self, repositories: RepositoryConfig) -> Self {
        self.repositories = repositories;
        self
    }

    /// Builder pattern: set the readiness poller
    pub fn with_poller(mut self, poller: Poller) -> Self {
        self.poller = poller;
        self
    }

    /// Builder pattern: set the daemon's TCP port
    pub fn with_docker_port(mut self, port: u16) -> Self {
        self.docker_port = port;
        self
    }

    /// Builder pattern: set the certificate backend
    pub fn with_auth_backend(mut self, backend: Box<dyn AuthBackend>) -> Self {
        self.auth_backend = backend;
        self
    }

    /// Builder pattern: set the swarm backend
    pub fn with_swarm_backend(mut self, backend: Box<dyn SwarmBackend>) -> Self {
        self.swarm_backend = backend;
        self
    }

    pub fn family(&self) -> &dyn OsFamily {
        self.family.as_ref()
    }

    pub fn os_release(&self) -> &OsReleaseInfo {
        &self.os_release
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Step the last [`provision`](Self::provision) call stopped in
    pub fn failed_step(&self) -> Option<Step> {
        self.failed
    }

    /// Run a command, choosing the PTY variant when the family needs it
    fn exec(&mut self, command: &RemoteCommand) -> Result<String, ProvisionError> {
        let line = command.render(self.driver.as_ref());
        let mut channel = FamilyChannel {
            inner: &mut self.channel,
            pty: self.family.requires_pty(),
        };
        channel
            .output(&line)
            .map_err(|source| ProvisionError::CommandFailed {
                step: self.current,
                command: line,
                source,
            })
    }

    fn exec_all(&mut self, commands: &[RemoteCommand]) -> Result<(), ProvisionError> {
        for command in commands {
            self.exec(command)?;
        }
        Ok(())
    }

    /// Install, remove or upgrade a package
    pub fn package(&mut self, name: &str, action: PackageAction) -> Result<(), ProvisionError> {
        tracing::debug!("Package {}: {}", action, name);
        let command = self.family.package_command(name, action);
        self.exec(&command).map(drop)
    }

    /// Control a service, reloading unit files first where needed
    pub fn service(&mut self, name: &str, action: ServiceAction) -> Result<(), ProvisionError> {
        tracing::debug!("Service {}: {}", action, name);
        let commands = self.family.service_commands(name, action);
        self.exec_all(&commands)
    }

    /// Set the hostname and its loopback entry
    pub fn set_hostname(&mut self, name: &str) -> Result<(), ProvisionError> {
        let commands = self.family.hostname_commands(name)?;
        self.exec_all(&commands)
    }

    /// Place a file on the host, content over stdin
    pub fn upload(&mut self, file: &FileUpload) -> Result<(), ProvisionError> {
        let mut channel = FamilyChannel {
            inner: &mut self.channel,
            pty: self.family.requires_pty(),
        };
        file.upload(&mut channel, self.driver.as_ref())
            .map_err(|source| ProvisionError::CommandFailed {
                step: self.current,
                command: file.to_string(),
                source,
            })
    }

    /// Install the Docker package repository definition
    pub fn configure_repository(&mut self) -> Result<(), ProvisionError> {
        let file = self
            .family
            .repository_file(&self.repositories, &self.os_release)?;
        match file {
            Some(file) => self.upload(&file),
            None => Ok(()),
        }
    }

    /// Render the engine unit for `input` without touching the host
    pub fn generate_docker_options(
        &self,
        input: &ProvisionInput,
    ) -> Result<DockerOptions, ProvisionError> {
        let context = EngineConfigContext {
            docker_port: self.docker_port,
            auth_options: &input.auth,
            engine_options: &input.engine,
            docker_options_dir: self.family.docker_options_dir(),
        };
        self.family.render_engine_config(&context)
    }

    fn engine_responding(&mut self) -> bool {
        let probe = self.family.engine_probe_command();
        match self.exec(&probe) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Docker daemon not answering yet: {}", e);
                false
            }
        }
    }

    /// Poll until the Docker daemon answers, returning the attempt count
    pub fn wait_for_engine(&mut self) -> Result<u32, ProvisionError> {
        let poller = self.poller;
        let step = self.current;
        poller
            .wait_until(|| self.engine_responding())
            .map_err(|e| match e {
                ProvisionError::ReadinessTimeout {
                    attempts, elapsed, ..
                } => ProvisionError::ReadinessTimeout {
                    step,
                    attempts,
                    elapsed,
                },
                other => other,
            })
    }

    /// Run the full bootstrap sequence
    ///
    /// `on_step` is called before each step starts, with the input that
    /// step will see. On failure, [`failed_step`](Self::failed_step) names
    /// the step that was running.
    pub fn provision<F>(
        &mut self,
        input: ProvisionInput,
        on_step: F,
    ) -> Result<ProvisionReport, ProvisionError>
    where
        F: FnMut(Step, &ProvisionInput),
    {
        self.failed = None;
        let result = self.run_sequence(input, on_step);
        if let Err(e) = &result {
            self.failed = self.current;
            tracing::error!(
                "Provisioning {} stopped in {}: {}",
                self.driver.machine_name(),
                self.current.map_or_else(|| "setup".to_string(), |s| s.to_string()),
                e
            );
        }
        self.current = None;
        result
    }

    fn run_sequence<F>(
        &mut self,
        input: ProvisionInput,
        mut on_step: F,
    ) -> Result<ProvisionReport, ProvisionError>
    where
        F: FnMut(Step, &ProvisionInput),
    {
        let started_at = Utc::now();
        let mut steps = Vec::with_capacity(Step::SEQUENCE.len());
        let mut docker_options = None;

        // Fixed before anything is installed
        let mut input = input.with_default_storage_driver(self.family.default_storage_driver());

        tracing::info!(
            "Provisioning {} ({}, {} family)",
            self.driver.machine_name(),
            self.os_release.display_name(),
            self.family.name()
        );

        for step in Step::SEQUENCE {
            on_step(step, &input);
            self.current = Some(step);
            tracing::info!("{}: {}", step, step.description());

            let started = Instant::now();
            input = match step {
                Step::ConfigureAuth => {
                    let (next, options) = self.configure_auth(input)?;
                    docker_options = Some(options);
                    next
                }
                other => self.run_step(other, input)?,
            };
            let elapsed = started.elapsed();

            tracing::debug!("{} reached {:?} in {:?}", step, step.reaches(), elapsed);
            steps.push(StepTiming { step, elapsed });
        }

        let docker_options = docker_options.ok_or_else(|| {
            ProvisionError::TemplateRender("engine configuration was never rendered".to_string())
        })?;

        tracing::info!("Provisioned {}", self.driver.machine_name());

        Ok(ProvisionReport {
            machine_name: self.driver.machine_name().to_string(),
            family: self.family.name(),
            os_release: self.os_release.clone(),
            state: ProvisionState::Done,
            started_at,
            steps,
            engine: input.engine,
            auth: input.auth,
            docker_options,
        })
    }

    fn run_step(
        &mut self,
        step: Step,
        input: ProvisionInput,
    ) -> Result<ProvisionInput, ProvisionError> {
        let family = Arc::clone(&self.family);

        match step {
            Step::DetectOs | Step::ConfigureAuth => {}
            Step::SetHostname => {
                let name = self.driver.machine_name().to_string();
                self.set_hostname(&name)?;
            }
            Step::InstallBasePackages => {
                for package in family.base_packages() {
                    self.package(package, PackageAction::Install)?;
                }
            }
            Step::UpdateOs => {
                self.exec(&family.os_update_command())?;
            }
            Step::ConfigureRepository => self.configure_repository()?,
            Step::InstallEngine => {
                let package = input
                    .engine
                    .install_package
                    .as_deref()
                    .unwrap_or(family.engine_package());
                self.exec(&family.engine_install_command(package))?;
                self.service(DOCKER_SERVICE, ServiceAction::Restart)?;
                self.service(DOCKER_SERVICE, ServiceAction::Enable)?;
            }
            Step::WaitForEngine => {
                self.wait_for_engine()?;
            }
            Step::CreateOptionsDir => {
                self.exec(&family.options_dir_command())?;
            }
            Step::ConfigureSwarm => {
                let mut channel = FamilyChannel {
                    inner: &mut self.channel,
                    pty: family.requires_pty(),
                };
                self.swarm_backend
                    .configure(&input.swarm, &input.auth, &mut channel, self.driver.as_ref())
                    .map_err(|e| ProvisionError::Backend {
                        step,
                        message: format!("{e:#}"),
                    })?;
            }
        }

        Ok(input)
    }

    fn configure_auth(
        &mut self,
        input: ProvisionInput,
    ) -> Result<(ProvisionInput, DockerOptions), ProvisionError> {
        let family = Arc::clone(&self.family);
        let input = input.with_auth(AuthOptions::for_options_dir(family.docker_options_dir()));

        let mut channel = FamilyChannel {
            inner: &mut self.channel,
            pty: family.requires_pty(),
        };
        self.auth_backend
            .configure(&input.auth, &mut channel, self.driver.as_ref())
            .map_err(|e| ProvisionError::Backend {
                step: Step::ConfigureAuth,
                message: format!("{e:#}"),
            })?;

        let input = input.with_label(format!("provider={}", self.driver.driver_name()));
        let options = self.generate_docker_options(&input)?;

        self.upload(&FileUpload::new(&options.path, &options.content))?;
        self.service(DOCKER_SERVICE, ServiceAction::Restart)?;
        self.wait_for_engine()?;

        Ok((input, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::driver::StaticDriver;
    use crate::provision::options::SwarmOptions;
    use crate::provision::testing::{RecordingChannel, STAGED_PATH};

    fn fast_poller() -> Poller {
        Poller::new(Duration::from_millis(1), Duration::from_millis(50))
    }

    fn provisioner(channel: RecordingChannel) -> Provisioner<RecordingChannel> {
        Provisioner::detect(
            channel,
            Box::new(StaticDriver::new("engine-1", "virtualbox")),
            &FamilyRegistry::with_defaults(),
        )
        .unwrap()
        .with_poller(fast_poller())
    }

    #[test]
    fn detect_reads_os_release() {
        let p = provisioner(RecordingChannel::new());
        assert_eq!(p.family().name(), "redhat");
        assert_eq!(p.os_release().id, "centos");
        assert_eq!(p.channel().commands, vec!["cat /etc/os-release"]);
    }

    #[test]
    fn detect_rejects_unknown_family() {
        let channel = RecordingChannel::new().with_os_release("ID=ubuntu\nVERSION_ID=22.04\n");
        let err = Provisioner::detect(
            channel,
            Box::new(StaticDriver::new("engine-1", "generic")),
            &FamilyRegistry::with_defaults(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, ProvisionError::UnsupportedOs { id } if id == "ubuntu"));
    }

    #[test]
    fn full_run_issues_commands_in_order() {
        let mut p = provisioner(RecordingChannel::new());
        let mut seen = Vec::new();
        let report = p
            .provision(ProvisionInput::default(), |step, _| seen.push(step))
            .unwrap();

        assert_eq!(seen, Step::SEQUENCE.to_vec());
        assert_eq!(p.failed_step(), None);
        assert_eq!(report.state, ProvisionState::Done);
        assert_eq!(report.steps.len(), Step::SEQUENCE.len());
        assert_eq!(report.engine.storage_driver.as_deref(), Some("devicemapper"));
        assert_eq!(report.engine.labels, vec!["provider=virtualbox"]);
        assert_eq!(report.auth, AuthOptions::for_options_dir("/etc/docker"));

        let commands = &p.channel().commands[1..];
        assert_eq!(commands.len(), 17, "{commands:#?}");
        assert_eq!(
            commands[0],
            "sudo sh -c 'hostname engine-1 && echo engine-1 | tee /etc/hostname'"
        );
        assert!(commands[1].starts_with("sudo sh -c 'if grep -xq "));
        assert!(commands[1].contains("127.0.1.1 engine-1"));
        assert_eq!(commands[2], "sudo yum install -y curl");
        assert_eq!(commands[3], "sudo yum -y update");
        assert_eq!(commands[4], FileUpload::stage_command().to_shell());
        assert_eq!(
            commands[5],
            format!(
                "sudo sh -c 'install -m \"$1\" \"$2\" \"$3\"; status=$?; rm -f \"$2\"; exit $status' \
                 sh 0644 {STAGED_PATH} /etc/yum.repos.d/docker.repo"
            )
        );
        assert_eq!(
            &commands[6..12],
            [
                "sudo yum install -y docker-engine",
                "sudo systemctl daemon-reload",
                "sudo systemctl restart docker",
                "sudo systemctl enable docker",
                "sudo docker version",
                "sudo mkdir -p /etc/docker",
            ]
        );
        assert_eq!(commands[12], FileUpload::stage_command().to_shell());
        assert!(commands[13].ends_with(" /etc/systemd/system/docker.service"));
        assert_eq!(
            &commands[14..],
            [
                "sudo systemctl daemon-reload",
                "sudo systemctl restart docker",
                "sudo docker version",
            ]
        );

        // File content only ever travels on stdin
        let inputs = &p.channel().inputs;
        assert_eq!(inputs.len(), 2);
        assert!(inputs[0].contains("baseurl=https://yum.dockerproject.org/repo/main/centos/7\n"));
        assert_eq!(inputs[1], report.docker_options.content);
        assert!(inputs[1].contains("--storage-driver devicemapper"));
        assert!(inputs[1].contains("--label provider=virtualbox "));
        assert!(!commands.iter().any(|c| c.contains("baseurl") || c.contains("ExecStart")));

        // Detection and staging run plainly; everything else goes through the PTY
        for (command, pty) in p.channel().commands.iter().zip(&p.channel().pty) {
            let plain = command == "cat /etc/os-release" || command.contains("mktemp");
            assert_eq!(*pty, !plain, "{command}");
        }

        assert_eq!(report.docker_options.path, "/etc/systemd/system/docker.service");
    }

    #[test]
    fn storage_driver_is_fixed_before_engine_install() {
        let mut p = provisioner(RecordingChannel::new());
        let mut at_install = None;
        p.provision(ProvisionInput::default(), |step, input| {
            if step == Step::InstallEngine {
                at_install = Some(input.engine.storage_driver.clone());
            }
        })
        .unwrap();
        assert_eq!(at_install, Some(Some("devicemapper".to_string())));

        // Caller-provided driver is kept
        let mut p = provisioner(RecordingChannel::new());
        let input = ProvisionInput {
            engine: EngineOptions::default().with_storage_driver("overlay"),
            ..Default::default()
        };
        let mut drivers = Vec::new();
        let report = p
            .provision(input, |_, input| {
                drivers.push(input.engine.storage_driver.clone())
            })
            .unwrap();
        assert!(drivers.iter().all(|d| d.as_deref() == Some("overlay")));
        assert_eq!(report.engine.storage_driver.as_deref(), Some("overlay"));
        assert!(report.docker_options.content.contains("--storage-driver overlay "));
    }

    #[test]
    fn each_step_aborts_the_run_where_it_fails() {
        let cases = [
            (Step::SetHostname, "hostname engine-1"),
            (Step::InstallBasePackages, "yum install -y curl"),
            (Step::UpdateOs, "yum -y update"),
            (Step::ConfigureRepository, "/etc/yum.repos.d/docker.repo"),
            (Step::InstallEngine, "yum install -y docker-engine"),
            (Step::WaitForEngine, "docker version"),
            (Step::CreateOptionsDir, "mkdir -p"),
            (Step::ConfigureAuth, "/etc/systemd/system/docker.service"),
        ];

        for (step, needle) in cases {
            let mut p = provisioner(RecordingChannel::new().failing_on(needle));
            let mut seen = Vec::new();
            let err = p
                .provision(ProvisionInput::default(), |step, _| seen.push(step))
                .unwrap_err();

            assert_eq!(err.step(), Some(step), "{needle}: {err}");
            assert_eq!(p.failed_step(), Some(step), "{needle}");
            assert_eq!(seen.last(), Some(&step), "{needle}");

            // Nothing runs past the failing command
            let commands = &p.channel().commands;
            let first = commands
                .iter()
                .position(|c| c.contains(needle))
                .unwrap_or_else(|| panic!("{needle} never ran: {commands:#?}"));
            assert!(
                commands[first..].iter().all(|c| c.contains(needle)),
                "{needle}: {commands:#?}"
            );
        }
    }

    #[test]
    fn failing_step_stops_the_run() {
        let mut p = provisioner(RecordingChannel::new().failing_on("yum -y update"));
        let mut seen = Vec::new();
        let err = p
            .provision(ProvisionInput::default(), |step, _| seen.push(step))
            .unwrap_err();

        match &err {
            ProvisionError::CommandFailed { step, command, .. } => {
                assert_eq!(*step, Some(Step::UpdateOs));
                assert_eq!(command, "sudo yum -y update");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
        assert_eq!(seen.last(), Some(&Step::UpdateOs));
        assert_eq!(p.channel().commands.last().map(String::as_str), Some("sudo yum -y update"));
        assert!(!p.channel().commands.iter().any(|c| c.contains("docker")));
    }

    #[test]
    fn unknown_release_fails_at_repository_step() {
        let channel = RecordingChannel::new()
            .with_os_release("ID=\"rocky\"\nID_LIKE=\"rhel centos fedora\"\nVERSION_ID=\"9\"\n");
        let mut p = provisioner(channel);
        let err = p.provision(ProvisionInput::default(), |_, _| {}).unwrap_err();
        assert!(matches!(err, ProvisionError::UnknownOsRelease { ref id } if id == "rocky"));
        assert_eq!(p.failed_step(), Some(Step::ConfigureRepository));
        assert_eq!(p.channel().commands.last().map(String::as_str), Some("sudo yum -y update"));
    }

    #[test]
    fn slow_daemon_is_polled() {
        let mut p = provisioner(RecordingChannel::new().with_probe_failures(2));
        p.provision(ProvisionInput::default(), |_, _| {}).unwrap();
        let probes = p
            .channel()
            .commands
            .iter()
            .filter(|c| c.as_str() == "sudo docker version")
            .count();
        assert_eq!(probes, 4);
    }

    #[test]
    fn dead_daemon_times_out() {
        let mut p = provisioner(RecordingChannel::new().with_probe_failures(usize::MAX));
        let err = p.provision(ProvisionInput::default(), |_, _| {}).unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::ReadinessTimeout {
                step: Some(Step::WaitForEngine),
                attempts,
                ..
            } if attempts >= 1
        ));
        assert!(!p.channel().commands.iter().any(|c| c.contains("mkdir")));
    }

    #[test]
    fn swarm_mode_without_backend_fails_last() {
        let mut p = provisioner(RecordingChannel::new());
        let input = ProvisionInput {
            swarm: SwarmOptions {
                is_swarm: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = p.provision(input, |_, _| {}).unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::Backend {
                step: Step::ConfigureSwarm,
                ..
            }
        ));
        assert_eq!(p.failed_step(), Some(Step::ConfigureSwarm));
    }

    #[test]
    fn service_outside_a_run_has_no_step() {
        let mut p = provisioner(RecordingChannel::new().failing_on("systemctl stop"));
        let err = p.service("docker", ServiceAction::Stop).unwrap_err();
        assert_eq!(err.step(), None);
        assert_eq!(
            p.channel().commands[1..],
            ["sudo systemctl stop docker".to_string()]
        );
    }

    #[test]
    fn invalid_machine_name_runs_nothing() {
        let mut p = Provisioner::detect(
            RecordingChannel::new(),
            Box::new(StaticDriver::new("bad name", "generic")),
            &FamilyRegistry::with_defaults(),
        )
        .unwrap();
        let err = p.provision(ProvisionInput::default(), |_, _| {}).unwrap_err();
        assert!(matches!(err, ProvisionError::InvalidHostname(_)));
        assert_eq!(p.failed_step(), Some(Step::SetHostname));
        assert_eq!(p.channel().commands.len(), 1);
    }
}
