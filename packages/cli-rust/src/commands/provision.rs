//! dockyard provision - Provision hosts into Docker engine hosts
//!
//! Each host runs on its own blocking task with its own SSH channel; the
//! runs are independent and one failure does not stop the others.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use clap::Args;
use comfy_table::{Cell, Table};
use console::style;
use dialoguer::Confirm;
use dockyard_core::Config;
use dockyard_core::host::{HostConfig, HostError, HostsFile, SshChannel, load_hosts};
use dockyard_core::provision::{
    FamilyRegistry, ProvisionError, ProvisionInput, ProvisionReport, Provisioner, RemoteHost,
    Step,
};
use futures_util::future::join_all;

use crate::backends::UploadCerts;
use crate::output::{CommandSpinner, outcome_style, progress};

/// Arguments for provision command
#[derive(Args)]
pub struct ProvisionArgs {
    /// Names of hosts from the inventory
    #[arg(required_unless_present = "group")]
    pub names: Vec<String>,

    /// Provision every host in this group
    #[arg(short, long)]
    pub group: Option<String>,

    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,

    /// Storage driver (default: from config, then the OS family default)
    #[arg(long)]
    pub storage_driver: Option<String>,

    /// Extra daemon label (can be specified multiple times)
    #[arg(long)]
    pub label: Vec<String>,

    /// Directory with ca.pem, server.pem and server-key.pem to upload
    #[arg(long)]
    pub cert_dir: Option<PathBuf>,
}

/// Everything a single host's run needs, shared across hosts
struct RunSettings {
    config: Config,
    input: ProvisionInput,
    cert_dir: Option<PathBuf>,
    registry: FamilyRegistry,
}

/// Result of one host's run
struct HostOutcome {
    name: String,
    elapsed: Duration,
    result: Result<ProvisionReport, ProvisionError>,
    /// Where a failed run stopped
    failed_step: Option<Step>,
}

/// Resolve the requested host names against the inventory
fn select_hosts(
    hosts: &HostsFile,
    names: &[String],
    group: Option<&str>,
) -> Result<Vec<(String, HostConfig)>, HostError> {
    let mut selected: Vec<(String, HostConfig)> = Vec::new();

    for name in names {
        let config = hosts
            .get_host(name)
            .ok_or_else(|| HostError::NotFound(name.clone()))?;
        if !selected.iter().any(|(existing, _)| existing == name) {
            selected.push((name.clone(), config.clone()));
        }
    }

    if let Some(group) = group {
        for (name, config) in &hosts.hosts {
            let in_group = config.groups.iter().any(|g| g == group);
            if in_group && !selected.iter().any(|(existing, _)| existing == name) {
                selected.push((name.clone(), config.clone()));
            }
        }
    }

    Ok(selected)
}

/// Apply command-line overrides on top of the configured options
fn build_input(config: &Config, args: &ProvisionArgs) -> ProvisionInput {
    let mut input = config.provision_input();
    if let Some(driver) = &args.storage_driver {
        input.engine.storage_driver = Some(driver.clone());
    }
    for label in &args.label {
        input = input.with_label(label.clone());
    }
    input
}

/// Provision one host; runs on a blocking thread
///
/// Also returns the step the run stopped in, if it failed.
fn provision_host(
    name: &str,
    host: HostConfig,
    settings: &RunSettings,
    spinner: &CommandSpinner,
) -> (Result<ProvisionReport, ProvisionError>, Option<Step>) {
    let channel = SshChannel::new(host.clone());
    let driver = RemoteHost::new(name, host);

    let provisioner = match Provisioner::detect(channel, Box::new(driver), &settings.registry) {
        Ok(provisioner) => provisioner,
        Err(e) => return (Err(e), Some(Step::DetectOs)),
    };
    let mut provisioner = provisioner
        .with_repositories(settings.config.repository.clone())
        .with_poller(settings.config.poller())
        .with_docker_port(settings.config.docker_port);

    if let Some(dir) = &settings.cert_dir {
        provisioner = provisioner.with_auth_backend(Box::new(UploadCerts::new(dir)));
    }

    let result = provisioner.provision(settings.input.clone(), |step, _| {
        spinner.update(&format!("{name}: {}", step.description()));
    });
    (result, provisioner.failed_step())
}

fn outcome_label(result: &Result<ProvisionReport, ProvisionError>) -> &'static str {
    match result {
        Ok(_) => "provisioned",
        Err(ProvisionError::ReadinessTimeout { .. }) => "timed out",
        Err(_) => "failed",
    }
}

/// Error text prefixed with the step it happened in
fn failure_message(step: Option<Step>, err: &ProvisionError) -> String {
    let names_step = matches!(
        err,
        ProvisionError::CommandFailed { step: Some(_), .. } | ProvisionError::Backend { .. }
    );
    match step {
        Some(step) if !names_step => format!("{step}: {err}"),
        _ => err.to_string(),
    }
}

fn round_to_secs(elapsed: Duration) -> Duration {
    Duration::from_secs(elapsed.as_secs())
}

pub async fn cmd_provision(
    args: &ProvisionArgs,
    config: &Config,
    quiet: bool,
    verbose: u8,
) -> Result<()> {
    let hosts = load_hosts()?;
    let selected = select_hosts(&hosts, &args.names, args.group.as_deref())?;

    if selected.is_empty() {
        bail!(
            "No hosts found in group '{}'.",
            args.group.as_deref().unwrap_or("")
        );
    }

    let cert_dir = args.cert_dir.clone().or_else(|| config.cert_dir.clone());
    if let Some(dir) = &cert_dir {
        UploadCerts::new(dir).check()?;
    }

    if !args.yes && !quiet {
        let names: Vec<&str> = selected.iter().map(|(name, _)| name.as_str()).collect();
        println!(
            "{} {}",
            style("Hosts:").dim(),
            style(names.join(", ")).cyan()
        );
        println!(
            "{} This installs packages, upgrades the OS and replaces the Docker unit file.",
            style("Note:").yellow()
        );
        let confirmed = Confirm::new()
            .with_prompt(format!("Provision {} host(s)?", selected.len()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let settings = Arc::new(RunSettings {
        config: config.clone(),
        input: build_input(config, args),
        cert_dir,
        registry: FamilyRegistry::with_defaults(),
    });

    let tasks = selected.into_iter().map(|(name, host)| {
        let settings = Arc::clone(&settings);
        let spinner = CommandSpinner::new_in(progress(), &format!("{name}: Connecting"), quiet);

        tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let (result, failed_step) = provision_host(&name, host, &settings, &spinner);
            let elapsed = started.elapsed();

            match &result {
                Ok(_) => spinner.success(&format!(
                    "{name} provisioned in {}",
                    humantime::format_duration(round_to_secs(elapsed))
                )),
                Err(e) => spinner.fail(&format!("{name}: {}", failure_message(failed_step, e))),
            }

            HostOutcome {
                name,
                elapsed,
                result,
                failed_step,
            }
        })
    });

    let mut outcomes = Vec::new();
    for joined in join_all(tasks).await {
        outcomes.push(joined?);
    }

    if !quiet {
        print_summary(&outcomes, verbose);
    }

    let failed: Vec<&HostOutcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();
    if !failed.is_empty() {
        for outcome in &failed {
            if let Err(e) = &outcome.result {
                eprintln!(
                    "{} {}: {}",
                    style("Error:").red().bold(),
                    outcome.name,
                    failure_message(outcome.failed_step, e)
                );
            }
        }
        bail!(
            "{} of {} host(s) failed to provision",
            failed.len(),
            outcomes.len()
        );
    }

    Ok(())
}

fn print_summary(outcomes: &[HostOutcome], verbose: u8) {
    println!();
    let mut table = Table::new();
    table.set_header(vec!["Host", "Result", "Family", "Storage", "Stopped in", "Elapsed"]);

    for outcome in outcomes {
        let (family, storage) = match &outcome.result {
            Ok(report) => (
                report.family.to_string(),
                report
                    .engine
                    .storage_driver
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Err(_) => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(&outcome.name),
            Cell::new(outcome_style(outcome_label(&outcome.result))),
            Cell::new(family),
            Cell::new(storage),
            Cell::new(
                outcome
                    .failed_step
                    .map_or_else(|| "-".to_string(), |step| step.to_string()),
            ),
            Cell::new(humantime::format_duration(round_to_secs(outcome.elapsed))),
        ]);
    }
    println!("{table}");

    if verbose > 0 {
        for outcome in outcomes {
            let Ok(report) = &outcome.result else {
                continue;
            };
            println!();
            println!(
                "{} ({}, started {})",
                style(&report.machine_name).cyan().bold(),
                report.os_release.display_name(),
                report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            for timing in &report.steps {
                println!(
                    "  {:<24} {}",
                    timing.step.to_string(),
                    humantime::format_duration(Duration::from_millis(
                        timing.elapsed.as_millis() as u64
                    ))
                );
            }
            println!(
                "  {:<24} {}",
                style("unit file").dim(),
                report.docker_options.path
            );
        }
    }
}
