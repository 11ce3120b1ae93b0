//! dockyard render - Print generated files without touching any host

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use dockyard_core::Config;
use dockyard_core::provision::{
    AuthOptions, DockerOptions, EngineConfigContext, FamilyRegistry, OsReleaseInfo, RemoteHost,
};

/// Arguments for render command
#[derive(Args)]
pub struct RenderArgs {
    #[command(subcommand)]
    pub command: RenderCommands,
}

#[derive(Subcommand)]
pub enum RenderCommands {
    /// Print the package repository file for an OS release
    Repo {
        /// OS release id (e.g. centos, rhel, fedora)
        #[arg(long = "os")]
        os_id: String,

        /// OS release version
        #[arg(long, default_value = "")]
        version: String,
    },
    /// Print the Docker engine unit file
    Engine {
        /// OS family
        #[arg(long, default_value = "redhat")]
        family: String,

        /// Driver name recorded in the provider label
        #[arg(long, default_value = RemoteHost::DRIVER_NAME)]
        driver_name: String,

        /// Storage driver (default: from config, then the family default)
        #[arg(long)]
        storage_driver: Option<String>,

        /// Print the unit path and content as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn cmd_render(args: &RenderArgs, config: &Config) -> Result<()> {
    match &args.command {
        RenderCommands::Repo { os_id, version } => {
            print!("{}", render_repo(config, os_id, version)?);
        }
        RenderCommands::Engine {
            family,
            driver_name,
            storage_driver,
            json,
        } => {
            let options = render_engine(config, family, driver_name, storage_driver.as_deref())?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                print!("{}", options.content);
            }
        }
    }
    Ok(())
}

fn render_repo(config: &Config, os_id: &str, version: &str) -> Result<String> {
    let info = OsReleaseInfo::new(os_id.to_lowercase(), version);
    let coordinate = config.repository.resolve(&info)?;
    Ok(config.repository.render(&coordinate)?)
}

/// Render the unit the provisioner would write, with the same defaults
fn render_engine(
    config: &Config,
    family_name: &str,
    driver_name: &str,
    storage_driver: Option<&str>,
) -> Result<DockerOptions> {
    let registry = FamilyRegistry::with_defaults();
    let family = registry.get(family_name).ok_or_else(|| {
        anyhow!(
            "Unknown OS family '{}'. Known families: {}",
            family_name,
            registry.names().join(", ")
        )
    })?;

    let mut input = config.provision_input();
    if let Some(driver) = storage_driver {
        input.engine.storage_driver = Some(driver.to_string());
    }
    let input = input
        .with_default_storage_driver(family.default_storage_driver())
        .with_auth(AuthOptions::for_options_dir(family.docker_options_dir()))
        .with_label(format!("provider={driver_name}"));

    let context = EngineConfigContext {
        docker_port: config.docker_port,
        auth_options: &input.auth,
        engine_options: &input.engine,
        docker_options_dir: family.docker_options_dir(),
    };
    Ok(family.render_engine_config(&context)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_for_centos_points_at_centos_7() {
        let content = render_repo(&Config::default(), "CentOS", "7").unwrap();
        assert!(content.starts_with("[docker]\n"));
        assert!(content.contains("/centos/7\n"));
    }

    #[test]
    fn repo_for_unlisted_os_fails() {
        let err = render_repo(&Config::default(), "rocky", "9").unwrap_err();
        assert!(err.to_string().contains("rocky"));
    }

    #[test]
    fn engine_uses_family_defaults() {
        let options = render_engine(&Config::default(), "redhat", "generic", None).unwrap();
        assert_eq!(options.path, "/etc/systemd/system/docker.service");
        assert!(options.content.contains("--storage-driver devicemapper"));
        assert!(options.content.contains("--tlscacert /etc/docker/ca.pem"));
        assert!(options.content.contains("--label provider=generic"));
        assert!(options.content.contains("tcp://0.0.0.0:2376"));
    }

    #[test]
    fn engine_storage_driver_override() {
        let options =
            render_engine(&Config::default(), "redhat", "virtualbox", Some("overlay")).unwrap();
        assert!(options.content.contains("--storage-driver overlay"));
        assert!(!options.content.contains("devicemapper"));
        assert!(options.content.contains("--label provider=virtualbox"));
    }

    #[test]
    fn unknown_family_lists_known_ones() {
        let err = render_engine(&Config::default(), "arch", "generic", None).unwrap_err();
        assert!(err.to_string().contains("redhat"));
    }
}
