//! Config show subcommand
//!
//! Displays current configuration in table or JSON format.

use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use dockyard_core::{Config, config};

/// Show current configuration
pub fn cmd_config_show(config: &Config, json: bool, _quiet: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Key", "Value"]);

    for (key, value) in config_rows(config) {
        let cell = if value == NOT_SET || value == NONE {
            Cell::new(value).fg(Color::DarkGrey)
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(key), cell]);
    }

    println!("{table}");

    if let Some(path) = config::paths::get_config_path() {
        println!();
        println!("Config file: {}", path.display());
    }

    Ok(())
}

const NOT_SET: &str = "(not set)";
const NONE: &str = "(none)";

/// Flatten the config into displayable key/value rows
fn config_rows(config: &Config) -> Vec<(&'static str, String)> {
    let engine = &config.engine;
    let swarm = &config.swarm;
    let repo = &config.repository;

    vec![
        ("version", config.version.to_string()),
        ("docker_port", config.docker_port.to_string()),
        (
            "readiness_timeout_secs",
            config.readiness_timeout_secs.to_string(),
        ),
        (
            "readiness_interval_secs",
            config.readiness_interval_secs.to_string(),
        ),
        (
            "cert_dir",
            config
                .cert_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| NOT_SET.to_string()),
        ),
        ("repository.base_url", repo.base_url.clone()),
        ("repository.gpg_key_url", repo.gpg_key_url.clone()),
        (
            "repository.releases",
            format_list(
                &repo
                    .releases
                    .iter()
                    .map(|(id, c)| format!("{id}={}/{}", c.family, c.version))
                    .collect::<Vec<_>>(),
            ),
        ),
        (
            "engine.storage_driver",
            engine
                .storage_driver
                .clone()
                .filter(|driver| !driver.is_empty())
                .unwrap_or_else(|| NOT_SET.to_string()),
        ),
        ("engine.labels", format_list(&engine.labels)),
        (
            "engine.insecure_registry",
            format_list(&engine.insecure_registry),
        ),
        ("engine.registry_mirror", format_list(&engine.registry_mirror)),
        ("engine.arbitrary_flags", format_list(&engine.arbitrary_flags)),
        ("engine.env", format_list(&engine.env)),
        (
            "engine.install_package",
            engine
                .install_package
                .clone()
                .unwrap_or_else(|| NOT_SET.to_string()),
        ),
        ("swarm.is_swarm", swarm.is_swarm.to_string()),
    ]
}

fn format_list(values: &[String]) -> String {
    if values.is_empty() {
        NONE.to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row<'a>(rows: &'a [(&'static str, String)], key: &str) -> &'a str {
        rows.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn default_rows() {
        let rows = config_rows(&Config::default());
        assert_eq!(row(&rows, "docker_port"), "2376");
        assert_eq!(row(&rows, "engine.storage_driver"), NOT_SET);
        assert_eq!(row(&rows, "engine.labels"), NONE);
        assert_eq!(row(&rows, "cert_dir"), NOT_SET);
        assert!(row(&rows, "repository.releases").contains("centos=centos/7"));
        assert!(row(&rows, "repository.releases").contains("fedora=fedora/22"));
    }

    #[test]
    fn lists_join_with_commas() {
        let values = vec!["env=lab".to_string(), "tier=db".to_string()];
        assert_eq!(format_list(&values), "env=lab, tier=db");
        assert_eq!(format_list(&[]), NONE);
    }
}
