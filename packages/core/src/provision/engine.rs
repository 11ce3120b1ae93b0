//! Docker engine systemd unit rendering
//!
//! systemd does not load daemon options that are split across lines, so
//! every directive is kept on a single line and any value containing a line
//! break is refused.

use serde::Serialize;

use super::error::ProvisionError;
use super::options::{AuthOptions, EngineOptions};

/// Everything the engine unit is rendered from
#[derive(Debug, Clone, Copy)]
pub struct EngineConfigContext<'a> {
    pub docker_port: u16,
    pub auth_options: &'a AuthOptions,
    pub engine_options: &'a EngineOptions,
    pub docker_options_dir: &'a str,
}

/// Rendered unit content and where it goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockerOptions {
    pub content: String,
    pub path: String,
}

/// Render the engine unit for `context`, destined for `path`
pub fn render_engine_unit(
    context: &EngineConfigContext<'_>,
    path: &str,
) -> Result<DockerOptions, ProvisionError> {
    let engine = context.engine_options;
    let auth = context.auth_options;

    let storage_driver = engine
        .storage_driver
        .as_deref()
        .filter(|driver| !driver.is_empty())
        .ok_or_else(|| ProvisionError::TemplateRender("storage driver is not set".to_string()))?;

    check_single_line("storage driver", storage_driver)?;
    check_single_line("options directory", context.docker_options_dir)?;
    for (field, value) in [
        ("CA certificate path", auth.ca_cert_remote_path.as_str()),
        ("server certificate path", auth.server_cert_remote_path.as_str()),
        ("server key path", auth.server_key_remote_path.as_str()),
    ] {
        check_single_line(field, value)?;
    }
    for (field, values) in [
        ("label", &engine.labels),
        ("insecure registry", &engine.insecure_registry),
        ("registry mirror", &engine.registry_mirror),
        ("engine flag", &engine.arbitrary_flags),
        ("environment entry", &engine.env),
    ] {
        for value in values {
            check_single_line(field, value)?;
        }
    }

    let mut exec_start = format!(
        "ExecStart=/usr/bin/docker -d -H tcp://0.0.0.0:{port} -H unix:///var/run/docker.sock \
         --storage-driver {storage_driver} --tlsverify --tlscacert {ca} --tlscert {cert} --tlskey {key} ",
        port = context.docker_port,
        ca = auth.ca_cert_remote_path,
        cert = auth.server_cert_remote_path,
        key = auth.server_key_remote_path,
    );
    for label in &engine.labels {
        exec_start.push_str(&format!("--label {label} "));
    }
    for registry in &engine.insecure_registry {
        exec_start.push_str(&format!("--insecure-registry {registry} "));
    }
    for mirror in &engine.registry_mirror {
        exec_start.push_str(&format!("--registry-mirror {mirror} "));
    }
    for flag in &engine.arbitrary_flags {
        exec_start.push_str(&format!("--{flag} "));
    }

    let mut environment = String::from("Environment=");
    for entry in &engine.env {
        environment.push_str(&quote_env(entry));
        environment.push(' ');
    }

    let content = format!(
        "[Service]\n\
         {exec_start}\n\
         MountFlags=slave\n\
         LimitNOFILE=1048576\n\
         LimitNPROC=1048576\n\
         LimitCORE=infinity\n\
         {environment}\n"
    );

    Ok(DockerOptions {
        content,
        path: path.to_string(),
    })
}

fn check_single_line(field: &str, value: &str) -> Result<(), ProvisionError> {
    if value.contains(['\n', '\r']) {
        return Err(ProvisionError::TemplateRender(format!(
            "{field} contains a line break: {value:?}"
        )));
    }
    Ok(())
}

/// Double-quote an environment entry for systemd
fn quote_env(entry: &str) -> String {
    let mut quoted = String::with_capacity(entry.len() + 2);
    quoted.push('"');
    for c in entry.chars() {
        if matches!(c, '\\' | '"') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
