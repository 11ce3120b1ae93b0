//! systemd service control commands

use super::action::ServiceAction;
use super::command::RemoteCommand;

/// Reload unit files from disk
pub fn daemon_reload_command() -> RemoteCommand {
    RemoteCommand::new("systemctl").arg("daemon-reload").privileged()
}

/// Commands for `systemctl <verb> <name>`, preceded by a daemon reload
/// when the action (re)starts the service
pub fn service_commands(name: &str, action: ServiceAction) -> Vec<RemoteCommand> {
    let mut commands = Vec::with_capacity(2);
    if action.requires_daemon_reload() {
        commands.push(daemon_reload_command());
    }
    commands.push(
        RemoteCommand::new("systemctl")
            .arg(action.verb())
            .arg(name)
            .privileged(),
    );
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(commands: &[RemoteCommand]) -> Vec<String> {
        commands.iter().map(|c| c.to_shell()).collect()
    }

    #[test]
    fn restart_reloads_immediately_before() {
        let commands = service_commands("docker", ServiceAction::Restart);
        assert_eq!(
            lines(&commands),
            vec!["systemctl daemon-reload", "systemctl restart docker"]
        );
        assert!(commands.iter().all(RemoteCommand::is_privileged));
    }

    #[test]
    fn start_reloads_first() {
        let commands = service_commands("docker", ServiceAction::Start);
        assert_eq!(
            lines(&commands),
            vec!["systemctl daemon-reload", "systemctl start docker"]
        );
    }

    #[test]
    fn other_actions_never_reload() {
        for action in [ServiceAction::Stop, ServiceAction::Enable, ServiceAction::Disable] {
            let commands = service_commands("docker", action);
            assert_eq!(lines(&commands), vec![format!("systemctl {action} docker")]);
        }
    }
}
