//! Color utilities for CLI output

use console::{Style, StyledObject};

/// Style a provisioning outcome
///
/// - "provisioned" -> green bold
/// - "failed", "timed out" -> red
/// - "skipped" -> yellow
/// - other -> dim
pub fn outcome_style(outcome: &str) -> StyledObject<String> {
    let style = match outcome.to_lowercase().as_str() {
        "provisioned" => Style::new().green().bold(),
        "failed" | "timed out" => Style::new().red(),
        "skipped" => Style::new().yellow(),
        _ => Style::new().dim(),
    };
    style.apply_to(outcome.to_string())
}
