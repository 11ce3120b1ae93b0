//! Command spinner with elapsed time display
//!
//! Provides visual feedback during long-running CLI operations with
//! animated spinner and elapsed time indicator.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// A spinner for command operations with elapsed time display
///
/// It respects quiet mode by becoming a no-op when quiet is enabled.
///
/// # Example
///
/// ```ignore
/// let spinner = CommandSpinner::new("Provisioning engine-1...");
/// // ... do work ...
/// spinner.success("engine-1 provisioned");
/// ```
pub struct CommandSpinner {
    bar: Option<ProgressBar>,
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed_precise:.dim})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("\u{28CB}\u{2819}\u{2839}\u{2838}\u{283C}\u{2834}\u{2826}\u{2827}\u{2807}\u{280F}")
}

impl CommandSpinner {
    /// Create a new spinner with the given message
    ///
    /// Shows: `spinner message (HH:MM:SS)`, ticking every 100ms.
    pub fn new(message: &str) -> Self {
        Self::start(ProgressBar::new_spinner(), message)
    }

    /// Create a spinner that respects quiet mode
    pub fn new_maybe(message: &str, quiet: bool) -> Self {
        if quiet {
            Self { bar: None }
        } else {
            Self::new(message)
        }
    }

    /// Create a spinner drawn as one line of a multi-spinner display
    pub fn new_in(multi: &MultiProgress, message: &str, quiet: bool) -> Self {
        if quiet {
            Self { bar: None }
        } else {
            Self::start(multi.add(ProgressBar::new_spinner()), message)
        }
    }

    fn start(bar: ProgressBar, message: &str) -> Self {
        bar.set_style(spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// Update the spinner message
    pub fn update(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Finish the spinner with a success message (green checkmark)
    pub fn success(self, message: &str) {
        if let Some(bar) = self.bar {
            bar.finish_with_message(format!(
                "{} {}",
                console::style("\u{2713}").green(),
                message
            ));
        }
    }

    /// Finish the spinner with a failure message (red X)
    pub fn fail(self, message: &str) {
        if let Some(bar) = self.bar {
            bar.finish_with_message(format!("{} {}", console::style("\u{2717}").red(), message));
        }
    }
}
