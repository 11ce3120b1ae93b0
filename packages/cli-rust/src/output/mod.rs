//! Output utilities for CLI commands
//!
//! Spinners with elapsed time display for long-running remote work, a log
//! writer that keeps out of their way, and color helpers for provisioning
//! outcomes.

pub mod colors;
pub mod log;
pub mod spinner;

pub use colors::outcome_style;
pub use log::{LogWriter, progress};
pub use spinner::CommandSpinner;
