//! CLI command implementations

mod config;
mod host;
mod provision;
mod render;

pub use config::{ConfigArgs, cmd_config};
pub use host::{HostArgs, cmd_host};
pub use provision::{ProvisionArgs, cmd_provision};
pub use render::{RenderArgs, cmd_render};
