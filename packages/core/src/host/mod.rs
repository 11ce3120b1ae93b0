//! Host management module
//!
//! Provides functionality for reaching remote machines:
//! - Host inventory schema and storage
//! - The command channel abstraction and its SSH implementation
//! - Connection testing

mod channel;
mod error;
mod schema;
mod ssh;
mod storage;

// Public exports
pub use channel::CommandChannel;
pub use error::HostError;
pub use schema::{HostConfig, HostsFile};
pub use ssh::{SshChannel, test_connection};
pub use storage::{load_hosts, load_hosts_from, save_hosts, save_hosts_to};
