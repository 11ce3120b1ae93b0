//! Package and service action vocabulary
//!
//! Closed sets of operations with exactly one command verb each. The
//! mappings are exhaustive matches, so adding a variant without a verb does
//! not compile.

/// Package manager operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageAction {
    Install,
    Remove,
    Upgrade,
}

impl PackageAction {
    /// Every variant, in declaration order
    pub const ALL: [PackageAction; 3] = [
        PackageAction::Install,
        PackageAction::Remove,
        PackageAction::Upgrade,
    ];

    /// Package manager verb for this action
    pub fn verb(self) -> &'static str {
        match self {
            PackageAction::Install => "install",
            PackageAction::Remove => "remove",
            PackageAction::Upgrade => "upgrade",
        }
    }
}

impl std::fmt::Display for PackageAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

/// Service manager operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
    Enable,
    Disable,
}

impl ServiceAction {
    /// Every variant, in declaration order
    pub const ALL: [ServiceAction; 5] = [
        ServiceAction::Start,
        ServiceAction::Stop,
        ServiceAction::Restart,
        ServiceAction::Enable,
        ServiceAction::Disable,
    ];

    /// Service manager verb for this action
    pub fn verb(self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
            ServiceAction::Enable => "enable",
            ServiceAction::Disable => "disable",
        }
    }

    /// Whether unit files are reloaded before this action
    pub fn requires_daemon_reload(self) -> bool {
        match self {
            ServiceAction::Start | ServiceAction::Restart => true,
            ServiceAction::Stop | ServiceAction::Enable | ServiceAction::Disable => false,
        }
    }
}

impl std::fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}
