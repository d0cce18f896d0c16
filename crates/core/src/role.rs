// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process tiers and their detection from environment markers.

use std::fmt;

use crate::launch::Environment;

/// Marker present in the environment of the daemon tier and everything below it.
pub const DAEMON_MARKER: &str = "REKINDLE_TIER_DAEMON";

/// Marker present only in the environment of worker processes.
pub const WORKER_MARKER: &str = "REKINDLE_TIER_WORKER";

/// The tier a process image occupies in the re-exec hierarchy.
///
/// Computed once at startup and fixed for the lifetime of the process; a role
/// only changes across a re-exec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Original invocation. Hands off to a daemon and exits.
    Launcher,
    /// Detached supervisor that restarts workers.
    Daemon,
    /// The supervised application itself.
    Worker,
}

impl Role {
    /// Classify an environment snapshot.
    ///
    /// The worker marker wins on its own, so every environment maps to exactly
    /// one role.
    pub fn detect(env: &Environment) -> Self {
        if env.contains(WORKER_MARKER) {
            Role::Worker
        } else if env.contains(DAEMON_MARKER) {
            Role::Daemon
        } else {
            Role::Launcher
        }
    }

    /// Classify the current process.
    pub fn current() -> Self {
        Self::detect(&Environment::capture())
    }

    /// The tier this role spawns, if any.
    pub fn child(self) -> Option<Role> {
        match self {
            Role::Launcher => Some(Role::Daemon),
            Role::Daemon => Some(Role::Worker),
            Role::Worker => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Launcher => "launcher",
            Role::Daemon => "daemon",
            Role::Worker => "worker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "role_tests.rs"]
mod tests;
