// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument and environment derivation for the next tier.
//!
//! A child is launched from the same executable; only a trailing sentinel
//! argument and a marker variable distinguish it from its parent.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use thiserror::Error;

use crate::role::{Role, DAEMON_MARKER, WORKER_MARKER};

/// Trailing argument appended when the launcher starts the daemon.
pub const DAEMON_SENTINEL: &str = "master process rekindle";

/// Trailing argument that replaces [`DAEMON_SENTINEL`] for workers.
pub const WORKER_SENTINEL: &str = "worker process";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("worker tier has no child tier to launch")]
    NoChildTier,

    #[error("could not resolve current executable: {0}")]
    CurrentExe(#[source] std::io::Error),
}

/// Snapshot of a process environment, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<OsString, OsString>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the environment of the current process.
    pub fn capture() -> Self {
        std::env::vars_os().collect()
    }

    pub fn contains(&self, key: impl AsRef<OsStr>) -> bool {
        self.vars.contains_key(key.as_ref())
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Add a presence-only marker, keeping any existing value.
    fn mark(&mut self, marker: &str) {
        self.vars
            .entry(OsString::from(marker))
            .or_insert_with(OsString::new);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Everything needed to start one process: program, arguments (without
/// `argv[0]`) and the complete environment the child sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub env: Environment,
}

impl LaunchSpec {
    pub fn new(program: impl Into<PathBuf>, args: Vec<OsString>, env: Environment) -> Self {
        Self {
            program: program.into(),
            args,
            env,
        }
    }

    /// Describe the running process so it can be re-executed.
    pub fn current() -> Result<Self, LaunchError> {
        let program = std::env::current_exe().map_err(LaunchError::CurrentExe)?;
        Ok(Self::new(
            program,
            std::env::args_os().skip(1).collect(),
            Environment::capture(),
        ))
    }

    /// The role a process started from this spec will detect.
    pub fn role(&self) -> Role {
        Role::detect(&self.env)
    }

    /// Derive the spec for the child of a process running as `from`.
    pub fn promote(&self, from: Role) -> Result<Self, LaunchError> {
        match from {
            Role::Launcher => Ok(self.to_daemon()),
            Role::Daemon => Ok(self.to_worker()),
            Role::Worker => Err(LaunchError::NoChildTier),
        }
    }

    fn to_daemon(&self) -> Self {
        let mut next = self.clone();
        if next.args.last().map(OsString::as_os_str) != Some(OsStr::new(DAEMON_SENTINEL)) {
            next.args.push(DAEMON_SENTINEL.into());
        }
        next.env.mark(DAEMON_MARKER);
        next
    }

    // The daemon marker is inherited from the parent and left untouched.
    fn to_worker(&self) -> Self {
        let mut next = self.clone();
        match next.args.last_mut() {
            Some(last) if is_sentinel(last) => *last = WORKER_SENTINEL.into(),
            _ => next.args.push(WORKER_SENTINEL.into()),
        }
        next.env.mark(WORKER_MARKER);
        next
    }

    /// Lossy rendering of program and arguments for log lines.
    pub fn display_args(&self) -> Vec<String> {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

fn is_sentinel(arg: &OsStr) -> bool {
    arg == OsStr::new(DAEMON_SENTINEL) || arg == OsStr::new(WORKER_SENTINEL)
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
