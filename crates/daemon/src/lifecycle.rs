// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry point: turn the current process into launcher, daemon or worker.
//!
//! ```text
//! launcher ──spawn (detached)──► daemon ──spawn──► worker
//!    │ exit 0                      │ supervise        │ returns to caller
//!                                  └ exit 1 when the retry budget runs out
//! ```

use rekindle_core::{Clock, DaemonConfig, LaunchError, LaunchSpec, Role, SystemClock};
use thiserror::Error;
use tracing::info;

use crate::log_files::{LogFileError, LogFiles};
use crate::logging;
use crate::process::{OsLauncher, ProcessLauncher};
use crate::spawner::{SpawnError, Spawned, Spawner};
use crate::supervisor::Supervisor;

/// Launcher exit status after a successful hand-off.
pub const EXIT_HANDED_OFF: i32 = 0;

/// Daemon exit status once the retry budget is exhausted.
pub const EXIT_EXHAUSTED: i32 = 1;

/// Exit status for fatal startup errors.
pub const EXIT_STARTUP_FAILED: i32 = 2;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    LogFile(#[from] LogFileError),

    #[error("failed to set up supervisor logging: {0}")]
    Logging(#[source] std::io::Error),
}

/// Process termination, injectable for tests.
pub trait Exit {
    fn exit(&mut self, code: i32);
}

/// Exits the real process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Exit for ProcessExit {
    fn exit(&mut self, code: i32) {
        std::process::exit(code)
    }
}

/// Drives one process through its tier.
pub struct Daemonizer<L, X, C> {
    config: DaemonConfig,
    spawner: Spawner<L, X>,
    clock: C,
}

impl Daemonizer<OsLauncher, ProcessExit, SystemClock> {
    /// Daemonizer for the running process.
    pub fn for_current_process(config: DaemonConfig) -> Result<Self, LifecycleError> {
        Ok(Self::new(
            config,
            LaunchSpec::current()?,
            OsLauncher,
            ProcessExit,
            SystemClock,
        ))
    }
}

impl<L, X, C> Daemonizer<L, X, C>
where
    L: ProcessLauncher,
    X: Exit,
    C: Clock,
{
    pub fn new(config: DaemonConfig, spec: LaunchSpec, launcher: L, exit: X, clock: C) -> Self {
        Self {
            config,
            spawner: Spawner::new(spec, launcher, exit),
            clock,
        }
    }

    pub fn role(&self) -> Role {
        self.spawner.role()
    }

    /// Run the tier's lifecycle.
    ///
    /// Only a worker returns normally; launcher and daemon end through
    /// [`Exit`]. The returned role tells which tier reached the end, which is
    /// only observable when the exit does not terminate the process.
    pub fn run(mut self) -> Result<Role, LifecycleError> {
        if self.role() == Role::Worker {
            return Ok(Role::Worker);
        }

        if let Spawned::HandedOff { .. } = self.spawner.spawn(true, &LogFiles::none())? {
            return Ok(Role::Launcher);
        }

        let logs = LogFiles::open(&self.config)?;
        let (dispatch, guard) = logging::supervisor_dispatch(&logs).map_err(LifecycleError::Logging)?;

        let exhausted = tracing::dispatcher::with_default(&dispatch, || {
            info!(pid = std::process::id(), tries = self.config.tries, "daemon supervising");
            Supervisor::new(
                &mut self.spawner,
                &logs,
                &self.clock,
                self.config.tries,
                self.config.stable_after(),
            )
            .run()
        });

        drop(guard);
        logs.close();

        tracing::debug!(tries = exhausted.tries, "daemon exiting");
        self.spawner.exit(EXIT_EXHAUSTED);
        Ok(Role::Daemon)
    }
}

/// Daemonize the current process.
///
/// Call at the very start of `main`, before any threads or runtimes exist.
/// Returns only in the worker tier, where the program continues as the
/// supervised service. Fatal startup errors are printed to stderr and end the
/// process with [`EXIT_STARTUP_FAILED`].
pub fn daemonize(config: &DaemonConfig) {
    let result =
        Daemonizer::for_current_process(config.clone()).and_then(|daemonizer| daemonizer.run());
    if let Err(e) = result {
        eprintln!("rekindle: failed to run in daemon mode: {e}");
        std::process::exit(EXIT_STARTUP_FAILED);
    }
}

/// [`daemonize`] when `config.enable` is set; otherwise keep running in the
/// foreground. Returns the role the caller continues as.
pub fn daemonize_if_enabled(config: &DaemonConfig) -> Role {
    if config.enable {
        daemonize(config);
    }
    Role::current()
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
