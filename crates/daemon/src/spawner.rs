// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Starts the next tier below the current process.

use std::io;
use std::path::PathBuf;

use rekindle_core::{LaunchSpec, Role, WorkerExit};
use thiserror::Error;
use tracing::info;

use crate::lifecycle::{Exit, EXIT_HANDED_OFF};
use crate::log_files::LogFiles;
use crate::process::{ChildProcess, ProcessLauncher, SpawnPlan};

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("worker tier has no child tier to spawn")]
    NoChildTier,

    #[error("failed to start {tier} process {}: {source}", program.display())]
    Start {
        tier: Role,
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A running worker together with the arguments it was started with.
#[derive(Debug)]
pub struct Worker<C> {
    child: C,
    pid: u32,
    args: Vec<String>,
}

impl<C: ChildProcess> Worker<C> {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Block until the worker exits. A failed wait is reported as an exit.
    pub fn wait(&mut self) -> WorkerExit {
        self.child.wait().unwrap_or_else(WorkerExit::from)
    }
}

/// Result of a spawn request.
#[derive(Debug)]
pub enum Spawned<C> {
    /// Already a daemon and asked to skip.
    Skipped,
    /// The launcher started the daemon and requested its own exit.
    HandedOff { pid: u32 },
    /// The daemon started a worker.
    Worker(Worker<C>),
}

/// Spawns the child tier of the current process.
pub struct Spawner<L, X> {
    role: Role,
    spec: LaunchSpec,
    launcher: L,
    exit: X,
}

impl<L: ProcessLauncher, X: Exit> Spawner<L, X> {
    /// `spec` describes the current process; its role decides what gets spawned.
    pub fn new(spec: LaunchSpec, launcher: L, exit: X) -> Self {
        Self {
            role: spec.role(),
            spec,
            launcher,
            exit,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Start the child tier.
    ///
    /// From the launcher the child is detached into its own session and the
    /// launcher exits with status 0 once it has started. From the daemon, the
    /// worker's stdio goes to `logs` where configured. With `skip`, a daemon
    /// does nothing.
    pub fn spawn(&mut self, skip: bool, logs: &LogFiles) -> Result<Spawned<L::Child>, SpawnError> {
        if self.role == Role::Daemon && skip {
            return Ok(Spawned::Skipped);
        }

        let child_spec = self
            .spec
            .promote(self.role)
            .map_err(|_| SpawnError::NoChildTier)?;
        let detach = self.role == Role::Launcher;
        let plan = SpawnPlan {
            spec: &child_spec,
            detach,
            stdout: if detach { None } else { logs.stdout() },
            stderr: if detach { None } else { logs.stderr() },
        };

        let child = self
            .launcher
            .launch(&plan)
            .map_err(|source| SpawnError::Start {
                tier: child_spec.role(),
                program: child_spec.program.clone(),
                source,
            })?;
        let pid = child.id();

        if detach {
            info!(pid, "handed off to daemon");
            self.exit.exit(EXIT_HANDED_OFF);
            return Ok(Spawned::HandedOff { pid });
        }

        Ok(Spawned::Worker(Worker {
            child,
            pid,
            args: child_spec.display_args(),
        }))
    }

    /// Terminate the current process through the injected exit.
    pub fn exit(&mut self, code: i32) {
        self.exit.exit(code);
    }
}

#[cfg(test)]
#[path = "spawner_tests.rs"]
mod tests;
