// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OS process seam: starting a child from a [`LaunchSpec`] and waiting on it.

use std::fs::File;
use std::io;
use std::process::{Child, Command, Stdio};

use rekindle_core::{LaunchSpec, WorkerExit};

/// How one child should be started.
#[derive(Debug)]
pub struct SpawnPlan<'a> {
    pub spec: &'a LaunchSpec,
    /// Start in a new session with null stdio (daemon tier)
    pub detach: bool,
    pub stdout: Option<&'a File>,
    pub stderr: Option<&'a File>,
}

/// A started child process.
pub trait ChildProcess {
    fn id(&self) -> u32;

    /// Block until the child exits.
    fn wait(&mut self) -> io::Result<WorkerExit>;
}

/// Starts child processes.
pub trait ProcessLauncher {
    type Child: ChildProcess;

    fn launch(&mut self, plan: &SpawnPlan<'_>) -> io::Result<Self::Child>;
}

/// Launcher backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLauncher;

impl ProcessLauncher for OsLauncher {
    type Child = Child;

    fn launch(&mut self, plan: &SpawnPlan<'_>) -> io::Result<Child> {
        command(plan)?.spawn()
    }
}

impl ChildProcess for Child {
    fn id(&self) -> u32 {
        Child::id(self)
    }

    fn wait(&mut self) -> io::Result<WorkerExit> {
        Child::wait(self).map(WorkerExit::from)
    }
}

/// Build the command for a plan. The child sees exactly `plan.spec.env`.
pub(crate) fn command(plan: &SpawnPlan<'_>) -> io::Result<Command> {
    let spec = plan.spec;
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .env_clear()
        .envs(spec.env.iter())
        .stdin(Stdio::null());

    if plan.detach {
        crate::platform::detach(&mut cmd);
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        return Ok(cmd);
    }

    if let Some(file) = plan.stdout {
        cmd.stdout(file.try_clone()?);
    }
    if let Some(file) = plan.stderr {
        cmd.stderr(file.try_clone()?);
    }
    Ok(cmd)
}

#[cfg(all(test, unix))]
#[path = "process_tests.rs"]
mod tests;
