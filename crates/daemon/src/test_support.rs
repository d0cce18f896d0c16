// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted process launcher and recording exit for supervisor tests.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rekindle_core::{FakeClock, Role, WorkerExit};

use crate::lifecycle::Exit;
use crate::process::{ChildProcess, ProcessLauncher, SpawnPlan};

/// What the next launch does.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// `launch` fails with this error kind.
    FailToStart(io::ErrorKind),
    /// The child runs for `runtime` (on the fake clock) and then exits.
    Run { runtime: Duration, exit: WorkerExit },
}

impl Outcome {
    pub fn crash() -> Self {
        Outcome::Run {
            runtime: Duration::from_millis(20),
            exit: WorkerExit::Code(1),
        }
    }

    pub fn run_for(runtime: Duration) -> Self {
        Outcome::Run {
            runtime,
            exit: WorkerExit::Code(1),
        }
    }
}

/// One observed `launch` call.
#[derive(Debug, Clone)]
pub struct Launch {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub role: Role,
    pub detach: bool,
    pub stdout_redirected: bool,
    pub stderr_redirected: bool,
    pub started: bool,
}

#[derive(Debug, Default)]
struct Shared {
    launches: Vec<Launch>,
    live: usize,
    max_live: usize,
}

/// Launcher that plays back scripted outcomes; crashes fast once the script
/// runs out.
pub struct FakeLauncher {
    clock: FakeClock,
    script: VecDeque<Outcome>,
    shared: Arc<Mutex<Shared>>,
    next_pid: u32,
}

/// Read side of a [`FakeLauncher`], usable after the launcher was moved.
#[derive(Clone)]
pub struct LaunchLog {
    shared: Arc<Mutex<Shared>>,
}

impl LaunchLog {
    pub fn launches(&self) -> Vec<Launch> {
        self.shared.lock().launches.clone()
    }

    pub fn count(&self) -> usize {
        self.shared.lock().launches.len()
    }

    /// Highest number of children alive at the same time.
    pub fn max_live(&self) -> usize {
        self.shared.lock().max_live
    }
}

impl FakeLauncher {
    pub fn new(clock: FakeClock) -> Self {
        Self {
            clock,
            script: VecDeque::new(),
            shared: Arc::default(),
            next_pid: 1000,
        }
    }

    pub fn script(mut self, outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        self.script.extend(outcomes);
        self
    }

    pub fn log(&self) -> LaunchLog {
        LaunchLog {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl ProcessLauncher for FakeLauncher {
    type Child = FakeChild;

    fn launch(&mut self, plan: &SpawnPlan<'_>) -> io::Result<FakeChild> {
        let outcome = self.script.pop_front().unwrap_or_else(Outcome::crash);
        let started = !matches!(outcome, Outcome::FailToStart(_));

        let mut shared = self.shared.lock();
        shared.launches.push(Launch {
            program: plan.spec.program.clone(),
            args: plan.spec.args.clone(),
            role: plan.spec.role(),
            detach: plan.detach,
            stdout_redirected: plan.stdout.is_some(),
            stderr_redirected: plan.stderr.is_some(),
            started,
        });

        match outcome {
            Outcome::FailToStart(kind) => Err(io::Error::new(kind, "scripted launch failure")),
            Outcome::Run { runtime, exit } => {
                shared.live += 1;
                shared.max_live = shared.max_live.max(shared.live);
                self.next_pid += 1;
                Ok(FakeChild {
                    pid: self.next_pid,
                    runtime,
                    exit,
                    clock: self.clock.clone(),
                    shared: Arc::clone(&self.shared),
                })
            }
        }
    }
}

#[derive(Debug)]
pub struct FakeChild {
    pid: u32,
    runtime: Duration,
    exit: WorkerExit,
    clock: FakeClock,
    shared: Arc<Mutex<Shared>>,
}

impl ChildProcess for FakeChild {
    fn id(&self) -> u32 {
        self.pid
    }

    fn wait(&mut self) -> io::Result<WorkerExit> {
        self.clock.advance(self.runtime);
        let mut shared = self.shared.lock();
        shared.live = shared.live.saturating_sub(1);
        Ok(self.exit.clone())
    }
}

/// Exit that records codes instead of terminating.
#[derive(Clone, Default)]
pub struct RecordingExit {
    codes: Arc<Mutex<Vec<i32>>>,
}

impl RecordingExit {
    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().clone()
    }
}

impl Exit for RecordingExit {
    fn exit(&mut self, code: i32) {
        self.codes.lock().push(code);
    }
}
