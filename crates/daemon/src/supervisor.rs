// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-tier supervision loop.
//!
//! Strictly sequential: spawn one worker, block until it exits, log the exit,
//! then decide whether to go again. There is never more than one live worker.
//!
//! ```text
//! loop {
//!   ├─► attempt = budget.next_attempt()   (None ─► exhausted, stop)
//!   ├─► start = clock.now()
//!   ├─► spawn worker ── Err ─► next iteration (still counted)
//!   ├─► wait for exit, log pid/args/status
//!   └─► runtime > stable_after ─► budget reset
//! }
//! ```

use std::time::Duration;

use rekindle_core::{format_runtime, Clock, RetryBudget};
use tracing::{debug, error, warn};

use crate::lifecycle::Exit;
use crate::log_files::LogFiles;
use crate::process::ProcessLauncher;
use crate::spawner::{Spawned, Spawner};

/// Terminal state of the loop: the retry budget ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted {
    pub tries: u32,
}

pub struct Supervisor<'a, L, X, C> {
    spawner: &'a mut Spawner<L, X>,
    logs: &'a LogFiles,
    clock: C,
    budget: RetryBudget,
    stable_after: Duration,
}

impl<'a, L, X, C> Supervisor<'a, L, X, C>
where
    L: ProcessLauncher,
    X: Exit,
    C: Clock,
{
    pub fn new(
        spawner: &'a mut Spawner<L, X>,
        logs: &'a LogFiles,
        clock: C,
        tries: u32,
        stable_after: Duration,
    ) -> Self {
        Self {
            spawner,
            logs,
            clock,
            budget: RetryBudget::new(tries),
            stable_after,
        }
    }

    /// Restart workers until the budget is exhausted.
    pub fn run(&mut self) -> Exhausted {
        while let Some(attempt) = self.budget.next_attempt() {
            self.run_once(attempt);
        }

        let tries = self.budget.max();
        error!(tries, "already attempted {} times", tries);
        Exhausted { tries }
    }

    fn run_once(&mut self, attempt: u32) {
        let start = self.clock.now();
        let mut worker = match self.spawner.spawn(false, self.logs) {
            Ok(Spawned::Worker(worker)) => worker,
            Ok(_) => return,
            Err(e) => {
                debug!(attempt, error = %e, "worker spawn failed");
                return;
            }
        };

        let status = worker.wait();
        let runtime = self.clock.now().saturating_duration_since(start);

        warn!(
            pid = worker.pid(),
            args = ?worker.args(),
            status = %status,
            runtime = %format_runtime(runtime),
            attempt,
            "worker exited"
        );

        if self.budget.observe(runtime, self.stable_after) {
            debug!(runtime = %format_runtime(runtime), "worker was stable, retry budget reset");
        }
    }

    /// Attempts counted since the last reset.
    pub fn attempts(&self) -> u32 {
        self.budget.count()
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
