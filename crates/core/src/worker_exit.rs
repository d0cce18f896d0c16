// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! How a worker process ended.

use std::fmt;
use std::process::ExitStatus;

/// Termination of one worker, as recorded on its exit log line.
///
/// Workers are not classified beyond this; any outcome simply triggers the
/// next spawn cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerExit {
    Success,
    Code(i32),
    Signal(i32),
    /// Waiting on the child failed, so its status is unknown.
    WaitFailed(String),
}

impl WorkerExit {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkerExit::Success)
    }
}

impl From<ExitStatus> for WorkerExit {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            return WorkerExit::Success;
        }
        if let Some(code) = status.code() {
            return WorkerExit::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return WorkerExit::Signal(signal);
            }
        }
        WorkerExit::WaitFailed(status.to_string())
    }
}

impl From<std::io::Error> for WorkerExit {
    fn from(err: std::io::Error) -> Self {
        WorkerExit::WaitFailed(err.to_string())
    }
}

impl fmt::Display for WorkerExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerExit::Success => f.write_str("exited successfully"),
            WorkerExit::Code(code) => write!(f, "exit status {}", code),
            WorkerExit::Signal(signal) => write!(f, "signal {}", signal),
            WorkerExit::WaitFailed(reason) => write!(f, "wait failed: {}", reason),
        }
    }
}

#[cfg(test)]
#[path = "worker_exit_tests.rs"]
mod tests;
