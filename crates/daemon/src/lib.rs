// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rekindle daemon library
//!
//! Turns a program into a self-supervising background service. Call
//! [`daemonize`] first thing in `main`: the launcher re-executes itself as a
//! detached daemon and exits, the daemon keeps re-executing the program as a
//! worker until the retry budget runs out, and only the worker returns to the
//! caller.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod log_files;
mod logging;
mod platform;
pub mod process;
pub mod spawner;
pub mod supervisor;

#[cfg(test)]
mod test_support;

pub use lifecycle::{
    daemonize, daemonize_if_enabled, Daemonizer, Exit, LifecycleError, ProcessExit,
    EXIT_EXHAUSTED, EXIT_HANDED_OFF, EXIT_STARTUP_FAILED,
};
pub use log_files::{LogFileError, LogFiles};
pub use process::{ChildProcess, OsLauncher, ProcessLauncher, SpawnPlan};
pub use spawner::{SpawnError, Spawned, Spawner, Worker};
pub use supervisor::{Exhausted, Supervisor};

pub use rekindle_core::{ConfigError, DaemonConfig, LaunchSpec, Role};
