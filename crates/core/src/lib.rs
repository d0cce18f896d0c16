// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rekindle-core: process-independent building blocks of the rekindle supervisor.
//!
//! Everything here is pure data and decision logic: which tier a process
//! occupies, how the child tier's arguments and environment are derived, how
//! the retry budget evolves, and how configuration is read. Spawning and
//! waiting on real processes lives in `rekindle-daemon`.

pub mod budget;
pub mod clock;
pub mod config;
pub mod launch;
pub mod role;
pub mod time_fmt;
pub mod worker_exit;

pub use budget::RetryBudget;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, DaemonConfig, DEFAULT_STABLE_AFTER, DEFAULT_TRIES};
pub use launch::{Environment, LaunchError, LaunchSpec, DAEMON_SENTINEL, WORKER_SENTINEL};
pub use role::{Role, DAEMON_MARKER, WORKER_MARKER};
pub use time_fmt::format_runtime;
pub use worker_exit::WorkerExit;
