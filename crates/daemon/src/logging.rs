// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor log sink.
//!
//! The daemon writes its own lines (worker exits, exhaustion) to the stderr
//! capture file through a dispatcher that is only active around the
//! supervision loop, independent of whatever logging the application sets up.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, Registry};

use crate::log_files::LogFiles;

/// Build the supervisor dispatcher. Lines go to the stderr log file, or to the
/// daemon's own stderr when none is configured.
///
/// The guard must outlive every event; dropping it flushes pending lines.
pub fn supervisor_dispatch(logs: &LogFiles) -> io::Result<(Dispatch, WorkerGuard)> {
    let (writer, guard) = match logs.stderr() {
        Some(file) => tracing_appender::non_blocking(file.try_clone()?),
        None => tracing_appender::non_blocking(io::stderr()),
    };

    let subscriber = Registry::default().with(
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .with_filter(LevelFilter::INFO),
    );

    Ok((Dispatch::new(subscriber), guard))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
