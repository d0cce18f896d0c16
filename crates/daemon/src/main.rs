// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rekindle demo service
//!
//! A heartbeat loop that daemonizes itself through rekindle when
//! `daemon.enable` is set. Behaviour is tuned with environment variables:
//! - `REKINDLE_DEMO_HEARTBEAT_MS`: heartbeat period (default 1000)
//! - `REKINDLE_DEMO_EXIT_AFTER_MS`: exit on its own after this long
//! - `REKINDLE_DEMO_EXIT_CODE`: status used for that exit (default 0)

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::io;
use std::time::Duration;

use rekindle_daemon::{daemonize_if_enabled, env, EXIT_STARTUP_FAILED};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const DEFAULT_HEARTBEAT: Duration = Duration::from_secs(1);

fn main() {
    let config = match env::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("rekindle-demo: {e}");
            std::process::exit(EXIT_STARTUP_FAILED);
        }
    };

    // Must run before any thread or runtime exists.
    let role = daemonize_if_enabled(&config);

    let log_guard = setup_logging();
    println!("{role} started (pid {})", std::process::id());
    info!(%role, pid = std::process::id(), "demo service started");

    let code = match run(Settings::from_env()) {
        Ok(code) => code,
        Err(e) => {
            error!("demo service failed: {}", e);
            1
        }
    };

    info!(code, "demo service stopped");
    drop(log_guard);
    std::process::exit(code);
}

fn setup_logging() -> WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    guard
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    heartbeat: Duration,
    exit_after: Option<Duration>,
    exit_code: i32,
}

impl Settings {
    fn from_env() -> Self {
        Self {
            heartbeat: millis_var("REKINDLE_DEMO_HEARTBEAT_MS")
                .filter(|d| !d.is_zero())
                .unwrap_or(DEFAULT_HEARTBEAT),
            exit_after: millis_var("REKINDLE_DEMO_EXIT_AFTER_MS"),
            exit_code: std::env::var("REKINDLE_DEMO_EXIT_CODE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        }
    }
}

fn millis_var(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

fn run(settings: Settings) -> io::Result<i32> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(settings))
}

async fn serve(settings: Settings) -> io::Result<i32> {
    let deadline = async {
        match settings.exit_after {
            Some(after) => tokio::time::sleep(after).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut heartbeat = tokio::time::interval(settings.heartbeat);
    let mut beats: u64 = 0;

    loop {
        tokio::select! {
            biased;

            _ = &mut deadline => {
                info!(code = settings.exit_code, "exit timer fired");
                return Ok(settings.exit_code);
            }

            result = &mut shutdown => {
                result?;
                info!("shutdown signal received");
                return Ok(0);
            }

            _ = heartbeat.tick() => {
                beats += 1;
                println!("heartbeat {beats}");
            }
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigterm.recv() => Ok(()),
        result = tokio::signal::ctrl_c() => result,
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
