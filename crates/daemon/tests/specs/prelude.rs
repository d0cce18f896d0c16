// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the demo binary in a chosen tier.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 5000;

const DAEMON_MARKER: &str = "REKINDLE_TIER_DAEMON";
const WORKER_MARKER: &str = "REKINDLE_TIER_WORKER";

// Variables from the surrounding environment that would change behaviour.
const SCRUBBED: &[&str] = &[
    DAEMON_MARKER,
    WORKER_MARKER,
    "REKINDLE_CONFIG",
    "REKINDLE_DAEMON_ENABLE",
    "REKINDLE_DAEMON_TRIES",
    "REKINDLE_DAEMON_STDOUT_LOG_FILE",
    "REKINDLE_DAEMON_STDERR_LOG_FILE",
    "REKINDLE_DAEMON_STABLE_AFTER_MS",
    "REKINDLE_DEMO_HEARTBEAT_MS",
    "REKINDLE_DEMO_EXIT_AFTER_MS",
    "REKINDLE_DEMO_EXIT_CODE",
    "RUST_LOG",
];

/// Returns the path to the demo binary.
pub fn demo_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rekindle-demo"))
}

/// Temporary directory holding config and capture files for one spec.
pub struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn out_log(&self) -> PathBuf {
        self.path().join("out.log")
    }

    pub fn err_log(&self) -> PathBuf {
        self.path().join("err.log")
    }

    /// Write a file in the sandbox and return its path.
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Read a file, empty when it does not exist.
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(path).unwrap_or_default()
    }

    /// Demo command with daemonizing enabled and both capture files set.
    pub fn demo(&self) -> DemoBuilder {
        demo()
            .env("REKINDLE_DAEMON_ENABLE", "1")
            .env("REKINDLE_DAEMON_STDOUT_LOG_FILE", self.out_log())
            .env("REKINDLE_DAEMON_STDERR_LOG_FILE", self.err_log())
    }
}

/// Create a builder for the demo binary with a scrubbed environment.
pub fn demo() -> DemoBuilder {
    DemoBuilder {
        envs: Vec::new(),
    }
}

pub struct DemoBuilder {
    envs: Vec<(String, String)>,
}

impl DemoBuilder {
    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Start as if already promoted to the daemon tier.
    pub fn as_daemon(self) -> Self {
        self.env(DAEMON_MARKER, "")
    }

    /// Start as if already promoted to the worker tier.
    pub fn as_worker(self) -> Self {
        self.env(DAEMON_MARKER, "").env(WORKER_MARKER, "")
    }

    /// Worker exits on its own right away with `code`.
    pub fn exits_with(self, code: i32) -> Self {
        self.env("REKINDLE_DEMO_EXIT_AFTER_MS", "0")
            .env("REKINDLE_DEMO_EXIT_CODE", code.to_string())
    }

    pub fn command(self) -> Command {
        let mut cmd = Command::new(demo_binary());
        for key in SCRUBBED {
            cmd.env_remove(key);
        }
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run to completion.
    pub fn run(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        RunAssert { output }
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert the exit code.
    pub fn code(self, expected: i32) -> Self {
        assert_eq!(
            self.output.status.code(),
            Some(expected),
            "unexpected exit status\nstdout: {}\nstderr: {}",
            self.stdout(),
            self.stderr()
        );
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

/// Poll a condition until it returns true or timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);
    let poll_interval = std::time::Duration::from_millis(SPEC_POLL_INTERVAL_MS);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll_interval);
    }
    false
}
