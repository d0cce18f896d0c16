// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor configuration.
//!
//! Values come from a TOML file (`[daemon]` table) and are then overridden by
//! environment variables named after the key: `daemon.tries` is
//! `REKINDLE_DAEMON_TRIES`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum of consecutive fast restarts.
pub const DEFAULT_TRIES: u32 = 10;

/// Default minimum runtime after which a worker counts as healthy.
pub const DEFAULT_STABLE_AFTER: Duration = Duration::from_secs(10);

/// Prefix shared by all configuration override variables.
pub const ENV_PREFIX: &str = "REKINDLE_DAEMON_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidOverride {
        var: String,
        value: String,
        reason: String,
    },
}

/// Settings consumed by the supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Whether the application should daemonize at all
    pub enable: bool,
    /// Maximum consecutive fast restarts before the daemon gives up
    pub tries: u32,
    /// Append target for worker stdout (inherited when unset)
    #[serde(alias = "stdoutLogFile")]
    pub stdout_log_file: Option<PathBuf>,
    /// Append target for worker stderr and supervisor log lines
    #[serde(alias = "stderrLogFile")]
    pub stderr_log_file: Option<PathBuf>,
    /// Stability threshold in milliseconds
    #[serde(alias = "stableAfterMs")]
    pub stable_after_ms: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            enable: false,
            tries: DEFAULT_TRIES,
            stdout_log_file: None,
            stderr_log_file: None,
            stable_after_ms: DEFAULT_STABLE_AFTER.as_millis() as u64,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    daemon: DaemonConfig,
}

impl DaemonConfig {
    /// Read the `[daemon]` table of a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML content. A missing `[daemon]` table yields the defaults.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.daemon.normalized())
    }

    /// Apply `REKINDLE_DAEMON_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            let name = format!("{ENV_PREFIX}{key}");
            lookup(&name).map(|value| (name, value))
        };

        if let Some((name, value)) = var("ENABLE") {
            self.enable = parse_bool(&name, &value)?;
        }
        if let Some((name, value)) = var("TRIES") {
            self.tries = parse_number(&name, &value)?;
        }
        if let Some((_, value)) = var("STDOUT_LOG_FILE") {
            self.stdout_log_file = Some(PathBuf::from(value));
        }
        if let Some((_, value)) = var("STDERR_LOG_FILE") {
            self.stderr_log_file = Some(PathBuf::from(value));
        }
        if let Some((name, value)) = var("STABLE_AFTER_MS") {
            self.stable_after_ms = parse_number(&name, &value)?;
        }

        *self = std::mem::take(self).normalized();
        Ok(())
    }

    pub fn stable_after(&self) -> Duration {
        Duration::from_millis(self.stable_after_ms)
    }

    // An empty path means "not configured".
    fn normalized(mut self) -> Self {
        self.stdout_log_file = self.stdout_log_file.filter(|p| !p.as_os_str().is_empty());
        self.stderr_log_file = self.stderr_log_file.filter(|p| !p.as_os_str().is_empty());
        self
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(var, value, "expected a boolean")),
    }
}

fn parse_number<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| invalid(var, value, &e.to_string()))
}

fn invalid(var: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidOverride {
        var: var.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
