// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use rekindle_core::{ConfigError, DaemonConfig};

/// Variable naming the TOML config file.
pub const CONFIG_VAR: &str = "REKINDLE_CONFIG";

/// Config file path from `REKINDLE_CONFIG`, if set and non-empty.
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Load the daemon config: file defaults (if any), then `REKINDLE_DAEMON_*`
/// overrides from the process environment.
pub fn load_config() -> Result<DaemonConfig, ConfigError> {
    let mut config = match config_path() {
        Some(path) => DaemonConfig::load(&path)?,
        None => DaemonConfig::default(),
    };
    config.apply_overrides(|name| std::env::var(name).ok())?;
    Ok(config)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
