// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output capture files owned by the daemon tier.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use rekindle_core::DaemonConfig;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to open {stream} log file {}: {source}", path.display())]
pub struct LogFileError {
    pub stream: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// The daemon's stdout and stderr capture files.
///
/// A stream without a configured path stays `None` and workers inherit the
/// daemon's own stdio for it.
#[derive(Debug, Default)]
pub struct LogFiles {
    stdout: Option<File>,
    stderr: Option<File>,
}

impl LogFiles {
    /// No capture files; every stream is inherited.
    pub fn none() -> Self {
        Self::default()
    }

    /// Open the files named in `config` for append, creating them owner-only.
    pub fn open(config: &DaemonConfig) -> Result<Self, LogFileError> {
        Ok(Self {
            stdout: open_optional("stdout", config.stdout_log_file.as_deref())?,
            stderr: open_optional("stderr", config.stderr_log_file.as_deref())?,
        })
    }

    pub fn stdout(&self) -> Option<&File> {
        self.stdout.as_ref()
    }

    pub fn stderr(&self) -> Option<&File> {
        self.stderr.as_ref()
    }

    /// Flush and close both files. Errors are ignored; nothing can be done
    /// about them at teardown.
    pub fn close(self) {
        for file in [self.stdout, self.stderr].into_iter().flatten() {
            let _ = file.sync_all();
        }
    }
}

fn open_optional(stream: &'static str, path: Option<&Path>) -> Result<Option<File>, LogFileError> {
    path.map(|path| {
        open_append(path).map_err(|source| LogFileError {
            stream,
            path: path.to_path_buf(),
            source,
        })
    })
    .transpose()
}

fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(test)]
#[path = "log_files_tests.rs"]
mod tests;
