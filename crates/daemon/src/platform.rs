// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform process attributes for detaching the daemon tier.

use std::process::Command;

/// Make `cmd` start in its own session with no controlling terminal.
///
/// The child becomes session and process-group leader, so it outlives the
/// launcher and a signal sent to its group also reaches the worker.
#[cfg(unix)]
#[allow(unsafe_code)]
pub fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;

    // SAFETY: the hook runs in the forked child before exec and only calls
    // setsid(2), which is async-signal-safe and allocates nothing.
    unsafe {
        cmd.pre_exec(|| {
            nix::unistd::setsid()
                .map(drop)
                .map_err(std::io::Error::from)
        });
    }
}

/// Start `cmd` without a console window; Windows has no session semantics.
#[cfg(windows)]
pub fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(any(unix, windows)))]
pub fn detach(_cmd: &mut Command) {}

#[cfg(all(test, unix))]
#[path = "platform_tests.rs"]
mod tests;
