// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable worker runtimes for log lines.

use std::time::Duration;

/// Format a runtime as a short duration: `"850ms"`, `"5s"`, `"2m"`, `"1h30m"`, `"3d"`.
///
/// Sub-second runtimes keep millisecond precision since crash loops usually
/// live there. For the hours range, minutes are included when non-zero.
pub fn format_runtime(runtime: Duration) -> String {
    let secs = runtime.as_secs();
    if secs == 0 {
        format!("{}ms", runtime.as_millis())
    } else if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        if m > 0 {
            format!("{}h{}m", h, m)
        } else {
            format!("{}h", h)
        }
    } else {
        format!("{}d", secs / 86400)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
