// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launcher tier: hand off to a detached daemon and exit.

use crate::prelude::*;

#[test]
fn launcher_hands_off_and_exits_zero() {
    let sandbox = Sandbox::new();

    sandbox
        .demo()
        .env("REKINDLE_DAEMON_TRIES", "1")
        .exits_with(3)
        .run()
        .code(0)
        .stdout_lacks("started");

    // The detached daemon carries on and gives up after one try.
    let exhausted = wait_for(SPEC_WAIT_MAX_MS, || {
        sandbox
            .read(sandbox.err_log())
            .contains("already attempted 1 times")
    });
    assert!(exhausted, "err.log: {}", sandbox.read(sandbox.err_log()));

    let out = sandbox.read(sandbox.out_log());
    assert!(out.contains("worker started"), "out.log: {out}");
    let err = sandbox.read(sandbox.err_log());
    // The daemon's sentinel argument is replaced by the worker's.
    assert!(err.contains("worker process"), "err.log: {err}");
    assert!(!err.contains("master process rekindle"), "err.log: {err}");
}
