// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry budget for the supervision loop.
//!
//! The counter only tracks *consecutive fast* failures: one worker that runs
//! longer than the stability threshold wipes the slate, no matter how many
//! failures came before it. There is no sliding window over recent history, so
//! a single long run right before a burst of crashes fully restores the budget.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryBudget {
    max: u32,
    count: u32,
}

impl RetryBudget {
    pub fn new(max: u32) -> Self {
        Self { max, count: 0 }
    }

    /// Start the next attempt.
    ///
    /// Returns the attempt number (1-based since the last reset), or `None`
    /// once the budget is exhausted.
    pub fn next_attempt(&mut self) -> Option<u32> {
        self.count = self.count.saturating_add(1);
        (self.count <= self.max).then_some(self.count)
    }

    /// Apply the stability rule to an observed worker runtime.
    ///
    /// Returns true when the counter was reset.
    pub fn observe(&mut self, runtime: Duration, stable_after: Duration) -> bool {
        if runtime > stable_after {
            self.count = 0;
            true
        } else {
            false
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;
