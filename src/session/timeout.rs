//! Per-round timeout watch.
//!
//! The watch is plain data owned by the session: it records when the round
//! started, when it ended, and whether the timeout has fired. Checking it is
//! an explicit call driven by the shell's tick, so dropping a session never
//! leaves a timer running.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum WatchState {
    Armed,
    Fired,
    Cancelled,
}

/// Tracks one round's time budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutWatch {
    started_at: Duration,
    ended_at: Option<Duration>,
    budget: Duration,
    state: WatchState,
}

impl TimeoutWatch {
    /// Arm a watch for a round starting at `now`.
    #[must_use]
    pub fn armed(now: Duration, budget_secs: u64) -> Self {
        Self {
            started_at: now,
            ended_at: None,
            budget: Duration::from_secs(budget_secs),
            state: WatchState::Armed,
        }
    }

    /// Budget in whole seconds.
    #[must_use]
    pub fn budget_secs(&self) -> u64 {
        self.budget.as_secs()
    }

    /// Time since the round started, frozen once the round ended.
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.ended_at
            .unwrap_or(now)
            .saturating_sub(self.started_at)
    }

    /// Time left before the budget runs out (zero once exhausted).
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Duration {
        self.budget.saturating_sub(self.elapsed(now))
    }

    /// Check if the watch can still fire.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state == WatchState::Armed
    }

    /// Check if the watch fired this round.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.state == WatchState::Fired
    }

    /// Returns true exactly once: on the first check at or past the deadline
    /// while armed. Freezes elapsed time at `now` when it fires.
    pub fn check(&mut self, now: Duration) -> bool {
        if !self.is_armed() || self.elapsed(now) < self.budget {
            return false;
        }
        self.state = WatchState::Fired;
        self.ended_at = Some(now);
        true
    }

    /// Disarm the watch because the round ended some other way.
    /// Later checks are no-ops.
    pub fn cancel(&mut self, now: Duration) {
        if self.is_armed() {
            self.state = WatchState::Cancelled;
            self.ended_at = Some(now);
        }
    }
}
