//! Read-only view of a session for rendering.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::outcome::Outcome;

/// Everything a shell needs to draw the current round.
///
/// Uses `im::Vector` for the guess history so taking a snapshot every tick
/// is O(1). The target is only present once the round is over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub level: u32,
    pub min_range: i64,
    pub max_range: i64,
    pub max_attempts: u32,
    pub attempts_used: u32,
    pub guess_history: Vector<i64>,
    pub power_up_charges: u32,
    pub time_budget_secs: u64,
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
    pub outcome: Outcome,
    pub revealed_target: Option<i64>,
}

impl SessionSnapshot {
    /// Guesses left before the round is lost.
    #[must_use]
    pub fn attempts_remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts_used)
    }

    /// Most recent guess, if any.
    #[must_use]
    pub fn last_guess(&self) -> Option<i64> {
        self.guess_history.last().copied()
    }
}
