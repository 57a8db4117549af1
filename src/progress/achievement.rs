//! Achievement rules.
//!
//! Each achievement has a fixed unlock condition over the player's
//! cumulative stats and a one-time currency reward.

use serde::{Deserialize, Serialize};

use super::ledger::PlayerProgress;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    /// Win 10 rounds.
    GuessMaster,
    /// Reach a best streak of 5 wins.
    HotStreak,
    /// Play 50 rounds.
    Veteran,
}

impl Achievement {
    /// Evaluation order.
    pub const ALL: [Achievement; 3] = [
        Achievement::GuessMaster,
        Achievement::HotStreak,
        Achievement::Veteran,
    ];

    /// Stable string key.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Achievement::GuessMaster => "guess-master",
            Achievement::HotStreak => "hot-streak",
            Achievement::Veteran => "veteran",
        }
    }

    /// Look up an achievement by its string key.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Achievement> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Achievement::GuessMaster => "Guess Master",
            Achievement::HotStreak => "Hot Streak",
            Achievement::Veteran => "Veteran",
        }
    }

    /// Currency granted when unlocked.
    #[must_use]
    pub fn reward(self) -> u64 {
        match self {
            Achievement::GuessMaster => 50,
            Achievement::HotStreak => 30,
            Achievement::Veteran => 100,
        }
    }

    /// Check the unlock condition against current stats.
    #[must_use]
    pub fn is_earned(self, progress: &PlayerProgress) -> bool {
        match self {
            Achievement::GuessMaster => progress.rounds_won() >= 10,
            Achievement::HotStreak => progress.best_streak() >= 5,
            Achievement::Veteran => progress.total_rounds() >= 50,
        }
    }
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
