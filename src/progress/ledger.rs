//! Cumulative player statistics across rounds.

use im::Vector;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::achievement::Achievement;
use crate::core::RandomSource;
use crate::error::{GameError, GameResult};
use crate::session::GameSession;

/// Currency granted for every won round.
pub const WIN_REWARD: u64 = 10;

/// One completed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub won: bool,
    pub attempts: u32,
}

/// What a single `record_round_result` call changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Win reward plus achievement rewards granted by this call.
    pub currency_awarded: u64,
    /// Achievements unlocked by this call, in evaluation order.
    pub unlocked: SmallVec<[Achievement; 3]>,
}

/// A player's statistics for the lifetime of the application.
///
/// Updated exactly once per finished round. Recording the same round twice
/// double-counts it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlayerProgress {
    total_rounds: u32,
    rounds_won: u32,
    current_streak: u32,
    best_streak: u32,
    total_guesses: u64,
    currency: u64,
    /// Achievement -> round number it unlocked on.
    unlocked: FxHashMap<Achievement, u32>,
    round_history: Vector<RoundRecord>,
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished round, then grant any newly earned achievements.
    pub fn record_round_result(&mut self, won: bool, attempts: u32) -> RoundReport {
        let mut report = RoundReport::default();

        self.total_rounds += 1;
        self.total_guesses += u64::from(attempts);
        self.round_history.push_back(RoundRecord { won, attempts });

        if won {
            self.rounds_won += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
            self.currency += WIN_REWARD;
            report.currency_awarded += WIN_REWARD;
        } else {
            self.current_streak = 0;
        }

        for achievement in Achievement::ALL {
            if self.unlocked.contains_key(&achievement) || !achievement.is_earned(self) {
                continue;
            }
            self.unlocked.insert(achievement, self.total_rounds);
            self.currency += achievement.reward();
            report.currency_awarded += achievement.reward();
            report.unlocked.push(achievement);
            info!(
                "Achievement unlocked: {} (+{} coins)",
                achievement,
                achievement.reward()
            );
        }

        report
    }

    /// Record a finished session round. Returns `None` while it is still in progress.
    pub fn record_session<R: RandomSource>(&mut self, session: &GameSession<R>) -> Option<RoundReport> {
        if !session.is_over() {
            return None;
        }
        Some(self.record_round_result(session.outcome().is_won(), session.attempts_used()))
    }

    /// Deduct currency. Fails without changing the balance if it is too low.
    pub fn spend(&mut self, amount: u64) -> GameResult<()> {
        if amount > self.currency {
            return Err(GameError::InsufficientCurrency {
                needed: amount,
                available: self.currency,
            });
        }
        self.currency -= amount;
        Ok(())
    }

    // === Derived Stats ===

    /// Percentage of rounds won, 0 when no rounds were played.
    #[must_use]
    pub fn win_rate_percent(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            f64::from(self.rounds_won) / f64::from(self.total_rounds) * 100.0
        }
    }

    /// Mean guesses per round, 0 when no rounds were played.
    #[must_use]
    pub fn average_guesses(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            self.total_guesses as f64 / f64::from(self.total_rounds)
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    #[must_use]
    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn total_guesses(&self) -> u64 {
        self.total_guesses
    }

    #[must_use]
    pub fn currency(&self) -> u64 {
        self.currency
    }

    #[must_use]
    pub fn has_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains_key(&achievement)
    }

    /// Round number on which `achievement` unlocked.
    #[must_use]
    pub fn unlocked_on_round(&self, achievement: Achievement) -> Option<u32> {
        self.unlocked.get(&achievement).copied()
    }

    /// Unlocked achievements in display order.
    pub fn unlocked_achievements(&self) -> impl Iterator<Item = Achievement> + '_ {
        Achievement::ALL
            .into_iter()
            .filter(|a| self.unlocked.contains_key(a))
    }

    /// Every recorded round, oldest first.
    #[must_use]
    pub fn round_history(&self) -> &Vector<RoundRecord> {
        &self.round_history
    }
}
