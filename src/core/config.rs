//! Round and ruleset configuration.
//!
//! Shells configure the core by choosing a `Ruleset`:
//! - `RoundParams`: Range, attempt limit and time budget of one round
//! - `DifficultyCurve`: How those parameters scale with level
//! - `PowerUpPolicy`: Whether power-ups come from charges or are bought
//!
//! Game variants are rulesets, not separate engines.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigIssue, GameError, GameResult};

/// Parameters of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundParams {
    /// Lowest possible target (inclusive).
    pub min_range: i64,

    /// Highest possible target (inclusive).
    pub max_range: i64,

    /// Guesses allowed before the round is lost.
    pub max_attempts: u32,

    /// Wall-clock budget of the round in seconds.
    pub time_budget_secs: u64,
}

impl RoundParams {
    /// Create round parameters. Call `validate` before use.
    #[must_use]
    pub const fn new(min_range: i64, max_range: i64, max_attempts: u32, time_budget_secs: u64) -> Self {
        Self {
            min_range,
            max_range,
            max_attempts,
            time_budget_secs,
        }
    }

    /// Check the parameters describe a playable round.
    pub fn validate(&self) -> GameResult<()> {
        if self.min_range >= self.max_range {
            return Err(ConfigIssue::EmptyRange {
                min: self.min_range,
                max: self.max_range,
            }
            .into());
        }
        if self.max_attempts == 0 {
            return Err(ConfigIssue::NoAttempts.into());
        }
        if self.time_budget_secs == 0 {
            return Err(ConfigIssue::NoTimeBudget.into());
        }
        Ok(())
    }

    /// Set the range bounds.
    #[must_use]
    pub fn with_range(mut self, min_range: i64, max_range: i64) -> Self {
        self.min_range = min_range;
        self.max_range = max_range;
        self
    }

    /// Set the attempt limit.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the time budget.
    #[must_use]
    pub fn with_time_budget(mut self, secs: u64) -> Self {
        self.time_budget_secs = secs;
        self
    }
}

impl Default for RoundParams {
    fn default() -> Self {
        Self::new(1, 100, 10, 60)
    }
}

/// How round parameters scale as the player levels up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCurve {
    /// Multiplier applied to `max_range` per level (result rounded).
    pub range_growth: f64,

    /// Time budget before any level reduction.
    pub base_time_secs: u64,

    /// Seconds removed from the budget per level.
    pub time_step_secs: u64,

    /// The budget never drops below this.
    pub min_time_secs: u64,

    /// Attempt limit before any level bonus.
    pub base_attempts: u32,

    /// Levels needed for each extra attempt.
    pub levels_per_extra_attempt: u32,

    /// The attempt limit never exceeds this.
    pub max_attempts_cap: u32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            range_growth: 1.5,
            base_time_secs: 60,
            time_step_secs: 5,
            min_time_secs: 30,
            base_attempts: 10,
            levels_per_extra_attempt: 2,
            max_attempts_cap: 15,
        }
    }
}

impl DifficultyCurve {
    /// Grown upper bound for the next level: `round(max * growth)`.
    ///
    /// When that would not raise the bound (max at or below zero), the width
    /// above `min_range` is scaled instead. The bound never shrinks and
    /// saturates at `i64::MAX`.
    #[must_use]
    pub fn grow_range(&self, min_range: i64, max_range: i64) -> i64 {
        let scaled = (max_range as f64 * self.range_growth).round() as i64;
        if scaled > max_range {
            return scaled;
        }

        let width = (i128::from(max_range) - i128::from(min_range)) as f64;
        let grown = i128::from(min_range) + (width * self.range_growth).round() as i128;
        i64::try_from(grown).unwrap_or(i64::MAX).max(max_range)
    }

    /// Time budget at `level`: `max(min, base - level * step)`.
    #[must_use]
    pub fn time_budget_for(&self, level: u32) -> u64 {
        self.base_time_secs
            .saturating_sub(u64::from(level).saturating_mul(self.time_step_secs))
            .max(self.min_time_secs)
    }

    /// Attempt limit at `level`: `min(cap, base + level / per)`.
    #[must_use]
    pub fn attempts_for(&self, level: u32) -> u32 {
        let bonus = level.checked_div(self.levels_per_extra_attempt).unwrap_or(0);
        self.base_attempts
            .saturating_add(bonus)
            .min(self.max_attempts_cap)
    }

    /// Set the range multiplier.
    #[must_use]
    pub fn with_range_growth(mut self, growth: f64) -> Self {
        self.range_growth = growth;
        self
    }

    /// Set the time budget floor.
    #[must_use]
    pub fn with_min_time(mut self, secs: u64) -> Self {
        self.min_time_secs = secs;
        self
    }

    /// Set the attempt cap.
    #[must_use]
    pub fn with_max_attempts_cap(mut self, cap: u32) -> Self {
        self.max_attempts_cap = cap;
        self
    }
}

/// Where power-ups come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpPolicy {
    /// Each round starts with this many free charges.
    Charges(u32),
    /// No free charges; each use costs this much currency.
    Purchase { cost: u64 },
}

impl PowerUpPolicy {
    /// Charges a fresh round starts with.
    #[must_use]
    pub fn starting_charges(self) -> u32 {
        match self {
            PowerUpPolicy::Charges(n) => n,
            PowerUpPolicy::Purchase { .. } => 0,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Parameters of the first round at level 1.
    pub initial_round: RoundParams,

    /// Level scaling. `None` keeps every round identical.
    pub difficulty: Option<DifficultyCurve>,

    /// Power-up supply.
    pub power_ups: PowerUpPolicy,
}

impl Ruleset {
    /// Timed rounds that get harder with every win, three free power-ups per round.
    pub fn challenge() -> Self {
        Self {
            name: "Challenge".to_string(),
            initial_round: RoundParams::default(),
            difficulty: Some(DifficultyCurve::default()),
            power_ups: PowerUpPolicy::Charges(3),
        }
    }

    /// Flat 20 second rounds with no scaling; power-ups are bought with currency.
    pub fn classic() -> Self {
        Self {
            name: "Classic".to_string(),
            initial_round: RoundParams::new(1, 100, 10, 20),
            difficulty: None,
            power_ups: PowerUpPolicy::Purchase { cost: 10 },
        }
    }

    /// Set the first round's parameters.
    #[must_use]
    pub fn with_initial_round(mut self, params: RoundParams) -> Self {
        self.initial_round = params;
        self
    }

    /// Set the difficulty curve.
    #[must_use]
    pub fn with_difficulty(mut self, curve: DifficultyCurve) -> Self {
        self.difficulty = Some(curve);
        self
    }

    /// Disable level scaling.
    #[must_use]
    pub fn without_difficulty(mut self) -> Self {
        self.difficulty = None;
        self
    }

    /// Set the power-up policy.
    #[must_use]
    pub fn with_power_ups(mut self, policy: PowerUpPolicy) -> Self {
        self.power_ups = policy;
        self
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::challenge()
    }
}
