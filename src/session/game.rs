//! The game session state machine.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use im::Vector;
use log::{debug, info, warn};

use super::outcome::{GuessResult, Outcome, PowerUpResult, TimeoutEvent};
use super::power_up::{last_digit, narrow_range, PowerUp};
use super::snapshot::SessionSnapshot;
use super::timeout::TimeoutWatch;
use crate::core::{Clock, GameRng, PowerUpPolicy, RandomSource, RoundParams, Ruleset};
use crate::error::GameResult;
use crate::progress::PlayerProgress;

/// Callback fired when a round runs out of time.
pub type TimeoutListener = Box<dyn FnMut(&TimeoutEvent)>;

/// One player's game: the live round plus level and next-round parameters.
///
/// ## Lifecycle
///
/// - `start` creates the session and its first round
/// - `submit_guess` / `use_power_up` drive the round until a terminal outcome
/// - `tick` is called periodically by the shell to enforce the time budget
/// - `increase_difficulty` after a win, then `start_next_round`
///
/// All mutation goes through `&mut self`, so the first terminal outcome
/// written wins and later ones are no-ops.
pub struct GameSession<R = GameRng> {
    ruleset: Ruleset,
    rng: R,
    clock: Rc<dyn Clock>,

    // === Progression ===
    level: u32,
    round_params: RoundParams,

    // === Live Round ===
    target: i64,
    min_range: i64,
    max_range: i64,
    max_attempts: u32,
    attempts_used: u32,
    guess_history: Vector<i64>,
    power_up_charges: u32,
    outcome: Outcome,
    watch: TimeoutWatch,

    timeout_listeners: Vec<TimeoutListener>,
}

impl<R: RandomSource> GameSession<R> {
    /// Create a session at level 1 and start its first round with
    /// `ruleset.initial_round`.
    pub fn start(ruleset: Ruleset, rng: R, clock: Rc<dyn Clock>) -> GameResult<Self> {
        let params = ruleset.initial_round;
        params.validate()?;

        let now = clock.now();
        let mut session = Self {
            ruleset,
            rng,
            clock,
            level: 1,
            round_params: params,
            target: params.min_range,
            min_range: params.min_range,
            max_range: params.max_range,
            max_attempts: params.max_attempts,
            attempts_used: 0,
            guess_history: Vector::new(),
            power_up_charges: 0,
            outcome: Outcome::InProgress,
            watch: TimeoutWatch::armed(now, params.time_budget_secs),
            timeout_listeners: Vec::new(),
        };
        session.begin_round(params);
        Ok(session)
    }

    /// Start a new round with explicit parameters.
    ///
    /// On invalid parameters the current round is left untouched.
    /// An in-progress round is abandoned without an outcome.
    pub fn start_round(&mut self, params: RoundParams) -> GameResult<()> {
        params.validate()?;

        if !self.outcome.is_terminal() && self.attempts_used > 0 {
            info!(
                "Abandoning level {} round after {} attempts",
                self.level, self.attempts_used
            );
        }
        self.watch.cancel(self.clock.now());
        self.round_params = params;
        self.begin_round(params);
        Ok(())
    }

    /// Start a new round with the parameters prepared by `increase_difficulty`.
    pub fn start_next_round(&mut self) -> GameResult<()> {
        self.start_round(self.round_params)
    }

    fn begin_round(&mut self, params: RoundParams) {
        self.target = self
            .rng
            .gen_range_inclusive(params.min_range, params.max_range);
        self.min_range = params.min_range;
        self.max_range = params.max_range;
        self.max_attempts = params.max_attempts;
        self.attempts_used = 0;
        self.guess_history = Vector::new();
        self.power_up_charges = self.ruleset.power_ups.starting_charges();
        self.outcome = Outcome::InProgress;
        self.watch = TimeoutWatch::armed(self.clock.now(), params.time_budget_secs);

        info!(
            "Level {}: guess a number between {} and {} ({} attempts, {}s)",
            self.level, self.min_range, self.max_range, self.max_attempts, params.time_budget_secs
        );
    }

    /// Move to a terminal outcome. Returns false if the round already ended.
    fn finish(&mut self, outcome: Outcome) -> bool {
        debug_assert!(outcome.is_terminal());
        if self.outcome.is_terminal() {
            return false;
        }
        self.outcome = outcome;
        if outcome != Outcome::LostTimeout {
            self.watch.cancel(self.clock.now());
        }
        info!(
            "Round over at level {}: {:?} after {} attempts (target {})",
            self.level, outcome, self.attempts_used, self.target
        );
        true
    }

    // === Timeout Watch ===

    /// Periodic timeout check, driven by the shell (e.g. once per second).
    ///
    /// Returns the event on the tick that ends the round; `None` otherwise,
    /// including every tick after the round ended.
    pub fn tick(&mut self) -> Option<TimeoutEvent> {
        if self.outcome.is_terminal() {
            return None;
        }

        let now = self.clock.now();
        if !self.watch.check(now) {
            return None;
        }
        if !self.finish(Outcome::LostTimeout) {
            return None;
        }

        let event = TimeoutEvent {
            level: self.level,
            target: self.target,
            attempts_used: self.attempts_used,
            elapsed_secs: self.watch.elapsed(now).as_secs(),
        };
        for listener in &mut self.timeout_listeners {
            listener(&event);
        }
        Some(event)
    }

    /// Subscribe to timeouts. Listeners persist across rounds and fire at
    /// most once per round.
    pub fn on_timeout(&mut self, listener: impl FnMut(&TimeoutEvent) + 'static) {
        self.timeout_listeners.push(Box::new(listener));
    }

    // === Player Actions ===

    /// Evaluate a guess.
    ///
    /// Out-of-range guesses are evaluated like any other and always yield a
    /// directional hint.
    pub fn submit_guess(&mut self, value: i64) -> GuessResult {
        self.tick();
        if self.outcome.is_terminal() {
            warn!("Ignoring guess {}: round already over ({:?})", value, self.outcome);
            return GuessResult::AlreadyOver;
        }

        self.guess_history.push_back(value);
        self.attempts_used += 1;
        debug!(
            "Guess #{}: {} (target {})",
            self.attempts_used, value, self.target
        );

        if value == self.target {
            self.finish(Outcome::Won);
            return GuessResult::Won {
                attempts: self.attempts_used,
            };
        }

        if self.attempts_used >= self.max_attempts {
            self.finish(Outcome::LostAttempts);
            return GuessResult::LostAttempts {
                target: self.target,
            };
        }

        if value < self.target {
            GuessResult::TooLow
        } else {
            GuessResult::TooHigh
        }
    }

    /// Spend a free charge on a random power-up.
    pub fn use_power_up(&mut self) -> PowerUpResult {
        self.tick();
        if self.outcome.is_terminal() {
            warn!("Ignoring power-up: round already over ({:?})", self.outcome);
            return PowerUpResult::AlreadyOver;
        }
        if self.power_up_charges == 0 {
            return PowerUpResult::NoCharges;
        }

        self.power_up_charges -= 1;
        self.apply_random_power_up()
    }

    /// Buy a random power-up with the player's currency.
    ///
    /// Under a charge policy this is the same as `use_power_up` and the
    /// player's balance is not touched.
    pub fn buy_power_up(&mut self, progress: &mut PlayerProgress) -> PowerUpResult {
        let cost = match self.ruleset.power_ups {
            PowerUpPolicy::Charges(_) => return self.use_power_up(),
            PowerUpPolicy::Purchase { cost } => cost,
        };

        self.tick();
        if self.outcome.is_terminal() {
            warn!("Ignoring power-up purchase: round already over ({:?})", self.outcome);
            return PowerUpResult::AlreadyOver;
        }
        if progress.spend(cost).is_err() {
            return PowerUpResult::InsufficientFunds {
                cost,
                balance: progress.currency(),
            };
        }

        self.apply_random_power_up()
    }

    fn apply_random_power_up(&mut self) -> PowerUpResult {
        let power_up = PowerUp::random(&mut self.rng);
        debug!("Power-up drawn: {:?}", power_up);

        match power_up {
            PowerUp::Reveal => PowerUpResult::Reveal {
                digit: last_digit(self.target),
            },
            PowerUp::NarrowRange => {
                let (min, max) = narrow_range(self.min_range, self.max_range, self.target);
                self.min_range = min;
                self.max_range = max;
                PowerUpResult::RangeNarrowed { min, max }
            }
            PowerUp::ExtraAttempt => {
                self.max_attempts = self.max_attempts.saturating_add(1);
                PowerUpResult::ExtraAttempt {
                    max_attempts: self.max_attempts,
                }
            }
        }
    }

    // === Progression ===

    /// Level up and prepare harder parameters for the next round.
    ///
    /// The live round is not affected. Rulesets without a difficulty curve
    /// only bump the level.
    pub fn increase_difficulty(&mut self) {
        if self.outcome != Outcome::Won {
            warn!("Increasing difficulty after {:?} round", self.outcome);
        }

        self.level += 1;
        if let Some(curve) = &self.ruleset.difficulty {
            self.round_params.max_range = curve
                .grow_range(self.round_params.min_range, self.round_params.max_range);
            self.round_params.time_budget_secs = curve.time_budget_for(self.level);
            self.round_params.max_attempts = curve.attempts_for(self.level);
        }

        info!(
            "Level {} next: range {}..={}, {} attempts, {}s",
            self.level,
            self.round_params.min_range,
            self.round_params.max_range,
            self.round_params.max_attempts,
            self.round_params.time_budget_secs
        );
    }

    // === Accessors ===

    #[must_use]
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Parameters the next round will start with.
    #[must_use]
    pub fn round_params(&self) -> RoundParams {
        self.round_params
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn target_number(&self) -> i64 {
        self.target
    }

    #[must_use]
    pub fn min_range(&self) -> i64 {
        self.min_range
    }

    #[must_use]
    pub fn max_range(&self) -> i64 {
        self.max_range
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts_used)
    }

    /// Guesses in submission order.
    #[must_use]
    pub fn guess_history(&self) -> &Vector<i64> {
        &self.guess_history
    }

    #[must_use]
    pub fn power_up_charges(&self) -> u32 {
        self.power_up_charges
    }

    /// Budget of the current round.
    #[must_use]
    pub fn time_budget_secs(&self) -> u64 {
        self.watch.budget_secs()
    }

    /// Time since the round started, frozen once it ended.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.watch.elapsed(self.clock.now())
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Whole seconds left, never negative.
    #[must_use]
    pub fn remaining_secs(&self) -> u64 {
        self.time_budget_secs().saturating_sub(self.elapsed_secs())
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Share of the attempt limit used, 0-100.
    #[must_use]
    pub fn attempt_progress_percent(&self) -> u32 {
        let used = u64::from(self.attempts_used) * 100;
        (used / u64::from(self.max_attempts.max(1))).min(100) as u32
    }

    /// The random source, e.g. to capture its state for a replay.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// O(1) view of the round for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.level,
            min_range: self.min_range,
            max_range: self.max_range,
            max_attempts: self.max_attempts,
            attempts_used: self.attempts_used,
            guess_history: self.guess_history.clone(),
            power_up_charges: self.power_up_charges,
            time_budget_secs: self.time_budget_secs(),
            elapsed_secs: self.elapsed_secs(),
            remaining_secs: self.remaining_secs(),
            outcome: self.outcome,
            revealed_target: self.outcome.is_terminal().then_some(self.target),
        }
    }
}

impl<R> fmt::Debug for GameSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("ruleset", &self.ruleset.name)
            .field("level", &self.level)
            .field("range", &(self.min_range..=self.max_range))
            .field("attempts", &(self.attempts_used, self.max_attempts))
            .field("power_up_charges", &self.power_up_charges)
            .field("outcome", &self.outcome)
            .field("timeout_listeners", &self.timeout_listeners.len())
            .finish_non_exhaustive()
    }
}
