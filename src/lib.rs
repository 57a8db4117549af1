//! # guess-challenge
//!
//! Game core for a single-player number-guessing challenge with escalating
//! difficulty, a power-up economy, and player analytics.
//!
//! ## Design Principles
//!
//! 1. **Shell-Agnostic**: No rendering or event dispatch. A UI shell calls
//!    into the core and renders its results.
//!
//! 2. **Injected Capabilities**: Randomness (`RandomSource`) and time
//!    (`Clock`) are passed in, never read from globals, so every round is
//!    reproducible in tests.
//!
//! 3. **Configuration Over Variants**: Rule variants are `Ruleset` values
//!    driving one engine.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use guess_challenge::{GameSession, GuessResult, ManualClock, PlayerProgress, Ruleset, ScriptedRng};
//!
//! let clock = Rc::new(ManualClock::new());
//! let mut session = GameSession::start(Ruleset::challenge(), ScriptedRng::new([42]), clock).unwrap();
//! let mut progress = PlayerProgress::new();
//!
//! assert_eq!(session.submit_guess(50), GuessResult::TooHigh);
//! assert_eq!(session.submit_guess(42), GuessResult::Won { attempts: 2 });
//!
//! progress.record_session(&session);
//! assert_eq!(progress.currency(), 10);
//!
//! session.increase_difficulty();
//! session.start_next_round().unwrap();
//! assert_eq!(session.level(), 2);
//! ```
//!
//! ## Modules
//!
//! - `core`: RNG, clock, round and ruleset configuration
//! - `session`: The per-player game session state machine
//! - `progress`: Cumulative stats, streaks, currency, achievements
//! - `error`: Error types

pub mod core;
pub mod error;
pub mod progress;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Clock, ManualClock, SystemClock,
    GameRng, GameRngState, RandomSource, ScriptedRng,
    DifficultyCurve, PowerUpPolicy, RoundParams, Ruleset,
};

pub use crate::error::{ConfigIssue, GameError, GameResult};

pub use crate::session::{
    GameSession, GuessResult, Outcome, PowerUp, PowerUpResult,
    SessionSnapshot, TimeoutEvent,
};

pub use crate::progress::{Achievement, PlayerProgress, RoundRecord, RoundReport};
