//! Core building blocks: injectable randomness and time, and configuration.
//!
//! Sessions never read global state. Shells hand them a `RandomSource`, a
//! `Clock`, and a `Ruleset`.

pub mod clock;
pub mod config;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DifficultyCurve, PowerUpPolicy, RoundParams, Ruleset};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
