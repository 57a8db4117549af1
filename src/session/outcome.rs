//! Round outcomes and the results returned to the shell.

use serde::{Deserialize, Serialize};

/// State of the current round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Guesses and power-ups are accepted.
    #[default]
    InProgress,
    /// The target was guessed.
    Won,
    /// The attempt limit was reached without guessing the target.
    LostAttempts,
    /// The time budget ran out.
    LostTimeout,
}

impl Outcome {
    /// No transition leaves a terminal outcome.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// Check if the round was won.
    #[must_use]
    pub fn is_won(self) -> bool {
        self == Outcome::Won
    }
}

/// Result of evaluating a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessResult {
    /// The guess is below the target.
    TooLow,
    /// The guess is above the target.
    TooHigh,
    /// The guess matched; carries the attempts used including this one.
    Won { attempts: u32 },
    /// Last attempt missed; carries the target for display.
    LostAttempts { target: i64 },
    /// The round had already ended. Nothing changed.
    AlreadyOver,
}

impl GuessResult {
    /// Check if this guess ended the round.
    #[must_use]
    pub fn ends_round(&self) -> bool {
        matches!(self, GuessResult::Won { .. } | GuessResult::LostAttempts { .. })
    }
}

/// Result of a power-up request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpResult {
    /// Last decimal digit of the target.
    Reveal { digit: u8 },
    /// The live range shrank to these bounds.
    RangeNarrowed { min: i64, max: i64 },
    /// One more attempt granted; carries the new limit.
    ExtraAttempt { max_attempts: u32 },
    /// No charges left this round.
    NoCharges,
    /// The player cannot afford a purchased power-up.
    InsufficientFunds { cost: u64, balance: u64 },
    /// The round had already ended. Nothing changed.
    AlreadyOver,
}

impl PowerUpResult {
    /// Check if a power-up was actually consumed.
    #[must_use]
    pub fn applied(&self) -> bool {
        matches!(
            self,
            PowerUpResult::Reveal { .. }
                | PowerUpResult::RangeNarrowed { .. }
                | PowerUpResult::ExtraAttempt { .. }
        )
    }
}

/// Emitted once per round when the time budget runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutEvent {
    /// Level of the round that timed out.
    pub level: u32,
    /// The target, revealed now that the round is over.
    pub target: i64,
    /// Guesses made before the deadline.
    pub attempts_used: u32,
    /// Whole seconds elapsed when the timeout was detected.
    pub elapsed_secs: u64,
}
