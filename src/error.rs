//! Error types for the game core.
//!
//! Only configuration mistakes and failed purchases are errors. A call that
//! arrives after a round has ended is reported through a result variant
//! (`AlreadyOver`), never through `GameError`.

use thiserror::Error;

/// What was wrong with a round configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("min range {min} must be below max range {max}")]
    EmptyRange { min: i64, max: i64 },

    #[error("max attempts must be at least 1")]
    NoAttempts,

    #[error("time budget must be at least 1 second")]
    NoTimeBudget,
}

/// Main error type for the game core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid round configuration: {0}")]
    InvalidRangeConfig(#[from] ConfigIssue),

    #[error("Insufficient currency: needed {needed}, available {available}")]
    InsufficientCurrency { needed: u64, available: u64 },
}

/// Result type alias for the game core.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::from(ConfigIssue::EmptyRange { min: 10, max: 10 });
        assert_eq!(
            err.to_string(),
            "Invalid round configuration: min range 10 must be below max range 10"
        );

        let err = GameError::InsufficientCurrency {
            needed: 10,
            available: 4,
        };
        assert_eq!(err.to_string(), "Insufficient currency: needed 10, available 4");
    }
}
