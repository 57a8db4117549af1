//! Game session: one player's rounds, from target draw to terminal outcome.
//!
//! - `game`: The `GameSession` state machine
//! - `outcome`: Round outcomes and results returned to the shell
//! - `power_up`: Power-up effects
//! - `timeout`: Per-round timeout watch
//! - `snapshot`: Read-only view for rendering

pub mod game;
pub mod outcome;
pub mod power_up;
pub mod snapshot;
pub mod timeout;

pub use game::{GameSession, TimeoutListener};
pub use outcome::{GuessResult, Outcome, PowerUpResult, TimeoutEvent};
pub use power_up::PowerUp;
pub use snapshot::SessionSnapshot;
pub use timeout::TimeoutWatch;
