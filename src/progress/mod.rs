//! Player progression: cumulative stats, streaks, currency and achievements.
//!
//! `PlayerProgress` is updated once per finished round and may unlock
//! achievements, each of which grants a one-time currency reward.

pub mod achievement;
pub mod ledger;

pub use achievement::Achievement;
pub use ledger::{PlayerProgress, RoundRecord, RoundReport, WIN_REWARD};
