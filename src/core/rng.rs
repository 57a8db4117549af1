//! Injectable random sources.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical target draws and power-up picks
//! - **Serializable**: O(1) state capture and restore, so a round can be replayed
//! - **Scriptable**: `ScriptedRng` feeds fixed values for tests and replays
//!
//! ## Usage
//!
//! ```
//! use guess_challenge::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let target = rng.gen_range_inclusive(1, 100);
//! assert!((1..=100).contains(&target));
//!
//! // Same seed, same sequence
//! let mut replay = GameRng::new(42);
//! assert_eq!(replay.gen_range_inclusive(1, 100), target);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness consumed by a game session.
///
/// Sessions never reach for a global RNG. Shells pass a `GameRng` in
/// production and tests pass a `ScriptedRng`.
pub trait RandomSource {
    /// Uniform integer in `[low, high]` (both inclusive). Requires `low <= high`.
    fn gen_range_inclusive(&mut self, low: i64, high: i64) -> i64;

    /// Uniform index in `[0, len)`. Requires `len > 0`.
    fn gen_index(&mut self, len: usize) -> usize;
}

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn gen_range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        self.inner.gen_range(low..=high)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Serializable RNG state for replaying a round.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// `gen_range_inclusive` clamps the next value into the requested range and
/// `gen_index` reduces it modulo `len`, so a script never produces an
/// out-of-range draw.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    values: Vec<i64>,
    cursor: usize,
}

impl ScriptedRng {
    /// Create a scripted source. An empty script always yields the low bound / index 0.
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }

    fn next_value(&mut self) -> i64 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for ScriptedRng {
    fn gen_range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        if self.values.is_empty() {
            return low;
        }
        self.next_value().clamp(low, high)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.next_value().rem_euclid(len as i64) as usize
    }
}
