//! Power-up effects.
//!
//! A power-up is drawn uniformly from `PowerUp::ALL` on every use, with
//! replacement. The effects themselves are pure functions over the live
//! round values so they can be checked in isolation.

use serde::{Deserialize, Serialize};

use crate::core::RandomSource;

/// The three power-up effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    /// Reveal the target's last decimal digit.
    Reveal,
    /// Trim up to a quarter of the live range from each side.
    NarrowRange,
    /// Allow one more guess this round.
    ExtraAttempt,
}

impl PowerUp {
    /// Draw order used by `random`.
    pub const ALL: [PowerUp; 3] = [PowerUp::Reveal, PowerUp::NarrowRange, PowerUp::ExtraAttempt];

    /// Pick an effect uniformly at random.
    pub fn random(rng: &mut impl RandomSource) -> PowerUp {
        Self::ALL[rng.gen_index(Self::ALL.len())]
    }
}

/// Last decimal digit of `target`, ignoring sign.
#[must_use]
pub fn last_digit(target: i64) -> u8 {
    (target % 10).unsigned_abs() as u8
}

/// Narrowed `(min, max)` bounds that still contain `target`.
///
/// Each side moves in by `(max - min) / 4`, clamped so it never passes the
/// target. Requires `min <= target <= max`. The result keeps at least half
/// of the original width, so `min < max` is preserved.
///
/// Widths are computed in `i128` so the full `i64` range is accepted.
#[must_use]
pub fn narrow_range(min: i64, max: i64, target: i64) -> (i64, i64) {
    debug_assert!(min <= target && target <= max, "target outside live range");

    let (lo, hi, t) = (i128::from(min), i128::from(max), i128::from(target));
    let shrink = (hi - lo) / 4;
    let low_shrink = shrink.min(t - lo).max(0);
    let high_shrink = shrink.min(hi - t).max(0);

    // Each side stays between its old bound and the target.
    let new_min = i64::try_from(lo + low_shrink).unwrap_or(target);
    let new_max = i64::try_from(hi - high_shrink).unwrap_or(target);
    (new_min, new_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;

    #[test]
    fn test_random_follows_index() {
        let mut rng = ScriptedRng::new([0, 1, 2, 1]);

        assert_eq!(PowerUp::random(&mut rng), PowerUp::Reveal);
        assert_eq!(PowerUp::random(&mut rng), PowerUp::NarrowRange);
        assert_eq!(PowerUp::random(&mut rng), PowerUp::ExtraAttempt);
        assert_eq!(PowerUp::random(&mut rng), PowerUp::NarrowRange);
    }

    #[test]
    fn test_last_digit() {
        assert_eq!(last_digit(42), 2);
        assert_eq!(last_digit(100), 0);
        assert_eq!(last_digit(7), 7);
        assert_eq!(last_digit(-13), 3);
    }

    #[test]
    fn test_narrow_range_centered_target() {
        assert_eq!(narrow_range(1, 100, 50), (25, 76));
    }

    #[test]
    fn test_narrow_range_clamps_at_low_edge() {
        // Naive quarter shrink would give (25, 76) and drop the target.
        assert_eq!(narrow_range(1, 100, 1), (1, 76));
        assert_eq!(narrow_range(1, 100, 10), (10, 76));
    }

    #[test]
    fn test_narrow_range_clamps_at_high_edge() {
        assert_eq!(narrow_range(1, 100, 100), (25, 100));
        assert_eq!(narrow_range(1, 100, 90), (25, 90));
    }

    #[test]
    fn test_narrow_range_tiny_width() {
        // Width below four cannot shrink.
        assert_eq!(narrow_range(1, 3, 2), (1, 3));
        assert_eq!(narrow_range(1, 5, 1), (1, 4));
    }

    #[test]
    fn test_narrow_range_full_i64_span() {
        let quarter = (u64::MAX / 4) as i64;

        assert_eq!(
            narrow_range(i64::MIN, i64::MAX, 0),
            (i64::MIN + quarter, i64::MAX - quarter)
        );
        assert_eq!(narrow_range(i64::MIN, i64::MAX, i64::MIN), (i64::MIN, i64::MAX - quarter));
        assert_eq!(narrow_range(i64::MIN, i64::MAX, i64::MAX), (i64::MIN + quarter, i64::MAX));
    }
}
