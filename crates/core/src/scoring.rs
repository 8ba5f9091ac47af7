//! Scoring module - points awarded per cascade round
//!
//! The cascade loop never hard-codes a formula: it hands the sizes of the
//! groups removed in a round, plus the round number (1 for the round directly
//! caused by the start or a move), to a [`ScoringPolicy`].
//!
//! The default [`ChainScoring`] reproduces the reference game fixtures:
//!
//! | Group size | Base points |
//! |------------|-------------|
//! | 3 | 3 |
//! | 4 | 5 |
//! | 5 | 7 |
//! | n | 2n - 3 |
//!
//! A round scores the sum of its base points, multiplied by the number of
//! groups removed in that round and by the round number.

use std::fmt;

/// Turns the groups removed in one cascade round into points
pub trait ScoringPolicy: fmt::Debug + Send {
    /// Points for a round that removed groups of `group_sizes`
    ///
    /// `round` starts at 1.
    fn round_points(&self, group_sizes: &[usize], round: u32) -> u64;
}

/// Base points for a single group of `size` tokens
pub fn group_base_points(size: usize) -> u64 {
    (2 * size as u64).saturating_sub(3)
}

/// Default policy: `sum(2n - 3) * groups * round`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainScoring;

impl ScoringPolicy for ChainScoring {
    fn round_points(&self, group_sizes: &[usize], round: u32) -> u64 {
        let base: u64 = group_sizes.iter().map(|&size| group_base_points(size)).sum();
        base.saturating_mul(group_sizes.len() as u64)
            .saturating_mul(u64::from(round))
    }
}

/// Policy built from a per-group function `(group_size, round) -> points`
///
/// ```
/// use match_three_core::{PerGroupScoring, ScoringPolicy};
///
/// let flat = PerGroupScoring::new(|size, round| (size as u64) * u64::from(round));
/// assert_eq!(flat.round_points(&[3, 4], 2), 14);
/// ```
pub struct PerGroupScoring<F> {
    points: F,
}

impl<F> PerGroupScoring<F>
where
    F: Fn(usize, u32) -> u64,
{
    pub fn new(points: F) -> Self {
        Self { points }
    }
}

impl<F> fmt::Debug for PerGroupScoring<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerGroupScoring").finish_non_exhaustive()
    }
}

impl<F> ScoringPolicy for PerGroupScoring<F>
where
    F: Fn(usize, u32) -> u64 + Send,
{
    fn round_points(&self, group_sizes: &[usize], round: u32) -> u64 {
        group_sizes
            .iter()
            .map(|&size| (self.points)(size, round))
            .fold(0u64, u64::saturating_add)
    }
}
