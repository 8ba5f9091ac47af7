//! Filling module - sources of replacement tokens
//!
//! A [`FillingStrategy`] supplies the next token for a column whenever the
//! board refills an empty cell. The board asks column by column, lowest empty
//! cell first, so a strategy sees one independent request stream per column.
//!
//! Two strategies are provided:
//!
//! - [`DeterministicStrategy`]: fixed per-column sequences, finite or cycling
//! - [`RandomStrategy`]: uniform draws from the alphabet driven by a seeded LCG

use std::collections::VecDeque;
use std::fmt;

use crate::types::{Token, TokenSet};

/// Supplies replacement tokens for emptied cells
pub trait FillingStrategy: fmt::Debug + Send {
    /// Next token for `column`, or `None` when the column's supply is exhausted
    fn next_token(&mut self, column: usize) -> Option<Token>;
}

/// Fixed per-column token sequences
///
/// Each call to [`next_token`](FillingStrategy::next_token) consumes the next
/// element of that column's sequence. A finite sequence that runs out yields
/// `None`; a cycling one starts over. Columns without a sequence are always
/// exhausted.
#[derive(Debug, Clone)]
pub struct DeterministicStrategy {
    columns: Vec<VecDeque<Token>>,
    cycle: bool,
}

impl DeterministicStrategy {
    /// Finite sequences, one per column
    pub fn new(columns: Vec<Vec<Token>>) -> Self {
        Self {
            columns: columns.into_iter().map(VecDeque::from).collect(),
            cycle: false,
        }
    }

    /// Sequences that repeat forever
    pub fn cycling(columns: Vec<Vec<Token>>) -> Self {
        Self {
            cycle: true,
            ..Self::new(columns)
        }
    }

    /// Finite sequences written as one string of token characters per column
    ///
    /// ```
    /// use match_three_core::{DeterministicStrategy, FillingStrategy};
    /// use match_three_core::types::Token;
    ///
    /// let mut strategy = DeterministicStrategy::from_strings(&["ab", "c"]);
    /// assert_eq!(strategy.next_token(0), Some(Token::new('a')));
    /// assert_eq!(strategy.next_token(1), Some(Token::new('c')));
    /// assert_eq!(strategy.next_token(1), None);
    /// ```
    pub fn from_strings(columns: &[&str]) -> Self {
        Self::new(
            columns
                .iter()
                .map(|s| s.chars().map(Token::new).collect())
                .collect(),
        )
    }

    /// Tokens left in `column`; constant for a cycling strategy
    pub fn remaining(&self, column: usize) -> usize {
        self.columns.get(column).map_or(0, VecDeque::len)
    }
}

impl FillingStrategy for DeterministicStrategy {
    fn next_token(&mut self, column: usize) -> Option<Token> {
        let sequence = self.columns.get_mut(column)?;
        let token = sequence.pop_front()?;
        if self.cycle {
            sequence.push_back(token);
        }
        Some(token)
    }
}

/// 32-bit linear congruential generator behind [`RandomStrategy`]
///
/// The same seed yields the same token stream, so seeded games replay exactly.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Generator for `seed`; a zero seed is replaced by 1
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Draw from `0..max`
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Multiply-shift: uses the high bits of the state.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

/// Uniform random tokens from an alphabet
///
/// All columns share one generator; the same seed replays the same game as
/// long as requests arrive in the same order, which the board guarantees.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    tokens: Vec<Token>,
    rng: SimpleRng,
}

impl RandomStrategy {
    pub fn new(tokens: &TokenSet, seed: u32) -> Self {
        Self {
            tokens: tokens.iter().collect(),
            rng: SimpleRng::new(seed),
        }
    }
}

impl FillingStrategy for RandomStrategy {
    fn next_token(&mut self, _column: usize) -> Option<Token> {
        if self.tokens.is_empty() {
            return None;
        }
        let index = self.rng.next_range(self.tokens.len() as u32) as usize;
        self.tokens.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(c: char) -> Token {
        Token::new(c)
    }

    #[test]
    fn test_deterministic_columns_are_independent() {
        let mut strategy = DeterministicStrategy::from_strings(&["ab", "xy"]);
        assert_eq!(strategy.next_token(1), Some(t('x')));
        assert_eq!(strategy.next_token(0), Some(t('a')));
        assert_eq!(strategy.next_token(1), Some(t('y')));
        assert_eq!(strategy.next_token(0), Some(t('b')));
        assert_eq!(strategy.next_token(0), None);
        assert_eq!(strategy.next_token(5), None);
    }

    #[test]
    fn test_cycling_repeats() {
        let mut strategy = DeterministicStrategy::cycling(vec![vec![t('a'), t('b')]]);
        let drawn: Vec<_> = (0..5).filter_map(|_| strategy.next_token(0)).collect();
        assert_eq!(drawn, vec![t('a'), t('b'), t('a'), t('b'), t('a')]);
        assert_eq!(strategy.remaining(0), 2);
    }

    #[test]
    fn test_rng_deterministic() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_rng_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(5) < 5);
        }
    }

    #[test]
    fn test_random_strategy_stays_in_alphabet() {
        let tokens = TokenSet::from_chars("abc").unwrap();
        let mut strategy = RandomStrategy::new(&tokens, 12345);
        let mut seen = std::collections::BTreeSet::new();
        for column in 0..300 {
            let token = strategy.next_token(column % 4).unwrap();
            assert!(tokens.contains(token));
            seen.insert(token);
        }
        assert_eq!(seen.len(), 3, "all tokens should eventually appear");
    }
}
