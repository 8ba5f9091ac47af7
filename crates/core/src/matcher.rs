//! Matcher module - discovers groups of connected equal tokens
//!
//! A [`Matcher`] turns seed positions into groups. The game only ever sees
//! groups; it applies the minimum-size rule itself, so matchers report every
//! component regardless of its size.
//!
//! [`MaximumDeltaMatcher`] connects two cells when one is reachable from the
//! other by a configured step vector or its negation and both hold the same
//! token. Groups are found with a breadth-first flood fill over that implicit
//! graph, using one dense visited map per call.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::board::Board;
use crate::error::MatcherError;
use crate::types::{Delta, Position};

/// A set of board positions
pub type Group = BTreeSet<Position>;

/// A set of distinct groups
pub type Matches = BTreeSet<Group>;

/// Discovers groups on a board
pub trait Matcher: fmt::Debug + Send {
    /// The group(s) containing `seed`
    fn match_at(&self, board: &Board, seed: Position) -> Matches;

    /// The distinct groups containing any of `seeds`
    fn match_all(&self, board: &Board, seeds: &BTreeSet<Position>) -> Matches;
}

/// Visited marks for one discovery call, one flag per board cell
struct Visited {
    width: usize,
    marks: Vec<bool>,
}

impl Visited {
    fn for_board(board: &Board) -> Self {
        Self {
            width: board.width(),
            marks: vec![false; board.width() * board.height()],
        }
    }

    /// Mark an on-board position, returning false if it was already marked
    #[inline]
    fn insert(&mut self, pos: Position) -> bool {
        let idx = pos.y as usize * self.width + pos.x as usize;
        !std::mem::replace(&mut self.marks[idx], true)
    }

    #[inline]
    fn contains(&self, pos: Position) -> bool {
        self.marks[pos.y as usize * self.width + pos.x as usize]
    }
}

/// Connected-component matcher over an arbitrary set of step vectors
///
/// # Examples
///
/// ```
/// use match_three_core::{Board, Matcher, MaximumDeltaMatcher};
/// use match_three_core::types::{Delta, Position, TokenSet};
///
/// let board = Board::from_token_string(TokenSet::from_chars("An").unwrap(), "An;An;AA").unwrap();
/// let matcher = MaximumDeltaMatcher::new([Delta::dxy(0, 1)]).unwrap();
///
/// let matches = matcher.match_at(&board, Position::at(0, 2));
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches.iter().next().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaximumDeltaMatcher {
    /// Configured deltas, deduplicated
    deltas: Box<[Delta]>,
    /// Configured deltas and their negations
    steps: Box<[Delta]>,
}

impl MaximumDeltaMatcher {
    /// Build a matcher from a snapshot of `deltas`
    ///
    /// The set must be non-empty and must not contain `(0, 0)`.
    pub fn new<I>(deltas: I) -> Result<Self, MatcherError>
    where
        I: IntoIterator<Item = Delta>,
    {
        let deltas: BTreeSet<Delta> = deltas.into_iter().collect();
        if deltas.is_empty() {
            return Err(MatcherError::EmptyDeltaSet);
        }
        if let Some(&zero) = deltas.iter().find(|d| d.is_zero()) {
            return Err(MatcherError::ZeroDelta(zero));
        }

        let steps: BTreeSet<Delta> = deltas.iter().flat_map(|&d| [d, d.negate()]).collect();
        Ok(Self {
            deltas: deltas.into_iter().collect(),
            steps: steps.into_iter().collect(),
        })
    }

    /// Build a matcher from a collection that may be missing or have holes
    ///
    /// A missing collection or element is rejected before the checks of
    /// [`new`](Self::new) run.
    pub fn from_optional<I>(deltas: Option<I>) -> Result<Self, MatcherError>
    where
        I: IntoIterator<Item = Option<Delta>>,
    {
        let deltas = deltas.ok_or(MatcherError::MissingDeltaSet)?;
        let deltas: Vec<Delta> = deltas
            .into_iter()
            .collect::<Option<_>>()
            .ok_or(MatcherError::MissingDelta)?;
        Self::new(deltas)
    }

    /// The configured deltas (without negations)
    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    /// Flood fill from `seed`, marking every reached cell in `visited`
    fn flood(&self, board: &Board, seed: Position, visited: &mut Visited) -> Option<Group> {
        let token = board.token_at(seed)?;
        let mut members = Vec::new();
        let mut queue = VecDeque::new();

        visited.insert(seed);
        queue.push_back(seed);
        while let Some(pos) = queue.pop_front() {
            members.push(pos);
            for &step in self.steps.iter() {
                let Some(next) = pos.offset(step) else {
                    continue;
                };
                if board.token_at(next) == Some(token) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        Some(members.into_iter().collect())
    }
}

impl Matcher for MaximumDeltaMatcher {
    fn match_at(&self, board: &Board, seed: Position) -> Matches {
        let mut visited = Visited::for_board(board);
        self.flood(board, seed, &mut visited).into_iter().collect()
    }

    fn match_all(&self, board: &Board, seeds: &BTreeSet<Position>) -> Matches {
        let mut visited = Visited::for_board(board);
        let mut matches = Matches::new();
        for &seed in seeds {
            // A visited seed lies in a group found earlier in this call;
            // adjacency is symmetric, so its group would be the same.
            if !board.contains(seed) || visited.contains(seed) {
                continue;
            }
            if let Some(group) = self.flood(board, seed, &mut visited) {
                matches.insert(group);
            }
        }
        tracing::trace!(seeds = seeds.len(), groups = matches.len(), "match_all");
        matches
    }
}

/// Union of several matchers' results
///
/// Useful to match along independent axes: a horizontal and a vertical
/// matcher combined never join a horizontal run with a vertical one.
#[derive(Debug, Default)]
pub struct UnionMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl UnionMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Add another matcher
    pub fn with(mut self, matcher: impl Matcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl Matcher for UnionMatcher {
    fn match_at(&self, board: &Board, seed: Position) -> Matches {
        self.matchers
            .iter()
            .flat_map(|m| m.match_at(board, seed))
            .collect()
    }

    fn match_all(&self, board: &Board, seeds: &BTreeSet<Position>) -> Matches {
        self.matchers
            .iter()
            .flat_map(|m| m.match_all(board, seeds))
            .collect()
    }
}
