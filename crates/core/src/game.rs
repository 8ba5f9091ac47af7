//! Game module - drives the cascade state machine
//!
//! [`MatchThreeGame`] owns the board, the matcher and the scoring policy. It
//! is the only component that removes tokens or triggers refills.
//!
//! # Cascade
//!
//! After the start and after every accepted move the game resolves rounds
//! until the board is stable:
//!
//! 1. ask the matcher for the groups touching the positions changed since the
//!    previous round (every position at start, the move's positions after a
//!    move), with exactly one `match_all` call per round
//! 2. keep groups of at least `min_match_size` cells that are not a strict
//!    subset of another kept group
//! 3. stop when nothing is left; otherwise score the round, clear the groups,
//!    collapse and refill every touched column
//! 4. the changed positions of the next round are, per touched column, the
//!    cells from the top down to the lowest cleared cell

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{BoardError, GameError};
use crate::matcher::{Group, Matcher, Matches};
use crate::moves::Move;
use crate::scoring::{ChainScoring, ScoringPolicy};
use crate::types::{Position, MIN_MATCH_SIZE};

/// Game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Constructed, start not called yet
    Uninitialized,
    /// Stable and accepting moves
    Ready,
    /// Inside a cascade; only observable from within a call
    Resolving,
}

/// Rules that are policy choices rather than engine invariants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Smallest group the cascade removes
    pub min_match_size: usize,
    /// Undo a move that does not produce a single removable group
    pub revert_unproductive_moves: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_match_size: MIN_MATCH_SIZE,
            revert_unproductive_moves: false,
        }
    }
}

/// One resolved cascade round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1 for the round directly caused by the start or a move
    pub round: u32,
    /// Groups removed in this round
    pub groups: Vec<Group>,
    pub points: u64,
}

/// Outcome of a start or a move
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub rounds: Vec<RoundReport>,
    /// Total points awarded by this call
    pub points: u64,
    /// The move produced no group and was undone
    pub reverted: bool,
}

impl CascadeReport {
    /// Whether any group was removed
    pub fn is_productive(&self) -> bool {
        !self.rounds.is_empty()
    }

    /// Number of tokens removed over all rounds
    pub fn removed_tokens(&self) -> usize {
        self.rounds
            .iter()
            .map(|round| round.groups.iter().flatten().collect::<BTreeSet<_>>().len())
            .sum()
    }
}

/// A match-three game over one board
#[derive(Debug)]
pub struct MatchThreeGame {
    board: Board,
    matcher: Box<dyn Matcher>,
    scoring: Box<dyn ScoringPolicy>,
    config: GameConfig,
    phase: GamePhase,
    score: u64,
}

impl MatchThreeGame {
    /// Game with the default scoring policy and rules
    pub fn new(board: Board, matcher: impl Matcher + 'static) -> Self {
        Self::with_scoring(board, Box::new(matcher), Box::new(ChainScoring))
    }

    pub fn with_scoring(
        board: Board,
        matcher: Box<dyn Matcher>,
        scoring: Box<dyn ScoringPolicy>,
    ) -> Self {
        Self::with_config(board, matcher, scoring, GameConfig::default())
    }

    pub fn with_config(
        board: Board,
        matcher: Box<dyn Matcher>,
        scoring: Box<dyn ScoringPolicy>,
        config: GameConfig,
    ) -> Self {
        Self {
            board,
            matcher,
            scoring,
            config,
            phase: GamePhase::Uninitialized,
            score: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn matcher(&self) -> &dyn Matcher {
        self.matcher.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Cumulative score; never decreases
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Fill the board and resolve it to a stable state
    pub fn initialize_board_and_start(&mut self) -> Result<CascadeReport, GameError> {
        if self.phase != GamePhase::Uninitialized {
            return Err(GameError::AlreadyStarted);
        }

        self.phase = GamePhase::Resolving;
        if let Err(e) = self.board.refill_empty_cells() {
            self.phase = GamePhase::Uninitialized;
            return Err(e.into());
        }
        let everything: BTreeSet<Position> = self.board.positions().collect();
        let result = self.cascade(everything);
        self.phase = GamePhase::Ready;
        let report = result?;

        tracing::info!(
            rounds = report.rounds.len(),
            points = report.points,
            score = self.score,
            "game started"
        );
        Ok(report)
    }

    /// Apply `mv` and resolve the board, returning what happened
    ///
    /// A move that does not fit on the board fails with an out-of-range error
    /// and changes nothing.
    pub fn accept_move(&mut self, mv: &dyn Move) -> Result<CascadeReport, GameError> {
        if self.phase != GamePhase::Ready {
            return Err(GameError::NotStarted);
        }
        let touched: BTreeSet<Position> = mv.affected_positions().into_iter().collect();
        if let Some(&outside) = touched.iter().find(|&&p| !self.board.contains(p)) {
            return Err(BoardError::OutOfBounds(outside).into());
        }
        mv.apply(&mut self.board)?;

        self.phase = GamePhase::Resolving;
        let result = self.cascade(touched);
        self.phase = GamePhase::Ready;
        let mut report = result?;

        if !report.is_productive() && self.config.revert_unproductive_moves {
            mv.reverse().apply(&mut self.board)?;
            report.reverted = true;
        }

        tracing::info!(
            ?mv,
            rounds = report.rounds.len(),
            points = report.points,
            score = self.score,
            reverted = report.reverted,
            "move accepted"
        );
        Ok(report)
    }

    /// Resolve rounds until the matcher finds nothing removable
    fn cascade(&mut self, mut changed: BTreeSet<Position>) -> Result<CascadeReport, GameError> {
        let mut report = CascadeReport::default();
        let mut round = 0u32;

        loop {
            let found = self.matcher.match_all(&self.board, &changed);
            let groups = removable_groups(found, self.config.min_match_size);
            if groups.is_empty() {
                return Ok(report);
            }

            round += 1;
            let sizes: Vec<usize> = groups.iter().map(BTreeSet::len).collect();
            let points = self.scoring.round_points(&sizes, round);
            self.score = self.score.saturating_add(points);
            report.points = report.points.saturating_add(points);
            tracing::debug!(round, ?sizes, points, score = self.score, "cascade round");

            // Lowest cleared row per column.
            let mut lowest: BTreeMap<i32, i32> = BTreeMap::new();
            for pos in groups.iter().flatten() {
                let y = lowest.entry(pos.x).or_insert(pos.y);
                *y = (*y).max(pos.y);
            }
            self.board.clear_positions(groups.iter().flatten());

            changed = BTreeSet::new();
            for (&x, &bottom) in &lowest {
                self.board.collapse_column(x)?;
                self.board.refill_column(x)?;
                changed.extend((0..=bottom).map(|y| Position::at(x, y)));
            }

            report.rounds.push(RoundReport {
                round,
                groups,
                points,
            });
        }
    }
}

/// Groups of at least `min_size` cells that no other kept group contains
///
/// A strict superset contains the group's first cell, so only groups indexed
/// under that cell are compared.
fn removable_groups(found: Matches, min_size: usize) -> Vec<Group> {
    let candidates: Vec<Group> = found.into_iter().filter(|g| g.len() >= min_size).collect();

    let mut containing: HashMap<Position, Vec<usize>> = HashMap::new();
    for (i, group) in candidates.iter().enumerate() {
        for &pos in group {
            containing.entry(pos).or_default().push(i);
        }
    }

    let keep: Vec<bool> = candidates
        .iter()
        .map(|group| match group.first() {
            None => candidates.iter().all(BTreeSet::is_empty),
            Some(first) => !containing[first].iter().any(|&j| {
                let other = &candidates[j];
                other.len() > group.len() && group.is_subset(other)
            }),
        })
        .collect();

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(group, keep)| keep.then_some(group))
        .collect()
}
