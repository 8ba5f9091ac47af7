//! Moves - reversible in-place rearrangements of board regions
//!
//! A [`Move`] touches a fixed set of positions and can produce its own
//! inverse. Moves never hold on to a board; they are built, applied once and
//! dropped. New move shapes are new implementations of the trait; the game
//! only relies on `affected_positions`, `can_be_applied` and `apply`.

use std::fmt;

use arrayvec::ArrayVec;

use crate::board::{Board, Cell};
use crate::error::BoardError;
use crate::types::{Position, Turn};

/// A reversible board transformation
pub trait Move: fmt::Debug {
    /// Positions whose contents the move may change
    fn affected_positions(&self) -> Vec<Position>;

    /// Whether every affected position lies on `board`
    fn can_be_applied(&self, board: &Board) -> bool {
        self.affected_positions().iter().all(|&p| board.contains(p))
    }

    /// Apply in place; fails without touching the board if the move does not fit
    fn apply(&self, board: &mut Board) -> Result<(), BoardError>;

    /// The move that undoes this one
    fn reverse(&self) -> Box<dyn Move>;
}

/// Quarter-turn rotation of the 2x2 block whose top-left cell is `origin`
///
/// ```
/// use match_three_core::{Board, Move, RotateSquare};
/// use match_three_core::types::{Position, TokenSet};
///
/// let mut board = Board::from_token_string(TokenSet::from_chars("abcd").unwrap(), "ab;dc").unwrap();
/// RotateSquare::clockwise(Position::at(0, 0)).apply(&mut board).unwrap();
/// assert_eq!(board.to_token_string(), "da;cb");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotateSquare {
    pub origin: Position,
    pub turn: Turn,
}

impl RotateSquare {
    pub fn new(origin: Position, turn: Turn) -> Self {
        Self { origin, turn }
    }

    pub fn clockwise(origin: Position) -> Self {
        Self::new(origin, Turn::Clockwise)
    }

    pub fn counter_clockwise(origin: Position) -> Self {
        Self::new(origin, Turn::CounterClockwise)
    }

    /// The same block turned the other way
    pub fn reversed(&self) -> Self {
        Self::new(self.origin, self.turn.inverse())
    }

    /// Block cells in clockwise order: top-left, top-right, bottom-right, bottom-left
    fn ring(&self) -> Option<[Position; 4]> {
        let Position { x, y } = self.origin;
        let right = x.checked_add(1)?;
        let below = y.checked_add(1)?;
        Some([
            Position::at(x, y),
            Position::at(right, y),
            Position::at(right, below),
            Position::at(x, below),
        ])
    }
}

impl Move for RotateSquare {
    fn affected_positions(&self) -> Vec<Position> {
        self.ring().map(Vec::from).unwrap_or_default()
    }

    fn can_be_applied(&self, board: &Board) -> bool {
        self.ring()
            .is_some_and(|ring| ring.iter().all(|&p| board.contains(p)))
    }

    fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let ring = self.ring().ok_or(BoardError::OutOfBounds(self.origin))?;
        let mut cells: ArrayVec<Cell, 4> = ArrayVec::new();
        for &pos in &ring {
            cells.push(board.get(pos)?);
        }

        // Clockwise: every cell moves one step forward along the ring.
        match self.turn {
            Turn::Clockwise => cells.rotate_right(1),
            Turn::CounterClockwise => cells.rotate_left(1),
        }
        for (&pos, &cell) in ring.iter().zip(cells.iter()) {
            board.set(pos, cell)?;
        }
        Ok(())
    }

    fn reverse(&self) -> Box<dyn Move> {
        Box::new(self.reversed())
    }
}
