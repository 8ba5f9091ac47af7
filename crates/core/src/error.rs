//! Error types for board, matcher and game operations
//!
//! Every error belongs to one of three kinds (see [`ErrorKind`]). All of them
//! are reported to the immediate caller and the failing operation has no
//! effect, with one exception: a filling strategy failing in the middle of a
//! cascade leaves the rounds already resolved in place.

use crate::types::{AlphabetError, Delta, Position, Token};

/// Broad category of an engine error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad construction input: delta sets, alphabets, board notation, strategies
    InvalidConfiguration,
    /// A position or move region outside the board
    OutOfRange,
    /// A token outside the board's alphabet, or a call in the wrong phase
    InvariantViolation,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidConfiguration => "invalid_configuration",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::InvariantViolation => "invariant_violation",
        }
    }
}

/// Errors raised by [`Board`](crate::Board) construction and access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid token alphabet: {0}")]
    Alphabet(#[from] AlphabetError),

    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("board notation has no rows")]
    EmptyNotation,

    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("character {symbol:?} at {position} is not in the token alphabet")]
    UnknownSymbol { symbol: char, position: Position },

    #[error("position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("column {0} is outside the board")]
    ColumnOutOfBounds(i32),

    #[error("token {0} is not in the board's alphabet")]
    TokenNotInAlphabet(Token),

    #[error("no filling strategy attached to the board")]
    MissingFillingStrategy,

    #[error("filling strategy has no more tokens for column {0}")]
    FillingExhausted(usize),
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::OutOfBounds(_) | BoardError::ColumnOutOfBounds(_) => ErrorKind::OutOfRange,
            BoardError::TokenNotInAlphabet(_) => ErrorKind::InvariantViolation,
            BoardError::Alphabet(_)
            | BoardError::InvalidDimensions { .. }
            | BoardError::EmptyNotation
            | BoardError::RaggedRows { .. }
            | BoardError::UnknownSymbol { .. }
            | BoardError::MissingFillingStrategy
            | BoardError::FillingExhausted(_) => ErrorKind::InvalidConfiguration,
        }
    }
}

/// Errors raised when building a matcher
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    #[error("delta set is empty")]
    EmptyDeltaSet,

    #[error("delta set contains the zero delta {0}")]
    ZeroDelta(Delta),

    #[error("delta set is missing")]
    MissingDeltaSet,

    #[error("delta set contains a missing element")]
    MissingDelta,
}

impl MatcherError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidConfiguration
    }
}

/// Errors raised by [`MatchThreeGame`](crate::MatchThreeGame)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game has not been started")]
    NotStarted,

    #[error("game has already been started")]
    AlreadyStarted,

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::NotStarted | GameError::AlreadyStarted => ErrorKind::InvariantViolation,
            GameError::Board(e) => e.kind(),
        }
    }
}
