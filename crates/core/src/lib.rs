//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board, the matching algorithm and the cascade
//! state machine. It has **no dependencies** on terminals, files or networking:
//!
//! - **Deterministic**: a deterministic filling strategy replays identical games
//! - **Pluggable**: matcher, moves, scoring and filling are traits
//! - **Scalable**: matching is a flood fill, linear in the cells it visits
//!
//! # Module Structure
//!
//! - [`board`]: token grid with gravity and refill
//! - [`filling`]: replacement token sources (fixed sequences, seeded random)
//! - [`matcher`]: connected-group discovery over configurable step vectors
//! - [`moves`]: reversible board transformations (2x2 rotation)
//! - [`scoring`]: points per cascade round
//! - [`game`]: start/move handling and the cascade loop
//! - [`snapshot`]: serializable game view
//!
//! # Example
//!
//! ```
//! use match_three_core::{Board, DeterministicStrategy, MatchThreeGame, MaximumDeltaMatcher, RotateSquare};
//! use match_three_core::types::{Delta, Position, TokenSet};
//!
//! let mut board = Board::from_token_string(TokenSet::from_chars("abc").unwrap(), "b b ;abba;aaab").unwrap();
//! board.set_filling_strategy(Box::new(DeterministicStrategy::from_strings(&[
//!     "aaaaa", "bbbcabca", "abbabab", "aabcc",
//! ])));
//!
//! let mut game = MatchThreeGame::new(board, MaximumDeltaMatcher::new([Delta::dxy(1, 0)]).unwrap());
//! game.initialize_board_and_start().unwrap();
//! assert_eq!(game.board().to_token_string(), "acba;abba;abaa");
//! assert_eq!(game.score(), 18);
//!
//! game.accept_move(&RotateSquare::counter_clockwise(Position::at(0, 1))).unwrap();
//! assert_eq!(game.board().to_token_string(), "aabc;acac;acba");
//! assert_eq!(game.score(), 66);
//! ```

pub mod board;
pub mod error;
pub mod filling;
pub mod game;
pub mod matcher;
pub mod moves;
pub mod scoring;
pub mod snapshot;

pub use match_three_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use error::{BoardError, ErrorKind, GameError, MatcherError};
pub use filling::{DeterministicStrategy, FillingStrategy, RandomStrategy, SimpleRng};
pub use game::{CascadeReport, GameConfig, GamePhase, MatchThreeGame, RoundReport};
pub use matcher::{Group, Matcher, Matches, MaximumDeltaMatcher, UnionMatcher};
pub use moves::{Move, RotateSquare};
pub use scoring::{group_base_points, ChainScoring, PerGroupScoring, ScoringPolicy};
pub use snapshot::GameSnapshot;
