//! Core types module - shared value types and notation constants
//!
//! This module defines the small value types used throughout the engine.
//! Apart from the alphabet they are plain `Copy` data with no behavior beyond
//! arithmetic and parsing, usable anywhere (board, matcher, moves, runner).
//!
//! # Coordinates
//!
//! - **x**: column, grows to the right
//! - **y**: row, grows downward; gravity pulls tokens toward larger `y`
//!
//! # Compact Board Notation
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ROW_SEPARATOR` | `';'` | Separates rows, first row is `y = 0` |
//! | `BLANK` | `' '` | Empty cell |
//! | `MIN_MATCH_SIZE` | 3 | Smallest group the game removes |
//!
//! # Examples
//!
//! ```
//! use match_three_types::{Delta, Position, Token, TokenSet, Turn};
//!
//! let p = Position::at(1, 2);
//! assert_eq!(p.offset(Delta::dxy(1, -1)), Some(Position::at(2, 1)));
//!
//! let tokens = TokenSet::from_chars("abc").unwrap();
//! assert!(tokens.contains(Token::new('a')));
//! assert!(!tokens.contains(Token::new('z')));
//!
//! assert_eq!(Turn::Clockwise.inverse(), Turn::CounterClockwise);
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between rows in the compact board notation.
pub const ROW_SEPARATOR: char = ';';

/// Character marking an empty cell in the compact board notation.
pub const BLANK: char = ' ';

/// Smallest group size the game treats as a removable match.
pub const MIN_MATCH_SIZE: usize = 3;

/// A cell coordinate: `x` is the column, `y` the row.
///
/// Positions may lie off the board (negative or too large); the board decides
/// whether a position is valid. Ordering is row-major and only used for
/// deterministic iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a position at column `x`, row `y`
    pub const fn at(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step by `delta`, returning `None` on integer overflow
    pub fn offset(self, delta: Delta) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(delta.dx)?,
            y: self.y.checked_add(delta.dy)?,
        })
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single step vector `(dx, dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    /// Create a step of `dx` columns and `dy` rows
    pub const fn dxy(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// The opposite step
    ///
    /// ```
    /// use match_three_types::Delta;
    ///
    /// assert_eq!(Delta::dxy(2, -1).negate(), Delta::dxy(-2, 1));
    /// ```
    pub fn negate(self) -> Self {
        Self {
            dx: self.dx.wrapping_neg(),
            dy: self.dy.wrapping_neg(),
        }
    }

    /// Whether this is the `(0, 0)` step
    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.dx, self.dy)
    }
}

/// An opaque board symbol
///
/// Tokens compare by value. Which tokens a board admits is decided by its
/// [`TokenSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Token(char);

impl Token {
    pub const fn new(symbol: char) -> Self {
        Self(symbol)
    }

    /// The character this token is written as in board notation
    pub fn symbol(self) -> char {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a token alphabet could not be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    /// The alphabet string had no characters
    #[error("token alphabet is empty")]
    Empty,
    /// The character is reserved by the board notation
    #[error("character {0:?} is reserved by the board notation")]
    Reserved(char),
}

/// The fixed set of tokens a board admits (its alphabet)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenSet {
    tokens: BTreeSet<Token>,
}

impl TokenSet {
    /// Build an alphabet from the distinct characters of `symbols`
    ///
    /// ```
    /// use match_three_types::{AlphabetError, TokenSet};
    ///
    /// assert_eq!(TokenSet::from_chars("abca").unwrap().len(), 3);
    /// assert_eq!(TokenSet::from_chars(""), Err(AlphabetError::Empty));
    /// assert_eq!(TokenSet::from_chars("a;"), Err(AlphabetError::Reserved(';')));
    /// ```
    pub fn from_chars(symbols: &str) -> Result<Self, AlphabetError> {
        let mut tokens = BTreeSet::new();
        for c in symbols.chars() {
            if c == BLANK || c == ROW_SEPARATOR {
                return Err(AlphabetError::Reserved(c));
            }
            tokens.insert(Token::new(c));
        }
        if tokens.is_empty() {
            return Err(AlphabetError::Empty);
        }
        Ok(Self { tokens })
    }

    pub fn contains(&self, token: Token) -> bool {
        self.tokens.contains(&token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().copied()
    }

    /// The `index`-th token in ascending symbol order
    pub fn nth(&self, index: usize) -> Option<Token> {
        self.tokens.iter().nth(index).copied()
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Quarter-turn direction of a block rotation
///
/// Clockwise moves the top-left cell to the top-right, the top-right to the
/// bottom-right and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    /// The turn that undoes this one
    pub fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }

    /// Parse a turn (case-insensitive)
    ///
    /// Accepts "cw" | "clockwise" and "ccw" | "counterclockwise".
    ///
    /// ```
    /// use match_three_types::Turn;
    ///
    /// assert_eq!(Turn::from_str("CW"), Some(Turn::Clockwise));
    /// assert_eq!(Turn::from_str("ccw"), Some(Turn::CounterClockwise));
    /// assert_eq!(Turn::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cw" | "clockwise" => Some(Turn::Clockwise),
            "ccw" | "counterclockwise" => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Turn::Clockwise => "cw",
            Turn::CounterClockwise => "ccw",
        }
    }
}
