//! Board module - manages the token grid
//!
//! The board is a `width x height` grid where each cell is empty or holds a
//! token from the board's alphabet. Uses a flat array (row-major,
//! `y * width + x`) for cache locality.
//! Coordinates: x grows to the right, y grows downward. Gravity pulls tokens
//! toward larger y, so refilled cells always appear at the top of a column.

use std::fmt;

use crate::error::BoardError;
use crate::filling::FillingStrategy;
use crate::types::{Position, Token, TokenSet, BLANK, ROW_SEPARATOR};

/// A board cell: `None` is empty
pub type Cell = Option<Token>;

/// The match-three grid
pub struct Board {
    tokens: TokenSet,
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    filling: Option<Box<dyn FillingStrategy>>,
}

impl Board {
    /// Create an empty board
    pub fn new(tokens: TokenSet, width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let size = width
            .checked_mul(height)
            .filter(|&size| size <= i32::MAX as usize)
            .ok_or(BoardError::InvalidDimensions { width, height })?;
        Ok(Self {
            tokens,
            width,
            height,
            cells: vec![None; size],
            filling: None,
        })
    }

    /// Parse a board from compact notation
    ///
    /// Rows are separated by `;`, a space is an empty cell and every other
    /// character must belong to `tokens`.
    ///
    /// ```
    /// use match_three_core::Board;
    /// use match_three_core::types::TokenSet;
    ///
    /// let board = Board::from_token_string(TokenSet::from_chars("ab").unwrap(), "ab;b ").unwrap();
    /// assert_eq!((board.width(), board.height()), (2, 2));
    /// assert_eq!(board.to_token_string(), "ab;b ");
    /// ```
    pub fn from_token_string(tokens: TokenSet, notation: &str) -> Result<Self, BoardError> {
        if notation.is_empty() {
            return Err(BoardError::EmptyNotation);
        }
        let rows: Vec<Vec<char>> = notation
            .split(ROW_SEPARATOR)
            .map(|row| row.chars().collect())
            .collect();
        let width = rows[0].len();
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::RaggedRows {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let mut board = Self::new(tokens, width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &symbol) in row.iter().enumerate() {
                if symbol == BLANK {
                    continue;
                }
                let token = Token::new(symbol);
                if !board.tokens.contains(token) {
                    return Err(BoardError::UnknownSymbol {
                        symbol,
                        position: Position::at(x as i32, y as i32),
                    });
                }
                board.cells[y * width + x] = Some(token);
            }
        }
        Ok(board)
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.y as usize * self.width + pos.x as usize)
    }

    fn checked_index(&self, pos: Position) -> Result<usize, BoardError> {
        self.index(pos).ok_or(BoardError::OutOfBounds(pos))
    }

    fn checked_column(&self, x: i32) -> Result<usize, BoardError> {
        if x < 0 || x as usize >= self.width {
            return Err(BoardError::ColumnOutOfBounds(x));
        }
        Ok(x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The alphabet this board admits
    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Check if position is within bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Cell at `pos`
    pub fn get(&self, pos: Position) -> Result<Cell, BoardError> {
        Ok(self.cells[self.checked_index(pos)?])
    }

    /// Token at `pos`, treating off-board positions as empty
    #[inline]
    pub fn token_at(&self, pos: Position) -> Option<Token> {
        self.index(pos).and_then(|idx| self.cells[idx])
    }

    /// Overwrite the cell at `pos`
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), BoardError> {
        let idx = self.checked_index(pos)?;
        if let Some(token) = cell {
            if !self.tokens.contains(token) {
                return Err(BoardError::TokenNotInAlphabet(token));
            }
        }
        self.cells[idx] = cell;
        Ok(())
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), BoardError> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Every position, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::at(x, y)))
    }

    /// Positions of column `x`, top to bottom
    pub fn column_positions(&self, x: i32) -> impl Iterator<Item = Position> {
        (0..self.height as i32).map(move |y| Position::at(x, y))
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Let the tokens of column `x` fall to the bottom
    ///
    /// Non-empty cells keep their relative order; the vacated cells at the
    /// top become empty. Uses a two-pointer pass from the bottom up.
    pub fn collapse_column(&mut self, x: i32) -> Result<(), BoardError> {
        let x = self.checked_column(x)?;
        let mut write_y = self.height;

        for read_y in (0..self.height).rev() {
            let cell = self.cells[read_y * self.width + x];
            if cell.is_some() {
                write_y -= 1;
                if write_y != read_y {
                    self.cells[write_y * self.width + x] = cell;
                    self.cells[read_y * self.width + x] = None;
                }
            }
        }

        Ok(())
    }

    /// Attach (or replace) the strategy used for refills
    pub fn set_filling_strategy(&mut self, strategy: Box<dyn FillingStrategy>) {
        self.filling = Some(strategy);
    }

    /// Detach the current strategy
    pub fn take_filling_strategy(&mut self) -> Option<Box<dyn FillingStrategy>> {
        self.filling.take()
    }

    pub fn has_filling_strategy(&self) -> bool {
        self.filling.is_some()
    }

    /// Fill the empty cells of column `x`, lowest first
    ///
    /// Returns the filled positions. A token outside the alphabet or an
    /// exhausted strategy aborts the refill; cells filled so far stay filled.
    pub fn refill_column(&mut self, x: i32) -> Result<Vec<Position>, BoardError> {
        let column = self.checked_column(x)?;
        let width = self.width;
        let height = self.height;
        let filling = self
            .filling
            .as_mut()
            .ok_or(BoardError::MissingFillingStrategy)?;

        let mut filled = Vec::new();
        for y in (0..height).rev() {
            let idx = y * width + column;
            if self.cells[idx].is_some() {
                continue;
            }
            let token = filling
                .next_token(column)
                .ok_or(BoardError::FillingExhausted(column))?;
            if !self.tokens.contains(token) {
                return Err(BoardError::TokenNotInAlphabet(token));
            }
            self.cells[idx] = Some(token);
            filled.push(Position::at(x, y as i32));
        }
        Ok(filled)
    }

    /// Fill every empty cell, column by column from the left
    pub fn refill_empty_cells(&mut self) -> Result<Vec<Position>, BoardError> {
        if self.filling.is_none() {
            return Err(BoardError::MissingFillingStrategy);
        }
        let mut filled = Vec::new();
        for x in 0..self.width as i32 {
            filled.extend(self.refill_column(x)?);
        }
        Ok(filled)
    }

    /// Empty every listed cell; off-board positions are ignored
    pub(crate) fn clear_positions<'a>(&mut self, positions: impl IntoIterator<Item = &'a Position>) {
        for &pos in positions {
            if let Some(idx) = self.index(pos) {
                self.cells[idx] = None;
            }
        }
    }

    /// Copy of grid and alphabet without the filling strategy
    pub fn detached_copy(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
            filling: None,
        }
    }

    /// Rows as strings in compact notation (without separators)
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(BLANK, Token::symbol))
                    .collect()
            })
            .collect()
    }

    /// Serialize to compact notation
    pub fn to_token_string(&self) -> String {
        self.rows().join(&ROW_SEPARATOR.to_string())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token_string())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("tokens", &self.tokens.to_string())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cells", &self.to_token_string())
            .field("filling", &self.filling)
            .finish()
    }
}
