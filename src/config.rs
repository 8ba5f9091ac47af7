//! Game files - TOML description of a board, its matcher and its refills
//!
//! ```toml
//! alphabet = "abc"
//! board = "b b ;abba;aaab"
//! deltas = [[1, 0]]
//! min_match_size = 3
//!
//! [fill]
//! columns = ["aaaaa", "bbbcabca", "abbabab", "aabcc"]
//! ```
//!
//! Without `fill.columns` the board is refilled randomly from `fill.seed`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{
    Board, BoardError, ChainScoring, DeterministicStrategy, FillingStrategy, GameConfig,
    MatchThreeGame, Matcher, MatcherError, MaximumDeltaMatcher, RandomStrategy, UnionMatcher,
};
use crate::types::{Delta, Token, TokenSet};

/// Errors that can occur when loading a game file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read game file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("game file validation error: {0}")]
    Validation(String),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),

    #[error("invalid deltas: {0}")]
    Matcher(#[from] MatcherError),
}

/// Where replacement tokens come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// One token sequence per column; random refills when absent
    pub columns: Option<Vec<String>>,
    /// Repeat the column sequences instead of running out
    pub cycle: bool,
    /// Seed of the random strategy
    pub seed: u32,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            columns: None,
            cycle: false,
            seed: 1,
        }
    }
}

/// Top-level game file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFile {
    pub alphabet: String,
    pub board: String,
    /// Step vectors `[dx, dy]` of the matcher
    pub deltas: Option<Vec<[i32; 2]>>,
    /// One matcher per delta, combined, instead of one matcher for all
    #[serde(default)]
    pub separate_axes: bool,
    #[serde(default)]
    pub fill: FillConfig,
    #[serde(flatten)]
    pub rules: GameConfig,
}

impl GameFile {
    /// Load a game file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a game file.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: GameFile = toml::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    /// Validate values that the types alone do not constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.min_match_size == 0 {
            return Err(ConfigError::Validation(
                "min_match_size must be > 0".into(),
            ));
        }
        let tokens = TokenSet::from_chars(&self.alphabet).map_err(BoardError::from)?;
        if let Some(columns) = &self.fill.columns {
            if self.fill.cycle && columns.iter().any(String::is_empty) {
                return Err(ConfigError::Validation(
                    "fill.columns must not contain empty sequences when fill.cycle is set".into(),
                ));
            }
            for (column, sequence) in columns.iter().enumerate() {
                if let Some(symbol) = sequence.chars().find(|&c| !tokens.contains(Token::new(c))) {
                    return Err(ConfigError::Validation(format!(
                        "fill.columns[{}] contains {:?}, which is not in the alphabet",
                        column, symbol
                    )));
                }
            }
        }
        Ok(())
    }

    fn deltas(&self) -> Option<impl Iterator<Item = Option<Delta>> + '_> {
        self.deltas
            .as_ref()
            .map(|deltas| deltas.iter().map(|&[dx, dy]| Some(Delta::dxy(dx, dy))))
    }

    /// Build the matcher described by `deltas` and `separate_axes`.
    pub fn matcher(&self) -> Result<Box<dyn Matcher>, ConfigError> {
        let combined = MaximumDeltaMatcher::from_optional(self.deltas())?;
        if !self.separate_axes {
            return Ok(Box::new(combined));
        }
        let mut union = UnionMatcher::default();
        for &delta in combined.deltas() {
            union = union.with(MaximumDeltaMatcher::new([delta])?);
        }
        Ok(Box::new(union))
    }

    fn filling(&self, tokens: &TokenSet) -> Box<dyn FillingStrategy> {
        match &self.fill.columns {
            Some(columns) => {
                let sequences: Vec<Vec<Token>> = columns
                    .iter()
                    .map(|column| column.chars().map(Token::new).collect())
                    .collect();
                if self.fill.cycle {
                    Box::new(DeterministicStrategy::cycling(sequences))
                } else {
                    Box::new(DeterministicStrategy::new(sequences))
                }
            }
            None => Box::new(RandomStrategy::new(tokens, self.fill.seed)),
        }
    }

    /// Assemble an unstarted game.
    pub fn build(&self) -> Result<MatchThreeGame, ConfigError> {
        let tokens = TokenSet::from_chars(&self.alphabet).map_err(BoardError::from)?;
        let mut board = Board::from_token_string(tokens, &self.board)?;
        board.set_filling_strategy(self.filling(board.tokens()));
        Ok(MatchThreeGame::with_config(
            board,
            self.matcher()?,
            Box::new(ChainScoring),
            self.rules,
        ))
    }
}
