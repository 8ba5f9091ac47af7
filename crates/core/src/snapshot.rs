//! Serializable view of a game for observers and the text runner

use serde::{Deserialize, Serialize};

use crate::game::{GamePhase, MatchThreeGame};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Board rows in compact notation, `y = 0` first
    pub rows: Vec<String>,
    pub alphabet: String,
    pub phase: GamePhase,
    pub score: u64,
}

impl From<&MatchThreeGame> for GameSnapshot {
    fn from(game: &MatchThreeGame) -> Self {
        let board = game.board();
        Self {
            width: board.width(),
            height: board.height(),
            rows: board.rows(),
            alphabet: board.tokens().to_string(),
            phase: game.phase(),
            score: game.score(),
        }
    }
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Ready
    }
}
