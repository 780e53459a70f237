//! Game status and the outcome event handed to callers.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Current status of a game.
///
/// `InProgress` is the only non-terminal status; the others never change
/// once reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended with a winner.
    Won(String),
    /// Game ended in a draw.
    Draw,
    /// Game was cancelled before it finished.
    Stopped,
}

impl GameStatus {
    /// True for every status except `InProgress`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Outcome of a game that finished by play (won or drawn).
///
/// Carries what a caller needs to decide whether to record tallies:
/// the winner (`None` for a draw), every participant and the board
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Outcome {
    /// Winning player, `None` for a draw.
    winner: Option<String>,
    /// All players in turn order.
    players: Vec<String>,
    /// Run length needed to win.
    win_length: usize,
    /// Board side length.
    size: usize,
}

impl Outcome {
    /// Creates an outcome.
    pub fn new(winner: Option<String>, players: Vec<String>, win_length: usize, size: usize) -> Self {
        Self {
            winner,
            players,
            win_length,
            size,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.winner {
            Some(player) => write!(f, "{} wins", player),
            None => write!(f, "Draw"),
        }
    }
}
