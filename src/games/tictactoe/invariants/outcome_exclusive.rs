//! Outcome exclusivity invariant: a game is won or drawn, never both.

use super::super::game::Game;
use super::Invariant;

/// Invariant: a winner and a draw are mutually exclusive, and a winner
/// always comes with a winning line.
pub struct OutcomeExclusiveInvariant;

impl Invariant<Game> for OutcomeExclusiveInvariant {
    fn holds(game: &Game) -> bool {
        match game.winner() {
            Some(_) => !game.is_draw() && !game.winning_line().is_empty(),
            None => game.winning_line().is_empty(),
        }
    }

    fn description() -> &'static str {
        "Won and drawn are mutually exclusive"
    }
}
