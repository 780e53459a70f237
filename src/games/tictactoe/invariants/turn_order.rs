//! Turn order invariant: the player to move is always a real player.

use super::super::game::Game;
use super::Invariant;

/// Invariant: `0 <= current < players`, and the mover has a sign.
pub struct TurnOrderInvariant;

impl Invariant<Game> for TurnOrderInvariant {
    fn holds(game: &Game) -> bool {
        game.current_index() < game.players().len() && game.signs().len() == game.players().len()
    }

    fn description() -> &'static str {
        "Turn index points at a player with a sign"
    }
}
