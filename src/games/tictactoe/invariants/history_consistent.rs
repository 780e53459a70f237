//! History consistency invariant: recorded moves match the board.

use super::super::game::Game;
use super::Invariant;

/// Invariant: every square in a sign's move history holds that sign, and
/// with fading on no history is longer than the threshold.
pub struct HistoryConsistentInvariant;

impl Invariant<Game> for HistoryConsistentInvariant {
    fn holds(game: &Game) -> bool {
        game.signs().into_iter().all(|sign| {
            let Some(history) = game.history(sign) else {
                return false;
            };
            let bounded = game.fade_threshold() == 0 || history.len() <= game.fade_threshold();
            bounded
                && history
                    .iter()
                    .all(|c| game.grid().get(*c).and_then(|s| s.sign()) == Some(sign))
        })
    }

    fn description() -> &'static str {
        "Move history matches occupied squares"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::GameOptions;

    #[test]
    fn test_holds_after_win_highlight() {
        let players = vec!["A".to_string(), "B".to_string()];
        let mut game = Game::new(3, 3, players, GameOptions::default()).unwrap();
        for cell in ["A1", "B1", "A2", "B2", "A3"] {
            game.apply_move(cell);
        }
        assert!(game.winner().is_some());
        assert!(HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_holds_with_fading() {
        let players = vec!["A".to_string(), "B".to_string()];
        let options = GameOptions::default().with_fade_threshold(1);
        let mut game = Game::new(3, 3, players, options).unwrap();
        for cell in ["A1", "B1", "C1", "A2"] {
            game.apply_move(cell);
            assert!(HistoryConsistentInvariant::holds(&game));
        }
    }
}
