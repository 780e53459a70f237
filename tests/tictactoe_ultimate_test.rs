//! End-to-end tests for nested boards.

use tictac_engine::{Coord, GameOptions, Sign, Square, UltimateGame};

fn game() -> UltimateGame {
    UltimateGame::new(
        3,
        3,
        vec!["A".to_string(), "B".to_string()],
        GameOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_sub_board_win_propagates_to_meta_board() {
    let mut game = game();
    for input in ["B2 A2", "B2", "C2", "B2", "B2"] {
        assert!(game.apply_move(input), "{} rejected", input);
    }

    let center = Coord::new(1, 1);
    let x = Sign::from_index(0).unwrap();
    assert_eq!(game.subboard(center).unwrap().winner(), Some("A"));
    assert_eq!(game.meta().grid().get(center), Some(Square::Occupied(x)));
    assert_eq!(game.selected(), None);
    assert_eq!(game.active_grid(), game.meta().grid());
    assert_eq!(game.winner(), None);
}

#[test]
fn test_landing_square_forces_next_board() {
    let mut game = game();
    assert!(game.apply_move("A1 C3"));
    assert_eq!(game.selected(), Some(Coord::new(2, 2)));
    assert_eq!(
        game.active_grid(),
        game.subboard(Coord::new(2, 2)).unwrap().grid()
    );

    // a forced player types just the cell
    assert!(!game.apply_move("A1 B1"));
    assert!(game.apply_move("A1"));
    assert_eq!(game.selected(), Some(Coord::new(0, 0)));
}

#[test]
fn test_taken_square_is_no_change() {
    let mut game = game();
    assert!(game.apply_move("A1 B1"));
    assert!(game.apply_move("A1"));
    // A is sent back to board A1, whose B1 is taken
    assert!(!game.apply_move("B1"));
    assert_eq!(game.current_player(), "A");
    assert_eq!(game.selected(), Some(Coord::new(0, 0)));
}

#[test]
fn test_meta_win_ends_the_game() {
    let mut game = UltimateGame::new(
        2,
        1,
        vec!["A".to_string(), "B".to_string()],
        GameOptions::default(),
    )
    .unwrap();
    assert!(game.apply_move("A1 B2"));
    assert_eq!(game.winner(), Some("A"));
    assert!(game.outcome().is_some());
    assert!(!game.apply_move("B2"));
}

#[test]
fn test_stop_ends_without_outcome() {
    let mut game = game();
    game.apply_move("A1 A1");
    game.stop();
    assert!(game.is_stopped());
    assert!(game.outcome().is_none());
    assert!(!game.apply_move("B1"));
    assert!(game.to_string().ends_with("The game was stopped."));
}
