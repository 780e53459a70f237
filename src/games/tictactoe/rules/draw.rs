//! Draw detection for N-in-a-row boards.

use super::super::types::Grid;
use super::scores::ScoreSet;
use tracing::instrument;

/// Checks if the board is full (no empty squares).
///
/// Drawn placeholders on a meta-board count as filled.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn is_full(grid: &Grid) -> bool {
    grid.is_full()
}

/// A full board with no winning line.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn is_draw(grid: &Grid, win_length: usize) -> bool {
    is_full(grid) && ScoreSet::new(grid, win_length, &[]).winning_line().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Grid::new(3)));
    }

    #[test]
    fn test_partial_board_not_full() {
        let grid = Grid::from_rows(&["x__", "_o_", "___"]);
        assert!(!is_full(&grid));
    }

    #[test]
    fn test_blocked_squares_fill_board() {
        let grid = Grid::from_rows(&["xo ", "  x", "o  "]);
        assert!(is_full(&grid));
        assert!(is_draw(&grid, 3));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / X O O / O X X
        let grid = Grid::from_rows(&["xox", "xoo", "oxx"]);
        assert!(is_draw(&grid, 3));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let grid = Grid::from_rows(&["xxx", "oox", "xoo"]);
        assert!(is_full(&grid));
        assert!(!is_draw(&grid, 3));
    }
}
