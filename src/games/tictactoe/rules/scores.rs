//! Whole-board line scanning and the heuristic opponent.

use super::super::types::{Coord, Grid, Sign};
use super::line::{Direction, LineScan};
use tracing::{debug, instrument};

/// Every line of the board, each scanned for its best window.
///
/// Lines are kept in scan order: rows, columns, down-diagonals, then
/// up-diagonals. Each diagonal family has `2 * size - 1` lines.
#[derive(Debug, Clone)]
pub struct ScoreSet<'a> {
    grid: &'a Grid,
    win_length: usize,
    lines: Vec<LineScan<'a>>,
}

impl<'a> ScoreSet<'a> {
    /// Builds and scans every line. Squares in `fading` score as empty.
    #[instrument(skip(grid, fading), fields(size = grid.size()))]
    pub fn new(grid: &'a Grid, win_length: usize, fading: &[Coord]) -> Self {
        let last = grid.size().saturating_sub(1);
        let size = grid.size();

        let rows = (0..size).map(|r| (Direction::Row, Coord::new(r, 0)));
        let cols = (0..size).map(|c| (Direction::Column, Coord::new(0, c)));
        let down = (0..size)
            .map(|c| Coord::new(0, c))
            .chain((1..size).map(|r| Coord::new(r, 0)))
            .map(|origin| (Direction::DiagonalDown, origin));
        let up = (0..size)
            .map(|c| Coord::new(0, c))
            .chain((1..size).map(|r| Coord::new(r, last)))
            .map(|origin| (Direction::DiagonalUp, origin));

        let lines = rows
            .chain(cols)
            .chain(down)
            .chain(up)
            .map(|(direction, origin)| {
                let mut line = LineScan::new(grid, direction, origin);
                line.search(win_length, fading);
                line
            })
            .collect();

        Self {
            grid,
            win_length,
            lines,
        }
    }

    /// All scanned lines in scan order.
    pub fn lines(&self) -> &[LineScan<'a>] {
        &self.lines
    }

    /// The first line with the highest score.
    pub fn best_result(&self) -> Option<&LineScan<'a>> {
        self.lines.iter().fold(None, |best, line| match best {
            Some(b) if b.score() >= line.score() => Some(b),
            _ => Some(line),
        })
    }

    /// The best line if it scores a full `win_length`.
    pub fn winning_line(&self) -> Option<&LineScan<'a>> {
        self.best_result()
            .filter(|line| line.score() >= self.win_length && line.symbol().is_some())
    }

    /// Picks a move for `sign`.
    ///
    /// Priority: complete an own line, block an opponent line that is one
    /// short or two short and open on both ends, extend the strongest own
    /// line, then center, corners and the first free square. Ties inside a
    /// step go to the first line in scan order. Returns `None` only on a
    /// full board.
    #[instrument(skip(self))]
    pub fn select_move(&self, sign: Sign) -> Option<Coord> {
        let target = self.win_length.saturating_sub(1);

        let win_now = self
            .lines
            .iter()
            .filter(|line| line.symbol() == Some(sign) && line.score() == target)
            .find_map(LineScan::last_empty);
        if let Some(coord) = win_now {
            debug!(?coord, "Completing own line");
            return Some(coord);
        }

        let block = self
            .lines
            .iter()
            .filter(|line| {
                line.symbol().is_some_and(|other| other != sign)
                    && (line.score() == target
                        || (line.has_space_before()
                            && line.has_space_after()
                            && line.score() + 2 == self.win_length))
            })
            .find_map(LineScan::last_empty);
        if let Some(coord) = block {
            debug!(?coord, "Blocking opponent line");
            return Some(coord);
        }

        let strongest = self
            .lines
            .iter()
            .filter(|line| line.symbol() == Some(sign))
            .fold(None::<&LineScan<'a>>, |best, line| match best {
                Some(b) if b.score() >= line.score() => Some(b),
                _ => Some(line),
            });
        if let Some(coord) = strongest.and_then(LineScan::last_empty) {
            debug!(?coord, "Extending strongest line");
            return Some(coord);
        }

        let fallback = self.fallback();
        debug!(coord = ?fallback, "Falling back to fixed preference");
        fallback
    }

    fn fallback(&self) -> Option<Coord> {
        let edge = self.grid.size().checked_sub(1)?;
        let preferred = [
            Coord::new(edge / 2, edge / 2),
            Coord::new(0, 0),
            Coord::new(0, edge),
            Coord::new(edge, 0),
            Coord::new(edge, edge),
        ];
        preferred
            .into_iter()
            .chain(self.grid.coords())
            .find(|c| self.grid.is_empty(*c))
    }
}
