//! Sliding-window scan along one line of the board.

use super::super::types::{Coord, Grid, Sign, Square};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Line family a scan walks along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    /// Left to right.
    Row,
    /// Top to bottom.
    Column,
    /// Top-left to bottom-right.
    DiagonalDown,
    /// Top-right to bottom-left.
    DiagonalUp,
}

impl Direction {
    /// Next coordinate along this direction, or `None` when leaving the grid.
    pub fn step(self, coord: Coord, size: usize) -> Option<Coord> {
        let next = match self {
            Direction::Row => Coord::new(coord.row, coord.col + 1),
            Direction::Column => Coord::new(coord.row + 1, coord.col),
            Direction::DiagonalDown => Coord::new(coord.row + 1, coord.col + 1),
            Direction::DiagonalUp => Coord::new(coord.row + 1, coord.col.checked_sub(1)?),
        };
        (next.row < size && next.col < size).then_some(next)
    }
}

/// Best window of `win_length` consecutive squares found along one line.
///
/// Scoring a window: empty squares and squares listed as fading count as
/// nothing; if every remaining square holds the same sign the score is their
/// count. Otherwise (two signs, or a drawn placeholder) the score is zero and
/// the window still belongs to the first sign seen.
///
/// When two windows score the same, the later one wins only if it has more
/// open squares directly around it than the current best.
#[derive(Debug, Clone)]
pub struct LineScan<'a> {
    grid: &'a Grid,
    direction: Direction,
    origin: Coord,
    window: Vec<Coord>,
    score: usize,
    symbol: Option<Sign>,
    space_before: bool,
    space_after: bool,
}

impl<'a> LineScan<'a> {
    /// Creates an unscanned line starting at `origin`.
    pub fn new(grid: &'a Grid, direction: Direction, origin: Coord) -> Self {
        Self {
            grid,
            direction,
            origin,
            window: Vec::new(),
            score: 0,
            symbol: None,
            space_before: false,
            space_after: false,
        }
    }

    /// Slides the window along the whole line and keeps the best position.
    ///
    /// A line shorter than `win_length` has no window and keeps score zero.
    pub fn search(&mut self, win_length: usize, fading: &[Coord]) {
        let size = self.grid.size();
        let line: Vec<Coord> = std::iter::successors(Some(self.origin), |c| {
            self.direction.step(*c, size)
        })
        .take_while(|c| self.grid.contains(*c))
        .collect();

        if win_length == 0 || win_length > line.len() {
            return;
        }

        let mut best: Option<(usize, usize, Option<Sign>, bool, bool)> = None;
        let mut best_score = 0;
        let mut best_spaces = 0;
        let mut space_before = false;

        for start in 0..=line.len() - win_length {
            let window = &line[start..start + win_length];
            let space_after = line
                .get(start + win_length)
                .is_some_and(|c| self.grid.is_empty(*c));
            let (symbol, score) = self.score_window(window, fading);

            let spaces = usize::from(space_before) + usize::from(space_after);
            if score > best_score || (score == best_score && spaces > best_spaces) {
                // an empty first square lets the window slide back by one
                let before = space_before || (space_after && self.grid.is_empty(window[0]));
                best = Some((start, score, symbol, before, space_after));
                best_score = score;
                best_spaces = usize::from(before) + usize::from(space_after);
            }
            space_before = self.grid.is_empty(line[start]);
        }

        if let Some((start, score, symbol, before, after)) = best {
            self.window = line[start..start + win_length].to_vec();
            self.score = score;
            self.symbol = symbol;
            self.space_before = before;
            self.space_after = after;
        }
    }

    fn score_window(&self, window: &[Coord], fading: &[Coord]) -> (Option<Sign>, usize) {
        let mut symbol = None;
        let mut score = 0;
        for coord in window {
            if fading.contains(coord) {
                continue;
            }
            match self.grid.get(*coord) {
                Some(Square::Empty) | None => {}
                Some(Square::Blocked) => return (symbol, 0),
                Some(square) => {
                    let sign = square.sign();
                    if symbol.is_none() {
                        symbol = sign;
                        score = 1;
                    } else if symbol == sign {
                        score += 1;
                    } else {
                        // the first sign keeps the window
                        return (symbol, 0);
                    }
                }
            }
        }
        (symbol, score)
    }

    /// Direction of this line.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// First square of the line.
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Score of the best window.
    pub fn score(&self) -> usize {
        self.score
    }

    /// Sign owning the best window, if it has one.
    pub fn symbol(&self) -> Option<Sign> {
        self.symbol
    }

    /// Squares of the best window, empty if the line has none.
    pub fn window(&self) -> &[Coord] {
        &self.window
    }

    /// Open square before the best window.
    pub fn has_space_before(&self) -> bool {
        self.space_before
    }

    /// Open square after the best window.
    pub fn has_space_after(&self) -> bool {
        self.space_after
    }

    /// Last empty square of the best window along the scan direction.
    pub fn last_empty(&self) -> Option<Coord> {
        self.window
            .iter()
            .rev()
            .copied()
            .find(|c| self.grid.is_empty(*c))
    }
}
