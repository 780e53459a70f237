//! Core domain types for N-in-a-row boards.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// Glyph rendered for an empty square.
pub const EMPTY_GLYPH: char = '_';

/// Glyph rendered for a meta-board square whose sub-board ended in a draw.
pub const BLOCKED_GLYPH: char = ' ';

/// Sign alphabet in priority order: `x` and `o` first, then the remaining
/// lowercase letters.
pub const SIGNS: [char; 26] = [
    'x', 'o', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'p', 'q',
    'r', 's', 't', 'u', 'v', 'w', 'y', 'z',
];

/// Maximum number of players, one per sign.
pub const MAX_PLAYERS: usize = SIGNS.len();

/// Maximum board size, bounded by the column letters `A..=Z`.
pub const MAX_FIELD_SIZE: usize = 26;

/// A player's mark on the board, indexing into [`SIGNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sign(u8);

impl Sign {
    /// Returns the sign for the given player index, if one exists.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SIGNS.len()).then(|| Self(index as u8))
    }

    /// Index of this sign in the alphabet (equals its player index).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Lowercase glyph.
    pub fn symbol(self) -> char {
        SIGNS[self.index()]
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a sign.
    Occupied(Sign),
    /// Part of the recorded winning line. Same gameplay value as `Occupied`.
    Highlighted(Sign),
    /// Meta-board placeholder for a drawn sub-board. Never matches any sign.
    Blocked,
}

impl Square {
    /// Returns the sign in this square, ignoring highlighting.
    pub fn sign(self) -> Option<Sign> {
        match self {
            Square::Occupied(sign) | Square::Highlighted(sign) => Some(sign),
            Square::Empty | Square::Blocked => None,
        }
    }

    /// True for [`Square::Empty`].
    pub fn is_empty(self) -> bool {
        self == Square::Empty
    }

    /// Glyph used by text rendering.
    pub fn glyph(self) -> char {
        match self {
            Square::Empty => EMPTY_GLYPH,
            Square::Occupied(sign) => sign.symbol(),
            Square::Highlighted(sign) => sign.symbol().to_ascii_uppercase(),
            Square::Blocked => BLOCKED_GLYPH,
        }
    }
}

/// Zero-based grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new)]
pub struct Coord {
    /// Row index (rendered as the row number, starting at 1).
    pub row: usize,
    /// Column index (rendered as the column letter, starting at `A`).
    pub col: usize,
}

/// Square grid of `size × size` squares in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    squares: Vec<Square>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if the coordinate lies on the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Gets the square at `coord`, or `None` off the grid.
    pub fn get(&self, coord: Coord) -> Option<Square> {
        self.contains(coord)
            .then(|| self.squares[coord.row * self.size + coord.col])
    }

    /// Sets the square at `coord`. Off-grid writes are ignored.
    pub fn set(&mut self, coord: Coord, square: Square) {
        if self.contains(coord) {
            self.squares[coord.row * self.size + coord.col] = square;
        }
    }

    /// Checks if the square at `coord` exists and is empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Square::Empty))
    }

    /// True when no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| !s.is_empty())
    }

    /// Iterates rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        // chunks(0) panics; a zero-size grid has no rows anyway
        self.squares.chunks(self.size.max(1))
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Builds a grid from rows of glyphs (`_` empty, space blocked, letters
    /// are signs; uppercase letters are highlighted). Unknown glyphs are empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new(rows.len());
        for (row, line) in rows.iter().enumerate() {
            for (col, glyph) in line.chars().enumerate() {
                let square = match glyph {
                    BLOCKED_GLYPH => Square::Blocked,
                    c => match SIGNS.iter().position(|s| *s == c.to_ascii_lowercase()) {
                        Some(i) if c.is_ascii_uppercase() => Square::Highlighted(Sign(i as u8)),
                        Some(i) => Square::Occupied(Sign(i as u8)),
                        None => Square::Empty,
                    },
                };
                grid.set(Coord::new(row, col), square);
            }
        }
        grid
    }
}
