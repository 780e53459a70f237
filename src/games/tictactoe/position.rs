//! Cell references: `<column-letter><row-number>` in either order.

use super::types::Coord;
use tracing::instrument;

/// Column letter for a zero-based column index (`0 -> 'A'`).
pub fn column_letter(col: usize) -> char {
    debug_assert!(col < 26, "column {col} has no letter");
    (b'A' + col as u8) as char
}

/// Formats a coordinate as a cell reference, e.g. `B3`.
pub fn cell_reference(coord: Coord) -> String {
    format!("{}{}", column_letter(coord.col), coord.row + 1)
}

/// Parses a cell reference for a board of side `size`.
///
/// Dashes and spaces are stripped and letters are case-insensitive. The
/// column letter may lead (`b3`) or trail (`3b`). Returns `None` for
/// anything unparseable or off the board.
#[instrument]
pub fn parse_cell(input: &str, size: usize) -> Option<Coord> {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let first = cleaned.chars().next()?;
    let (letter, number) = if first.is_ascii_uppercase() {
        (first, &cleaned[1..])
    } else {
        let last = cleaned.chars().next_back()?;
        if !last.is_ascii_uppercase() {
            return None;
        }
        (last, &cleaned[..cleaned.len() - 1])
    };

    let row = number.parse::<usize>().ok()?.checked_sub(1)?;
    let col = (letter as u8 - b'A') as usize;
    (row < size && col < size).then_some(Coord::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_first() {
        assert_eq!(parse_cell("A1", 3), Some(Coord::new(0, 0)));
        assert_eq!(parse_cell("c2", 3), Some(Coord::new(1, 2)));
    }

    #[test]
    fn test_letter_last_and_separators() {
        assert_eq!(parse_cell("2c", 3), Some(Coord::new(1, 2)));
        assert_eq!(parse_cell("b-3", 3), Some(Coord::new(2, 1)));
        assert_eq!(parse_cell(" 3 - b ", 3), Some(Coord::new(2, 1)));
        assert_eq!(parse_cell("J10", 10), Some(Coord::new(9, 9)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_cell("", 3), None);
        assert_eq!(parse_cell("--", 3), None);
        assert_eq!(parse_cell("11", 3), None);
        assert_eq!(parse_cell("AB", 3), None);
        assert_eq!(parse_cell("hello", 3), None);
        assert_eq!(parse_cell("é1", 3), None);
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        assert_eq!(parse_cell("A0", 3), None);
        assert_eq!(parse_cell("A4", 3), None);
        assert_eq!(parse_cell("D1", 3), None);
    }

    #[test]
    fn test_reference_round_trip() {
        for size in [1, 3, 7, 26] {
            for row in 0..size {
                for col in 0..size {
                    let coord = Coord::new(row, col);
                    assert_eq!(parse_cell(&cell_reference(coord), size), Some(coord));
                }
            }
        }
    }
}
