//! Text rendering and the localization seam.

use super::position::column_letter;
use super::types::{Coord, Grid};
use tracing::error;

/// Combining mark drawn over squares that fade on their owner's next move.
pub const FADE_MARK: char = '\u{036f}';

/// Looks up user-facing text by key.
///
/// Only rendering calls this; game logic never depends on the result.
pub trait Localizer {
    /// Translates `key` for `language`, substituting `{name}` placeholders
    /// from `params`.
    fn t(&self, key: &str, language: &str, params: &[(&str, &str)]) -> String;
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl English {
    fn template(key: &str) -> Option<&'static str> {
        Some(match key {
            "tictac.current_player" => "Current player: {player}{additional_info}",
            "tictac.winner" => "{winner} won!",
            "tictac.draw" => "It's a draw!",
            "tictac.stop.stopped" => "The game was stopped.",
            "tictac.main-board" => "Main board:",
            "tictac.full-board" => "Full board:",
            "tictac.selected_subboard" => "\nSelected subboard: {subboard}",
            "tictac.subboard_not_selected" => "\nSelect a subboard first",
            _ => return None,
        })
    }
}

impl Localizer for English {
    fn t(&self, key: &str, language: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = Self::template(key) else {
            error!(key, language, "No translation");
            return key.to_string();
        };
        params
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}

/// Wraps text in a fenced block so chat clients keep the columns aligned.
pub fn codeblock(text: &str) -> String {
    format!("```\n\u{200b}{}```", text)
}

/// Renders a grid with column letters on top and row numbers on the left.
///
/// Squares listed in `fading` get [`FADE_MARK`] appended.
pub fn grid_text(grid: &Grid, fading: &[Coord]) -> String {
    let size = grid.size();
    let gutter = size.to_string().len();

    let letters: Vec<String> = (0..size).map(|c| column_letter(c).to_string()).collect();
    let mut text = format!("{}{}\n", " ".repeat(gutter + 1), letters.join(" "));

    for (row, squares) in grid.rows().enumerate() {
        let cells: Vec<String> = squares
            .iter()
            .enumerate()
            .map(|(col, square)| {
                let mut cell = square.glyph().to_string();
                if fading.contains(&Coord::new(row, col)) {
                    cell.push(FADE_MARK);
                }
                cell
            })
            .collect();
        text.push_str(&format!("{:>gutter$} {}\n", row + 1, cells.join(" ")));
    }
    text
}

/// Marks every visible glyph with [`FADE_MARK`].
pub fn mark_fading(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            if c.is_whitespace() {
                vec![c]
            } else {
                vec![c, FADE_MARK]
            }
        })
        .collect()
}
