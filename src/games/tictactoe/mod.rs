//! N-in-a-row: plain boards, nested boards, fading moves and a heuristic
//! computer opponent.

mod game;
mod invariants;
mod phases;
mod position;
mod render;
mod rules;
mod types;
mod ultimate;

pub use game::{Game, GameOptions};
pub use phases::{GameStatus, Outcome};
pub use position::{cell_reference, column_letter, parse_cell};
pub use render::{codeblock, grid_text, mark_fading, English, Localizer, FADE_MARK};
pub use rules::{is_draw, is_full, Direction, LineScan, ScoreSet};
pub use types::{
    Coord, Grid, Sign, Square, BLOCKED_GLYPH, EMPTY_GLYPH, MAX_FIELD_SIZE, MAX_PLAYERS, SIGNS,
};
pub use ultimate::UltimateGame;
