//! Game rules for N-in-a-row boards.
//!
//! This module contains pure functions over a [`Grid`](super::Grid):
//! line scanning, winner lookup and the heuristic opponent. Rules are
//! separated from board storage so plain and nested boards share them.

pub mod draw;
pub mod line;
pub mod scores;

pub use draw::{is_draw, is_full};
pub use line::{Direction, LineScan};
pub use scores::ScoreSet;
