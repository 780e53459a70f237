//! Tictac engine - N-in-a-row with nested boards and fading moves
//!
//! This library provides the game engine behind a chat tic-tac-toe bot.
//!
//! # Architecture
//!
//! - **Games**: plain boards of any size and win length, Ultimate boards of
//!   boards, fading moves and a heuristic computer opponent
//! - **Session**: one game per channel, message dispatch and tallies
//! - **Config**: TOML game settings
//!
//! # Example
//!
//! ```
//! use tictac_engine::{Game, GameOptions};
//!
//! let players = vec!["ann".to_string(), "bob".to_string()];
//! let mut game = Game::new(3, 3, players, GameOptions::default()).unwrap();
//! assert!(game.apply_move("B2"));
//! assert_eq!(game.current_player(), "bob");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod error;
mod games;
mod session;
mod stats;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, Mode};

// Crate-level exports - Errors
pub use error::{GameError, SessionError};

// Crate-level exports - Session management
pub use session::{ChannelId, GameSession, MoveReply, SessionGame, SessionManager, MAX_MESSAGE_LEN};

// Crate-level exports - Tallies
pub use stats::{is_rated, InMemoryStats, PlayerStats, StatsStore};

// Crate-level exports - Game types
pub use games::tictactoe::{
    cell_reference, codeblock, column_letter, grid_text, is_draw, is_full, mark_fading,
    parse_cell, Coord, Direction, English, Game, GameOptions, GameStatus, Grid, LineScan,
    Localizer, Outcome, ScoreSet, Sign, Square, UltimateGame, BLOCKED_GLYPH, EMPTY_GLYPH,
    FADE_MARK, MAX_FIELD_SIZE, MAX_PLAYERS, SIGNS,
};
