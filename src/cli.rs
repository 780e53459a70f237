//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tictac - N-in-a-row in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "N-in-a-row with nested boards, fading moves and a computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game on stdin/stdout, one move per line
    Play {
        /// TOML file with game settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Board side length
        #[arg(long)]
        size: Option<usize>,

        /// Run length needed to win
        #[arg(long)]
        win: Option<usize>,

        /// Moves kept per player before the oldest fades (0 disables)
        #[arg(long)]
        fade: Option<usize>,

        /// Play on a board of boards
        #[arg(long)]
        ultimate: bool,

        /// Player controlled by the computer (repeatable, must also be listed as a player)
        #[arg(long = "ai")]
        ai_players: Vec<String>,

        /// Print the outcome as JSON once the game ends
        #[arg(long)]
        json: bool,

        /// Player names in turn order
        #[arg(required = true, num_args = 2..)]
        players: Vec<String>,
    },

    /// Tell whether a finished game with these settings would be rated
    StatsGate {
        /// Board side length
        #[arg(long)]
        size: usize,

        /// Run length needed to win
        #[arg(long)]
        win: usize,
    },
}
