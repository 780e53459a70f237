//! Tictac - terminal front-end
//!
//! Plays one game on stdin/stdout through the same session layer a chat
//! bot would use.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tictac_engine::{is_rated, GameConfig, Mode, SessionManager};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

/// Channel id used for the single terminal game.
const TERMINAL: &str = "terminal";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            size,
            win,
            fade,
            ultimate,
            ai_players,
            json,
            players,
        } => {
            let config = load_config(config, size, win, fade, ultimate)?;
            play(config, players, ai_players, json)
        }
        Command::StatsGate { size, win } => {
            let verdict = if is_rated(size, win) { "rated" } else { "unrated" };
            println!("{}", verdict);
            Ok(())
        }
    }
}

/// Reads the config file, if any, then applies command-line overrides.
fn load_config(
    path: Option<PathBuf>,
    size: Option<usize>,
    win: Option<usize>,
    fade: Option<usize>,
    ultimate: bool,
) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(size) = size {
        config = config.with_size(size);
    }
    if let Some(win) = win {
        config = config.with_win_length(win);
    }
    if let Some(fade) = fade {
        config = config.with_fade_threshold(fade);
    }
    if ultimate {
        config = config.with_mode(Mode::Ultimate);
    }
    Ok(config)
}

/// Runs the game loop: one move per line, `stop` to give up.
#[instrument(skip(config))]
fn play(config: GameConfig, players: Vec<String>, ai_players: Vec<String>, json: bool) -> Result<()> {
    let manager = SessionManager::new();
    let board = manager.start(TERMINAL.to_string(), players.clone(), &config, &ai_players)?;
    println!("{}", board);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading move")?;
        let Some(session) = manager.get(TERMINAL) else {
            break;
        };
        let current = session.game.current_player().to_string();

        if line.trim().eq_ignore_ascii_case("stop") {
            println!("{}", manager.stop(TERMINAL, &current, false)?);
            return Ok(());
        }

        match manager.handle_message(TERMINAL, &current, &line)? {
            Some(reply) => {
                println!("{}", reply.text);
                if let Some(outcome) = reply.outcome {
                    info!(%outcome, "Game over");
                    if json {
                        println!("{}", serde_json::to_string_pretty(&outcome)?);
                    }
                    for player in &players {
                        println!("{}: {}", player, manager.stats().get(player));
                    }
                    return Ok(());
                }
            }
            None => {
                warn!(input = %line, "Rejected move");
                writeln!(stdout, "Not a move: {}", line.trim())?;
            }
        }
        stdout.flush()?;
    }

    // input closed mid-game
    if let Some(session) = manager.get(TERMINAL) {
        let current = session.game.current_player().to_string();
        println!("{}", manager.stop(TERMINAL, &current, false)?);
    }
    Ok(())
}
