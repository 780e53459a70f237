//! Per-player win/loss tallies.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};

/// Whether a finished game with these parameters counts towards tallies.
///
/// Small-window games are trivially forced, so only `3`-in-a-row on a
/// `3×3` board or runs of `4` and more are rated.
pub fn is_rated(size: usize, win_length: usize) -> bool {
    win_length >= 4 || (win_length == 3 && size == 3)
}

/// Tally for one player.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters,
)]
pub struct PlayerStats {
    /// Rated games finished.
    total: u64,
    /// Rated games won.
    won: u64,
}

impl PlayerStats {
    /// Creates a tally.
    pub fn new(total: u64, won: u64) -> Self {
        Self { total, won }
    }

    /// Win rate in whole percent. A player with no games reports 0.
    pub fn percent(&self) -> u64 {
        let total = self.total.max(1);
        ((self.won as f64 / total as f64) * 100.0).round_ties_even() as u64
    }
}

impl std::fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games, {} won ({}%)",
            self.total,
            self.won,
            self.percent()
        )
    }
}

/// Storage for tallies.
pub trait StatsStore: Send + Sync + std::fmt::Debug {
    /// Counts a game for every player and a win for `winner`.
    fn record(&self, players: &[String], winner: Option<&str>);

    /// Tally for `player`; zero when unknown.
    fn get(&self, player: &str) -> PlayerStats;
}

/// Process-local tallies.
#[derive(Debug, Default)]
pub struct InMemoryStats {
    tallies: Mutex<HashMap<String, PlayerStats>>,
}

impl InMemoryStats {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for InMemoryStats {
    #[instrument(skip(self))]
    fn record(&self, players: &[String], winner: Option<&str>) {
        let mut tallies = self.tallies.lock().unwrap_or_else(PoisonError::into_inner);
        for player in players {
            let entry = tallies.entry(player.clone()).or_default();
            entry.total += 1;
            if winner == Some(player.as_str()) {
                entry.won += 1;
            }
        }
        debug!(players = players.len(), "Recorded game");
    }

    fn get(&self, player: &str) -> PlayerStats {
        self.tallies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(player)
            .copied()
            .unwrap_or_default()
    }
}
