//! Game sessions keyed by chat channel.

use crate::config::{GameConfig, Mode};
use crate::error::{GameError, SessionError};
use crate::games::tictactoe::{
    English, Game, GameOptions, GameStatus, Grid, Localizer, Outcome, UltimateGame,
    MAX_FIELD_SIZE, MAX_PLAYERS,
};
use crate::stats::{is_rated, InMemoryStats, StatsStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a chat channel.
pub type ChannelId = String;

/// Longest board message a chat client accepts.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// A running game of either variant.
#[derive(Debug, Clone)]
pub enum SessionGame {
    /// One board.
    Classic(Game),
    /// A board of boards.
    Ultimate(UltimateGame),
}

impl SessionGame {
    /// Creates a game of the given variant.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Game::new`].
    pub fn new(
        mode: Mode,
        size: usize,
        win_length: usize,
        players: Vec<String>,
        options: GameOptions,
    ) -> Result<Self, GameError> {
        Ok(match mode {
            Mode::Classic => Self::Classic(Game::new(size, win_length, players, options)?),
            Mode::Ultimate => {
                Self::Ultimate(UltimateGame::new(size, win_length, players, options)?)
            }
        })
    }

    /// Applies a move for the current player; `false` when nothing changed.
    pub fn apply_move(&mut self, input: &str) -> bool {
        match self {
            Self::Classic(game) => game.apply_move(input),
            Self::Ultimate(game) => game.apply_move(input),
        }
    }

    /// Cancels the game.
    pub fn stop(&mut self) {
        match self {
            Self::Classic(game) => game.stop(),
            Self::Ultimate(game) => game.stop(),
        }
    }

    /// Player to move next.
    pub fn current_player(&self) -> &str {
        match self {
            Self::Classic(game) => game.current_player(),
            Self::Ultimate(game) => game.current_player(),
        }
    }

    /// Players in turn order.
    pub fn players(&self) -> &[String] {
        match self {
            Self::Classic(game) => game.players(),
            Self::Ultimate(game) => game.players(),
        }
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        match self {
            Self::Classic(game) => game.status(),
            Self::Ultimate(game) => game.status(),
        }
    }

    /// True when won, drawn or stopped.
    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    /// Outcome event for a game finished by play.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Classic(game) => game.outcome(),
            Self::Ultimate(game) => game.outcome(),
        }
    }

    /// Grid the current player acts on.
    pub fn active_grid(&self) -> &Grid {
        match self {
            Self::Classic(game) => game.grid(),
            Self::Ultimate(game) => game.active_grid(),
        }
    }

    /// Full message text.
    pub fn render(&self, localizer: &dyn Localizer) -> String {
        match self {
            Self::Classic(game) => game.render(localizer),
            Self::Ultimate(game) => game.render(localizer),
        }
    }
}

/// A game bound to a channel.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Channel the game runs in.
    pub channel: ChannelId,
    /// The game state.
    pub game: SessionGame,
}

/// Result of a chat message that changed a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReply {
    /// The new board message.
    pub text: String,
    /// Status after the move.
    pub status: GameStatus,
    /// Set once the game ended by play; the session is gone by then.
    pub outcome: Option<Outcome>,
}

/// Manages one game per channel.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<ChannelId, GameSession>>>,
    stats: Arc<dyn StatsStore>,
    localizer: Arc<dyn Localizer + Send + Sync>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("sessions", &self.sessions)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager with in-memory tallies and English text.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::with_stats(Arc::new(InMemoryStats::new()))
    }

    /// Creates a session manager recording tallies in `stats`.
    pub fn with_stats(stats: Arc<dyn StatsStore>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            stats,
            localizer: Arc::new(English),
        }
    }

    /// Replaces the localizer used for every rendered message.
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer + Send + Sync>) -> Self {
        self.localizer = localizer;
        self
    }

    /// Tally storage.
    pub fn stats(&self) -> &Arc<dyn StatsStore> {
        &self.stats
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChannelId, GameSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a game in `channel`. `players[0]` is the player who asked.
    ///
    /// Returns the first rendered board.
    ///
    /// # Errors
    ///
    /// Rejects a busy channel, a lone player, a size or win length below 1,
    /// a board larger than 26, a win length larger than the board, more
    /// players than signs and a board too large to send.
    #[instrument(skip(self, config, ai_players), fields(size = config.size(), win_length = config.win_length()))]
    pub fn start(
        &self,
        channel: ChannelId,
        players: Vec<String>,
        config: &GameConfig,
        ai_players: &[String],
    ) -> Result<String, SessionError> {
        let mut sessions = self.lock();
        let (size, win_length) = (*config.size(), *config.win_length());

        if sessions.contains_key(&channel) {
            warn!(%channel, "Game already running");
            return Err(SessionError::AlreadyPlaying);
        }
        if players.len() < 2 {
            return Err(SessionError::MissingOpponent);
        }
        if size < 1 || win_length < 1 {
            return Err(SessionError::NegativeSpecs);
        }
        if size > MAX_FIELD_SIZE {
            return Err(SessionError::FieldTooBig(MAX_FIELD_SIZE));
        }
        if win_length > size {
            return Err(SessionError::LineTooBig);
        }
        if players.len() > MAX_PLAYERS {
            return Err(SessionError::TooManyPlayers(MAX_PLAYERS));
        }

        let game = SessionGame::new(
            *config.mode(),
            size,
            win_length,
            players,
            config.options(ai_players),
        )?;
        let text = game.render(self.localizer.as_ref());
        if text.chars().count() > MAX_MESSAGE_LEN {
            warn!(%channel, length = text.chars().count(), "Board too large to send");
            return Err(SessionError::MessageTooBig(MAX_MESSAGE_LEN));
        }

        info!(%channel, mode = %config.mode(), "Game started");
        sessions.insert(channel.clone(), GameSession { channel, game });
        Ok(text)
    }

    /// Feeds a chat message from `author` to the game in `channel`.
    ///
    /// Only the current player's messages are tried as moves. Returns the
    /// new board when the message changed the game; finished games are
    /// removed and, if rated, tallied.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSession`] when no game runs in `channel`.
    #[instrument(skip(self, text))]
    pub fn handle_message(
        &self,
        channel: &str,
        author: &str,
        text: &str,
    ) -> Result<Option<MoveReply>, SessionError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(channel).ok_or(SessionError::NoSession)?;

        if session.game.current_player() != author {
            debug!(current = %session.game.current_player(), "Not this author's turn");
            return Ok(None);
        }
        if !session.game.apply_move(text) {
            debug!("Message is not a move");
            return Ok(None);
        }

        let reply = MoveReply {
            text: session.game.render(self.localizer.as_ref()),
            status: session.game.status(),
            outcome: session.game.outcome(),
        };
        if reply.status.is_terminal() {
            if let Some(session) = sessions.remove(channel) {
                self.finish(&session);
            }
        }
        Ok(Some(reply))
    }

    /// Stops the game in `channel` on behalf of `caller`.
    ///
    /// Only participants may stop a game unless `force` is set (a
    /// moderator). Returns the final board.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoSession`] or [`SessionError::NotAParticipant`].
    #[instrument(skip(self))]
    pub fn stop(&self, channel: &str, caller: &str, force: bool) -> Result<String, SessionError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(channel).ok_or(SessionError::NoSession)?;

        if !force && !session.game.players().iter().any(|p| p == caller) {
            warn!(caller, "Stop refused");
            return Err(SessionError::NotAParticipant(caller.to_string()));
        }

        session.game.stop();
        let rendered = session.game.render(self.localizer.as_ref());
        if let Some(session) = sessions.remove(channel) {
            self.finish(&session);
        }
        Ok(rendered)
    }

    fn finish(&self, session: &GameSession) {
        let Some(outcome) = session.game.outcome() else {
            info!(channel = %session.channel, "Game stopped");
            return;
        };
        info!(channel = %session.channel, %outcome, "Game finished");
        if is_rated(*outcome.size(), *outcome.win_length()) {
            self.stats
                .record(outcome.players(), outcome.winner().as_deref());
        } else {
            debug!("Unrated game, tallies unchanged");
        }
    }

    /// Gets a snapshot of the session in `channel`.
    pub fn get(&self, channel: &str) -> Option<GameSession> {
        self.lock().get(channel).cloned()
    }

    /// Lists channels with a running game.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<ChannelId> {
        let ids: Vec<_> = self.lock().keys().cloned().collect();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
