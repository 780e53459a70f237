//! Error types for game construction and session dispatch.

use derive_more::{Display, Error, From};

/// Error that can occur when constructing a game.
///
/// Only construction can fail: once a game exists, malformed or illegal
/// moves are reported as "no change" rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// More players than available signs.
    #[display("Too many players: {} for {} signs", players, signs)]
    TooManyPlayers {
        /// Number of players requested.
        players: usize,
        /// Number of available signs.
        signs: usize,
    },

    /// A game needs at least one player.
    #[display("No players given")]
    NoPlayers,

    /// Board size must be at least 1.
    #[display("Invalid board size {}", _0)]
    InvalidSize(#[error(not(source))] usize),

    /// Board size exceeds the available column letters.
    #[display("Board size {} exceeds maximum {}", size, max)]
    BoardTooLarge {
        /// Requested size.
        size: usize,
        /// Largest supported size.
        max: usize,
    },

    /// Win length must be at least 1.
    #[display("Invalid win length {}", _0)]
    InvalidWinLength(#[error(not(source))] usize),
}

/// Error returned by the session dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// A game is already running in this channel.
    #[display("A game is already running in this channel")]
    AlreadyPlaying,

    /// No opponent was named.
    #[display("Missing opponent")]
    MissingOpponent,

    /// Size or win length below 1.
    #[display("Board size and win length must be positive")]
    NegativeSpecs,

    /// Board too large to render.
    #[display("Board size is limited to {}", _0)]
    FieldTooBig(#[error(not(source))] usize),

    /// Win length larger than the board.
    #[display("Win length cannot exceed board size")]
    LineTooBig,

    /// More players than signs.
    #[display("Too many players, at most {} allowed", _0)]
    TooManyPlayers(#[error(not(source))] usize),

    /// The rendered board does not fit in one chat message.
    #[display("Board does not fit in a message of {} characters", _0)]
    MessageTooBig(#[error(not(source))] usize),

    /// No game is running in this channel.
    #[display("No game is running in this channel")]
    NoSession,

    /// Caller is not taking part in the game.
    #[display("{} is not playing in this game", _0)]
    NotAParticipant(#[error(not(source))] String),

    /// The game itself refused construction.
    #[display("{}", _0)]
    #[from]
    Game(GameError),
}
