//! Single N-in-a-row board: turn order, fading moves and the AI chain.

use super::invariants::assert_invariants;
use super::phases::{GameStatus, Outcome};
use super::position::parse_cell;
use super::render::{codeblock, grid_text, English, Localizer};
use super::rules::{is_draw, is_full, ScoreSet};
use super::types::{Coord, Grid, Sign, Square, MAX_FIELD_SIZE, SIGNS};
use crate::error::GameError;
use std::collections::VecDeque;
use tracing::{debug, info, instrument};

/// Optional game settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameOptions {
    /// Moves kept per sign before the oldest fades. `0` disables fading.
    pub fade_threshold: usize,
    /// Players whose moves are picked by the heuristic opponent.
    pub ai_players: Vec<String>,
    /// Language passed to the localizer when rendering.
    pub language: String,
}

impl GameOptions {
    /// Sets the fade threshold.
    pub fn with_fade_threshold(mut self, fade_threshold: usize) -> Self {
        self.fade_threshold = fade_threshold;
        self
    }

    /// Adds a computer-controlled player.
    pub fn with_ai_player(mut self, player: impl Into<String>) -> Self {
        self.ai_players.push(player.into());
        self
    }

    /// Sets the rendering language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Checks construction parameters shared by plain and nested boards.
pub(super) fn validate(size: usize, win_length: usize, players: &[String]) -> Result<(), GameError> {
    if size < 1 {
        return Err(GameError::InvalidSize(size));
    }
    if size > MAX_FIELD_SIZE {
        return Err(GameError::BoardTooLarge {
            size,
            max: MAX_FIELD_SIZE,
        });
    }
    if win_length < 1 {
        return Err(GameError::InvalidWinLength(win_length));
    }
    if players.is_empty() {
        return Err(GameError::NoPlayers);
    }
    if players.len() > SIGNS.len() {
        return Err(GameError::TooManyPlayers {
            players: players.len(),
            signs: SIGNS.len(),
        });
    }
    Ok(())
}

/// One N-in-a-row game on a `size × size` board.
///
/// Player `i` plays sign `i` of the alphabet (`x`, `o`, `a`, ...). The
/// only mutation is [`Game::apply_move`]; once won, drawn or stopped the
/// game ignores every further move.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    players: Vec<String>,
    ai_players: Vec<String>,
    language: String,
    win_length: usize,
    fade_threshold: usize,
    current: usize,
    history: Vec<VecDeque<Coord>>,
    winner: Option<String>,
    winning_line: Vec<Coord>,
    draw: bool,
    stopped: bool,
}

impl Game {
    /// Creates a new game.
    ///
    /// A `win_length` larger than `size` is accepted; nobody can win such
    /// a game.
    ///
    /// # Errors
    ///
    /// Fails if `size` or `win_length` is zero, `size` exceeds 26, or there
    /// are no players or more players than signs.
    #[instrument(skip(players, options), fields(players = players.len()))]
    pub fn new(
        size: usize,
        win_length: usize,
        players: Vec<String>,
        options: GameOptions,
    ) -> Result<Self, GameError> {
        validate(size, win_length, &players)?;
        Ok(Self {
            grid: Grid::new(size),
            history: vec![VecDeque::new(); players.len()],
            players,
            ai_players: options.ai_players,
            language: options.language,
            win_length,
            fade_threshold: options.fade_threshold,
            current: 0,
            winner: None,
            winning_line: Vec::new(),
            draw: false,
            stopped: false,
        })
    }

    /// Applies a move typed as a cell reference for the current player.
    ///
    /// Returns `false` without touching the game when the text does not
    /// parse, names a square off the board or already taken, or the game is
    /// over. If the next player is computer-controlled its reply is played
    /// inside the same call.
    #[instrument(skip(self), fields(player = %self.current_player()))]
    pub fn apply_move(&mut self, input: &str) -> bool {
        if self.is_finished() {
            debug!("Move on finished game ignored");
            return false;
        }
        match parse_cell(input, self.size()) {
            Some(coord) => self.place(coord),
            None => {
                debug!("Unparseable move ignored");
                false
            }
        }
    }

    /// Plays `coord` for the current player, then any AI replies.
    pub fn place(&mut self, coord: Coord) -> bool {
        if self.is_finished() || !self.grid.is_empty(coord) {
            return false;
        }

        let mut coord = coord;
        // each player moves at most once per call
        for _ in 0..self.players.len() {
            self.put(coord);
            if self.is_finished() || !self.is_ai_turn() {
                break;
            }
            let fading = self.fading();
            let scores = ScoreSet::new(&self.grid, self.win_length, &fading);
            coord = scores
                .select_move(self.current_sign())
                .expect("no free square for an active game; win/draw checks must run first");
            debug!(player = %self.current_player(), ?coord, "AI move");
        }
        true
    }

    /// Places one mark without AI follow-up. The square must be empty.
    ///
    /// Returns the square cleared by fading, if any.
    pub(super) fn put(&mut self, coord: Coord) -> Option<Coord> {
        let sign = self.current_sign();
        let history = &mut self.history[self.current];

        let evicted = if self.fade_threshold > 0 && history.len() >= self.fade_threshold {
            history.pop_front()
        } else {
            None
        };
        if let Some(old) = evicted {
            debug!(?old, %sign, "Move faded");
            self.grid.set(old, Square::Empty);
        }

        self.grid.set(coord, Square::Occupied(sign));
        self.history[self.current].push_back(coord);
        self.current = (self.current + 1) % self.players.len();

        self.update_status();
        assert_invariants(self);
        evicted
    }

    fn update_status(&mut self) {
        let win = ScoreSet::new(&self.grid, self.win_length, &[])
            .winning_line()
            .and_then(|line| line.symbol().map(|sign| (sign, line.window().to_vec())));

        if let Some((sign, cells)) = win {
            for coord in &cells {
                self.grid.set(*coord, Square::Highlighted(sign));
            }
            let winner = self.players[sign.index()].clone();
            info!(%winner, "Game won");
            self.winner = Some(winner);
            self.winning_line = cells;
        } else if is_full(&self.grid) {
            info!("Game drawn");
            self.draw = true;
        }
    }

    /// Marks a square as a drawn placeholder; a full board draws.
    pub(super) fn block(&mut self, coord: Coord) {
        self.grid.set(coord, Square::Blocked);
        if is_draw(&self.grid, self.win_length) {
            info!("Game drawn");
            self.draw = true;
        }
        assert_invariants(self);
    }

    /// Cancels the game. No-op once it is already won or drawn.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        if self.winner.is_none() && !self.draw {
            self.stopped = true;
        }
    }

    /// Squares that disappear on their owner's next move.
    pub fn fading(&self) -> Vec<Coord> {
        if self.fade_threshold == 0 {
            return Vec::new();
        }
        self.history
            .iter()
            .filter(|h| h.len() == self.fade_threshold)
            .filter_map(|h| h.front().copied())
            .collect()
    }

    fn is_ai_turn(&self) -> bool {
        self.ai_players.contains(&self.players[self.current])
    }

    /// Player to move next.
    pub fn current_player(&self) -> &str {
        &self.players[self.current]
    }

    /// Index of the player to move next.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub(super) fn set_current_index(&mut self, index: usize) {
        self.current = index % self.players.len();
    }

    /// Sign of the player to move next.
    pub fn current_sign(&self) -> Sign {
        Sign::from_index(self.current).expect("player count is bounded by the sign alphabet")
    }

    /// Sign assigned to each player, in turn order.
    pub fn signs(&self) -> Vec<Sign> {
        (0..self.players.len()).filter_map(Sign::from_index).collect()
    }

    /// The winner, once there is one.
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Squares of the winning line, empty until someone wins.
    pub fn winning_line(&self) -> &[Coord] {
        &self.winning_line
    }

    /// True when the board filled up with no winner.
    pub fn is_draw(&self) -> bool {
        self.draw
    }

    /// True once [`Game::stop`] cancelled the game.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// True when won, drawn or stopped.
    pub fn is_finished(&self) -> bool {
        self.winner.is_some() || self.draw || self.stopped
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        match (&self.winner, self.draw, self.stopped) {
            (Some(winner), _, _) => GameStatus::Won(winner.clone()),
            (None, true, _) => GameStatus::Draw,
            (None, false, true) => GameStatus::Stopped,
            (None, false, false) => GameStatus::InProgress,
        }
    }

    /// Outcome event for a game finished by play; `None` while in progress
    /// or after a stop.
    pub fn outcome(&self) -> Option<Outcome> {
        (self.winner.is_some() || self.draw).then(|| {
            Outcome::new(
                self.winner.clone(),
                self.players.clone(),
                self.win_length,
                self.size(),
            )
        })
    }

    /// The board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(super) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Board side length.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Run length needed to win.
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Moves kept per sign, `0` when fading is off.
    pub fn fade_threshold(&self) -> usize {
        self.fade_threshold
    }

    /// Players in turn order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Computer-controlled players.
    pub fn ai_players(&self) -> &[String] {
        &self.ai_players
    }

    /// Rendering language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Placed squares of the player with `sign`, oldest first.
    pub fn history(&self, sign: Sign) -> Option<&VecDeque<Coord>> {
        self.history.get(sign.index())
    }

    /// The grid as text, fading squares marked.
    pub fn board_text(&self) -> String {
        grid_text(&self.grid, &self.fading())
    }

    /// Status line: outcome, or whose turn it is followed by `suffix`.
    pub(super) fn signature(&self, localizer: &dyn Localizer, suffix: &str) -> String {
        let language = self.language.as_str();
        if self.draw {
            localizer.t("tictac.draw", language, &[])
        } else if let Some(winner) = &self.winner {
            localizer.t("tictac.winner", language, &[("winner", winner)])
        } else if self.stopped {
            localizer.t("tictac.stop.stopped", language, &[])
        } else {
            localizer.t(
                "tictac.current_player",
                language,
                &[("player", self.current_player()), ("additional_info", suffix)],
            )
        }
    }

    /// Full message: players, board and status line.
    pub fn render(&self, localizer: &dyn Localizer) -> String {
        format!(
            "{}\n{}\n{}",
            self.players.join(" vs "),
            codeblock(&self.board_text()),
            self.signature(localizer, "")
        )
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(&English))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn game(size: usize, win: usize) -> Game {
        Game::new(size, win, players(&["A", "B"]), GameOptions::default()).unwrap()
    }

    #[test]
    fn test_turn_alternates_across_three_players() {
        let mut game = Game::new(5, 4, players(&["A", "B", "C"]), GameOptions::default()).unwrap();
        for (i, cell) in ["A1", "B1", "C1", "D1", "E1"].iter().enumerate() {
            let before = game.current_index();
            assert!(game.apply_move(cell));
            assert_eq!(game.current_index(), (before + 1) % 3, "after move {}", i);
        }
    }

    #[test]
    fn test_occupied_square_is_no_change() {
        let mut game = game(3, 3);
        assert!(game.apply_move("B2"));
        assert!(!game.apply_move("b2"));
        assert_eq!(game.current_player(), "B");
    }

    #[test]
    fn test_fade_evicts_oldest_before_placing() {
        let mut game = Game::new(
            4,
            4,
            players(&["A", "B"]),
            GameOptions::default().with_fade_threshold(2),
        )
        .unwrap();
        for cell in ["A1", "D4", "B1", "D3"] {
            assert!(game.apply_move(cell));
        }
        assert_eq!(game.fading(), vec![Coord::new(0, 0), Coord::new(3, 3)]);

        assert!(game.apply_move("C2"));
        assert!(game.grid().is_empty(Coord::new(0, 0)));
        let x = game.signs()[0];
        assert_eq!(
            game.history(x).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![Coord::new(0, 1), Coord::new(1, 2)]
        );
    }

    #[test]
    fn test_fading_square_can_be_replayed() {
        let mut game = Game::new(
            3,
            3,
            players(&["A", "B"]),
            GameOptions::default().with_fade_threshold(1),
        )
        .unwrap();
        assert!(game.apply_move("A1"));
        assert!(game.apply_move("C3"));
        // A's only move fades as A plays again, freeing A1 for B
        assert!(game.apply_move("B2"));
        assert!(game.grid().is_empty(Coord::new(0, 0)));
        assert!(game.apply_move("A1"));
    }

    #[test]
    fn test_ai_replies_in_same_call() {
        let mut game = Game::new(
            3,
            3,
            players(&["me", "bot"]),
            GameOptions::default().with_ai_player("bot"),
        )
        .unwrap();
        assert!(game.apply_move("A1"));
        assert_eq!(game.current_player(), "me");
        // fresh board for `o`: center first
        assert_eq!(
            game.grid().get(Coord::new(1, 1)),
            Some(Square::Occupied(game.signs()[1]))
        );
    }

    #[test]
    fn test_consecutive_ai_players_chain() {
        let mut game = Game::new(
            5,
            5,
            players(&["me", "bot1", "bot2"]),
            GameOptions::default().with_ai_player("bot1").with_ai_player("bot2"),
        )
        .unwrap();
        assert!(game.apply_move("A1"));
        assert_eq!(game.current_player(), "me");
        let filled = game.grid().coords().filter(|c| !game.grid().is_empty(*c)).count();
        assert_eq!(filled, 3);
    }

    #[test]
    fn test_ai_blocks_human() {
        let mut game = Game::new(
            3,
            3,
            players(&["me", "bot"]),
            GameOptions::default().with_ai_player("bot"),
        )
        .unwrap();
        assert!(game.apply_move("A1")); // bot takes B2
        assert!(game.apply_move("B1")); // bot must block C1
        assert_eq!(
            game.grid().get(Coord::new(0, 2)),
            Some(Square::Occupied(game.signs()[1]))
        );
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_win_length_one_wins_immediately() {
        let mut game = game(2, 1);
        assert!(game.apply_move("A1"));
        assert_eq!(game.winner(), Some("A"));
        assert_eq!(game.winning_line(), &[Coord::new(0, 0)]);
    }

    #[test]
    fn test_oversized_win_length_draws() {
        let mut game = game(2, 3);
        for cell in ["A1", "B1", "A2", "B2"] {
            assert!(game.apply_move(cell));
        }
        assert!(game.is_draw());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_drawn_game_ignores_moves() {
        let mut game = game(3, 3);
        for cell in ["A1", "B1", "C1", "B2", "A2", "C2", "B3", "A3", "C3"] {
            assert!(game.apply_move(cell));
        }
        assert!(game.is_draw());
        let grid = game.grid().clone();
        let current = game.current_index();

        assert!(!game.apply_move("A1"));
        assert!(!game.apply_move("D4"));
        assert_eq!(game.grid(), &grid);
        assert_eq!(game.current_index(), current);
        assert!(game.is_draw());
    }

    #[test]
    fn test_blocked_squares_fill_board_to_draw() {
        let mut game = game(2, 2);
        game.block(Coord::new(0, 0));
        game.block(Coord::new(0, 1));
        game.block(Coord::new(1, 0));
        assert!(!game.is_draw());
        game.block(Coord::new(1, 1));
        assert!(game.is_draw());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut game = game(3, 3);
        game.stop();
        assert!(game.is_stopped());
        assert_eq!(game.status(), GameStatus::Stopped);
        assert!(!game.apply_move("A1"));
        assert!(game.outcome().is_none());
    }

    #[test]
    fn test_stop_after_win_is_noop() {
        let mut game = game(3, 3);
        for cell in ["A1", "B1", "A2", "B2", "A3"] {
            game.apply_move(cell);
        }
        game.stop();
        assert!(!game.is_stopped());
        assert_eq!(game.status(), GameStatus::Won("A".to_string()));
    }

    #[test]
    fn test_construction_errors() {
        let too_many: Vec<String> = (0..27).map(|i| i.to_string()).collect();
        assert!(matches!(
            Game::new(3, 3, too_many, GameOptions::default()),
            Err(GameError::TooManyPlayers { players: 27, signs: 26 })
        ));
        assert_eq!(
            Game::new(0, 3, players(&["A"]), GameOptions::default()).unwrap_err(),
            GameError::InvalidSize(0)
        );
        assert_eq!(
            Game::new(3, 0, players(&["A"]), GameOptions::default()).unwrap_err(),
            GameError::InvalidWinLength(0)
        );
        assert_eq!(
            Game::new(3, 3, Vec::new(), GameOptions::default()).unwrap_err(),
            GameError::NoPlayers
        );
        assert!(Game::new(3, 5, players(&["A", "B"]), GameOptions::default()).is_ok());
    }

    #[test]
    fn test_render_in_progress() {
        let mut game = game(3, 3);
        game.apply_move("B2");
        let text = game.to_string();
        assert!(text.starts_with("A vs B\n```\n"));
        assert!(text.contains("2 _ x _"));
        assert!(text.ends_with("Current player: B"));
    }
}
