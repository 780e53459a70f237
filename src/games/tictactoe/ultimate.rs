//! Nested boards: a meta-board whose squares are whole sub-games.

use super::game::{Game, GameOptions};
use super::phases::{GameStatus, Outcome};
use super::position::{cell_reference, column_letter, parse_cell};
use super::render::{codeblock, mark_fading, English, Localizer};
use super::types::{Coord, Grid};
use crate::error::GameError;
use tracing::{debug, info, instrument};

/// Ultimate N-in-a-row.
///
/// Every square of the meta-board holds an independent sub-game with the
/// same size, win length and players. A sub-game's winner claims the
/// matching meta square; a drawn sub-game leaves a placeholder that fills
/// the meta-board but never counts towards a line. The square a move lands
/// on picks the sub-game the next player must use, unless that sub-game is
/// already over.
///
/// There are no computer players in this mode.
#[derive(Debug, Clone)]
pub struct UltimateGame {
    meta: Game,
    subboards: Vec<Game>,
    selected: Option<Coord>,
    blank: Game,
}

impl UltimateGame {
    /// Creates a nested game. AI players in `options` are ignored.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Game::new`].
    #[instrument(skip(players, options), fields(players = players.len()))]
    pub fn new(
        size: usize,
        win_length: usize,
        players: Vec<String>,
        options: GameOptions,
    ) -> Result<Self, GameError> {
        let options = GameOptions {
            ai_players: Vec::new(),
            ..options
        };
        let meta = Game::new(size, win_length, players, options)?;
        let blank = meta.clone();
        Ok(Self {
            subboards: vec![blank.clone(); size * size],
            meta,
            selected: None,
            blank,
        })
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.size() + coord.col
    }

    /// Applies a move for the current player.
    ///
    /// With no sub-game selected the input is `<board> <cell>`, or just
    /// `<board>` to select it; a selection on its own counts as a change.
    /// With a sub-game selected the input is just `<cell>`. Anything that
    /// does not parse, or targets a finished sub-game or a taken square,
    /// leaves the game untouched.
    #[instrument(skip(self), fields(player = %self.current_player()))]
    pub fn apply_move(&mut self, input: &str) -> bool {
        if self.is_finished() {
            return false;
        }
        let size = self.size();

        let (board, cell_input, selection_changed) = match self.selected {
            Some(board) => (board, input, false),
            None => {
                let parts: Vec<&str> = input.split_whitespace().collect();
                if !(1..=2).contains(&parts.len()) {
                    return false;
                }
                let Some(board) = parse_cell(parts[0], size) else {
                    return false;
                };
                if self.is_closed(board) {
                    debug!(board = %cell_reference(board), "Finished sub-board rejected");
                    return false;
                }
                self.selected = Some(board);
                match parts.get(1) {
                    Some(cell) => (board, *cell, true),
                    None => return true,
                }
            }
        };

        let Some(cell) = parse_cell(cell_input, size) else {
            return selection_changed;
        };
        let index = self.index(board);
        let mover = self.meta.current_index();
        let sub = &mut self.subboards[index];
        if !sub.grid().is_empty(cell) {
            return selection_changed;
        }
        sub.set_current_index(mover);
        sub.put(cell);
        let next = sub.current_index();
        let (sub_won, sub_drawn) = (sub.winner().is_some(), sub.is_draw());

        if sub_drawn {
            info!(board = %cell_reference(board), "Sub-board drawn");
            self.meta.set_current_index(next);
            self.meta.block(board);
            if self.meta.is_draw() {
                self.selected = None;
                return true;
            }
        } else if sub_won {
            info!(board = %cell_reference(board), "Sub-board won");
            if let Some(faded) = self.meta.put(board) {
                // a faded meta square gives the whole sub-board back
                let index = self.index(faded);
                self.subboards[index] = self.blank.clone();
            }
        } else {
            self.meta.set_current_index(next);
        }

        self.select(cell);
        true
    }

    /// Forces the next move into the sub-board at `target`, or frees the
    /// choice if that sub-board is over. A single remaining open sub-board
    /// is always forced.
    fn select(&mut self, target: Coord) {
        if !self.is_closed(target) {
            self.selected = Some(target);
            return;
        }
        let mut open = self.meta.grid().coords().filter(|c| self.meta.grid().is_empty(*c));
        self.selected = match (open.next(), open.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        };
        debug!(selected = ?self.selected, "Selection freed");
    }

    fn is_closed(&self, board: Coord) -> bool {
        let sub = &self.subboards[self.index(board)];
        sub.winner().is_some() || sub.is_draw()
    }

    /// Cancels the game. No-op once it is already won or drawn.
    pub fn stop(&mut self) {
        self.meta.stop();
    }

    /// Sub-board the next move must use, if forced.
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Sub-game at a meta coordinate.
    pub fn subboard(&self, board: Coord) -> Option<&Game> {
        self.meta
            .grid()
            .contains(board)
            .then(|| &self.subboards[self.index(board)])
    }

    /// The meta-board game.
    pub fn meta(&self) -> &Game {
        &self.meta
    }

    /// Grid the current player acts on: the selected sub-board, else the
    /// meta-board.
    pub fn active_grid(&self) -> &Grid {
        match self.selected {
            Some(board) => self.subboards[self.index(board)].grid(),
            None => self.meta.grid(),
        }
    }

    /// Player to move next.
    pub fn current_player(&self) -> &str {
        self.meta.current_player()
    }

    /// The winner, once there is one.
    pub fn winner(&self) -> Option<&str> {
        self.meta.winner()
    }

    /// True when the meta-board filled up with no winner.
    pub fn is_draw(&self) -> bool {
        self.meta.is_draw()
    }

    /// True once stopped.
    pub fn is_stopped(&self) -> bool {
        self.meta.is_stopped()
    }

    /// True when won, drawn or stopped.
    pub fn is_finished(&self) -> bool {
        self.meta.is_finished()
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.meta.status()
    }

    /// Outcome event for a game finished by play.
    pub fn outcome(&self) -> Option<Outcome> {
        self.meta.outcome()
    }

    /// Side length of the meta-board and of every sub-board.
    pub fn size(&self) -> usize {
        self.meta.size()
    }

    /// Run length needed to win, on every level.
    pub fn win_length(&self) -> usize {
        self.meta.win_length()
    }

    /// Players in turn order.
    pub fn players(&self) -> &[String] {
        self.meta.players()
    }

    /// All sub-boards side by side, one band per meta row.
    pub fn board_text(&self) -> String {
        let size = self.size();
        let fading = self.meta.fading();
        let gutter = size.to_string().len();

        let mut bands: Vec<String> = Vec::with_capacity(size + 1);
        for row in 0..size {
            let mut columns: Vec<Vec<String>> = (0..size)
                .map(|col| {
                    let text = self.subboards[row * size + col].board_text();
                    let text = if fading.contains(&Coord::new(row, col)) {
                        mark_fading(&text)
                    } else {
                        text
                    };
                    text.lines().map(str::to_string).collect()
                })
                .collect();

            let height = columns[0].len();
            let mut numbers = vec![" ".repeat(gutter); height];
            numbers[(height - 1) / 2] = format!("{:>gutter$}", row + 1);
            columns.insert(0, numbers);

            let lines: Vec<String> = (0..height)
                .map(|i| {
                    columns
                        .iter()
                        .map(|c| c[i].as_str())
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .collect();
            bands.push(lines.join("\n"));
        }

        let first_line = bands[0].lines().next().unwrap_or_default().to_string();
        let header = first_line
            .split('|')
            .enumerate()
            .map(|(i, part)| {
                let width = part.chars().count();
                let label = match i {
                    0 => ' ',
                    _ => column_letter(i - 1),
                };
                format!("{:^width$}", label)
            })
            .collect::<Vec<_>>()
            .join("|");
        bands.insert(0, header);

        let rule = format!("\n{}\n", "-".repeat(first_line.chars().count()));
        format!("{}\n", bands.join(&rule))
    }

    /// Full message: players, meta-board, every sub-board and status line.
    pub fn render(&self, localizer: &dyn Localizer) -> String {
        let language = self.meta.language();
        let prefix = format!(
            "{}\n{}\n{}\n",
            localizer.t("tictac.main-board", language, &[]),
            codeblock(&self.meta.board_text()),
            localizer.t("tictac.full-board", language, &[])
        );
        let suffix = match self.selected {
            Some(board) => localizer.t(
                "tictac.selected_subboard",
                language,
                &[("subboard", &cell_reference(board))],
            ),
            None => localizer.t("tictac.subboard_not_selected", language, &[]),
        };
        format!(
            "{}\n{}{}\n{}",
            self.players().join(" vs "),
            prefix,
            codeblock(&self.board_text()),
            self.meta.signature(localizer, &suffix)
        )
    }
}

impl std::fmt::Display for UltimateGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(&English))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Sign, Square};

    fn ultimate(size: usize, win: usize, fade: usize) -> UltimateGame {
        UltimateGame::new(
            size,
            win,
            vec!["A".to_string(), "B".to_string()],
            GameOptions::default().with_fade_threshold(fade),
        )
        .unwrap()
    }

    fn x() -> Sign {
        Sign::from_index(0).unwrap()
    }

    /// Leaves a 3×3 sub-game one move (`C3` for `x`) away from a draw.
    fn almost_draw(sub: &mut Game) {
        for cell in ["A1", "B1", "C1", "B2", "A2", "C2", "B3", "A3"] {
            assert!(sub.apply_move(cell));
        }
    }

    #[test]
    fn test_board_and_cell_in_one_input() {
        let mut game = ultimate(3, 3, 0);
        assert!(game.apply_move("B2 A2"));
        let sub = game.subboard(Coord::new(1, 1)).unwrap();
        assert_eq!(sub.grid().get(Coord::new(1, 0)), Some(Square::Occupied(x())));
        assert_eq!(game.selected(), Some(Coord::new(1, 0)));
        assert_eq!(game.current_player(), "B");
    }

    #[test]
    fn test_selection_alone_is_a_change() {
        let mut game = ultimate(3, 3, 0);
        assert!(game.apply_move("C1"));
        assert_eq!(game.selected(), Some(Coord::new(0, 2)));
        assert_eq!(game.current_player(), "A");
        assert!(game.apply_move("A1"));
        assert_eq!(game.current_player(), "B");
    }

    #[test]
    fn test_bad_input_without_selection() {
        let mut game = ultimate(3, 3, 0);
        assert!(!game.apply_move(""));
        assert!(!game.apply_move("A1 B1 C1"));
        assert!(!game.apply_move("Z9 A1"));
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_bad_cell_keeps_selection_change() {
        let mut game = ultimate(3, 3, 0);
        assert!(game.apply_move("A1 nope"));
        assert_eq!(game.selected(), Some(Coord::new(0, 0)));
        assert!(!game.apply_move("nope"));
    }

    #[test]
    fn test_sub_win_claims_meta_square_and_frees_selection() {
        let mut game = ultimate(3, 3, 0);
        assert!(game.apply_move("B2 A2")); // x, sub B2
        assert!(game.apply_move("B2")); // o, sub A2
        assert!(game.apply_move("C2")); // x, sub B2
        assert!(game.apply_move("B2")); // o, sub C2
        assert!(game.apply_move("B2")); // x completes the middle row of sub B2

        assert_eq!(game.subboard(Coord::new(1, 1)).unwrap().winner(), Some("A"));
        assert_eq!(
            game.meta().grid().get(Coord::new(1, 1)),
            Some(Square::Occupied(x()))
        );
        // the landing square points back at the finished sub-board
        assert_eq!(game.selected(), None);
        assert_eq!(game.current_player(), "B");
        assert!(!game.apply_move("B2 A1"));
    }

    #[test]
    fn test_sub_draw_blocks_meta_square() {
        let mut game = ultimate(3, 3, 0);
        almost_draw(&mut game.subboards[0]);
        assert!(game.apply_move("A1 C3"));

        assert!(game.subboard(Coord::new(0, 0)).unwrap().is_draw());
        assert_eq!(game.meta().grid().get(Coord::new(0, 0)), Some(Square::Blocked));
        assert_eq!(game.current_player(), "B");
        assert_eq!(game.selected(), Some(Coord::new(2, 2)));
    }

    #[test]
    fn test_last_open_board_is_forced() {
        let mut game = ultimate(3, 3, 0);
        for index in 0..8 {
            almost_draw(&mut game.subboards[index]);
            game.subboards[index].apply_move("C3");
            let board = Coord::new(index / 3, index % 3);
            game.meta.block(board);
        }
        assert!(!game.is_draw());
        assert!(game.apply_move("C3 A1"));
        assert_eq!(game.selected(), Some(Coord::new(2, 2)));
    }

    #[test]
    fn test_all_boards_drawn_draws_game() {
        let mut game = ultimate(3, 3, 0);
        for index in 0..8 {
            almost_draw(&mut game.subboards[index]);
            game.subboards[index].apply_move("C3");
            game.meta.block(Coord::new(index / 3, index % 3));
        }
        almost_draw(&mut game.subboards[8]);
        assert!(game.apply_move("C3 C3"));
        assert!(game.is_draw());
        assert_eq!(game.winner(), None);
        assert!(game.outcome().unwrap().is_draw());
        assert_eq!(game.selected(), None);
        assert_eq!(game.active_grid(), game.meta().grid());

        let meta = game.meta().grid().clone();
        let current = game.meta().current_index();
        assert!(!game.apply_move("A1 A1"));
        assert!(!game.apply_move("C3"));
        assert_eq!(game.meta().grid(), &meta);
        assert_eq!(game.meta().current_index(), current);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_one_by_one_board_wins_immediately() {
        let mut game = ultimate(1, 1, 0);
        assert!(game.apply_move("A1 A1"));
        assert_eq!(game.winner(), Some("A"));
        assert!(!game.apply_move("A1"));
    }

    #[test]
    fn test_meta_fade_resets_sub_board() {
        // 2x2 boards, one square wins a sub-board, meta needs two in a row
        let mut game = ultimate(2, 1, 1);
        game.meta = Game::new(
            2,
            3,
            vec!["A".to_string(), "B".to_string()],
            GameOptions::default().with_fade_threshold(1),
        )
        .unwrap();

        assert!(game.apply_move("A1 B2")); // x wins sub A1, lands on B2
        assert_eq!(game.selected(), Some(Coord::new(1, 1)));
        assert!(game.apply_move("A1")); // o wins sub B2, lands on A1 (closed)
        assert_eq!(game.selected(), None);
        assert!(game.apply_move("B1 A2")); // x wins sub B1, A1 fades

        assert!(game.meta().grid().is_empty(Coord::new(0, 0)));
        let reset = game.subboard(Coord::new(0, 0)).unwrap();
        assert!(reset.grid().coords().all(|c| reset.grid().is_empty(c)));
        assert_eq!(game.selected(), Some(Coord::new(1, 0)));
    }

    #[test]
    fn test_render_mentions_selection() {
        let mut game = ultimate(3, 3, 0);
        assert!(game.to_string().ends_with("Select a subboard first"));
        game.apply_move("B2 A2");
        let text = game.to_string();
        assert!(text.starts_with("A vs B\nMain board:\n```\n"));
        assert!(text.contains("Full board:"));
        assert!(text.ends_with("Current player: B\nSelected subboard: A2"));
    }

    #[test]
    fn test_full_board_text_shape() {
        let game = ultimate(2, 2, 0);
        let text = game.board_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "  |   A B |   A B");
        assert_eq!(lines[0], "  |   A   |  B   ");
        assert_eq!(lines[2], "1 | 1 _ _ | 1 _ _");
        assert_eq!(lines[4], "-".repeat(lines[1].len()));
        assert_eq!(lines.len(), 2 * 3 + 2);
    }
}
