//! The rules engine: board, line tallies and state machine.

use crate::contracts::{Contract, PlayContract};
use crate::error::{GameError, StateRejection};
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::line::{LINE_COUNT, Line};
use crate::position::Position;
use crate::rules::{self, LineStatus, LineTally};
use crate::snapshot::Snapshot;
use crate::types::{FIELD_COUNT, FieldFlag, GameState, Player};
use tracing::{debug, info, instrument, warn};

/// Tic-tac-toe game engine.
///
/// The nine field flags are the source of truth. Every line additionally
/// keeps a [`LineTally`] that is updated with each move, so deciding a
/// move only looks at the two to four lines through the played field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    fields: [FieldFlag; FIELD_COUNT],
    tallies: [LineTally; LINE_COUNT],
    win_lines: [bool; LINE_COUNT],
    winnable_lines: usize,
    next_to_move: Player,
    state: GameState,
}

impl Game {
    /// Creates a new, empty game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            fields: [FieldFlag::Empty; FIELD_COUNT],
            tallies: [LineTally::default(); LINE_COUNT],
            win_lines: [false; LINE_COUNT],
            winnable_lines: LINE_COUNT,
            next_to_move: Player::First,
            state: GameState::Open,
        }
    }

    /// Clears the board and starts over with the first player.
    #[instrument(skip(self))]
    pub fn start_new_game(&mut self) {
        debug!("Starting new game");
        *self = Self::new();
    }

    /// Flags `field` for the player whose turn it is.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameAlreadyOver`] if the game is decided.
    /// - [`GameError::InvalidField`] if `field` is not in 0-8 or taken.
    ///
    /// A rejected move leaves the game untouched.
    #[instrument(skip(self), fields(mover = ?self.next_to_move))]
    pub fn play(&mut self, field: usize) -> Result<GameState, GameError> {
        if let Err(err) = PlayContract::pre(self, &field) {
            warn!(%err, "Move rejected");
            return Err(err);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mover = self.next_to_move;
        self.fields[field] = mover.flag();

        let mut completed = 0;
        for line in Line::through(field) {
            let tally = &mut self.tallies[line.index()];
            tally.add(mover);
            if !tally.is_winnable() {
                continue;
            }
            match tally.status() {
                LineStatus::Won(_) => {
                    self.win_lines[line.index()] = true;
                    completed += 1;
                }
                LineStatus::Dead => {
                    tally.retire();
                    self.winnable_lines -= 1;
                    debug!(?line, remaining = self.winnable_lines, "Line can no longer be won");
                }
                LineStatus::Live => {}
            }
        }

        if completed > 0 {
            self.state = GameState::won_by(mover, completed);
            info!(state = ?self.state, lines = ?self.win_lines(), "Game won");
        } else if self.winnable_lines == 0 {
            self.state = GameState::GameOver;
            info!("No winnable lines left");
        } else {
            self.next_to_move = mover.opponent();
        }

        #[cfg(debug_assertions)]
        {
            let checked = PlayContract::post(&before, self);
            debug_assert!(checked.is_ok(), "{:?}", checked);
        }

        Ok(self.state)
    }

    /// Flags a named position; see [`Game::play`].
    pub fn play_at(&mut self, position: Position) -> Result<GameState, GameError> {
        self.play(position.to_index())
    }

    /// Lines completed by the deciding move, in [`Line::ALL`] order.
    ///
    /// Empty unless the game has been won.
    pub fn win_lines(&self) -> Vec<Line> {
        if self.state.winner().is_none() {
            return Vec::new();
        }
        Line::ALL
            .iter()
            .copied()
            .filter(|line| self.win_lines[line.index()])
            .collect()
    }

    /// Copy of the nine field flags, row-major.
    pub fn board_state(&self) -> [FieldFlag; FIELD_COUNT] {
        self.fields
    }

    /// The board as signed values: -1 first, 0 empty, +1 second.
    pub fn board_signs(&self) -> [i8; FIELD_COUNT] {
        self.fields.map(FieldFlag::sign)
    }

    /// Current game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Player whose turn it is; frozen on the deciding mover once the
    /// game is over.
    pub fn next_to_move(&self) -> Player {
        self.next_to_move
    }

    /// Player who made the most recent move, if any.
    pub fn last_mover(&self) -> Option<Player> {
        if !self.state.is_open() {
            return Some(self.next_to_move);
        }
        if self.fields.iter().all(|flag| flag.is_empty()) {
            None
        } else {
            Some(self.next_to_move.opponent())
        }
    }

    /// Read-only view of the line tallies, indexed by [`Line::index`].
    pub fn tallies(&self) -> &[LineTally; LINE_COUNT] {
        &self.tallies
    }

    /// Number of lines somebody can still complete.
    pub fn winnable_lines(&self) -> usize {
        self.winnable_lines
    }

    /// Free positions while the game is open; empty once it is decided.
    pub fn valid_moves(&self) -> Vec<Position> {
        if !self.state.is_open() {
            return Vec::new();
        }
        Position::valid_moves(&self.fields)
    }

    /// Formats the board as a 3x3 grid using the given marks.
    ///
    /// ```
    /// use tictactoe_engine::Game;
    ///
    /// let mut game = Game::new();
    /// game.play(4).unwrap();
    /// assert_eq!(
    ///     game.render('X', 'O', '.'),
    ///     " \n . | . | . \n---|---|---\n . | X | . \n---|---|---\n . | . | . \n"
    /// );
    /// ```
    pub fn render(&self, first: char, second: char, empty: char) -> String {
        let c = self.fields.map(|flag| match flag {
            FieldFlag::Empty => empty,
            FieldFlag::OwnedByFirst => first,
            FieldFlag::OwnedBySecond => second,
        });
        format!(
            " \n {} | {} | {} \n---|---|---\n {} | {} | {} \n---|---|---\n {} | {} | {} \n",
            c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7], c[8]
        )
    }

    /// [`Game::render`] with `X`, `O` and blank fields.
    pub fn render_default(&self) -> String {
        self.render('X', 'O', ' ')
    }

    /// Replaces the game with a mid-game board.
    ///
    /// Flags are placed all at once and every line is evaluated a single
    /// time afterwards, so the result equals what the same moves played
    /// through [`Game::play`] would have produced. Returns the player
    /// to move next.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidInitialState`] if the board has the wrong
    /// length, impossible flag counts or is already decided. The game is
    /// then left freshly reset.
    #[instrument(skip(self, flags), fields(len = flags.len()))]
    pub fn load_state(&mut self, flags: &[FieldFlag]) -> Result<Player, GameError> {
        match Self::from_flags(flags) {
            Ok(game) => {
                *self = game;
                debug_assert!(EngineInvariants::check_all(self).is_ok());
                debug!(next = ?self.next_to_move, "Board loaded");
                Ok(self.next_to_move)
            }
            Err(rejection) => {
                warn!(%rejection, "Board rejected");
                self.start_new_game();
                Err(rejection.into())
            }
        }
    }

    /// [`Game::load_state`] for the signed representation.
    #[instrument(skip(self, signs), fields(len = signs.len()))]
    pub fn load_signs(&mut self, signs: &[i8]) -> Result<Player, GameError> {
        let flags: Result<Vec<FieldFlag>, StateRejection> = signs
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                FieldFlag::from_sign(value).ok_or(StateRejection::UnknownFlag { index, value })
            })
            .collect();

        match flags {
            Ok(flags) => self.load_state(&flags),
            Err(rejection) => {
                warn!(%rejection, "Board rejected");
                self.start_new_game();
                Err(rejection.into())
            }
        }
    }

    /// Serializable record of the current game.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.fields, self.next_to_move, self.state)
    }

    /// Resumes an open game from a snapshot.
    ///
    /// # Errors
    ///
    /// Rejects decided snapshots and snapshots whose recorded turn does
    /// not match their flags; the game is then left freshly reset.
    #[instrument(skip(self, snapshot))]
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<Player, GameError> {
        if !snapshot.state().is_open() {
            self.start_new_game();
            return Err(StateRejection::AlreadyDecided(snapshot.state()).into());
        }
        let next = self.load_state(snapshot.fields())?;
        if next != snapshot.next_to_move() {
            self.start_new_game();
            return Err(StateRejection::TurnMismatch {
                expected: next,
                found: snapshot.next_to_move(),
            }
            .into());
        }
        Ok(next)
    }

    fn from_flags(flags: &[FieldFlag]) -> Result<Self, StateRejection> {
        let fields = <[FieldFlag; FIELD_COUNT]>::try_from(flags)
            .map_err(|_| StateRejection::WrongLength(flags.len()))?;

        let (first, second) = rules::count_flags(&fields);
        let next_to_move = if first == second {
            Player::First
        } else if first == second + 1 {
            Player::Second
        } else {
            return Err(StateRejection::UnbalancedFlags { first, second });
        };

        let mut tallies = rules::tally_fields(&fields);
        let winners: Vec<Player> = tallies
            .iter()
            .filter_map(|tally| match tally.status() {
                LineStatus::Won(player) => Some(player),
                LineStatus::Live | LineStatus::Dead => None,
            })
            .collect();
        if let Some(&player) = winners.first() {
            let completed = winners.iter().filter(|p| **p == player).count();
            return Err(StateRejection::AlreadyDecided(GameState::won_by(
                player, completed,
            )));
        }

        let mut winnable_lines = LINE_COUNT;
        for tally in tallies.iter_mut() {
            if tally.status() == LineStatus::Dead {
                tally.retire();
                winnable_lines -= 1;
            }
        }
        if winnable_lines == 0 {
            return Err(StateRejection::AlreadyDecided(GameState::GameOver));
        }

        Ok(Self {
            fields,
            tallies,
            win_lines: [false; LINE_COUNT],
            winnable_lines,
            next_to_move,
            state: GameState::Open,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(game: &mut Game, moves: &[usize]) -> Vec<GameState> {
        moves.iter().map(|&field| game.play(field).unwrap()).collect()
    }

    #[test]
    fn test_new_game_is_open_and_empty() {
        let game = Game::new();
        assert_eq!(game.state(), GameState::Open);
        assert_eq!(game.next_to_move(), Player::First);
        assert_eq!(game.board_state(), [FieldFlag::Empty; 9]);
        assert_eq!(game.winnable_lines(), 8);
        assert_eq!(game.last_mover(), None);
        assert!(game.win_lines().is_empty());
    }

    #[test]
    fn test_mixed_line_dies_early() {
        let mut game = Game::new();
        play_all(&mut game, &[0, 1]);
        // Top row now holds one flag of each player.
        assert!(!game.tallies()[Line::RowTop.index()].is_winnable());
        assert_eq!(game.winnable_lines(), 7);
    }

    #[test]
    fn test_turn_frozen_on_deciding_mover() {
        let mut game = Game::new();
        let states = play_all(&mut game, &[8, 0, 6, 2, 7]);
        assert_eq!(states.last(), Some(&GameState::WinnerFirst));
        assert_eq!(game.next_to_move(), Player::First);
        assert_eq!(game.last_mover(), Some(Player::First));
    }

    #[test]
    fn test_last_mover_while_open() {
        let mut game = Game::new();
        game.play(4).unwrap();
        assert_eq!(game.last_mover(), Some(Player::First));
        assert_eq!(game.next_to_move(), Player::Second);
    }

    #[test]
    fn test_board_signs() {
        let mut game = Game::new();
        play_all(&mut game, &[4, 0]);
        assert_eq!(game.board_signs(), [1, 0, 0, 0, -1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_valid_moves_shrink() {
        let mut game = Game::new();
        assert_eq!(game.valid_moves().len(), 9);
        game.play_at(Position::Center).unwrap();
        let moves = game.valid_moves();
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&Position::Center));
    }

    #[test]
    fn test_display_uses_default_marks() {
        let mut game = Game::new();
        play_all(&mut game, &[0, 8]);
        assert_eq!(
            game.to_string(),
            " \n X |   |   \n---|---|---\n   |   |   \n---|---|---\n   |   | O \n"
        );
    }
}

#[cfg(test)]
impl Game {
    /// Overwrites a field without touching the tallies, to simulate corruption.
    pub(crate) fn overwrite_field(&mut self, field: usize, flag: FieldFlag) {
        self.fields[field] = flag;
    }

    /// Overwrites the turn, to simulate corruption.
    pub(crate) fn overwrite_turn(&mut self, player: Player) {
        self.next_to_move = player;
    }
}
