//! Rounds and scores for two named players sharing one board.
//!
//! The engine only knows a first and a second player. The table seats two
//! people, X and O, and decides each round which of them takes the first
//! role. With equal scores the opening seat alternates; otherwise the
//! player who is behind opens.

use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tictactoe_engine::{Game, GameError, GameState, Player};
use tracing::{debug, info, instrument};

/// One of the two chairs at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Seat {
    /// The player using the X mark.
    X,
    /// The player using the O mark.
    O,
}

impl Seat {
    /// The other chair.
    pub fn other(self) -> Self {
        match self {
            Seat::X => Seat::O,
            Seat::O => Seat::X,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::X => write!(f, "X"),
            Seat::O => write!(f, "O"),
        }
    }
}

/// Points of both seats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Points of the X seat.
    pub x: u32,
    /// Points of the O seat.
    pub o: u32,
}

impl Score {
    /// Points of `seat`.
    pub fn of(&self, seat: Seat) -> u32 {
        match seat {
            Seat::X => self.x,
            Seat::O => self.o,
        }
    }

    fn add(&mut self, seat: Seat, points: u32) {
        match seat {
            Seat::X => self.x += points,
            Seat::O => self.o += points,
        }
    }
}

/// A running match: the engine plus rounds, scores and the opening seat.
#[derive(Debug, Clone)]
pub struct Table {
    game: Game,
    round: u32,
    score: Score,
    opener: Seat,
    first_opener: Seat,
    round_started: bool,
}

impl Table {
    /// Creates a table where `first_opener` opens the first round.
    #[instrument]
    pub fn new(first_opener: Seat) -> Self {
        Self {
            game: Game::new(),
            round: 0,
            score: Score::default(),
            opener: first_opener,
            first_opener,
            round_started: false,
        }
    }

    /// Clears the board for the next round and returns the opening seat.
    #[instrument(skip(self), fields(round = self.round + 1))]
    pub fn start_round(&mut self) -> Seat {
        self.opener = if self.round == 0 {
            self.first_opener
        } else if self.score.x == self.score.o {
            self.opener.other()
        } else if self.score.x < self.score.o {
            Seat::X
        } else {
            Seat::O
        };
        self.round += 1;
        self.round_started = false;
        self.game.start_new_game();
        debug!(opener = %self.opener, score = ?self.score, "Round started");
        self.opener
    }

    /// Flags `field` for the seat to move and books points once the round
    /// is decided.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn play(&mut self, field: usize) -> Result<GameState, GameError> {
        let seat = self.to_move();
        let state = self.game.play(field).inspect_err(|e| {
            debug!(%seat, field, error = %e, "Seat move not applied");
        })?;
        self.round_started = true;

        if !state.is_open() {
            self.round_started = false;
            if let Some(winner) = state.winner() {
                let seat = self.seat_of(winner);
                self.score.add(seat, state.points());
                info!(%seat, %state, score = ?self.score, "Round won");
            } else {
                info!(score = ?self.score, "Round ended without a winner");
            }
        }
        Ok(state)
    }

    /// The seat holding the engine's `player` role this round.
    pub fn seat_of(&self, player: Player) -> Seat {
        match player {
            Player::First => self.opener,
            Player::Second => self.opener.other(),
        }
    }

    /// The seat whose turn it is.
    pub fn to_move(&self) -> Seat {
        self.seat_of(self.game.next_to_move())
    }

    /// The seat that won the last decided round, if any.
    pub fn winner(&self) -> Option<Seat> {
        self.game.state().winner().map(|player| self.seat_of(player))
    }

    /// The engine of the current round.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Number of the current round, starting at 1. Zero before the first.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Rounds that were played to the end.
    pub fn rounds_completed(&self) -> u32 {
        if self.round > 0 && self.game.state().is_open() {
            self.round - 1
        } else {
            self.round
        }
    }

    /// Current points.
    pub fn score(&self) -> Score {
        self.score
    }

    /// The seat that opened the current round.
    pub fn opener(&self) -> Seat {
        self.opener
    }

    /// Whether leaving now would abandon a round with moves on the board.
    pub fn round_in_progress(&self) -> bool {
        self.round_started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(table: &mut Table, fields: &[usize]) -> GameState {
        let mut state = GameState::Open;
        for &field in fields {
            state = table.play(field).unwrap();
        }
        state
    }

    #[test]
    fn test_first_round_uses_chosen_opener() {
        let mut table = Table::new(Seat::O);
        assert_eq!(table.start_round(), Seat::O);
        assert_eq!(table.round(), 1);
        assert_eq!(table.to_move(), Seat::O);
        table.play(4).unwrap();
        assert_eq!(table.to_move(), Seat::X);
    }

    #[test]
    fn test_win_scores_for_seat_in_first_role() {
        let mut table = Table::new(Seat::O);
        table.start_round();
        assert_eq!(play_all(&mut table, &[8, 0, 6, 2, 7]), GameState::WinnerFirst);
        assert_eq!(table.score(), Score { x: 0, o: 1 });
        assert_eq!(table.winner(), Some(Seat::O));
    }

    #[test]
    fn test_double_win_scores_two() {
        let mut table = Table::new(Seat::X);
        table.start_round();
        play_all(&mut table, &[0, 1, 2, 5, 8, 7, 6, 3, 4]);
        assert_eq!(table.score(), Score { x: 2, o: 0 });
    }

    #[test]
    fn test_draw_scores_nothing_and_alternates() {
        let mut table = Table::new(Seat::X);
        table.start_round();
        assert_eq!(play_all(&mut table, &[4, 0, 6, 2, 1, 7, 5, 3]), GameState::GameOver);
        assert_eq!(table.score(), Score::default());
        assert_eq!(table.winner(), None);
        assert_eq!(table.start_round(), Seat::O);
        assert_eq!(table.start_round(), Seat::X);
    }

    #[test]
    fn test_trailing_player_opens() {
        let mut table = Table::new(Seat::X);
        table.start_round();
        play_all(&mut table, &[8, 0, 6, 2, 7]);
        // X leads, so O opens, and keeps opening while behind.
        assert_eq!(table.start_round(), Seat::O);
        assert_eq!(table.start_round(), Seat::O);
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut table = Table::new(Seat::X);
        table.start_round();
        table.play(4).unwrap();
        assert_eq!(table.play(4), Err(GameError::InvalidField(4)));
        assert_eq!(table.to_move(), Seat::O);
    }

    #[test]
    fn test_round_progress_tracking() {
        let mut table = Table::new(Seat::X);
        assert_eq!(table.rounds_completed(), 0);
        table.start_round();
        assert!(!table.round_in_progress());
        table.play(0).unwrap();
        assert!(table.round_in_progress());
        assert_eq!(table.rounds_completed(), 0);
        play_all(&mut table, &[3, 1, 4, 2]);
        assert!(!table.round_in_progress());
        assert_eq!(table.rounds_completed(), 1);
    }
}
