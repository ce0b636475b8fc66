//! Core domain types for the tic-tac-toe rules engine.

use serde::{Deserialize, Serialize};

/// Number of fields on the 3x3 board.
pub const FIELD_COUNT: usize = 9;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Player {
    /// Player who opens every game.
    First,
    /// Player who answers the opening move.
    Second,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Signed ownership value used by the line tallies.
    pub fn sign(self) -> i8 {
        match self {
            Player::First => -1,
            Player::Second => 1,
        }
    }

    /// The flag this player puts on a field.
    pub fn flag(self) -> FieldFlag {
        match self {
            Player::First => FieldFlag::OwnedByFirst,
            Player::Second => FieldFlag::OwnedBySecond,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "first player"),
            Player::Second => write!(f, "second player"),
        }
    }
}

/// Ownership mark of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldFlag {
    /// Nobody has taken the field yet.
    #[default]
    Empty,
    /// Taken by [`Player::First`].
    OwnedByFirst,
    /// Taken by [`Player::Second`].
    OwnedBySecond,
}

impl FieldFlag {
    /// Returns the owner of the field, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            FieldFlag::Empty => None,
            FieldFlag::OwnedByFirst => Some(Player::First),
            FieldFlag::OwnedBySecond => Some(Player::Second),
        }
    }

    /// Checks if the field is still free.
    pub fn is_empty(self) -> bool {
        self == FieldFlag::Empty
    }

    /// Signed value: -1 first, 0 empty, +1 second.
    pub fn sign(self) -> i8 {
        self.owner().map_or(0, Player::sign)
    }

    /// Parses the signed value back into a flag.
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            -1 => Some(FieldFlag::OwnedByFirst),
            0 => Some(FieldFlag::Empty),
            1 => Some(FieldFlag::OwnedBySecond),
            _ => None,
        }
    }
}

/// State of the current game as reported after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Moves are still possible and somebody can still win.
    #[default]
    Open,
    /// The first player completed one line.
    WinnerFirst,
    /// The second player completed one line.
    WinnerSecond,
    /// The first player completed two lines with a single move.
    DoubleWinFirst,
    /// The second player completed two lines with a single move.
    DoubleWinSecond,
    /// No line can be won by anybody anymore.
    GameOver,
}

impl GameState {
    /// Outcome for `player` having completed `lines` lines in one move.
    ///
    /// Zero lines keeps the game open.
    pub fn won_by(player: Player, lines: usize) -> Self {
        match (player, lines) {
            (_, 0) => GameState::Open,
            (Player::First, 1) => GameState::WinnerFirst,
            (Player::Second, 1) => GameState::WinnerSecond,
            (Player::First, _) => GameState::DoubleWinFirst,
            (Player::Second, _) => GameState::DoubleWinSecond,
        }
    }

    /// True while the game accepts moves.
    pub fn is_open(self) -> bool {
        self == GameState::Open
    }

    /// Returns the winner, if the game has one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameState::WinnerFirst | GameState::DoubleWinFirst => Some(Player::First),
            GameState::WinnerSecond | GameState::DoubleWinSecond => Some(Player::Second),
            GameState::Open | GameState::GameOver => None,
        }
    }

    /// True for both double-win variants.
    pub fn is_double_win(self) -> bool {
        matches!(self, GameState::DoubleWinFirst | GameState::DoubleWinSecond)
    }

    /// Score the winner earns: 1 for a win, 2 for a double win.
    pub fn points(self) -> u32 {
        match self {
            GameState::WinnerFirst | GameState::WinnerSecond => 1,
            GameState::DoubleWinFirst | GameState::DoubleWinSecond => 2,
            GameState::Open | GameState::GameOver => 0,
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Open => write!(f, "open"),
            GameState::WinnerFirst => write!(f, "first player wins"),
            GameState::WinnerSecond => write!(f, "second player wins"),
            GameState::DoubleWinFirst => write!(f, "first player wins twice"),
            GameState::DoubleWinSecond => write!(f, "second player wins twice"),
            GameState::GameOver => write!(f, "game over"),
        }
    }
}
