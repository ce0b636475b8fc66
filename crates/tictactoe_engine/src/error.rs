//! Errors reported by the rules engine.

use crate::types::{GameState, Player};

/// Error that can occur when playing a move or loading a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The field index is outside 0-8 or the field is already taken.
    #[display("Field {} is not a free field on the board", _0)]
    InvalidField(#[error(not(source))] usize),

    /// A move was attempted after the game was decided.
    #[display("Game is already over ({})", _0)]
    GameAlreadyOver(#[error(not(source))] GameState),

    /// A supplied board cannot be resumed.
    #[display("Invalid initial state: {}", _0)]
    InvalidInitialState(StateRejection),
}

/// Why a supplied board was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StateRejection {
    /// Board does not have exactly nine entries.
    #[display("expected 9 fields, got {}", _0)]
    WrongLength(#[error(not(source))] usize),

    /// A signed field value outside -1..=1.
    #[display("field {} holds unknown flag value {}", index, value)]
    UnknownFlag {
        /// Offending field.
        index: usize,
        /// The value found there.
        value: i8,
    },

    /// Flag counts that strict alternation cannot produce.
    #[display("first player owns {} fields, second player {}", first, second)]
    UnbalancedFlags {
        /// Fields owned by the first player.
        first: usize,
        /// Fields owned by the second player.
        second: usize,
    },

    /// A recorded turn that does not follow from the flags.
    #[display("{} should move next, record says {}", expected, found)]
    TurnMismatch {
        /// Player implied by the flag counts.
        expected: Player,
        /// Player named by the record.
        found: Player,
    },

    /// The board is already decided.
    #[display("board is already decided ({})", _0)]
    AlreadyDecided(#[error(not(source))] GameState),
}

impl From<StateRejection> for GameError {
    fn from(rejection: StateRejection) -> Self {
        GameError::InvalidInitialState(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            GameError::InvalidField(9).to_string(),
            "Field 9 is not a free field on the board"
        );
        assert_eq!(
            GameError::GameAlreadyOver(GameState::GameOver).to_string(),
            "Game is already over (game over)"
        );
        let err: GameError = StateRejection::UnbalancedFlags { first: 3, second: 1 }.into();
        assert_eq!(
            err.to_string(),
            "Invalid initial state: first player owns 3 fields, second player 1"
        );
    }

    #[test]
    fn test_rejection_is_source() {
        use std::error::Error;
        let err = GameError::InvalidInitialState(StateRejection::WrongLength(4));
        assert!(err.source().is_some());
        assert!(GameError::InvalidField(3).source().is_none());
    }
}
