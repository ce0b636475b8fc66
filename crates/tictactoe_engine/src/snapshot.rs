//! Serializable resume record of a game.

use crate::types::{FIELD_COUNT, FieldFlag, GameState, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Board flags plus turn and state, as handed between screens.
///
/// A snapshot is plain data; [`crate::Game::restore`] validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    fields: [FieldFlag; FIELD_COUNT],
    next_to_move: Player,
    state: GameState,
}

impl Snapshot {
    /// Creates a snapshot from its parts.
    pub fn new(fields: [FieldFlag; FIELD_COUNT], next_to_move: Player, state: GameState) -> Self {
        Self {
            fields,
            next_to_move,
            state,
        }
    }

    /// The nine field flags.
    pub fn fields(&self) -> &[FieldFlag; FIELD_COUNT] {
        &self.fields
    }

    /// Recorded player to move.
    pub fn next_to_move(&self) -> Player {
        self.next_to_move
    }

    /// Recorded game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Encodes the snapshot as JSON.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a snapshot from JSON.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let mut fields = [FieldFlag::Empty; FIELD_COUNT];
        fields[4] = FieldFlag::OwnedByFirst;
        let snapshot = Snapshot::new(fields, Player::Second, GameState::Open);
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"next_to_move\":\"Second\""));
        assert!(json.contains("\"OwnedByFirst\""));
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_rejects_short_board() {
        let json = r#"{"fields":["Empty"],"next_to_move":"First","state":"Open"}"#;
        assert!(Snapshot::from_json(json).is_err());
    }
}
