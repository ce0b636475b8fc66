//! Named board positions.

use crate::types::{FIELD_COUNT, FieldFlag};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A field on the board (index 0-8, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Position {
    /// Top-left (field 0)
    TopLeft,
    /// Top-center (field 1)
    TopCenter,
    /// Top-right (field 2)
    TopRight,
    /// Middle-left (field 3)
    MiddleLeft,
    /// Center (field 4)
    Center,
    /// Middle-right (field 5)
    MiddleRight,
    /// Bottom-left (field 6)
    BottomLeft,
    /// Bottom-center (field 7)
    BottomCenter,
    /// Bottom-right (field 8)
    BottomRight,
}

/// Input that names no field.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Unknown position: {:?}", input)]
pub struct PositionError {
    /// The rejected input.
    pub input: String,
}

impl Position {
    /// All 9 positions in field order.
    pub const ALL: [Position; FIELD_COUNT] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Field index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates a position from a field index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse from label or number (0-8).
    ///
    /// Labels match case-insensitively and ignore separators, so
    /// "top left", "Top-left" and "topleft" all name field 0.
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Option<Position> {
        let trimmed = s.trim();
        if let Ok(num) = trimmed.parse::<usize>() {
            return Self::from_index(num);
        }

        let wanted = normalize(trimmed);
        if wanted.is_empty() {
            return None;
        }
        <Position as strum::IntoEnumIterator>::iter().find(|pos| normalize(pos.label()) == wanted)
    }

    /// Positions whose field is still empty.
    #[instrument(skip(fields))]
    pub fn valid_moves(fields: &[FieldFlag; FIELD_COUNT]) -> Vec<Position> {
        Self::ALL
            .iter()
            .copied()
            .filter(|pos| fields[pos.to_index()].is_empty())
            .collect()
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl std::str::FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label_or_number(s).ok_or_else(|| PositionError {
            input: s.to_string(),
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
