//! The eight winning lines and the field membership table.

use crate::types::FIELD_COUNT;
use serde::{Deserialize, Serialize};

/// A row, column or diagonal that wins when one player owns all three fields.
///
/// Declaration order is the order in which win lines are reported.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Line {
    /// Fields 0, 1, 2.
    RowTop,
    /// Fields 3, 4, 5.
    RowMiddle,
    /// Fields 6, 7, 8.
    RowBottom,
    /// Fields 0, 3, 6.
    ColumnLeft,
    /// Fields 1, 4, 7.
    ColumnMiddle,
    /// Fields 2, 5, 8.
    ColumnRight,
    /// Fields 0, 4, 8.
    DiagonalDown,
    /// Fields 2, 4, 6.
    DiagonalUp,
}

/// Number of winning lines.
pub const LINE_COUNT: usize = 8;

const FIELDS: [[usize; 3]; LINE_COUNT] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// Inverse of FIELDS.
const LINES_THROUGH: [&[Line]; FIELD_COUNT] = [
    &[Line::RowTop, Line::ColumnLeft, Line::DiagonalDown],
    &[Line::RowTop, Line::ColumnMiddle],
    &[Line::RowTop, Line::ColumnRight, Line::DiagonalUp],
    &[Line::RowMiddle, Line::ColumnLeft],
    &[
        Line::RowMiddle,
        Line::ColumnMiddle,
        Line::DiagonalDown,
        Line::DiagonalUp,
    ],
    &[Line::RowMiddle, Line::ColumnRight],
    &[Line::RowBottom, Line::ColumnLeft, Line::DiagonalUp],
    &[Line::RowBottom, Line::ColumnMiddle],
    &[Line::RowBottom, Line::ColumnRight, Line::DiagonalDown],
];

impl Line {
    /// All lines in reporting order.
    pub const ALL: [Line; LINE_COUNT] = [
        Line::RowTop,
        Line::RowMiddle,
        Line::RowBottom,
        Line::ColumnLeft,
        Line::ColumnMiddle,
        Line::ColumnRight,
        Line::DiagonalDown,
        Line::DiagonalUp,
    ];

    /// The three field indices of this line.
    pub fn fields(self) -> [usize; 3] {
        FIELDS[self.index()]
    }

    /// Slot of this line in per-line tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lines passing through `field`. Empty for indices past the board.
    pub fn through(field: usize) -> &'static [Line] {
        LINES_THROUGH.get(field).copied().unwrap_or(&[])
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.fields();
        write!(f, "{:?} ({}, {}, {})", self, a, b, c)
    }
}
