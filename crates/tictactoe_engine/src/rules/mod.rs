//! Game rules for tic-tac-toe.
//!
//! Rules are pure functions over line tallies, separated from the board
//! storage in [`crate::Game`].

pub mod tally;

pub use tally::{LineStatus, LineTally};

use crate::line::{LINE_COUNT, Line};
use crate::types::{FIELD_COUNT, FieldFlag, Player};

/// Rebuilds every line tally from a set of flags in one pass.
///
/// Order of placement does not matter; only the final set of flags does.
pub fn tally_fields(fields: &[FieldFlag; FIELD_COUNT]) -> [LineTally; LINE_COUNT] {
    let mut tallies = [LineTally::default(); LINE_COUNT];
    for (field, flag) in fields.iter().enumerate() {
        if let Some(owner) = flag.owner() {
            for line in Line::through(field) {
                tallies[line.index()].add(owner);
            }
        }
    }
    tallies
}

/// Counts the flags each player owns, as `(first, second)`.
pub fn count_flags(fields: &[FieldFlag]) -> (usize, usize) {
    fields.iter().fold((0, 0), |(first, second), flag| match flag.owner() {
        Some(Player::First) => (first + 1, second),
        Some(Player::Second) => (first, second + 1),
        None => (first, second),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use FieldFlag::{Empty as E, OwnedByFirst as X, OwnedBySecond as O};

    #[test]
    fn test_tally_fields_counts_each_line() {
        let fields = [X, O, X, E, X, E, E, E, O];
        let tallies = tally_fields(&fields);
        let top = tallies[Line::RowTop.index()];
        assert_eq!(top.sum(), -1);
        assert_eq!(top.filled(), 3);
        let right = tallies[Line::ColumnRight.index()];
        assert_eq!(right.sum(), 0);
        assert_eq!(right.filled(), 2);
        let middle = tallies[Line::RowMiddle.index()];
        assert_eq!(middle.sum(), -1);
        assert_eq!(middle.filled(), 1);
    }

    #[test]
    fn test_empty_board_has_one_live_tally_per_line() {
        let tallies = tally_fields(&[E; FIELD_COUNT]);
        assert_eq!(tallies.len(), Line::ALL.len());
        assert!(tallies.iter().all(|t| t.filled() == 0 && t.is_winnable()));
    }

    #[test]
    fn test_count_flags() {
        assert_eq!(count_flags(&[X, O, X, E, E, E, E, E, E]), (2, 1));
        assert_eq!(count_flags(&[E; 9]), (0, 0));
    }
}
