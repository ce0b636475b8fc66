//! Tally consistency: line sums are derived from the field flags.

use super::Invariant;
use crate::rules;
use crate::Game;

/// Invariant: every line tally matches a fresh recount of the board.
///
/// The flags are the source of truth; the incremental tallies must never
/// drift from them.
pub struct TallyConsistentInvariant;

impl Invariant<Game> for TallyConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let recount = rules::tally_fields(&game.board_state());
        recount
            .iter()
            .zip(game.tallies().iter())
            .all(|(fresh, kept)| fresh.sum() == kept.sum() && fresh.filled() == kept.filled())
    }

    fn description() -> &'static str {
        "Line tallies match the field flags"
    }
}
