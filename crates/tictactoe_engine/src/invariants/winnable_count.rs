//! Winnable line bookkeeping.

use super::Invariant;
use crate::rules::LineStatus;
use crate::Game;

/// Invariant: the winnable counter matches the per-line winnable marks,
/// a line is retired exactly when it is dead, and an open game has no
/// completed line.
pub struct WinnableCountInvariant;

impl Invariant<Game> for WinnableCountInvariant {
    fn holds(game: &Game) -> bool {
        let tallies = game.tallies();
        let marked = tallies.iter().filter(|tally| tally.is_winnable()).count();
        if marked != game.winnable_lines() {
            return false;
        }

        tallies.iter().all(|tally| match tally.status() {
            LineStatus::Dead => !tally.is_winnable(),
            LineStatus::Live => tally.is_winnable(),
            LineStatus::Won(_) => tally.is_winnable() && !game.state().is_open(),
        })
    }

    fn description() -> &'static str {
        "Winnable line count matches the live lines"
    }
}
