//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} play(field) {Q}

use crate::error::GameError;
use crate::invariants::{EngineInvariants, InvariantSet, InvariantViolation};
use crate::types::{FIELD_COUNT, FieldFlag};
use crate::Game;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), InvariantViolation>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not been decided.
pub struct GameIsOpen;

impl GameIsOpen {
    /// Fails with [`GameError::GameAlreadyOver`] on a decided game.
    pub fn check(game: &Game) -> Result<(), GameError> {
        if game.state().is_open() {
            Ok(())
        } else {
            Err(GameError::GameAlreadyOver(game.state()))
        }
    }
}

/// Precondition: the field exists and nobody owns it.
pub struct FieldIsFree;

impl FieldIsFree {
    /// Fails with [`GameError::InvalidField`] otherwise.
    pub fn check(field: usize, game: &Game) -> Result<(), GameError> {
        match game.board_state().get(field) {
            Some(FieldFlag::Empty) => Ok(()),
            _ => Err(GameError::InvalidField(field)),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Play Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for [`Game::play`].
///
/// Preconditions:
/// - Game is open
/// - Field is in range and empty
///
/// Postconditions:
/// - Exactly one field changed, from empty, and no flag was altered
/// - All [`EngineInvariants`] hold
pub struct PlayContract;

impl Contract<Game, usize> for PlayContract {
    #[instrument(skip(game))]
    fn pre(game: &Game, field: &usize) -> Result<(), GameError> {
        GameIsOpen::check(game)?;
        FieldIsFree::check(*field, game)?;
        Ok(())
    }

    fn post(before: &Game, after: &Game) -> Result<(), InvariantViolation> {
        let old = before.board_state();
        let new = after.board_state();
        let changed = (0..FIELD_COUNT).filter(|&i| old[i] != new[i]).count();
        let monotonic = (0..FIELD_COUNT).all(|i| old[i].is_empty() || old[i] == new[i]);
        if changed != 1 || !monotonic {
            return Err(InvariantViolation::new(
                "Postcondition failed: a move flags exactly one empty field",
            ));
        }

        EngineInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            InvariantViolation::new(format!("Postcondition failed: {}", descriptions))
        })
    }
}
