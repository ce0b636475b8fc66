//! First-class invariants for the rules engine.
//!
//! Invariants are logical properties that must hold for every reachable
//! [`crate::Game`]. They are checked in debug builds after each move and load,
//! and can be tested independently.

pub mod alternating_turn;
pub mod tally_consistent;
pub mod winnable_count;

pub use alternating_turn::AlternatingTurnInvariant;
pub use tally_consistent::TallyConsistentInvariant;
pub use winnable_count::WinnableCountInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

/// All engine invariants as a composable set.
pub type EngineInvariants = (
    TallyConsistentInvariant,
    AlternatingTurnInvariant,
    WinnableCountInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Game;

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(EngineInvariants::check_all(&Game::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game = Game::new();
        for field in [4, 0, 8, 2] {
            game.play(field).unwrap();
            assert!(EngineInvariants::check_all(&game).is_ok());
        }
    }

    #[test]
    fn test_invariant_set_holds_after_terminal_moves() {
        let mut game = Game::new();
        for field in [4, 0, 6, 2, 1, 7, 5, 3] {
            game.play(field).unwrap();
        }
        assert!(EngineInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (TallyConsistentInvariant, AlternatingTurnInvariant);
        assert!(TwoInvariants::check_all(&Game::new()).is_ok());
    }
}
