//! Tic-tac-toe rules engine.
//!
//! Two players alternately flag the fields of a 3x3 board. Whoever owns
//! all three fields of a row, column or diagonal wins; completing two
//! lines with one move is a double win. As soon as every line holds flags
//! of both players the game is over without a winner.
//!
//! # Architecture
//!
//! - **Game**: board, incremental line tallies and the state machine
//! - **Rules**: line tallies and their classification (live, won, dead)
//! - **Contracts / Invariants**: move preconditions and debug-checked
//!   postconditions
//! - **Snapshot**: serializable resume record
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Game, GameState, Line};
//!
//! let mut game = Game::new();
//! for field in [8, 0, 6, 2] {
//!     assert_eq!(game.play(field)?, GameState::Open);
//! }
//! assert_eq!(game.play(7)?, GameState::WinnerFirst);
//! assert_eq!(game.win_lines(), vec![Line::RowBottom]);
//! # Ok::<(), tictactoe_engine::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod error;
mod game;
mod invariants;
mod line;
mod position;
mod rules;
mod snapshot;
mod types;

// Crate-level exports - Engine
pub use game::Game;

// Crate-level exports - Domain types
pub use line::{LINE_COUNT, Line};
pub use position::{Position, PositionError};
pub use types::{FIELD_COUNT, FieldFlag, GameState, Player};

// Crate-level exports - Errors
pub use error::{GameError, StateRejection};

// Crate-level exports - Rules, contracts and invariants
pub use contracts::{Contract, FieldIsFree, GameIsOpen, PlayContract};
pub use invariants::{
    AlternatingTurnInvariant, EngineInvariants, Invariant, InvariantSet, InvariantViolation,
    TallyConsistentInvariant, WinnableCountInvariant,
};
pub use rules::{LineStatus, LineTally, count_flags, tally_fields};

// Crate-level exports - Serialization
pub use snapshot::Snapshot;
