//! Terminal table for two human tic-tac-toe players.
//!
//! Wraps the rules engine with named seats, rounds and scores, a TOML
//! configuration and a line-based console loop.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod console;
mod session;

pub use config::{ConfigError, TableConfig};
pub use console::{Console, Exit};
pub use session::{Score, Seat, Table};
