//! Command-line interface for the tic-tac-toe table.

use clap::{Parser, Subcommand, ValueEnum};
use derive_more::{Display, Error};
use rand::Rng;
use std::path::PathBuf;
use tictactoe_engine::{FieldFlag, Game, GameError, Player};
use tracing::instrument;

use crate::{Seat, TableConfig};

/// Tic-tac-toe for two players at one terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe with rounds and scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds interactively
    Play {
        /// Path to a TOML table config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many rounds instead of asking
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        rounds: Option<u32>,

        /// Who opens the first round
        #[arg(long, value_enum, default_value_t = Opener::Random)]
        opener: Opener,
    },

    /// Validate a board and show who moves next
    Show {
        /// Nine cells: X, O and -/_/. for empty (e.g. "_XX/XOO/XOO"),
        /// or comma-separated signs -1, 0, 1
        #[arg(short, long, allow_hyphen_values = true)]
        state: String,

        /// Path to a TOML table config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Seat choice for the first round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Opener {
    /// The X player opens.
    X,
    /// The O player opens.
    O,
    /// A coin toss decides.
    Random,
}

impl Opener {
    /// The opening seat, tossing a coin for [`Opener::Random`].
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Seat {
        match self {
            Opener::X => Seat::X,
            Opener::O => Seat::O,
            Opener::Random if rng.gen_bool(0.5) => Seat::X,
            Opener::Random => Seat::O,
        }
    }
}

/// A board written on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardInput {
    /// Cells given as marks.
    Marks(Vec<FieldFlag>),
    /// Cells given as signs (-1 first, 0 empty, 1 second).
    Signs(Vec<i8>),
}

impl BoardInput {
    /// Loads the board into `game`, returning the player to move.
    pub fn load_into(&self, game: &mut Game) -> Result<Player, GameError> {
        match self {
            BoardInput::Marks(flags) => game.load_state(flags),
            BoardInput::Signs(signs) => game.load_signs(signs),
        }
    }
}

/// Renders a loaded board and names the player to move.
///
/// The board is shown on its own, so X holds the first role.
#[instrument(skip(config))]
pub fn describe_board(board: &BoardInput, config: &TableConfig) -> Result<String, GameError> {
    let mut game = Game::new();
    let seat = match board.load_into(&mut game)? {
        Player::First => Seat::X,
        Player::Second => Seat::O,
    };

    let mut text = game.render(
        config.mark_of(Seat::X),
        config.mark_of(Seat::O),
        *config.mark_empty(),
    );
    text.push_str(&format!(
        "{} ({}) moves next, {} free field(s)\n",
        config.name_of(seat),
        config.mark_of(seat),
        game.valid_moves().len()
    ));
    Ok(text)
}

/// A cell that is neither a mark nor a number.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CellError {
    /// Character that names no cell.
    #[display("Unknown cell {:?} at position {}", cell, index)]
    UnknownCell {
        /// Position within the cell list.
        index: usize,
        /// The offending character.
        cell: char,
    },
    /// Comma-separated entry that is not a number.
    #[display("Cell {} is not a number: {:?}", index, text)]
    NotANumber {
        /// Position within the cell list.
        index: usize,
        /// The offending text.
        text: String,
    },
}

/// Parses a board from `X`/`O`/`-` characters or comma-separated signs.
///
/// Whitespace and `/` row separators are ignored in the character form.
/// The length is not checked here; the engine reports that.
#[instrument]
pub fn parse_cells(input: &str) -> Result<BoardInput, CellError> {
    if input.contains(',') {
        return input
            .split(',')
            .enumerate()
            .map(|(index, part)| {
                let text = part.trim();
                text.parse::<i8>().map_err(|_| CellError::NotANumber {
                    index,
                    text: text.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(BoardInput::Signs);
    }

    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/')
        .enumerate()
        .map(|(index, cell)| match cell {
            'X' | 'x' => Ok(FieldFlag::OwnedByFirst),
            'O' | 'o' => Ok(FieldFlag::OwnedBySecond),
            '-' | '_' | '.' => Ok(FieldFlag::Empty),
            _ => Err(CellError::UnknownCell { index, cell }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(BoardInput::Marks)
}
