//! Tic-tac-toe table binary.

#![warn(missing_docs)]

use std::io;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tictactoe_table::cli::{Cli, Command, describe_board, parse_cells};
use tictactoe_table::{Console, Seat, TableConfig};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            rounds,
            opener,
        } => {
            let config = load_config(config.as_deref())?;
            init_tracing(&config);
            let opener = opener.resolve(&mut rand::thread_rng());
            run_play(config, opener, rounds)
        }
        Command::Show { state, config } => {
            let config = load_config(config.as_deref())?;
            init_tracing(&config);
            run_show(&config, &state)
        }
    }
}

/// Reads the config file if one was given, otherwise uses defaults.
fn load_config(path: Option<&Path>) -> Result<TableConfig> {
    match path {
        Some(path) => Ok(TableConfig::from_file(path)?),
        None => Ok(TableConfig::default()),
    }
}

/// Logs go to stderr so the board on stdout stays readable.
fn init_tracing(config: &TableConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(io::stderr)
        .init();
}

/// Plays interactive rounds on stdin/stdout.
#[instrument(skip(config))]
fn run_play(config: TableConfig, opener: Seat, rounds: Option<u32>) -> Result<()> {
    info!("Starting table");
    let stdin = io::stdin();
    let mut console = Console::new(config, opener, stdin.lock(), io::stdout());
    let exit = console.run(rounds)?;
    info!(?exit, rounds = console.table().rounds_completed(), "Table closed");
    Ok(())
}

/// Validates a board given on the command line and prints it.
#[instrument(skip(config))]
fn run_show(config: &TableConfig, state: &str) -> Result<()> {
    let board = parse_cells(state)?;
    let text = describe_board(&board, config)?;
    print!("{}", text);
    Ok(())
}
