//! Line-based play loop over any reader and writer.

use std::io::{BufRead, Write};

use anyhow::Result;
use strum::IntoEnumIterator;
use tictactoe_engine::{GameState, Player, Position};
use tracing::{debug, info, instrument};

use crate::{Seat, Table, TableConfig};

/// How a [`Console::run`] session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The requested number of rounds was played, or the players declined
    /// another one.
    Finished,
    /// A player quit.
    Quit,
    /// Input ran out.
    EndOfInput,
}

/// Drives a [`Table`] from text input, printing boards and scores.
pub struct Console<R, W> {
    config: TableConfig,
    table: Table,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console with a fresh table.
    pub fn new(config: TableConfig, first_opener: Seat, input: R, output: W) -> Self {
        Self {
            config,
            table: Table::new(first_opener),
            input,
            output,
        }
    }

    /// The table being played.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Consumes the console, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays rounds until `rounds` are done, or, without a limit, until
    /// the players decline another round.
    #[instrument(skip(self))]
    pub fn run(&mut self, rounds: Option<u32>) -> Result<Exit> {
        loop {
            if rounds.is_some_and(|limit| self.table.round() >= limit) {
                info!(rounds = self.table.rounds_completed(), "Match finished");
                return Ok(Exit::Finished);
            }

            let exit = self.play_round()?;
            if exit != Exit::Finished {
                self.print_scores()?;
                return Ok(exit);
            }
            self.print_scores()?;

            if rounds.is_none() {
                match self.ask("Another round? [Y/n] ")? {
                    Some(answer) if answer.eq_ignore_ascii_case("n") => {
                        info!(rounds = self.table.rounds_completed(), "Match finished");
                        return Ok(Exit::Finished);
                    }
                    Some(_) => {}
                    None => return Ok(Exit::EndOfInput),
                }
            }
        }
    }

    fn play_round(&mut self) -> Result<Exit> {
        let opener = self.table.start_round();
        writeln!(
            self.output,
            "Round {}: {} opens",
            self.table.round(),
            self.config.name_of(opener)
        )?;

        loop {
            self.print_board()?;
            let seat = self.table.to_move();
            let prompt = format!(
                "{} ({}) to move: ",
                self.config.name_of(seat),
                self.config.mark_of(seat)
            );
            let Some(line) = self.ask(&prompt)? else {
                return Ok(Exit::EndOfInput);
            };

            if line.eq_ignore_ascii_case("q") {
                if self.confirm_quit()? {
                    return Ok(Exit::Quit);
                }
                continue;
            }

            let Some(position) = Position::from_label_or_number(&line) else {
                writeln!(
                    self.output,
                    "Unknown field {:?}, use 0-8 or a name like \"center\"",
                    line
                )?;
                continue;
            };

            match self.table.play(position.to_index()) {
                Ok(GameState::Open) => {}
                Ok(state) => {
                    self.print_board()?;
                    self.announce(state)?;
                    return Ok(Exit::Finished);
                }
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn confirm_quit(&mut self) -> Result<bool> {
        if !self.table.round_in_progress() {
            return Ok(true);
        }
        let answer = self.ask("Quit the running round? [y/N] ")?;
        Ok(answer.is_none_or(|a| a.eq_ignore_ascii_case("y")))
    }

    fn announce(&mut self, state: GameState) -> Result<()> {
        match self.table.winner() {
            Some(seat) if state.is_double_win() => writeln!(
                self.output,
                "{} wins with two lines!",
                self.config.name_of(seat)
            )?,
            Some(seat) => writeln!(self.output, "{} wins!", self.config.name_of(seat))?,
            None => writeln!(self.output, "No line can be completed anymore.")?,
        }
        Ok(())
    }

    fn print_board(&mut self) -> Result<()> {
        let first = self.config.mark_of(self.table.seat_of(Player::First));
        let second = self.config.mark_of(self.table.seat_of(Player::Second));
        let board = self.table.game().render(first, second, *self.config.mark_empty());
        write!(self.output, "{}", board)?;
        Ok(())
    }

    fn print_scores(&mut self) -> Result<()> {
        let score = self.table.score();
        let line = Seat::iter()
            .map(|seat| format!("{} {}", self.config.name_of(seat), score.of(seat)))
            .collect::<Vec<_>>()
            .join(" : ");
        writeln!(
            self.output,
            "Score after {} round(s): {}",
            self.table.rounds_completed(),
            line
        )?;
        Ok(())
    }

    /// Prompts and reads one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(
            TableConfig::with_names("Ada", "Bob"),
            Seat::X,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    #[test]
    fn test_single_round_win() {
        let mut console = console("8\n0\n6\n2\nbottom center\n");
        assert_eq!(console.run(Some(1)).unwrap(), Exit::Finished);
        assert_eq!(console.table().score().x, 1);

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Round 1: Ada opens"));
        assert!(out.contains("Ada wins!"));
        assert!(out.contains("Score after 1 round(s): Ada 1 : Bob 0"));
    }

    #[test]
    fn test_zero_round_limit_plays_nothing() {
        let mut console = console("8\n0\n6\n2\n7\n");
        assert_eq!(console.run(Some(0)).unwrap(), Exit::Finished);
        assert_eq!(console.table().rounds_completed(), 0);
        assert_eq!(console.table().score(), crate::Score::default());
        assert!(console.into_output().is_empty());
    }

    #[test]
    fn test_round_limit_stops_without_asking() {
        let mut console = console("8\n0\n6\n2\n7\n4\n");
        assert_eq!(console.run(Some(1)).unwrap(), Exit::Finished);
        assert_eq!(console.table().round(), 1);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(!out.contains("Another round?"));
        assert!(!out.contains("Round 2"));
    }

    #[test]
    fn test_bad_input_is_reported_and_retried() {
        let mut console = console("nowhere\n4\n4\nq\ny\n");
        assert_eq!(console.run(None).unwrap(), Exit::Quit);

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Unknown field \"nowhere\""));
        assert!(out.contains("Field 4 is not a free field on the board"));
        assert!(out.contains("Quit the running round?"));
    }

    #[test]
    fn test_declined_quit_continues_round() {
        let mut console = console("4\nq\nn\nq\ny\n");
        assert_eq!(console.run(None).unwrap(), Exit::Quit);
        assert_eq!(
            console.table().game().board_state()[4].owner(),
            Some(Player::First)
        );
    }

    #[test]
    fn test_quit_before_first_move_needs_no_confirmation() {
        let mut console = console("q\n");
        assert_eq!(console.run(None).unwrap(), Exit::Quit);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(!out.contains("Quit the running round?"));
    }

    #[test]
    fn test_end_of_input() {
        let mut console = console("4\n");
        assert_eq!(console.run(None).unwrap(), Exit::EndOfInput);
    }
}
