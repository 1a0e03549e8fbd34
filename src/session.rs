/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::{Color, Command, Game, Outcome};

/// A console game between two players, reading moves from `input` and writing to `output`.
///
/// The session owns the [`Game`] and is the only thing that talks to the players. Every line
/// is either `exit`, a move such as `e2e4`, or rejected on the spot. Rejected moves leave the
/// game untouched and the same player is asked again.
#[derive(Debug)]
pub struct Session<R, W> {
    game: Game,

    /// Display names, indexed by [`Color`]. Asked for on startup if not provided.
    names: [Option<String>; Color::COUNT],

    input: R,

    output: W,

    /// Echo every applied move to stderr.
    verbose: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Constructs a new [`Session`] to be executed with [`Session::run`].
    pub fn new(game: Game, input: R, output: W) -> Self {
        Self {
            game,
            names: [None, None],
            input,
            output,
            verbose: false,
        }
    }

    /// Sets the player names up front, so they are not asked for.
    pub fn with_names(mut self, white: Option<String>, black: Option<String>) -> Self {
        self.names = [white, black];
        self
    }

    /// Enables echoing of applied moves to stderr.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Consumes the session, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Execute the main loop: ask for names, then alternate turns until someone wins,
    /// the game stalemates, or a player types `exit`.
    ///
    /// Running out of input is treated like `exit`. Returns the outcome, if the game finished.
    pub fn run(&mut self) -> Result<Option<Outcome>> {
        writeln!(self.output, " Pawns-Only Chess")?;

        if !self.ask_names()? {
            return self.quit(None);
        }

        writeln!(self.output, "{}", self.game)?;
        writeln!(self.output)?;

        // A custom start position may already be decided
        if let Some(outcome) = self.game.outcome() {
            writeln!(self.output, "{outcome}")?;
            return self.quit(Some(outcome));
        }

        loop {
            let name = self.name(self.game.side_to_move()).to_string();
            writeln!(self.output, "{name}'s turn:")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return self.quit(None);
            };

            let (from, to) = match line.parse::<Command>() {
                Ok(Command::Exit) => return self.quit(None),
                Ok(Command::Move { from, to }) => (from, to),
                Err(_) => {
                    writeln!(self.output, "Invalid Input")?;
                    continue;
                }
            };

            let mover = self.game.side_to_move();
            match self.game.apply_move(from, to) {
                Ok(mv) => {
                    if self.verbose {
                        eprintln!("{} played {mv:?}", mover);
                    }
                    writeln!(self.output, "{}", self.game)?;
                }
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            }

            if let Some(outcome) = self.game.check_terminal(mover) {
                writeln!(self.output, "{outcome}")?;
                return self.quit(Some(outcome));
            }
        }
    }

    /// Asks for any missing player names. Returns `false` if input ran out first.
    fn ask_names(&mut self) -> Result<bool> {
        let prompts = ["First Player's name:", "Second Player's name:"];

        for color in Color::all() {
            if self.names[color].is_some() {
                continue;
            }

            writeln!(self.output, "{}", prompts[color])?;
            self.output.flush()?;

            let Some(name) = self.read_line()? else {
                return Ok(false);
            };
            self.names[color] = Some(name);
        }

        Ok(true)
    }

    /// The display name of `color`'s player, falling back to the color itself.
    fn name(&self, color: Color) -> &str {
        match &self.names[color] {
            Some(name) => name,
            None => match color {
                Color::White => "White",
                Color::Black => "Black",
            },
        }
    }

    /// Reads one line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buffer = String::new();
        let bytes = self
            .input
            .read_line(&mut buffer)
            .context("Failed to read a line of player input")?;

        // For ctrl + d
        if bytes == 0 {
            return Ok(None);
        }

        Ok(Some(buffer.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn quit(&mut self, outcome: Option<Outcome>) -> Result<Option<Outcome>> {
        writeln!(self.output, "Bye!")?;
        self.output.flush()?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(game: Game, script: &str) -> (Option<Outcome>, String) {
        let mut session = Session::new(game, script.as_bytes(), Vec::new());
        let outcome = session.run().unwrap();
        let output = String::from_utf8(session.into_output()).unwrap();
        (outcome, output)
    }

    #[test]
    fn test_names_are_prompted_and_used() {
        let (outcome, output) = run_script(Game::default(), "Alice\nBob\ne2e4\nexit\n");

        assert_eq!(outcome, None);
        assert!(output.starts_with(" Pawns-Only Chess\nFirst Player's name:\nSecond Player's name:\n"));
        assert!(output.contains("Alice's turn:"));
        assert!(output.contains("Bob's turn:"));
        assert!(output.ends_with("Bye!\n"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let (outcome, output) = run_script(Game::default(), "Alice\n");
        assert_eq!(outcome, None);
        assert!(output.ends_with("Second Player's name:\nBye!\n"));
    }

    #[test]
    fn test_decided_start_position() {
        let game = Game::from_fen("8/8/8/4p3/4P3/8/8/8 w -").unwrap();
        let (outcome, output) = run_script(game, "A\nB\n");
        assert_eq!(outcome, Some(Outcome::Stalemate));
        assert!(output.ends_with("Stalemate!\nBye!\n"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let (_, output) = run_script(Game::default(), "A\r\nB\r\ne2e4\r\nexit\r\n");
        assert!(output.contains("B's turn:"));
        assert!(!output.contains("Invalid Input"));
    }
}
