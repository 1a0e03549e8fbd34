/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use anyhow::{bail, Result};
use clap::Parser;

use crate::{Move, Position, Square};

/// Pawns-only chess for two players sharing a terminal.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Name of the player with the White pawns. Asked for on startup if omitted.
    #[arg(short, long)]
    pub white: Option<String>,

    /// Name of the player with the Black pawns. Asked for on startup if omitted.
    #[arg(short, long)]
    pub black: Option<String>,

    /// Start from a pawn-only FEN position instead of the standard one.
    ///
    /// For example: "8/pppppppp/8/8/8/8/PPPPPPPP/8 w -"
    #[arg(long)]
    pub fen: Option<Position>,

    /// Print a split perft of the starting position (see `--fen`) at this depth, then exit
    /// without playing.
    #[arg(long, value_name = "DEPTH")]
    pub perft: Option<usize>,

    /// If set, every applied move and its kind is echoed to stderr.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

/// A single line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the game immediately.
    Exit,

    /// Move the pawn on `from` to `to`.
    Move { from: Square, to: Square },
}

impl FromStr for Command {
    type Err = anyhow::Error;
    /// Parses `exit`, or a move of the exact shape `[a-h][1-8][a-h][1-8]`.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::{Command, Square};
    /// assert_eq!("exit".parse::<Command>().unwrap(), Command::Exit);
    /// assert_eq!(
    ///     "e2e4".parse::<Command>().unwrap(),
    ///     Command::Move { from: Square::E2, to: Square::E4 }
    /// );
    /// assert!("i9i9".parse::<Command>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "exit" {
            return Ok(Self::Exit);
        }

        match Move::squares_from_uci(s) {
            Ok((from, to)) => Ok(Self::Move { from, to }),
            Err(e) => bail!("Invalid Input: {e}"),
        }
    }
}
