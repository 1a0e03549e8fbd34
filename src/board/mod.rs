/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// A game of pawns-only chess: legality checks, turn flow and results.
mod game;

/// Legal move generation for pawns.
mod movegen;

/// Moves and their kinds.
mod moves;

/// Node counting over the legal move tree, for validating move generation.
mod perft;

/// Colors and pawns.
mod piece;

/// Board layouts, en passant targets, and FEN parsing.
mod position;

/// Squares, ranks, and files.
mod square;

pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
