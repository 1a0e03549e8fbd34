/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The rules engine: board state, move generation, move application and game results.
mod board;

/// Command-line arguments and in-game commands.
mod cli;

/// The console read-eval loop that drives a game between two players.
mod session;

pub use board::*;
pub use cli::*;
pub use session::*;
