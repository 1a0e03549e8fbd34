/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::Game;

/// Perform a perft at the specified depth, counting the leaf nodes of the legal move tree.
///
/// Finished games (won or stalemated) are leaves, whatever depth remains.
/// This performs bulk counting: at depth 1 it returns the number of available moves
/// rather than making each of them.
pub fn perft(game: &Game, depth: usize) -> u64 {
    perft_generic::<true, false>(game, depth)
}

/// Perform a splitperft at the specified depth, printing the node count reached after each root move.
pub fn splitperft(game: &Game, depth: usize) -> u64 {
    perft_generic::<false, true>(game, depth)
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(game: &Game, depth: usize) -> u64 {
    if depth == 0 || game.is_over() {
        return 1;
    }
    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return game.legal_moves().len() as u64;
    }

    game.legal_moves().iter().fold(0, |nodes, &mv| {
        let new_nodes = perft_generic::<BULK, false>(&game.with_move_made(mv), depth - 1);

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}
