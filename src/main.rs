/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io;

use clap::Parser;
use pawnstorm::{splitperft, Cli, Game, Session};

fn main() {
    let cli = Cli::parse();

    let game = cli.fen.map(Game::new).unwrap_or_default();

    if let Some(depth) = cli.perft {
        let nodes = splitperft(&game, depth);
        println!("\n{nodes}");
        return;
    }

    let mut session = Session::new(game, io::stdin().lock(), io::stdout().lock())
        .with_names(cli.white, cli.black)
        .with_verbose(cli.verbose);

    if let Err(e) = session.run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}
