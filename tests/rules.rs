/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use pawnstorm::{
    generate_moves, Color, Command, EnPassant, Game, MoveError, MoveKind, Outcome, Square,
};

/// Walks every line of play from `game` down to `depth`, calling `check` on every node.
fn walk(game: &Game, depth: usize, check: &mut impl FnMut(&Game)) {
    check(game);
    if depth == 0 {
        return;
    }
    for &mv in game.legal_moves() {
        walk(&game.with_move_made(mv), depth - 1, check);
    }
}

#[test]
fn test_moves_never_land_on_own_pawns() {
    let mut nodes = 0;
    walk(&Game::default(), 3, &mut |game| {
        nodes += 1;
        for color in Color::all() {
            for mv in &generate_moves(game.position(), color) {
                assert!(
                    !game.has_pawn(mv.to(), color),
                    "{mv:?} lands on a {} pawn in {:?}",
                    color.name(),
                    game.position()
                );
            }
        }
    });
    assert_eq!(nodes, 1 + 16 + 256 + 3846);
}

#[test]
fn test_colors_alternate() {
    let mut game = Game::default();
    assert_eq!(game.side_to_move(), Color::White);

    game.play(Square::E2, Square::E4).unwrap();
    assert_eq!(game.side_to_move(), Color::Black);

    // White may not move twice in a row
    assert_eq!(
        game.play(Square::D2, Square::D4),
        Err(MoveError::NoPawnAtSource {
            color: Color::Black,
            square: Square::D2
        })
    );

    game.play(Square::D7, Square::D5).unwrap();
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn test_double_push_target_lasts_one_reply() {
    let mut game = Game::default();

    game.play(Square::E2, Square::E4).unwrap();
    assert_eq!(
        game.ep_target(),
        Some(EnPassant {
            square: Square::E3,
            victim: Color::White
        })
    );
    assert_eq!(game.ep_target_for(Color::Black), Some(Square::E3));

    // Black ignores it, so it is gone before White's next turn
    game.play(Square::A7, Square::A6).unwrap();
    assert_eq!(game.ep_target(), None);
}

#[test]
fn test_unused_en_passant_expires() {
    let mut game = Game::from_fen("8/7p/8/8/3p4/8/4P3/8 w -").unwrap();

    game.play(Square::E2, Square::E4).unwrap();
    let capture = game.legal_moves().find(Square::D4, Square::E3);
    assert_eq!(capture.map(|mv| mv.kind()), Some(MoveKind::EnPassantCapture));

    game.play(Square::H7, Square::H6).unwrap();
    game.play(Square::E4, Square::E5).unwrap();

    // The window has closed
    assert!(game.legal_moves().captures.is_empty());
    assert!(matches!(
        game.play(Square::D4, Square::E3),
        Err(MoveError::IllegalMove { .. })
    ));
}

#[test]
fn test_en_passant_removes_the_passed_pawn() {
    let mut game = Game::from_fen("8/1p5p/8/P7/8/8/8/8 b -").unwrap();

    game.play(Square::B7, Square::B5).unwrap();
    let ep = game.legal_moves().find(Square::A5, Square::B6);
    assert_eq!(ep.map(|mv| mv.kind()), Some(MoveKind::EnPassantCapture));

    let outcome = game.play(Square::A5, Square::B6).unwrap();
    assert_eq!(outcome, None);
    assert!(game.has_pawn(Square::B6, Color::White));
    assert!(!game.has(Square::B5));
    assert!(!game.has(Square::A5));
    assert_eq!(game.count(Color::Black), 1);
    assert_eq!(game.ep_target(), None);
}

#[test]
fn test_black_en_passant() {
    let mut game = Game::from_fen("8/8/8/8/5p2/8/4P3/8 w -").unwrap();

    game.play(Square::E2, Square::E4).unwrap();
    let outcome = game.play(Square::F4, Square::E3).unwrap();

    // White's only pawn was taken from e4
    assert_eq!(outcome, Some(Outcome::Win(Color::Black)));
    assert!(!game.has(Square::E4));
    assert!(game.has_pawn(Square::E3, Color::Black));
}

#[test]
fn test_reaching_last_rank_wins_immediately() {
    let mut game = Game::from_fen("8/P7/8/pppppppp/8/8/8/8 w -").unwrap();
    assert!(!game.legal_moves().is_empty());

    let outcome = game.play(Square::A7, Square::A8).unwrap();
    assert_eq!(outcome, Some(Outcome::Win(Color::White)));
    assert_eq!(game.count(Color::Black), 8);
}

#[test]
fn test_capturing_onto_last_rank_wins() {
    let mut game = Game::from_fen("1p6/P7/8/8/8/8/7p/8 w -").unwrap();
    let outcome = game.play(Square::A7, Square::B8).unwrap();
    assert_eq!(outcome, Some(Outcome::Win(Color::White)));
}

#[test]
fn test_capturing_everything_wins() {
    let mut game = Game::from_fen("8/8/8/8/8/3p4/4P3/8 w -").unwrap();
    let outcome = game.play(Square::E2, Square::D3).unwrap();
    assert_eq!(outcome, Some(Outcome::Win(Color::White)));
}

#[test]
fn test_stalemate_is_a_draw() {
    let mut game = Game::from_fen("8/8/3p4/8/3P4/8/8/8 b -").unwrap();

    // Black walks into White's pawn, leaving White with nothing to do
    let outcome = game.play(Square::D6, Square::D5).unwrap();
    assert_eq!(outcome, Some(Outcome::Stalemate));
    assert_eq!(game.side_to_move(), Color::White);
    assert!(game.legal_moves().quiets.is_empty());
    assert!(game.legal_moves().captures.is_empty());
    assert_ne!(game.outcome(), Some(Outcome::Win(Color::Black)));
}

#[test]
fn test_capture_alone_avoids_stalemate() {
    // White's pawn is blocked head-on, but can still take on d5
    let game = Game::from_fen("8/8/8/3pp3/4P3/8/8/8 w -").unwrap();
    assert_eq!(game.outcome(), None);
    assert!(game.legal_moves().quiets.is_empty());
    assert_eq!(game.legal_moves().captures.len(), 1);
}

#[test]
fn test_invalid_input_never_reaches_the_game() {
    assert!("i9i9".parse::<Command>().is_err());
    assert!("e2-e4".parse::<Command>().is_err());
    assert_eq!("exit".parse::<Command>().unwrap(), Command::Exit);
}
