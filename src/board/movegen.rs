/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Color, LegalMoves, Move, MoveKind, Position, Square};

/// File offsets of the two diagonal capture squares.
const CAPTURE_DELTAS: [i8; 2] = [-1, 1];

/// Generates every legal move for `color` in `position`, split into advances and captures.
///
/// Pawns advance one square onto an empty square, or two from their starting rank when
/// both squares ahead are empty. They capture one square diagonally forward, onto an
/// enemy pawn or onto the en passant target left for `color`.
///
/// `color` does not have to be the side to move; the position's turn is never consulted.
///
/// # Example
/// ```
/// # use pawnstorm::{generate_moves, Color, Position};
/// let moves = generate_moves(&Position::default(), Color::White);
/// assert_eq!(moves.quiets.len(), 16);
/// assert!(moves.captures.is_empty());
/// ```
pub fn generate_moves(position: &Position, color: Color) -> LegalMoves {
    let mut moves = LegalMoves::default();

    for from in position.pawns_of(color) {
        let LegalMoves { quiets, captures } = generate_moves_from(position, color, from);
        moves.quiets.extend(quiets);
        moves.captures.extend(captures);
    }

    moves
}

/// Generates every legal move for `from`, a pawn of `color`.
pub fn generate_moves_from(position: &Position, color: Color, from: Square) -> LegalMoves {
    let mut moves = LegalMoves::default();
    if !position.has_pawn(from, color) {
        return moves;
    }

    generate_pushes(position, color, from, &mut moves.quiets);
    generate_captures(
        position,
        color,
        from,
        position.ep_target_for(color),
        &mut moves.captures,
    );

    moves
}

fn generate_pushes(position: &Position, color: Color, from: Square, moves: &mut Vec<Move>) {
    let Some(single) = from.forward_by(color, 1).filter(|&to| !position.has(to)) else {
        return;
    };
    moves.push(Move::new(from, single, MoveKind::Quiet));

    // A blocked first square also blocks the second
    if from.rank() != color.start_rank() {
        return;
    }
    if let Some(double) = from.forward_by(color, 2).filter(|&to| !position.has(to)) {
        moves.push(Move::new(from, double, MoveKind::PawnDoublePush));
    }
}

fn generate_captures(
    position: &Position,
    color: Color,
    from: Square,
    ep_square: Option<Square>,
    moves: &mut Vec<Move>,
) {
    let enemy = color.opponent();

    for file_delta in CAPTURE_DELTAS {
        let Some(to) = from.offset(file_delta, color.negation_multiplier()) else {
            continue;
        };

        if position.has_pawn(to, enemy) {
            moves.push(Move::new(from, to, MoveKind::Capture));
        } else if ep_square == Some(to) {
            moves.push(Move::new(from, to, MoveKind::EnPassantCapture));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(moves: &[Move]) -> Vec<String> {
        moves.iter().map(Move::to_uci).collect()
    }

    #[test]
    fn test_start_rank_pawn_has_single_then_double() {
        let pos = Position::default();
        let moves = generate_moves_from(&pos, Color::White, Square::E2);

        assert_eq!(squares(&moves.quiets), ["e2e3", "e2e4"]);
        assert_eq!(moves.quiets[0].kind(), MoveKind::Quiet);
        assert_eq!(moves.quiets[1].kind(), MoveKind::PawnDoublePush);
        assert!(moves.captures.is_empty());
    }

    #[test]
    fn test_second_square_blocked() {
        let pos = Position::from_fen("8/8/8/8/4p3/8/4P3/8 w -").unwrap();
        let moves = generate_moves(&pos, Color::White);
        assert_eq!(squares(&moves.quiets), ["e2e3"]);
    }

    #[test]
    fn test_first_square_blocks_both() {
        // Advances never jump over a pawn, even a friendly one
        let pos = Position::from_fen("8/8/8/8/8/4P3/4P3/8 w -").unwrap();
        let moves = generate_moves_from(&pos, Color::White, Square::E2);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_double_push_only_from_start_rank() {
        let pos = Position::from_fen("8/8/8/8/8/4P3/8/8 w -").unwrap();
        let moves = generate_moves(&pos, Color::White);
        assert_eq!(squares(&moves.quiets), ["e3e4"]);
    }

    #[test]
    fn test_black_moves_down_the_board() {
        let pos = Position::default();
        let moves = generate_moves_from(&pos, Color::Black, Square::D7);
        assert_eq!(squares(&moves.quiets), ["d7d6", "d7d5"]);
    }

    #[test]
    fn test_captures_on_both_diagonals() {
        let pos = Position::from_fen("8/8/8/3p1p2/4P3/8/8/8 w -").unwrap();
        let moves = generate_moves(&pos, Color::White);

        assert_eq!(squares(&moves.captures), ["e4d5", "e4f5"]);
        assert!(moves.captures.iter().all(|mv| mv.kind() == MoveKind::Capture));
        assert_eq!(squares(&moves.quiets), ["e4e5"]);
    }

    #[test]
    fn test_no_capture_of_own_pawns() {
        let pos = Position::from_fen("8/8/8/3P1P2/4P3/8/8/8 w -").unwrap();
        let moves = generate_moves_from(&pos, Color::White, Square::E4);
        assert!(moves.captures.is_empty());
    }

    #[test]
    fn test_no_wrapping_at_board_edge() {
        let pos = Position::from_fen("8/8/8/7p/P7/8/8/8 w -").unwrap();
        let moves = generate_moves_from(&pos, Color::White, Square::A4);
        assert!(moves.captures.is_empty());
    }

    #[test]
    fn test_en_passant_only_for_capturer() {
        let pos = Position::from_fen("8/8/8/Pp6/8/8/8/8 w b6").unwrap();

        let white = generate_moves(&pos, Color::White);
        assert_eq!(squares(&white.captures), ["a5b6"]);
        assert_eq!(white.captures[0].kind(), MoveKind::EnPassantCapture);

        // The target belongs to White; Black gains nothing from it
        let black = generate_moves(&pos, Color::Black);
        assert!(black.captures.is_empty());
    }

    #[test]
    fn test_frontal_block_leaves_no_moves() {
        let pos = Position::from_fen("8/8/8/4p3/4P3/8/8/8 w -").unwrap();
        assert!(generate_moves(&pos, Color::White).is_empty());
        assert!(generate_moves(&pos, Color::Black).is_empty());
    }
}
