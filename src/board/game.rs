/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref, str::FromStr};

use anyhow::Result;
use thiserror::Error;

use super::{generate_moves, Color, LegalMoves, Move, Position, Square};

/// Why a requested move was not played.
///
/// A rejection never changes the game, so the same player simply tries again.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum MoveError {
    /// The side to move has no pawn on the source square.
    #[error("No {} pawn at {square}", .color.name())]
    NoPawnAtSource { color: Color, square: Square },

    /// The pawn exists, but cannot travel to the destination.
    #[error("Illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// A win or stalemate has already been reached.
    #[error("The game is already over")]
    GameOver,
}

/// How a game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Outcome {
    /// The color either captured every enemy pawn or reached its goal rank.
    Win(Color),

    /// The side to move had no legal moves. Nobody wins.
    Stalemate,
}

impl fmt::Display for Outcome {
    /// The announcement printed when the game ends.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win(color) => write!(f, "{color} Wins!"),
            Self::Stalemate => write!(f, "Stalemate!"),
        }
    }
}

/// A game of pawns-only chess.
///
/// This wraps a [`Position`] together with the legal moves of the side to move, which are
/// generated once per half-move and are the only moves [`Game::apply_move`] will accept.
///
/// Most callers only need [`Game::play`], which applies a move, checks for a winner, hands
/// over the turn and checks for stalemate, in that order.
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    position: Position,

    /// Legal moves for `position.side_to_move()`.
    legal: LegalMoves,

    outcome: Option<Outcome>,
}

impl Game {
    /// Creates a new [`Game`] from the provided [`Position`], generating the moves for its side to move.
    ///
    /// A position that is already won starts out over, as if the side not to move had just
    /// made the winning move. Otherwise, a side to move that is already stuck is stalemated.
    pub fn new(position: Position) -> Self {
        let color = position.side_to_move();
        let mut game = Self {
            position,
            legal: LegalMoves::default(),
            outcome: None,
        };

        if let Some(win) = game
            .check_win(color.opponent())
            .or_else(|| game.check_win(color))
        {
            game.outcome = Some(win);
            return game;
        }

        game.legal = generate_moves(&game.position, color);
        game.outcome = game.check_stalemate();
        game
    }

    /// Creates a new [`Game`] from the provided pawn-only FEN string.
    #[inline(always)]
    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self::new(Position::from_fen(fen)?))
    }

    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// The legal moves of the side to move, as last generated.
    #[inline(always)]
    pub const fn legal_moves(&self) -> &LegalMoves {
        &self.legal
    }

    /// How the game ended, if it has.
    #[inline(always)]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Validates and applies the move from `from` to `to` for the side to move.
    ///
    /// The source must hold a pawn of the side to move, and the move must be one of the
    /// generated legal moves. On success the classified [`Move`] is returned; on failure
    /// nothing changes. The turn is *not* handed over.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<Move, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let color = self.position.side_to_move();
        if !self.position.has_pawn(from, color) {
            return Err(MoveError::NoPawnAtSource {
                color,
                square: from,
            });
        }

        let mv = self
            .legal
            .find(from, to)
            .ok_or(MoveError::IllegalMove { from, to })?;

        self.position.make_move(mv);
        Ok(mv)
    }

    /// Checks whether `last_mover` has just won.
    ///
    /// That is the case when the opponent has no pawns left, or when any pawn of
    /// `last_mover` stands on its goal rank.
    pub fn check_win(&self, last_mover: Color) -> Option<Outcome> {
        let wiped_out = self.position.count(last_mover.opponent()) == 0;
        let crossed = self
            .position
            .pawns_of(last_mover)
            .any(|square| square.rank() == last_mover.goal_rank());

        (wiped_out || crossed).then_some(Outcome::Win(last_mover))
    }

    /// Checks whether the side to move is stalemated, based on its generated moves.
    #[inline(always)]
    pub fn check_stalemate(&self) -> Option<Outcome> {
        self.legal.is_empty().then_some(Outcome::Stalemate)
    }

    /// Hands the turn to the other side and regenerates its legal moves.
    ///
    /// Returns [`Outcome::Stalemate`] if the new side to move cannot move.
    pub fn end_turn(&mut self) -> Option<Outcome> {
        self.position.toggle_side_to_move();
        self.legal = generate_moves(&self.position, self.position.side_to_move());
        self.outcome = self.check_stalemate();
        self.outcome
    }

    /// Plays a full half-move: apply, check for a win, hand over the turn, check for stalemate.
    ///
    /// Returns the [`Outcome`] if this move ended the game.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::{Game, Outcome, Square, Color};
    /// let mut game = Game::from_fen("8/1P6/8/8/8/pppppppp/8/8 w -").unwrap();
    /// let outcome = game.play(Square::B7, Square::B8).unwrap();
    /// assert_eq!(outcome, Some(Outcome::Win(Color::White)));
    /// ```
    pub fn play(&mut self, from: Square, to: Square) -> Result<Option<Outcome>, MoveError> {
        let mover = self.position.side_to_move();
        self.apply_move(from, to)?;
        Ok(self.check_terminal(mover))
    }

    /// Returns a copy of this game with the (already legal) `mv` played.
    ///
    /// The game must not be over yet. Use [`Game::play`] for moves that need validating.
    pub fn with_move_made(&self, mv: Move) -> Self {
        debug_assert!(!self.is_over(), "{mv} played in a finished game");
        let mut game = self.clone();
        let mover = game.position.side_to_move();
        game.position.make_move(mv);
        game.check_terminal(mover);
        game
    }

    /// Concludes the half-move `last_mover` just made.
    ///
    /// If `last_mover` won, the game ends there and the turn stays put. Otherwise the turn is
    /// handed over, and the game ends in stalemate if the new side to move is stuck.
    pub fn check_terminal(&mut self, last_mover: Color) -> Option<Outcome> {
        if let Some(win) = self.check_win(last_mover) {
            self.legal = LegalMoves::default();
            self.outcome = Some(win);
            return self.outcome;
        }

        self.end_turn()
    }
}

impl Deref for Game {
    type Target = Position;
    /// A [`Game`] immutably dereferences to a [`Position`], for simplicity.
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    /// Wrapper for [`Game::from_fen`]
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Default for Game {
    /// Standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::new(Position::default())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}\nMoves: {}\nOutcome: {:?}",
            self.position, self.legal, self.outcome
        )
    }
}
