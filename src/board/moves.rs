/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};

use super::Square;

/// Represents the different kinds of moves a pawn can make.
///
/// Every [`Move`] handed out by the move generator carries its kind, so applying it
/// never has to re-derive whether it captured or passed over a square.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum MoveKind {
    /// A single-square advance onto an empty square.
    Quiet,

    /// A pawn's first move, advancing two empty squares and leaving an en passant target behind.
    PawnDoublePush,

    /// A diagonal step onto a square occupied by an enemy pawn, removing it from the board.
    Capture,

    /// A diagonal step onto the en passant target, removing the enemy pawn that just passed over it.
    EnPassantCapture,
}

impl MoveKind {
    /// Returns `true` if this kind removes an enemy pawn.
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        matches!(self, Self::Capture | Self::EnPassantCapture)
    }
}

impl fmt::Display for MoveKind {
    /// Displays a human-readable description for this [`MoveKind`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Quiet => "Quiet",
            Self::PawnDoublePush => "Pawn Double Push",
            Self::Capture => "Capture",
            Self::EnPassantCapture => "En Passant Capture",
        };

        write!(f, "{s}")
    }
}

/// A pawn move, as produced by the move generator.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    /// Creates a new [`Move`] from the given [`Square`]s and a [`MoveKind`].
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::{Move, MoveKind, Square};
    /// let e2e4 = Move::new(Square::E2, Square::E4, MoveKind::PawnDoublePush);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self { from, to, kind }
    }

    /// Fetches the source (or "from") part of this [`Move`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Fetches the destination (or "to") part of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Fetches the [`MoveKind`] of this [`Move`].
    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns `true` if this [`Move`] is a capture of any kind.
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.kind.is_capture()
    }

    /// Returns `true` if this [`Move`] is a non-capturing advance.
    #[inline(always)]
    pub const fn is_quiet(&self) -> bool {
        !self.is_capture()
    }

    /// Returns `true` if this [`Move`] is en passant.
    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassantCapture)
    }

    /// Returns `true` if this [`Move`] is a two-square advance.
    #[inline(always)]
    pub const fn is_pawn_double_push(&self) -> bool {
        matches!(self.kind, MoveKind::PawnDoublePush)
    }

    /// Returns `true` if this [`Move`] travels between the provided squares, whatever its kind.
    #[inline(always)]
    pub fn connects(&self, from: Square, to: Square) -> bool {
        self.from == from && self.to == to
    }

    /// Converts this [`Move`] to coordinate notation, such as `e2e4`.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Splits coordinate notation (`e2e4`) into its source and destination squares.
    ///
    /// The kind of the move depends on the position, so it is resolved by the game instead.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::{Move, Square};
    /// assert_eq!(Move::squares_from_uci("a5b6").unwrap(), (Square::A5, Square::B6));
    /// assert!(Move::squares_from_uci("i9i9").is_err());
    /// assert!(Move::squares_from_uci("e2e4q").is_err());
    /// ```
    pub fn squares_from_uci(mv: &str) -> Result<(Square, Square)> {
        if mv.len() != 4 || !mv.is_ascii() {
            bail!("Invalid move string: Must contain exactly 4 characters. Got {mv:?}");
        }

        let from: Square = mv[0..2].parse()?;
        let to: Square = mv[2..4].parse()?;

        Ok((from, to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    /// Displays the move along with its kind, such as `e2e4 (Pawn Double Push)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.kind)
    }
}

/// The legal moves for one side, split into advances and captures.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct LegalMoves {
    /// Non-capturing advances of one or two squares.
    pub quiets: Vec<Move>,

    /// Diagonal captures, including en passant.
    pub captures: Vec<Move>,
}

impl LegalMoves {
    /// Total number of legal moves.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.quiets.len() + self.captures.len()
    }

    /// Returns `true` if the side these moves belong to cannot move at all.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.quiets.is_empty() && self.captures.is_empty()
    }

    /// Iterates over every legal move, advances first.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.quiets.iter().chain(self.captures.iter())
    }

    /// Finds the legal move travelling from `from` to `to`, if there is one.
    pub fn find(&self, from: Square, to: Square) -> Option<Move> {
        self.iter().find(|mv| mv.connects(from, to)).copied()
    }
}

impl<'a> IntoIterator for &'a LegalMoves {
    type Item = &'a Move;
    type IntoIter = std::iter::Chain<std::slice::Iter<'a, Move>, std::slice::Iter<'a, Move>>;

    fn into_iter(self) -> Self::IntoIter {
        self.quiets.iter().chain(self.captures.iter())
    }
}

impl fmt::Display for LegalMoves {
    /// Comma-separated list of all moves, or `(none)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }

        let moves = self.iter().map(Move::to_uci).collect::<Vec<_>>();
        write!(f, "{}", moves.join(", "))
    }
}
