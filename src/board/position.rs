/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt::{self, Write},
    ops::Deref,
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};

use super::{Color, File, Move, Pawn, Rank, Square};

/// FEN string for the starting position of pawns-only chess.
pub const FEN_STARTPOS: &str = "8/pppppppp/8/8/8/8/PPPPPPPP/8 w -";

/// A square that a pawn may be captured through, left behind by a double push.
///
/// The target is only ever valid for the single reply that follows the double push.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EnPassant {
    /// The empty square the pawn passed over. Capturing pawns move onto this square.
    pub square: Square,

    /// Color of the pawn that double-pushed, and may now be captured.
    pub victim: Color,
}

impl EnPassant {
    /// The color that is allowed to capture through this target.
    #[inline(always)]
    pub const fn capturer(&self) -> Color {
        self.victim.opponent()
    }

    /// The square where the capturable pawn actually stands.
    ///
    /// A target always sits on `victim`'s third rank, so the victim stands one step in
    /// front of it and this never falls back to `square`.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::{Color, EnPassant, Square};
    /// let ep = EnPassant { square: Square::B6, victim: Color::Black };
    /// assert_eq!(ep.victim_square(), Square::B5);
    /// ```
    #[inline(always)]
    pub fn victim_square(&self) -> Square {
        self.square
            .forward_by(self.victim, 1)
            .unwrap_or(self.square)
    }
}

/// The pawns on the board, keyed by square.
///
/// Occupancy and color lookups are `O(1)`, and two pawns can never share a square.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Color>; Square::COUNT],
}

impl Board {
    /// An empty board.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            squares: [None; Square::COUNT],
        }
    }

    /// The standard starting layout: White pawns on rank 2, Black pawns on rank 7.
    pub fn startpos() -> Self {
        let mut board = Self::new();
        for color in Color::all() {
            for file in File::iter() {
                board.place(Square::new(file, color.start_rank()), color);
            }
        }
        board
    }

    /// Parses the piece placement field of a FEN string.
    ///
    /// Only pawns (`P` and `p`) and empty-square digits are accepted.
    pub fn from_fen(placements: &str) -> Result<Self> {
        let mut board = Self::new();

        if placements.matches('/').count() != 7 {
            bail!("FEN must have piece placements for all 8 ranks. Got {placements:?}");
        }

        // Ranks are listed from 8 down to 1
        for (rank, row) in Rank::iter().rev().zip(placements.split('/')) {
            let mut file = 0u8;

            for c in row.chars() {
                let color = match c {
                    'P' => Some(Color::White),
                    'p' => Some(Color::Black),
                    _ => None,
                };

                if let Some(color) = color {
                    let square = Square::new(File::new(file)?, rank);
                    board.place(square, color);
                    file += 1;
                } else {
                    let Some(empty) = c.to_digit(10).filter(|n| (1..=8).contains(n)) else {
                        bail!("FEN placements may only contain pawns or digits. Got {c:?}");
                    };
                    file += empty as u8;
                }

                if file as usize > File::COUNT {
                    bail!("FEN rank {rank} must describe exactly 8 files. Got {row:?}");
                }
            }

            if file as usize != File::COUNT {
                bail!("FEN rank {rank} must describe exactly 8 files. Got {row:?}");
            }
        }

        Ok(board)
    }

    /// Places a pawn of `color` on `square`, returning whatever was there before.
    #[inline(always)]
    pub fn place(&mut self, square: Square, color: Color) -> Option<Color> {
        self.squares[square].replace(color)
    }

    /// Removes the pawn on `square`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Color> {
        self.squares[square].take()
    }

    /// Fetches the color of the pawn on `square`, if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.squares[square]
    }

    /// Returns `true` if any pawn stands on `square`.
    #[inline(always)]
    pub fn has(&self, square: Square) -> bool {
        self.squares[square].is_some()
    }

    /// Returns `true` if a pawn of `color` stands on `square`.
    #[inline(always)]
    pub fn has_pawn(&self, square: Square, color: Color) -> bool {
        self.squares[square] == Some(color)
    }

    /// Iterates over every pawn on the board, from a1 to h8.
    pub fn pawns(&self) -> impl Iterator<Item = Pawn> + '_ {
        Square::iter().filter_map(|square| self.color_at(square).map(|color| Pawn::new(square, color)))
    }

    /// Iterates over the squares holding pawns of `color`.
    pub fn pawns_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        Square::iter().filter(move |&square| self.has_pawn(square, color))
    }

    /// Number of pawns of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.pawns_of(color).count()
    }

    /// Generates the piece placement field of a FEN string.
    pub fn to_fen(&self) -> String {
        let mut placements = Vec::with_capacity(Rank::COUNT);

        for rank in Rank::iter().rev() {
            let mut row = String::with_capacity(File::COUNT);
            let mut empty = 0;

            for file in File::iter() {
                if let Some(color) = self.color_at(file * rank) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(Pawn::new(file * rank, color).char());
                } else {
                    empty += 1;
                }
            }

            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            placements.push(row);
        }

        placements.join("/")
    }
}

impl Default for Board {
    /// The standard starting layout.
    #[inline(always)]
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    /// Renders the console grid, with rank 8 at the top and files a-h from left to right.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = "  +---+---+---+---+---+---+---+---+";

        writeln!(f, "{line}")?;
        for rank in Rank::iter().rev() {
            write!(f, "{rank} |")?;
            for file in File::iter() {
                let cell = match self.color_at(file * rank) {
                    Some(Color::White) => 'W',
                    Some(Color::Black) => 'B',
                    None => ' ',
                };
                write!(f, " {cell} |")?;
            }
            writeln!(f)?;
            writeln!(f, "{line}")?;
        }

        let files = File::iter().map(|file| file.to_string()).collect::<Vec<_>>();
        write!(f, "    {}", files.join("   "))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

/// The full state of a game: the board, whose turn it is, and any live en passant target.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    ep_target: Option<EnPassant>,
}

impl Position {
    /// The standard starting position, with White to move.
    pub fn new() -> Self {
        Self {
            board: Board::startpos(),
            side_to_move: Color::White,
            ep_target: None,
        }
    }

    /// Creates a [`Position`] from an already-populated [`Board`].
    pub fn with_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            ep_target: None,
        }
    }

    /// Parses a pawn-only FEN string: placements, side to move, and an optional en passant field.
    ///
    /// Trailing move counters are accepted and ignored.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::{Position, Square, Color};
    /// let pos = Position::from_fen("8/8/8/Pp6/8/8/8/8 w b6").unwrap();
    /// assert_eq!(pos.side_to_move(), Color::White);
    /// assert_eq!(pos.ep_target().map(|ep| ep.square), Some(Square::B6));
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut split = fen.split_ascii_whitespace();
        let placements = split
            .next()
            .ok_or(anyhow!("FEN string must have piece placements."))?;
        let board = Board::from_fen(placements)?;

        let active_color = split.next().unwrap_or("w");
        let side_to_move = Color::from_str(active_color)?;

        let mut pos = Self::with_board(board, side_to_move);

        let en_passant_target = split.next().unwrap_or("-");
        if en_passant_target != "-" {
            let square = Square::from_uci(en_passant_target)?;
            let victim = side_to_move.opponent();
            let ep = EnPassant { square, victim };

            if square.rank() != Rank::third(victim) {
                bail!("En passant target {square} is not on {victim}'s third rank");
            }
            if pos.board.has(square) || !pos.board.has_pawn(ep.victim_square(), victim) {
                bail!("En passant target {square} must be empty with a {} pawn in front of it", victim.name());
            }

            pos.ep_target = Some(ep);
        }

        Ok(pos)
    }

    /// Generates a FEN string for this position.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::{Position, FEN_STARTPOS};
    /// assert_eq!(Position::default().to_fen(), FEN_STARTPOS);
    /// ```
    pub fn to_fen(&self) -> String {
        let ep = self
            .ep_target
            .map(|ep| ep.square.to_uci())
            .unwrap_or(String::from("-"));

        format!(
            "{} {} {ep}",
            self.board.to_fen(),
            self.side_to_move.to_fen()
        )
    }

    /// The color whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The live en passant target, if the previous move was a double push.
    #[inline(always)]
    pub const fn ep_target(&self) -> Option<EnPassant> {
        self.ep_target
    }

    /// The en passant target usable by `color`, if any.
    #[inline(always)]
    pub fn ep_target_for(&self, color: Color) -> Option<Square> {
        self.ep_target
            .filter(|ep| ep.capturer() == color)
            .map(|ep| ep.square)
    }

    /// Hands the turn to the other side.
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Applies `mv` for the side to move without checking its legality.
    ///
    /// The pawn is relocated, any captured pawn is removed, and the en passant target is
    /// replaced: set if `mv` is a double push, cleared otherwise. The side to move is *not*
    /// toggled, so the caller can inspect the result first.
    pub fn make_move(&mut self, mv: Move) {
        let color = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());

        self.board.take(from);

        // En passant removes the pawn that passed over the destination, not one on it
        if mv.is_en_passant() {
            if let Some(victim) = to.backward_by(color, 1) {
                self.board.take(victim);
            }
        }

        // Relocating onto an enemy pawn replaces it
        self.board.place(to, color);

        self.ep_target = if mv.is_pawn_double_push() {
            from.forward_by(color, 1).map(|square| EnPassant {
                square,
                victim: color,
            })
        } else {
            None
        };
    }
}

impl Deref for Position {
    type Target = Board;
    /// A [`Position`] immutably dereferences to its [`Board`], for simplicity.
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    /// Wrapper for [`Position::from_fen`].
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Default for Position {
    /// Standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pawns = String::new();
        for pawn in self.board.pawns() {
            _ = write!(pawns, "{}{} ", pawn.char(), pawn.square);
        }

        write!(f, "{}\nPawns: {}", self.to_fen(), pawns.trim_end())
    }
}
