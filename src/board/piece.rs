/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::{Rank, Square};

/// Represents the color of a player or a pawn.
///
/// White always moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns the direction in which pawns of this color advance along the ranks.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::Color;
    /// assert_eq!(Color::White.negation_multiplier(), 1);
    /// assert_eq!(Color::Black.negation_multiplier(), -1);
    /// ```
    #[inline(always)]
    pub const fn negation_multiplier(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Returns this [`Color`]'s opposite / enemy.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The rank every pawn of this color starts the game on.
    #[inline(always)]
    pub const fn start_rank(&self) -> Rank {
        Rank::second(*self)
    }

    /// The rank a pawn of this color must reach to win the game.
    #[inline(always)]
    pub const fn goal_rank(&self) -> Rank {
        Rank::eighth(*self)
    }

    /// Creates a [`Color`] from the side-to-move field of a FEN string.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::Color;
    /// assert_eq!(Color::from_fen('b').unwrap(), Color::Black);
    /// assert!(Color::from_fen('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_fen(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Invalid char for Color: Must be 'w' or 'b'. Got {color:?}"),
        }
    }

    /// The FEN char for this [`Color`] as a side to move.
    #[inline(always)]
    pub const fn to_fen(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Lowercase name of this [`Color`], as used in player-facing messages.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Not for Color {
    type Output = Self;
    /// Alias for [`Color::opponent`].
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_fen(c),
            _ => bail!("Invalid str for Color: Must be a single char. Got {s:?}"),
        }
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Color {
    /// Capitalized name of the color, as printed when a side wins.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "White"),
            Self::Black => write!(f, "Black"),
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// A single pawn on the board: where it stands, and whose it is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pawn {
    pub square: Square,
    pub color: Color,
}

impl Pawn {
    #[inline(always)]
    pub const fn new(square: Square, color: Color) -> Self {
        Self { square, color }
    }

    /// The board character for this pawn: `P` for White, `p` for Black.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => 'P',
            Color::Black => 'p',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
        for color in Color::all() {
            assert_eq!(color.opponent().opponent(), color);
        }
    }

    #[test]
    fn test_ranks_per_color() {
        assert_eq!(Color::White.start_rank(), Rank::TWO);
        assert_eq!(Color::Black.start_rank(), Rank::SEVEN);
        assert_eq!(Color::White.goal_rank(), Rank::EIGHT);
        assert_eq!(Color::Black.goal_rank(), Rank::ONE);
    }

    #[test]
    fn test_parsing() {
        assert_eq!("w".parse::<Color>().unwrap(), Color::White);
        assert_eq!("b".parse::<Color>().unwrap(), Color::Black);
        assert!("wb".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }
}
