/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Mul},
    str::FromStr,
};

use anyhow::{bail, Context, Result};

use super::Color;

/// Declares the named square constants, one file at a time.
macro_rules! square_consts {
    ($($file:ident: $($name:ident => $rank:ident),+;)+) => {
        $($(pub const $name: Self = Self::new(File::$file, Rank::$rank);)+)+
    };
}

/// Represents a single square on an `8x8` board.
///
/// Squares are indexed least-significant-file first:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    square_consts! {
        A: A1 => ONE, A2 => TWO, A3 => THREE, A4 => FOUR, A5 => FIVE, A6 => SIX, A7 => SEVEN, A8 => EIGHT;
        B: B1 => ONE, B2 => TWO, B3 => THREE, B4 => FOUR, B5 => FIVE, B6 => SIX, B7 => SEVEN, B8 => EIGHT;
        C: C1 => ONE, C2 => TWO, C3 => THREE, C4 => FOUR, C5 => FIVE, C6 => SIX, C7 => SEVEN, C8 => EIGHT;
        D: D1 => ONE, D2 => TWO, D3 => THREE, D4 => FOUR, D5 => FIVE, D6 => SIX, D7 => SEVEN, D8 => EIGHT;
        E: E1 => ONE, E2 => TWO, E3 => THREE, E4 => FOUR, E5 => FIVE, E6 => SIX, E7 => SEVEN, E8 => EIGHT;
        F: F1 => ONE, F2 => TWO, F3 => THREE, F4 => FOUR, F5 => FIVE, F6 => SIX, F7 => SEVEN, F8 => EIGHT;
        G: G1 => ONE, G2 => TWO, G3 => THREE, G4 => FOUR, G5 => FIVE, G6 => SIX, G7 => SEVEN, G8 => EIGHT;
        H: H1 => ONE, H2 => TWO, H3 => THREE, H4 => FOUR, H5 => FIVE, H6 => SIX, H7 => SEVEN, H8 => EIGHT;
    }

    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Returns an iterator over all squares, from a1 to h8.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::H8);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::{Square, File, Rank};
    /// assert_eq!(Square::new(File::C, Rank::FOUR), Square::C4);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 | rank.0 << 3)
    }

    /// Fetches the [`File`] of this [`Square`].
    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & 0b111)
    }

    /// Fetches the [`Rank`] of this [`Square`].
    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Returns this [`Square`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Creates a [`Square`] from coordinate notation such as `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::Square;
    /// assert_eq!(Square::from_uci("c4").unwrap(), Square::C4);
    /// assert!(Square::from_uci("i9").is_err());
    /// assert!(Square::from_uci("c").is_err());
    /// ```
    #[inline(always)]
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid Square string: String must contain exactly 2 characters. Got {square:?}")
        };

        Ok(Self::new(File::from_char(file)?, Rank::from_char(rank)?))
    }

    /// Converts this [`Square`] to coordinate notation.
    #[inline(always)]
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Attempt to offset this [`Square`] by the file and rank deltas.
    ///
    /// Returns [`None`] if the result would fall off the board.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let Some(file) = self.file().offset(file_delta) else {
            return None;
        };

        let Some(rank) = self.rank().offset(rank_delta) else {
            return None;
        };

        Some(Self::new(file, rank))
    }

    /// Moves this [`Square`] `n` ranks toward `color`'s goal rank, if possible.
    ///
    /// # Example
    /// ```
    /// # use pawnstorm::{Square, Color};
    /// assert_eq!(Square::C4.forward_by(Color::White, 2), Some(Square::C6));
    /// assert_eq!(Square::C4.forward_by(Color::Black, 1), Some(Square::C3));
    /// assert_eq!(Square::C1.forward_by(Color::Black, 1), None);
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * color.negation_multiplier())
    }

    /// Moves this [`Square`] `n` ranks back toward `color`'s own side, if possible.
    #[inline(always)]
    pub const fn backward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * color.opponent().negation_multiplier())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_uci`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_uci(value)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_uci(), self.0)
    }
}

/// Represents one of eight ranks on the board.
///
/// Internally zero-based, so [`Rank::ONE`] holds `0`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all ranks, in ascending order.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Construct a new [`Rank`] from a zero-based value.
    #[inline(always)]
    pub fn new(rank: u8) -> Result<Self> {
        if rank > Self::MAX {
            bail!("Invalid int for Rank: Must be between [0, {}]. Got {rank}", Self::MAX);
        }

        Ok(Self(rank))
    }

    /// Second rank relative to `color`; where its pawns start.
    #[inline(always)]
    pub const fn second(color: Color) -> Self {
        [Self::TWO, Self::SEVEN][color.index()]
    }

    /// Third rank relative to `color`; the square a double push passes over.
    #[inline(always)]
    pub const fn third(color: Color) -> Self {
        [Self::THREE, Self::SIX][color.index()]
    }

    #[inline(always)]
    pub const fn eighth(color: Color) -> Self {
        [Self::EIGHT, Self::ONE][color.index()]
    }

    /// Parses a rank digit (`'1'..='8'`).
    #[inline(always)]
    pub fn from_char(rank: char) -> Result<Self> {
        let rank_int = rank
            .to_digit(10)
            .and_then(|r| r.checked_sub(1))
            .context(format!(
                "Invalid char for Rank: Must be between [1, 8]. Got {rank:?}"
            ))?;

        Self::new(rank_int as u8)
    }

    /// Offsets this [`Rank`] by `delta`, returning [`None`] if it leaves the board.
    #[inline(always)]
    pub const fn offset(&self, delta: i8) -> Option<Self> {
        let rank = self.0 as i8 + delta;
        if rank < 0 || rank > Self::MAX as i8 {
            None
        } else {
            Some(Self(rank as u8))
        }
    }

    /// The one-based number of this rank, as printed on the board.
    #[inline(always)]
    pub const fn number(&self) -> u8 {
        self.0 + 1
    }
}

impl Mul<File> for Rank {
    type Output = Square;
    #[inline(always)]
    fn mul(self, rhs: File) -> Self::Output {
        Square::new(rhs, self)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

/// Represents one of eight files on the board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all files, from a to h.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Construct a new [`File`] from a zero-based value.
    #[inline(always)]
    pub fn new(file: u8) -> Result<Self> {
        if file > Self::MAX {
            bail!("Invalid int for File: Must be between [0, {}]. Got {file}", Self::MAX);
        }

        Ok(Self(file))
    }

    /// Parses a lowercase file letter (`'a'..='h'`).
    #[inline(always)]
    pub fn from_char(file: char) -> Result<Self> {
        if !('a'..='h').contains(&file) {
            bail!("Invalid char for File: Must be between [a, h]. Got {file:?}");
        }

        Ok(Self(file as u8 - b'a'))
    }

    /// Offsets this [`File`] by `delta`, returning [`None`] if it leaves the board.
    #[inline(always)]
    pub const fn offset(&self, delta: i8) -> Option<Self> {
        let file = self.0 as i8 + delta;
        if file < 0 || file > Self::MAX as i8 {
            None
        } else {
            Some(Self(file as u8))
        }
    }

    /// The lowercase letter of this file.
    #[inline(always)]
    pub const fn char(&self) -> char {
        (b'a' + self.0) as char
    }
}

impl Mul<Rank> for File {
    type Output = Square;
    #[inline(always)]
    fn mul(self, rhs: Rank) -> Self::Output {
        Square::new(self, rhs)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        assert_eq!(Square::new(File(0), Rank(0)).to_string(), "a1");
        assert_eq!(Square::new(File(7), Rank(0)).to_string(), "h1");
        assert_eq!(Square::new(File(0), Rank(7)).to_string(), "a8");
        assert_eq!(Square::new(File(7), Rank(7)).to_string(), "h8");
        assert_eq!(Square::D4.index(), 27);
    }

    #[test]
    fn test_parsing() {
        assert_eq!(Rank::from_char('1').unwrap(), Rank::ONE);
        assert_eq!(Rank::from_char('8').unwrap(), Rank::EIGHT);
        assert!(Rank::from_char('0').is_err());
        assert!(Rank::from_char('9').is_err());

        assert_eq!(File::from_char('a').unwrap(), File::A);
        assert_eq!(File::from_char('h').unwrap(), File::H);
        assert!(File::from_char('i').is_err());
        assert!(File::from_char('A').is_err());

        assert_eq!(Square::try_from("e2").unwrap(), Square::E2);
        assert_eq!("h8".parse::<Square>().unwrap(), Square::H8);
        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("a10").is_err());
        assert!(Square::try_from("").is_err());
    }

    #[test]
    fn test_directions() {
        assert_eq!(Square::E2.forward_by(Color::White, 1), Some(Square::E3));
        assert_eq!(Square::E7.forward_by(Color::Black, 2), Some(Square::E5));
        assert_eq!(Square::E8.forward_by(Color::White, 1), None);
        assert_eq!(Square::B6.backward_by(Color::White, 1), Some(Square::B5));
        assert_eq!(Square::B3.backward_by(Color::Black, 1), Some(Square::B4));
        assert_eq!(Square::H4.offset(1, 1), None);
    }

    #[test]
    fn test_math() {
        assert_eq!(File::A * Rank::ONE, Square::A1);
        assert_eq!(Rank::FOUR * File::G, Square::G4);
        assert_eq!(Rank::EIGHT.offset(-1), Some(Rank::SEVEN));
        assert_eq!(File::A.offset(-1), None);
    }

    #[test]
    fn test_indexing() {
        let mut board = [0; Square::COUNT];
        board[Square::D5] = u8::MAX;
        assert_eq!(board[35], u8::MAX);
    }
}
