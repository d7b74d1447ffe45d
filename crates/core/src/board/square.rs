//! Files, ranks and squares of the 8x8 board

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// A board file, a through h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// 0-based ordinal, a = 0 .. h = 7.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<File> {
        File::ALL.get(index as usize).copied()
    }

    /// Accepts `a`..`h` in either case.
    pub fn from_char(c: char) -> Option<File> {
        match c.to_ascii_lowercase() {
            c @ 'a'..='h' => File::from_index(c as u8 - b'a'),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        (b'a' + self.index()) as char
    }

    /// Absolute file distance.
    pub fn distance(self, other: File) -> u8 {
        self.index().abs_diff(other.index())
    }
}

/// A board rank, 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const FIRST: Rank = Rank(1);
    pub const SECOND: Rank = Rank(2);
    pub const SEVENTH: Rank = Rank(7);
    pub const EIGHTH: Rank = Rank(8);

    pub fn new(rank: u8) -> Option<Rank> {
        (1..=8).contains(&rank).then_some(Rank(rank))
    }

    pub fn from_char(c: char) -> Option<Rank> {
        c.to_digit(10).and_then(|d| Rank::new(d as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn distance(self, other: Rank) -> u8 {
        self.0.abs_diff(other.0)
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Rank> {
        (1..=8).map(Rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    pub const fn new(file: File, rank: Rank) -> Square {
        Square { file, rank }
    }

    /// Builds a square from 0-based file and rank indices.
    pub fn from_indices(file: i8, rank: i8) -> Option<Square> {
        let file = u8::try_from(file).ok().and_then(File::from_index)?;
        let rank = u8::try_from(rank + 1).ok().and_then(Rank::new)?;
        Some(Square::new(file, rank))
    }

    /// The square `df` files and `dr` ranks away, if it is on the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::from_indices(
            self.file.index() as i8 + df,
            self.rank.get() as i8 - 1 + dr,
        )
    }

    /// Signed (file, rank) displacement from `self` to `to`.
    pub fn delta(self, to: Square) -> (i8, i8) {
        (
            to.file.index() as i8 - self.file.index() as i8,
            to.rank.get() as i8 - self.rank.get() as i8,
        )
    }

    pub fn with_file(self, file: File) -> Square {
        Square::new(file, self.rank)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        Rank::all().flat_map(|rank| File::ALL.into_iter().map(move |file| Square::new(file, rank)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank)
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::BadSquare(s.to_string());
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(bad());
        };
        let file = File::from_char(f).ok_or_else(bad)?;
        let rank = Rank::from_char(r).ok_or_else(bad)?;
        Ok(Square::new(file, rank))
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
