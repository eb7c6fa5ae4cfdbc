use crate::location::BOARD_SIZE;
use std::ops::Not;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent a color.
///
/// Used both for piece ownership and tile shading; the two are independent namespaces that
/// happen to share a representation.
#[derive(PartialOrd, PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

/// How many colors are there?
pub const NUM_COLORS: usize = 2;
/// List all colors
pub const ALL_COLORS: [Color; NUM_COLORS] = [Color::White, Color::Black];

impl Color {
    /// Convert the `Color` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Convert the `Color` to the row its pieces start the game on.  This is the reference
    /// rank for castling, whether or not the king has since moved.
    #[inline]
    pub fn to_home_rank(&self) -> i8 {
        match *self {
            Color::White => 0,
            Color::Black => BOARD_SIZE - 1,
        }
    }

    /// Convert the `Color` to the row its pawns start the game on.
    #[inline]
    pub fn to_second_rank(&self) -> i8 {
        match *self {
            Color::White => 1,
            Color::Black => BOARD_SIZE - 2,
        }
    }

    /// The direction this color's pawns advance in: White walks up the rows, Black walks
    /// down.
    #[inline]
    pub fn forward_direction(&self) -> i8 {
        match *self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Color;

    /// Get the other color.
    #[inline]
    fn not(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }
}
