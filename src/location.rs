use crate::error::Error;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The width (and height) of the board.
pub const BOARD_SIZE: i8 = 8;

/// How many squares are there?
pub const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Represent a square on the chess board as a (row, column) pair.
///
/// Coordinates are signed so that move generation can step off the edge of the board and test
/// the result with `on_board`.  Off-board locations are only ever transient: a piece's stored
/// location must always be on the board.
#[derive(PartialEq, Eq, PartialOrd, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Location {
    row: i8,
    col: i8,
}

impl Location {
    /// Make a location given a row and a column.
    #[inline]
    pub fn new(row: i8, col: i8) -> Location {
        Location { row, col }
    }

    /// Return the row of this location.
    #[inline]
    pub fn row(&self) -> i8 {
        self.row
    }

    /// Return the column of this location.
    #[inline]
    pub fn col(&self) -> i8 {
        self.col
    }

    /// Translate this location by a number of rows and columns.  The result may be off the
    /// board; test it with `on_board`.
    #[inline]
    pub fn offset(&self, rows: i8, cols: i8) -> Location {
        Location::new(self.row + rows, self.col + cols)
    }

    /// Is this location within the bounds of the board?
    #[inline]
    pub fn on_board(&self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Return this location, or a descriptive error if it is off the board.  For the seams
    /// where an on-board square is a precondition.
    #[inline]
    pub fn checked(self) -> Result<Location, Error> {
        if self.on_board() {
            Ok(self)
        } else {
            Err(Error::OffBoard {
                row: self.row,
                col: self.col,
            })
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[test]
fn locations_on_and_off_the_board() {
    assert!(Location::new(0, 0).on_board());
    assert!(Location::new(7, 7).on_board());
    assert!(!Location::new(-1, 4).on_board());
    assert!(!Location::new(8, 0).on_board());
    assert!(!Location::new(3, 8).on_board());
}

#[test]
fn offset_is_a_pure_translation() {
    let loc = Location::new(3, 4);
    assert_eq!(loc.offset(2, -1), Location::new(5, 3));
    assert_eq!(loc, Location::new(3, 4));
}

#[test]
fn checked_rejects_off_board_locations() {
    assert_eq!(Location::new(4, 4).checked(), Ok(Location::new(4, 4)));
    assert_eq!(
        Location::new(-1, 9).checked(),
        Err(Error::OffBoard { row: -1, col: 9 })
    );
}
