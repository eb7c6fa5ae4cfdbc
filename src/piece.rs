use crate::color::Color;
use crate::error::Error;
use crate::location::Location;
use crate::movegen::{self, MoveList};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent a chess piece type as a very simple enum
#[derive(PartialEq, Eq, PartialOrd, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Kind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// How many piece types are there?
pub const NUM_KINDS: usize = 6;

/// An array representing each piece type, in order of ascending value.
pub const ALL_KINDS: [Kind; NUM_KINDS] = [
    Kind::Pawn,
    Kind::Knight,
    Kind::Bishop,
    Kind::Rook,
    Kind::Queen,
    Kind::King,
];

impl Kind {
    /// Convert the `Kind` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }
}

/// A piece in play: what it is, whose it is, where it stands, and whether it has ever moved.
///
/// The collection of pieces in play is owned by the caller; every query here takes a
/// read-only snapshot of that collection, and the only mutation is `apply_move` on the one
/// piece that moved.  Removing a captured piece from the collection is the caller's job.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Piece {
    kind: Kind,
    color: Color,
    location: Location,
    has_moved: bool,
}

impl Piece {
    /// Make a new, not-yet-moved piece standing at a location.
    #[inline]
    pub fn new(kind: Kind, color: Color, location: Location) -> Piece {
        Piece {
            kind,
            color,
            location,
            has_moved: false,
        }
    }

    /// What kind of piece is this?
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Whose piece is this?
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Where does this piece stand?
    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Has this piece ever moved?
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Move this piece to a new location and mark it as having moved.
    ///
    /// The destination should come out of `valid_moves`; this does no rules checking of its
    /// own, and it does not remove a captured occupant from the caller's collection.
    #[inline]
    pub fn apply_move(&mut self, destination: Location) {
        self.location = destination;
        self.has_moved = true;
    }

    /// The full legal destination set for this piece, given a snapshot of every piece in
    /// play.  See [`movegen::valid_moves`].
    pub fn valid_moves(&self, pieces: &[Piece]) -> MoveList {
        movegen::valid_moves(self, pieces)
    }

    /// The raw squares this piece reaches over the snapshot, the set used for attack
    /// detection.  See [`movegen::reachable_squares`].
    pub fn reachable_squares(&self, pieces: &[Piece]) -> MoveList {
        movegen::reachable_squares(self, pieces)
    }

    /// Is this piece's current square attacked by the other side?  The "is my king in check"
    /// query.
    pub fn in_check(&self, pieces: &[Piece]) -> bool {
        movegen::location_in_check(self.location, self.color, pieces)
    }

    /// Can this piece castle to the given side?  Always false for anything but a king.  See
    /// [`movegen::can_castle`].
    pub fn can_castle(&self, queenside: bool, pieces: &[Piece]) -> bool {
        movegen::can_castle(self, queenside, pieces)
    }
}

/// Check the invariants a snapshot must uphold before it is fed to the query operations:
/// every stored location on the board, and at most one piece per square.
///
/// The queries themselves do not re-validate; a caller that cannot trust its collection
/// should fail fast here instead of computing garbage move sets.
pub fn validate_snapshot(pieces: &[Piece]) -> Result<(), Error> {
    for (i, piece) in pieces.iter().enumerate() {
        let loc = piece.location().checked()?;
        for other in &pieces[i + 1..] {
            if other.location() == loc {
                return Err(Error::DoubleOccupancy {
                    row: loc.row(),
                    col: loc.col(),
                });
            }
        }
    }
    Ok(())
}

#[test]
fn apply_move_relocates_and_marks_moved() {
    let mut pawn = Piece::new(Kind::Pawn, Color::White, Location::new(1, 4));
    assert!(!pawn.has_moved());

    pawn.apply_move(Location::new(3, 4));
    assert_eq!(pawn.location(), Location::new(3, 4));
    assert!(pawn.has_moved());
}

#[test]
fn validate_snapshot_accepts_the_starting_position() {
    assert_eq!(validate_snapshot(&crate::board::starting_pieces()), Ok(()));
}

#[test]
fn validate_snapshot_rejects_off_board_pieces() {
    let pieces = [Piece::new(Kind::Rook, Color::Black, Location::new(8, 3))];
    assert_eq!(
        validate_snapshot(&pieces),
        Err(Error::OffBoard { row: 8, col: 3 })
    );
}

#[test]
fn validate_snapshot_rejects_double_occupancy() {
    let pieces = [
        Piece::new(Kind::Rook, Color::Black, Location::new(0, 3)),
        Piece::new(Kind::Queen, Color::White, Location::new(4, 4)),
        Piece::new(Kind::Pawn, Color::White, Location::new(0, 3)),
    ];
    assert_eq!(
        validate_snapshot(&pieces),
        Err(Error::DoubleOccupancy { row: 0, col: 3 })
    );
}
