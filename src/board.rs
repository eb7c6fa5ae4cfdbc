use crate::color::{Color, ALL_COLORS};
use crate::error::Error;
use crate::location::{Location, BOARD_SIZE};
use crate::piece::{Kind, Piece};

const SIZE: usize = BOARD_SIZE as usize;

/// One square of the board: its shading, and whatever piece the caller has parked on it.
///
/// Tile shading reuses `Color` but is unrelated to piece ownership; nothing ties a piece to
/// the shade of the square it stands on.
#[derive(Copy, Clone, Debug)]
pub struct Tile {
    shade: Color,
    piece: Option<Piece>,
}

impl Tile {
    /// The shading of this tile.
    #[inline]
    pub fn shade(&self) -> Color {
        self.shade
    }

    /// The piece parked on this tile, if any.
    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    /// Is a piece parked on this tile?
    #[inline]
    pub fn has_piece(&self) -> bool {
        self.piece.is_some()
    }
}

/// An 8x8 grid of tiles for the bookkeeping side of the game.
///
/// Move generation never reads this: it works over the explicit piece snapshot the caller
/// hands it.  The board exists so the orchestration layer has a place to track occupancy and
/// shading in parallel with its authoritative piece collection.
#[derive(Clone, Debug)]
pub struct Board {
    tiles: [[Tile; SIZE]; SIZE],
}

impl Board {
    /// Make an empty board with alternating shades and the dark square at (0, 0).
    pub fn new() -> Board {
        let mut tiles = [[Tile {
            shade: Color::Black,
            piece: None,
        }; SIZE]; SIZE];
        for row in 0..SIZE {
            for col in 0..SIZE {
                if (row + col) % 2 == 1 {
                    tiles[row][col].shade = Color::White;
                }
            }
        }
        Board { tiles }
    }

    /// The tile at a location, or `None` if the location is off the board.
    pub fn tile(&self, loc: Location) -> Option<&Tile> {
        if loc.on_board() {
            Some(&self.tiles[loc.row() as usize][loc.col() as usize])
        } else {
            None
        }
    }

    /// Is there a piece at this location?  Off-board locations are unoccupied.
    pub fn has_piece_at(&self, loc: Location) -> bool {
        self.tile(loc).map_or(false, Tile::has_piece)
    }

    /// Park a piece on the tile under its stored location.  Fails fast if that location is
    /// off the board or the tile is already taken.
    pub fn place(&mut self, piece: Piece) -> Result<(), Error> {
        let loc = piece.location().checked()?;
        let tile = &mut self.tiles[loc.row() as usize][loc.col() as usize];
        if tile.piece.is_some() {
            return Err(Error::DoubleOccupancy {
                row: loc.row(),
                col: loc.col(),
            });
        }
        tile.piece = Some(piece);
        Ok(())
    }

    /// Take the piece off a tile, if there is one.  The usual way to record a capture.
    pub fn remove(&mut self, loc: Location) -> Option<Piece> {
        if loc.on_board() {
            self.tiles[loc.row() as usize][loc.col() as usize].piece.take()
        } else {
            None
        }
    }

    /// Collect the pieces currently parked on the board into a snapshot suitable for the
    /// query operations.
    pub fn snapshot(&self) -> Vec<Piece> {
        self.tiles
            .iter()
            .flatten()
            .filter_map(|tile| tile.piece)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

/// The standard 32-piece starting position: each color's back rank runs
/// rook-knight-bishop-queen-king-bishop-knight-rook, with pawns on the second rank.
pub fn starting_pieces() -> Vec<Piece> {
    const BACK_RANK: [Kind; SIZE] = [
        Kind::Rook,
        Kind::Knight,
        Kind::Bishop,
        Kind::Queen,
        Kind::King,
        Kind::Bishop,
        Kind::Knight,
        Kind::Rook,
    ];

    let mut pieces = Vec::with_capacity(SIZE * 4);
    for &color in &ALL_COLORS {
        for col in 0..BOARD_SIZE {
            pieces.push(Piece::new(
                BACK_RANK[col as usize],
                color,
                Location::new(color.to_home_rank(), col),
            ));
            pieces.push(Piece::new(
                Kind::Pawn,
                color,
                Location::new(color.to_second_rank(), col),
            ));
        }
    }
    pieces
}

#[cfg(test)]
use crate::location::NUM_SQUARES;

#[test]
fn tiles_alternate_shades() {
    let board = Board::new();
    assert_eq!(board.tile(Location::new(0, 0)).unwrap().shade(), Color::Black);
    assert_eq!(board.tile(Location::new(0, 1)).unwrap().shade(), Color::White);
    assert_eq!(board.tile(Location::new(1, 0)).unwrap().shade(), Color::White);
    assert_eq!(board.tile(Location::new(7, 7)).unwrap().shade(), Color::Black);

    let dark = (0..BOARD_SIZE)
        .flat_map(|row| (0..BOARD_SIZE).map(move |col| Location::new(row, col)))
        .filter(|l| board.tile(*l).unwrap().shade() == Color::Black)
        .count();
    assert_eq!(dark, NUM_SQUARES / 2);
}

#[test]
fn place_and_remove_round_trip() {
    let mut board = Board::new();
    let rook = Piece::new(Kind::Rook, Color::White, Location::new(0, 0));

    assert!(!board.has_piece_at(rook.location()));
    assert_eq!(board.place(rook), Ok(()));
    assert!(board.has_piece_at(rook.location()));

    assert_eq!(board.remove(rook.location()), Some(rook));
    assert!(!board.has_piece_at(rook.location()));
    assert_eq!(board.remove(rook.location()), None);
}

#[test]
fn place_rejects_bad_locations() {
    let mut board = Board::new();
    assert_eq!(
        board.place(Piece::new(Kind::Pawn, Color::White, Location::new(9, 0))),
        Err(Error::OffBoard { row: 9, col: 0 })
    );

    let queen = Piece::new(Kind::Queen, Color::Black, Location::new(4, 4));
    assert_eq!(board.place(queen), Ok(()));
    assert_eq!(
        board.place(Piece::new(Kind::Knight, Color::White, Location::new(4, 4))),
        Err(Error::DoubleOccupancy { row: 4, col: 4 })
    );
}

#[test]
fn snapshot_reflects_what_was_placed() {
    let mut board = Board::new();
    assert!(board.snapshot().is_empty());

    for piece in starting_pieces() {
        board.place(piece).unwrap();
    }
    assert_eq!(board.snapshot().len(), 32);
}

#[test]
fn starting_position_is_the_standard_one() {
    let pieces = starting_pieces();
    assert_eq!(pieces.len(), 32);

    let at = |row: i8, col: i8| {
        pieces
            .iter()
            .find(|p| p.location() == Location::new(row, col))
            .expect("square should be occupied")
    };
    assert_eq!(at(0, 4).kind(), Kind::King);
    assert_eq!(at(0, 4).color(), Color::White);
    assert_eq!(at(7, 3).kind(), Kind::Queen);
    assert_eq!(at(7, 3).color(), Color::Black);
    assert_eq!(at(1, 5).kind(), Kind::Pawn);
    assert_eq!(at(6, 5).kind(), Kind::Pawn);
    assert_eq!(at(7, 0).kind(), Kind::Rook);
}

#[test]
fn starting_position_has_no_checks_and_no_castles() {
    let pieces = starting_pieces();
    let king = pieces
        .iter()
        .find(|p| p.kind() == Kind::King && p.color() == Color::White)
        .unwrap();

    assert!(!king.in_check(&pieces));
    assert!(!king.can_castle(false, &pieces));
    assert!(!king.can_castle(true, &pieces));
    // hemmed in by its own pieces, the king has no moves at all yet
    assert!(king.valid_moves(&pieces).is_empty());
}
