/// This is a chess rules core: legal destination sets, check detection and castling
/// eligibility, computed as pure functions over an explicit snapshot of the pieces in play.
pub mod board;
pub mod color;
pub mod error;
pub mod location;
pub mod movegen;
pub mod piece;

pub use crate::board::{starting_pieces, Board, Tile};
pub use crate::color::{Color, ALL_COLORS, NUM_COLORS};
pub use crate::error::Error;
pub use crate::location::{Location, BOARD_SIZE, NUM_SQUARES};
pub use crate::movegen::{
    can_castle, in_check, is_occupied, is_occupied_by_opponent, location_in_check,
    reachable_squares, valid_moves, MoveList, KINGSIDE_CASTLE_COLUMN, MAX_PIECE_MOVES,
    QUEENSIDE_CASTLE_COLUMN,
};
pub use crate::piece::{validate_snapshot, Kind, Piece, ALL_KINDS, NUM_KINDS};
