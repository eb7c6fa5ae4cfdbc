use crate::color::Color;
use crate::location::{Location, BOARD_SIZE};
use crate::piece::{Kind, Piece};
use arrayvec::ArrayVec;

/// The most destinations a single piece can have: a queen in the middle of an open board.
pub const MAX_PIECE_MOVES: usize = 27;

/// A list of destination squares for one piece.  Bounded, so it lives on the stack.
pub type MoveList = ArrayVec<Location, MAX_PIECE_MOVES>;

/// The column the king lands on when castling kingside.
pub const KINGSIDE_CASTLE_COLUMN: i8 = 6;
/// The column the king lands on when castling queenside.
pub const QUEENSIDE_CASTLE_COLUMN: i8 = 2;

/// A unit step across the board.
#[derive(Copy, Clone)]
struct Direction {
    rows: i8,
    cols: i8,
}

const fn dir(rows: i8, cols: i8) -> Direction {
    Direction { rows, cols }
}

/// The rays a rook slides along.
const ROOK_DIRECTIONS: [Direction; 4] = [dir(0, 1), dir(1, 0), dir(0, -1), dir(-1, 0)];

/// The rays a bishop slides along.
const BISHOP_DIRECTIONS: [Direction; 4] = [dir(1, 1), dir(-1, 1), dir(1, -1), dir(-1, -1)];

/// The rays a queen slides along, which double as the king's single steps.
const QUEEN_DIRECTIONS: [Direction; 8] = [
    dir(0, 1),
    dir(1, 1),
    dir(1, 0),
    dir(-1, 1),
    dir(0, -1),
    dir(-1, -1),
    dir(-1, 0),
    dir(1, -1),
];

/// The eight knight jumps.
const KNIGHT_JUMPS: [Direction; 8] = [
    dir(-1, 2),
    dir(1, 2),
    dir(2, 1),
    dir(2, -1),
    dir(1, -2),
    dir(-1, -2),
    dir(-2, -1),
    dir(-2, 1),
];

/// Is any piece in the snapshot standing on this location?
#[inline]
pub fn is_occupied(loc: Location, pieces: &[Piece]) -> bool {
    pieces.iter().any(|p| p.location() == loc)
}

/// Is a piece of the other color standing on this location?
#[inline]
pub fn is_occupied_by_opponent(loc: Location, color: Color, pieces: &[Piece]) -> bool {
    pieces
        .iter()
        .any(|p| p.location() == loc && p.color() != color)
}

/// Walk outward along each direction until blocked: the edge of the board ends a ray, an
/// opponent's piece is a capture square and ends the ray, a friendly piece ends the ray
/// outright.  No piece slides through any occupant.
fn slide(
    from: Location,
    color: Color,
    directions: &[Direction],
    pieces: &[Piece],
    moves: &mut MoveList,
) {
    for d in directions {
        let mut loc = from.offset(d.rows, d.cols);
        while loc.on_board() {
            if !is_occupied(loc, pieces) {
                moves.push(loc);
            } else {
                if is_occupied_by_opponent(loc, color, pieces) {
                    moves.push(loc);
                }
                break;
            }
            loc = loc.offset(d.rows, d.cols);
        }
    }
}

/// Evaluate a fixed offset set: a candidate is reachable iff it is on the board and either
/// vacant or held by an opponent.  Used for the knight and the raw king set; neither can be
/// blocked mid-path.
fn step(
    from: Location,
    color: Color,
    offsets: &[Direction],
    pieces: &[Piece],
    moves: &mut MoveList,
) {
    for d in offsets {
        let loc = from.offset(d.rows, d.cols);
        if loc.on_board() && (!is_occupied(loc, pieces) || is_occupied_by_opponent(loc, color, pieces))
        {
            moves.push(loc);
        }
    }
}

/// Pawn movement, the one asymmetric piece: the two forward diagonals are capture-only, the
/// square straight ahead is advance-only, and the double advance exists only while the pawn
/// has never moved and the single advance is open.
fn pawn_moves(piece: &Piece, pieces: &[Piece], moves: &mut MoveList) {
    let forward = piece.color().forward_direction();
    let from = piece.location();

    for side in &[1i8, -1] {
        let diagonal = from.offset(forward, *side);
        if diagonal.on_board() && is_occupied_by_opponent(diagonal, piece.color(), pieces) {
            moves.push(diagonal);
        }
    }

    let ahead = from.offset(forward, 0);
    if ahead.on_board() && !is_occupied(ahead, pieces) {
        moves.push(ahead);

        let double = from.offset(2 * forward, 0);
        if !piece.has_moved() && double.on_board() && !is_occupied(double, pieces) {
            moves.push(double);
        }
    }
}

/// The raw squares a piece reaches over a snapshot, with no regard for whether moving there
/// would be legal for it.
///
/// For every kind but the king this is already the legal destination set.  For the king it
/// is the unfiltered eight-step set, which is exactly what attack detection needs: asking
/// "does the enemy king cover this square" must not recurse into that king's own check
/// filter.
pub fn reachable_squares(piece: &Piece, pieces: &[Piece]) -> MoveList {
    let mut moves = MoveList::new();
    let from = piece.location();
    match piece.kind() {
        Kind::Pawn => pawn_moves(piece, pieces, &mut moves),
        Kind::Knight => step(from, piece.color(), &KNIGHT_JUMPS, pieces, &mut moves),
        Kind::Bishop => slide(from, piece.color(), &BISHOP_DIRECTIONS, pieces, &mut moves),
        Kind::Rook => slide(from, piece.color(), &ROOK_DIRECTIONS, pieces, &mut moves),
        Kind::Queen => slide(from, piece.color(), &QUEEN_DIRECTIONS, pieces, &mut moves),
        Kind::King => step(from, piece.color(), &QUEEN_DIRECTIONS, pieces, &mut moves),
    }
    moves
}

/// The full legal destination set for a piece over a snapshot.
///
/// Identical to [`reachable_squares`] for every kind but the king.  The king additionally
/// may not step onto an attacked square, and gains the castle destinations when eligible.
pub fn valid_moves(piece: &Piece, pieces: &[Piece]) -> MoveList {
    if piece.kind() != Kind::King {
        return reachable_squares(piece, pieces);
    }

    let mut moves = MoveList::new();
    for candidate in reachable_squares(piece, pieces) {
        // cannot move into check
        if !location_in_check(candidate, piece.color(), pieces) {
            moves.push(candidate);
        }
    }

    let home_rank = piece.color().to_home_rank();
    if can_castle(piece, false, pieces) {
        moves.push(Location::new(home_rank, KINGSIDE_CASTLE_COLUMN));
    }
    if can_castle(piece, true, pieces) {
        moves.push(Location::new(home_rank, QUEENSIDE_CASTLE_COLUMN));
    }
    moves
}

/// Is this square attacked by the side opposing `color`?
///
/// A square is attacked iff it appears in some opposing piece's raw reachable set over the
/// same snapshot.  The snapshot is scanned as given: callers decide whether the piece asking
/// the question is itself in the list.
pub fn location_in_check(loc: Location, color: Color, pieces: &[Piece]) -> bool {
    pieces
        .iter()
        .filter(|p| p.color() != color)
        .any(|p| reachable_squares(p, pieces).contains(&loc))
}

/// Is this piece's current square attacked?  The direct "is my king in check" query.
pub fn in_check(piece: &Piece, pieces: &[Piece]) -> bool {
    location_in_check(piece.location(), piece.color(), pieces)
}

/// Castling eligibility for one side of the board.
///
/// A king may castle iff it has never moved, an unmoved rook of its color still stands on
/// the corresponding home corner, every scanned square between the two (endpoints excluded)
/// is vacant, and no scanned square other than the rook's is attacked.  The scan runs from
/// the rook's column to the king's column inclusive, so a king already in check cannot
/// castle, and on the queenside the b-file square is attack-tested as well.
///
/// Eligibility surfaces in `valid_moves` as an extra destination on the home rank; moving
/// the rook to match is the caller's consequence to apply.
pub fn can_castle(piece: &Piece, queenside: bool, pieces: &[Piece]) -> bool {
    if piece.kind() != Kind::King || piece.has_moved() {
        return false;
    }

    let home_rank = piece.color().to_home_rank();
    let rook_col = if queenside { 0 } else { BOARD_SIZE - 1 };
    let rook_home = Location::new(home_rank, rook_col);

    let rook_present = pieces.iter().any(|p| {
        p.location() == rook_home
            && p.kind() == Kind::Rook
            && p.color() == piece.color()
            && !p.has_moved()
    });
    if !rook_present {
        return false;
    }

    let king_col = piece.location().col();
    let (first, last) = if queenside {
        (rook_col, king_col)
    } else {
        (king_col, rook_col)
    };
    for col in first..=last {
        let loc = Location::new(home_rank, col);
        if loc != rook_home && loc != piece.location() && is_occupied(loc, pieces) {
            return false;
        }
        // the king may not castle out of, through, or into an attacked square
        if loc != rook_home && location_in_check(loc, piece.color(), pieces) {
            return false;
        }
    }
    true
}

#[cfg(test)]
fn loc(row: i8, col: i8) -> Location {
    Location::new(row, col)
}

#[cfg(test)]
fn piece_at(kind: Kind, color: Color, row: i8, col: i8) -> Piece {
    Piece::new(kind, color, loc(row, col))
}

#[cfg(test)]
fn assert_moves(moves: &MoveList, expected: &[Location]) {
    assert_eq!(
        moves.len(),
        expected.len(),
        "got {:?}, expected {:?}",
        moves,
        expected
    );
    for m in moves {
        assert!(expected.contains(m), "unexpected move {}", m);
    }
}

#[test]
fn unmoved_unblocked_pawns_advance_one_or_two() {
    let white = piece_at(Kind::Pawn, Color::White, 1, 1);
    assert_moves(&white.valid_moves(&[]), &[loc(2, 1), loc(3, 1)]);

    let black = piece_at(Kind::Pawn, Color::Black, 6, 1);
    assert_moves(&black.valid_moves(&[]), &[loc(5, 1), loc(4, 1)]);
}

#[test]
fn blocked_pawns_have_no_advance() {
    let white = piece_at(Kind::Pawn, Color::White, 1, 2);
    let blocker = [piece_at(Kind::Pawn, Color::White, 2, 2)];
    assert_moves(&white.valid_moves(&blocker), &[]);

    // an opponent directly ahead blocks just the same: pawns cannot capture straight on
    let black = piece_at(Kind::Pawn, Color::Black, 6, 2);
    let blocker = [piece_at(Kind::Pawn, Color::White, 5, 2)];
    assert_moves(&black.valid_moves(&blocker), &[]);
}

#[test]
fn moved_pawn_loses_the_double_advance() {
    let mut pawn = piece_at(Kind::Pawn, Color::White, 1, 0);
    pawn.apply_move(loc(2, 0));
    assert_moves(&pawn.valid_moves(&[]), &[loc(3, 0)]);

    let mut pawn = piece_at(Kind::Pawn, Color::Black, 6, 0);
    pawn.apply_move(loc(5, 0));
    assert_moves(&pawn.valid_moves(&[]), &[loc(4, 0)]);
}

#[test]
fn double_advance_requires_both_squares_open() {
    // single advance open, double advance blocked
    let pawn = piece_at(Kind::Pawn, Color::White, 1, 3);
    let blocker = [piece_at(Kind::Knight, Color::Black, 3, 3)];
    assert_moves(&pawn.valid_moves(&blocker), &[loc(2, 3)]);
}

#[test]
fn pawn_captures_diagonally_only_against_opponents() {
    let pawn = piece_at(Kind::Pawn, Color::White, 1, 1);
    let pieces = [
        piece_at(Kind::Pawn, Color::White, 2, 2),
        piece_at(Kind::Pawn, Color::Black, 2, 0),
        piece_at(Kind::Pawn, Color::White, 4, 1),
        piece_at(Kind::Pawn, Color::White, 7, 2),
    ];
    assert_moves(
        &pawn.valid_moves(&pieces),
        &[loc(2, 0), loc(2, 1), loc(3, 1)],
    );

    let pawn = piece_at(Kind::Pawn, Color::Black, 6, 1);
    let pieces = [
        piece_at(Kind::Pawn, Color::White, 5, 2),
        piece_at(Kind::Pawn, Color::Black, 5, 0),
        piece_at(Kind::Pawn, Color::White, 4, 1),
        piece_at(Kind::Pawn, Color::White, 7, 2),
    ];
    assert_moves(&pawn.valid_moves(&pieces), &[loc(5, 2), loc(5, 1)]);
}

#[test]
fn knight_jumps_over_and_around() {
    let knight = piece_at(Kind::Knight, Color::White, 2, 6);
    let pieces = [
        piece_at(Kind::Pawn, Color::White, 2, 5),
        piece_at(Kind::Pawn, Color::Black, 1, 4),
        piece_at(Kind::Pawn, Color::White, 3, 4),
    ];
    assert_moves(
        &knight.valid_moves(&pieces),
        &[loc(0, 7), loc(4, 7), loc(0, 5), loc(4, 5), loc(1, 4)],
    );
}

#[test]
fn rook_rays_stop_at_blockers() {
    let rook = piece_at(Kind::Rook, Color::White, 3, 4);
    let pieces = [
        piece_at(Kind::Pawn, Color::Black, 4, 4),
        piece_at(Kind::Pawn, Color::White, 3, 2),
    ];
    assert_moves(
        &rook.valid_moves(&pieces),
        &[
            loc(3, 7),
            loc(3, 6),
            loc(3, 5),
            loc(0, 4),
            loc(1, 4),
            loc(2, 4),
            loc(3, 3),
            loc(4, 4),
        ],
    );
}

#[test]
fn bishop_rays_stop_at_blockers() {
    let bishop = piece_at(Kind::Bishop, Color::White, 3, 4);
    let pieces = [
        piece_at(Kind::Pawn, Color::White, 5, 6),
        piece_at(Kind::Pawn, Color::Black, 5, 2),
    ];
    assert_moves(
        &bishop.valid_moves(&pieces),
        &[
            loc(0, 1),
            loc(1, 2),
            loc(2, 3),
            loc(0, 7),
            loc(1, 6),
            loc(2, 5),
            loc(4, 3),
            loc(5, 2),
            loc(4, 5),
        ],
    );
}

#[test]
fn queen_rays_are_the_rook_and_bishop_union() {
    let queen = piece_at(Kind::Queen, Color::White, 2, 4);
    let pieces = [
        piece_at(Kind::Pawn, Color::White, 2, 7),
        piece_at(Kind::Pawn, Color::Black, 2, 2),
        piece_at(Kind::Pawn, Color::White, 4, 2),
        piece_at(Kind::Pawn, Color::White, 4, 4),
        piece_at(Kind::Pawn, Color::Black, 4, 6),
    ];
    assert_moves(
        &queen.valid_moves(&pieces),
        &[
            loc(0, 6),
            loc(1, 5),
            loc(0, 2),
            loc(1, 3),
            loc(2, 2),
            loc(2, 3),
            loc(2, 5),
            loc(2, 6),
            loc(3, 5),
            loc(4, 6),
            loc(3, 3),
            loc(3, 4),
            loc(1, 4),
            loc(0, 4),
        ],
    );
}

#[test]
fn cornered_king_avoids_attacked_squares() {
    let mut king = piece_at(Kind::King, Color::White, 2, 6);
    king.apply_move(loc(2, 7));
    let pieces = [
        piece_at(Kind::Rook, Color::Black, 0, 7),
        piece_at(Kind::Bishop, Color::Black, 1, 6),
        piece_at(Kind::Pawn, Color::White, 3, 6),
    ];
    assert_moves(&king.valid_moves(&pieces), &[loc(1, 6), loc(2, 6)]);
}

#[test]
fn friendly_defense_does_not_mark_a_square_attacked() {
    let king = piece_at(Kind::King, Color::White, 0, 4);
    let pieces = [
        piece_at(Kind::Rook, Color::Black, 1, 4),
        piece_at(Kind::Knight, Color::Black, 3, 3),
    ];
    // the rook covers its row, but the knight's reachable set excludes the square its own
    // rook stands on, so capturing the rook stays legal
    assert_moves(
        &king.valid_moves(&pieces),
        &[loc(0, 3), loc(0, 5), loc(1, 4)],
    );
}

#[test]
fn empty_pawn_diagonal_is_not_attacked() {
    // a pawn only reaches a diagonal once an opponent stands there, so the king may step
    // onto the empty square covered by no one
    let king = piece_at(Kind::King, Color::White, 3, 2);
    let pieces = [piece_at(Kind::Pawn, Color::Black, 4, 4)];

    assert!(!location_in_check(loc(3, 3), Color::White, &pieces));
    assert!(king.valid_moves(&pieces).contains(&loc(3, 3)));

    // once a white piece occupies that diagonal, the pawn covers it
    let occupied = [
        piece_at(Kind::Pawn, Color::Black, 4, 4),
        piece_at(Kind::Knight, Color::White, 3, 3),
    ];
    assert!(location_in_check(loc(3, 3), Color::White, &occupied));
}

#[test]
fn in_check_agrees_with_location_in_check() {
    let king = piece_at(Kind::King, Color::White, 0, 4);
    let attackers = [piece_at(Kind::Rook, Color::Black, 4, 4)];
    assert!(king.in_check(&attackers));
    assert!(location_in_check(
        king.location(),
        king.color(),
        &attackers
    ));

    // an interposed pawn blocks the rook's ray
    let blocked = [
        piece_at(Kind::Rook, Color::Black, 4, 4),
        piece_at(Kind::Pawn, Color::White, 2, 4),
    ];
    assert!(!king.in_check(&blocked));
    assert!(!location_in_check(king.location(), king.color(), &blocked));
}

#[test]
fn eligible_king_castles_to_either_side() {
    let king = piece_at(Kind::King, Color::Black, 7, 4);
    let pieces = [
        piece_at(Kind::Rook, Color::Black, 7, 7),
        piece_at(Kind::Rook, Color::Black, 7, 0),
        king,
    ];
    assert_moves(
        &king.valid_moves(&pieces),
        &[
            loc(7, 3),
            loc(7, 5),
            loc(6, 3),
            loc(6, 4),
            loc(6, 5),
            loc(7, 6),
            loc(7, 2),
        ],
    );
}

#[test]
fn occupied_squares_block_the_castle() {
    let king = piece_at(Kind::King, Color::White, 0, 4);
    let pieces = [
        piece_at(Kind::Rook, Color::White, 0, 7),
        piece_at(Kind::Rook, Color::White, 0, 0),
        piece_at(Kind::Bishop, Color::White, 0, 5),
        piece_at(Kind::Bishop, Color::White, 0, 2),
        king,
    ];
    assert_moves(
        &king.valid_moves(&pieces),
        &[loc(0, 3), loc(1, 3), loc(1, 4), loc(1, 5)],
    );
}

#[test]
fn king_cannot_castle_through_check() {
    let king = piece_at(Kind::King, Color::White, 0, 4);
    let pieces = [
        piece_at(Kind::Rook, Color::White, 0, 7),
        piece_at(Kind::Rook, Color::White, 0, 0),
        piece_at(Kind::Bishop, Color::Black, 3, 3),
        piece_at(Kind::Bishop, Color::Black, 3, 4),
        king,
    ];
    assert_moves(
        &king.valid_moves(&pieces),
        &[loc(0, 3), loc(1, 3), loc(1, 4), loc(0, 5)],
    );
}

#[test]
fn moving_the_king_forfeits_both_castles() {
    let mut king = piece_at(Kind::King, Color::White, 0, 4);
    let pieces = [
        piece_at(Kind::Rook, Color::White, 0, 7),
        piece_at(Kind::Rook, Color::White, 0, 0),
    ];
    assert!(king.can_castle(false, &pieces));
    assert!(king.can_castle(true, &pieces));

    king.apply_move(loc(0, 4));
    assert!(!king.can_castle(false, &pieces));
    assert!(!king.can_castle(true, &pieces));
}

#[test]
fn moving_a_rook_forfeits_its_side_only() {
    let king = piece_at(Kind::King, Color::White, 0, 4);
    let mut kingside_rook = piece_at(Kind::Rook, Color::White, 0, 7);
    kingside_rook.apply_move(loc(0, 7));
    let pieces = [kingside_rook, piece_at(Kind::Rook, Color::White, 0, 0)];

    assert!(!king.can_castle(false, &pieces));
    assert!(king.can_castle(true, &pieces));
}

#[test]
fn cannot_castle_toward_impostor_on_rook_square() {
    let king = piece_at(Kind::King, Color::White, 0, 4);

    // an unmoved piece of the wrong kind on the corner does not qualify
    let impostor = [piece_at(Kind::Bishop, Color::White, 0, 7)];
    assert!(!king.can_castle(false, &impostor));

    // neither does an opponent's unmoved rook
    let enemy_rook = [piece_at(Kind::Rook, Color::Black, 0, 7)];
    assert!(!king.can_castle(false, &enemy_rook));

    // and an empty corner obviously fails too
    assert!(!king.can_castle(false, &[]));
}

#[test]
fn queenside_scan_includes_the_b_file() {
    // the scan runs rook column to king column inclusive, so an attack on the b-file square
    // denies the queenside castle even though the king never crosses it
    let king = piece_at(Kind::King, Color::White, 0, 4);
    let pieces = [
        piece_at(Kind::Rook, Color::White, 0, 0),
        piece_at(Kind::Rook, Color::Black, 7, 1),
        king,
    ];
    assert!(!king.can_castle(true, &pieces));
    assert!(!king
        .valid_moves(&pieces)
        .contains(&loc(0, QUEENSIDE_CASTLE_COLUMN)));
}

#[test]
fn king_in_check_cannot_castle() {
    let king = piece_at(Kind::King, Color::White, 0, 4);
    let pieces = [
        piece_at(Kind::Rook, Color::White, 0, 7),
        piece_at(Kind::Rook, Color::Black, 7, 4),
        king,
    ];
    assert!(in_check(&king, &pieces));
    assert!(!can_castle(&king, false, &pieces));
}

#[test]
fn every_generated_move_is_on_the_board() {
    let corners = [loc(0, 0), loc(0, 7), loc(7, 0), loc(7, 7), loc(3, 4)];
    for &kind in &crate::piece::ALL_KINDS {
        for &corner in &corners {
            let piece = Piece::new(kind, Color::Black, corner);
            for m in piece.valid_moves(&[]) {
                assert!(m.on_board(), "{:?} generated off-board move {}", kind, m);
            }
        }
    }
}

#[test]
fn valid_moves_is_idempotent_over_an_unchanged_snapshot() {
    let queen = piece_at(Kind::Queen, Color::White, 2, 4);
    let pieces = [
        piece_at(Kind::Pawn, Color::Black, 2, 2),
        piece_at(Kind::Pawn, Color::White, 4, 4),
    ];

    let mut first: Vec<Location> = queen.valid_moves(&pieces).to_vec();
    let mut second: Vec<Location> = queen.valid_moves(&pieces).to_vec();
    first.sort_by_key(|l| (l.row(), l.col()));
    second.sort_by_key(|l| (l.row(), l.col()));
    assert_eq!(first, second);
}
