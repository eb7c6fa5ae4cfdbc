use failure::Fail;

/// Sometimes, bad stuff happens.
///
/// The query operations themselves are total and simply return empty move sets; these errors
/// only come out of the explicit precondition checks (`Location::checked`,
/// `validate_snapshot`, `Board::place`).
#[derive(Debug, PartialEq, Fail)]
pub enum Error {
    /// A location outside the board was used where an on-board square is required.
    #[fail(display = "The location ({}, {}) is off the board.", row, col)]
    OffBoard { row: i8, col: i8 },

    /// Two pieces claimed the same square.
    #[fail(
        display = "Two pieces occupy ({}, {}).  Are you sure the captured piece was removed from the collection?",
        row, col
    )]
    DoubleOccupancy { row: i8, col: i8 },
}
