use crate::types::{Cell, Coord};

/// Failure of a raw board primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell {0} is off the board")]
    OutOfBounds(Coord),

    #[error("{} is not a stone color", .0.name())]
    NotAStone(Cell),

    #[error("cell {0} is already occupied")]
    Occupied(Coord),

    #[error("cell {0} is empty and cannot be flipped")]
    Empty(Coord),
}

/// Why a move was rejected. Every variant is recoverable: the board and
/// turn are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("board index {0} is out of range")]
    IndexOutOfRange(usize),

    #[error("{} cannot move", .0.name())]
    InvalidColor(Cell),

    #[error("illegal move: {0} is occupied")]
    Occupied(Coord),

    #[error("illegal move: nothing to capture from {0}")]
    NoCapture(Coord),

    #[error("illegal move: a run from {0} is not closed by the mover")]
    UncapturedRun(Coord),

    /// Carries the side that is to move.
    #[error("not your turn: {} is to move", .0.name())]
    NotYourTurn(Cell),

    #[error(transparent)]
    Board(#[from] BoardError),
}
