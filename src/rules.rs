use crate::board::Board;
use crate::error::{BoardError, MoveError};
use crate::types::{Cell, Coord, DIRECTIONS, NUM_SQUARES};

/// Result of walking one direction away from a placement.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Ray {
    /// Opponent run closed by the mover's stone.
    Captured(Vec<Coord>),
    /// Opponent run that reaches a blank cell or the edge.
    Open,
    /// Neighbor is blank, off-board or the mover's own stone.
    Nothing,
}

impl Ray {
    /// 0 for a capture, -1 otherwise.
    fn signal(&self) -> i32 {
        match self {
            Self::Captured(_) => 0,
            Self::Open | Self::Nothing => -1,
        }
    }
}

/// Board plus capture rules.
///
/// With `weird` unset a placement is vetoed by any opponent run it
/// touches that is not closed by the mover. With `weird` set, open runs
/// are ignored and the placement only needs one capturing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    board: Board,
    weird: bool,
}

impl Rules {
    pub fn new(weird: bool) -> Self {
        Self::from_board(Board::new(), weird)
    }

    pub fn from_board(board: Board, weird: bool) -> Self {
        Self { board, weird }
    }

    pub fn weird(&self) -> bool {
        self.weird
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stone_at(&self, at: Coord) -> Cell {
        self.board.stone_at(at)
    }

    /// Places `color` at `at` and flips every captured run.
    /// Nothing changes when the move is rejected.
    pub fn place_and_flip(&mut self, at: Coord, color: Cell) -> Result<(), MoveError> {
        let flips = self.captures(at, color)?;
        self.board.set_stone(at, color)?;
        for cell in flips {
            self.board.flip_stone(cell)?;
        }
        Ok(())
    }

    /// Simulates a placement without touching the board.
    pub fn can_place(&self, at: Coord, color: Cell) -> bool {
        self.captures(at, color).is_ok()
    }

    /// Whether `color` has any accepted placement.
    pub fn move_possible(&self, color: Cell) -> bool {
        (0..NUM_SQUARES)
            .map(Coord::from_index)
            .any(|at| self.can_place(at, color))
    }

    /// Accepted placements for `color`, row-major.
    pub fn legal_moves(&self, color: Cell) -> Vec<Coord> {
        (0..NUM_SQUARES)
            .map(Coord::from_index)
            .filter(|&at| self.can_place(at, color))
            .collect()
    }

    pub fn score_of(&self, color: Cell) -> u32 {
        self.board.count(color)
    }

    /// Validates a placement and returns the stones it would flip.
    fn captures(&self, at: Coord, color: Cell) -> Result<Vec<Coord>, MoveError> {
        if !color.is_stone() {
            return Err(MoveError::InvalidColor(color));
        }
        if !at.in_bounds() {
            return Err(BoardError::OutOfBounds(at).into());
        }
        if self.stone_at(at) != Cell::Blank {
            return Err(MoveError::Occupied(at));
        }

        let rays: Vec<Ray> = DIRECTIONS
            .iter()
            .map(|&(dx, dy)| self.walk(at, dx, dy, color))
            .collect();

        if !self.weird && rays.contains(&Ray::Open) {
            return Err(MoveError::UncapturedRun(at));
        }

        let signal: i32 = rays.iter().map(Ray::signal).sum();
        if signal <= -(DIRECTIONS.len() as i32) {
            return Err(MoveError::NoCapture(at));
        }

        Ok(rays
            .into_iter()
            .flat_map(|ray| match ray {
                Ray::Captured(run) => run,
                Ray::Open | Ray::Nothing => Vec::new(),
            })
            .collect())
    }

    fn walk(&self, from: Coord, dx: i32, dy: i32, color: Cell) -> Ray {
        let opponent = color.opponent();
        let mut at = from.offset(dx, dy);
        if self.stone_at(at) != opponent {
            return Ray::Nothing;
        }

        let mut run = Vec::new();
        while self.stone_at(at) == opponent {
            run.push(at);
            at = at.offset(dx, dy);
        }

        if self.stone_at(at) == color {
            Ray::Captured(run)
        } else {
            Ray::Open
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(false)
    }
}
