use std::fmt;

use serde::Serialize;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Walk directions, in the order the move search visits them:
/// E, SE, S, SW, W, NW, N, NE (y grows downwards).
pub const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// State of one board cell. Also used as "side to move", where `Blank`
/// means nobody (game over).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Blank,
    Black,
    White,
}

impl Cell {
    /// Black <-> White. `Blank` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
            Self::Blank => Self::Blank,
        }
    }

    pub fn is_stone(self) -> bool {
        self != Self::Blank
    }

    /// 0=blank, 1=black, 2=white.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Blank => 0,
            Self::Black => 1,
            Self::White => 2,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Blank),
            1 => Some(Self::Black),
            2 => Some(Self::White),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Blank => "Blank",
            Self::Black => "Black",
            Self::White => "White",
        }
    }
}

/// A board coordinate. Walks may step off the board, so the components
/// are signed; reading an off-board coordinate yields `Cell::Blank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Row-major: `index = y * 8 + x`.
    pub fn from_index(index: usize) -> Self {
        Self {
            x: (index % BOARD_SIZE) as i32,
            y: (index / BOARD_SIZE) as i32,
        }
    }

    pub fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.y as usize * BOARD_SIZE + self.x as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE as i32).contains(&self.x) && (0..BOARD_SIZE as i32).contains(&self.y)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 cells, row-major, 0=blank, 1=black, 2=white.
    pub board: Vec<u8>,
    /// 0 once the game is over.
    pub turn: u8,
    pub black_count: u32,
    pub white_count: u32,
    pub is_game_over: bool,
    /// Contract:
    /// - Empty before the first move.
    /// - Otherwise the mover's color followed by every changed cell index.
    pub changes: Vec<u8>,
}

/// Final result after game over. `winner` is 0 on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_count: u32,
    pub white_count: u32,
}
