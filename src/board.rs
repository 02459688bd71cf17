use crate::error::BoardError;
use crate::types::{Cell, Coord, NUM_SQUARES};

/// Raw 8x8 grid. Knows nothing about captures; see `Rules` for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=black, (4,4)=black, (3,4)=white, (4,3)=white.
    pub fn new() -> Self {
        let mut cells = [Cell::Blank; NUM_SQUARES];
        cells[idx(3, 3)] = Cell::Black;
        cells[idx(4, 4)] = Cell::Black;
        cells[idx(3, 4)] = Cell::White;
        cells[idx(4, 3)] = Cell::White;
        Self { cells }
    }

    pub fn from_cells(cells: [Cell; NUM_SQUARES]) -> Self {
        Self { cells }
    }

    /// Off-board coordinates read as `Blank`, so directional walks can
    /// step past the edge without checks.
    pub fn stone_at(&self, at: Coord) -> Cell {
        at.index().map_or(Cell::Blank, |i| self.cells[i])
    }

    /// Puts `color` on an empty cell.
    pub fn set_stone(&mut self, at: Coord, color: Cell) -> Result<(), BoardError> {
        if !color.is_stone() {
            return Err(BoardError::NotAStone(color));
        }
        let index = at.index().ok_or(BoardError::OutOfBounds(at))?;
        if self.cells[index] != Cell::Blank {
            return Err(BoardError::Occupied(at));
        }
        self.cells[index] = color;
        Ok(())
    }

    /// Toggles black <-> white in place.
    pub fn flip_stone(&mut self, at: Coord) -> Result<(), BoardError> {
        let index = at.index().ok_or(BoardError::OutOfBounds(at))?;
        match self.cells[index] {
            Cell::Blank => Err(BoardError::Empty(at)),
            stone => {
                self.cells[index] = stone.opponent();
                Ok(())
            }
        }
    }

    pub fn count(&self, color: Cell) -> u32 {
        self.cells.iter().filter(|&&cell| cell == color).count() as u32
    }

    pub fn cells(&self) -> &[Cell; NUM_SQUARES] {
        &self.cells
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        self.cells.map(Cell::to_u8)
    }

    /// Fixture helper: one string per row, `B`/`W`/`.`, spaces ignored.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; 8]) -> Self {
        let mut cells = [Cell::Blank; NUM_SQUARES];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().filter(|ch| !ch.is_whitespace()).enumerate() {
                cells[idx(x, y)] = match ch {
                    'B' => Cell::Black,
                    'W' => Cell::White,
                    _ => Cell::Blank,
                };
            }
        }
        Self::from_cells(cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn idx(x: usize, y: usize) -> usize {
    y * crate::types::BOARD_SIZE + x
}
