//! Board module - manages the game grid
//!
//! The board is a 10x10 grid of cells: `0` is empty, any other value is the
//! placement id of the piece occupying the cell.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col), both 0..9, row 0 at the top.
//!
//! Placement and clearing never touch the receiver; they hand back a new
//! board so earlier snapshots stay valid.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, GameError, BOARD_CELLS, BOARD_SIZE, EMPTY_CELL, LINE_CLEAR_POINTS};

const SIZE: usize = BOARD_SIZE as usize;

/// The game board - 10 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; BOARD_CELLS],
}

/// Result of [`Board::clear_full_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    /// Board after every full row and column was zeroed
    pub board: Board,
    /// Indices of the cleared rows, ascending
    pub rows: ArrayVec<u8, SIZE>,
    /// Indices of the cleared columns, ascending
    pub cols: ArrayVec<u8, SIZE>,
    /// Cleared rows plus cleared columns
    pub lines_cleared: u32,
    /// `LINE_CLEAR_POINTS` per cleared line
    pub score_delta: u32,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; BOARD_CELLS],
        }
    }

    /// Build a board from a row-major grid
    pub fn from_grid(grid: [[Cell; SIZE]; SIZE]) -> Self {
        let mut cells = [EMPTY_CELL; BOARD_CELLS];
        for (row, values) in grid.iter().enumerate() {
            cells[row * SIZE..(row + 1) * SIZE].copy_from_slice(values);
        }
        Self { cells }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= SIZE as i32 || col >= SIZE as i32 {
            return None;
        }
        Some(row as usize * SIZE + col as usize)
    }

    /// Width and height of the board
    pub fn size(&self) -> u8 {
        BOARD_SIZE
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Get cell at (row, col), reporting out-of-bounds coordinates as an error
    pub fn cell(&self, row: i32, col: i32) -> Result<Cell, GameError> {
        self.get(row, col)
            .ok_or(GameError::CellOutOfRange { row, col })
    }

    /// Check if (row, col) is within bounds and empty
    pub fn is_vacant(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(EMPTY_CELL)
    }

    /// Check if (row, col) is within bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(cell) if cell != EMPTY_CELL)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= SIZE {
            return false;
        }
        self.cells[row * SIZE..(row + 1) * SIZE]
            .iter()
            .all(|&cell| cell != EMPTY_CELL)
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, col: usize) -> bool {
        if col >= SIZE {
            return false;
        }
        (0..SIZE).all(|row| self.cells[row * SIZE + col] != EMPTY_CELL)
    }

    /// True when no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY_CELL)
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY_CELL).count()
    }

    /// Whether `shape` fits with its top-left corner at (row, col).
    ///
    /// The whole bounding box must lie inside the grid (no wraparound, no
    /// overhang) and every filled shape cell must land on an empty cell.
    pub fn can_place(&self, shape: &Shape, row: i32, col: i32) -> bool {
        if row < 0
            || col < 0
            || row > SIZE as i32 - shape.rows() as i32
            || col > SIZE as i32 - shape.cols() as i32
        {
            return false;
        }

        shape
            .filled_cells()
            .all(|(dr, dc)| self.is_vacant(row + dr as i32, col + dc as i32))
    }

    /// Write `fill` into every filled shape cell, returning the new board.
    ///
    /// Does not validate: occupied cells are overwritten and cells that fall
    /// outside the grid are skipped. Check [`Board::can_place`] first, or use
    /// [`Board::try_place`].
    pub fn place(&self, shape: &Shape, row: i32, col: i32, fill: Cell) -> Board {
        let mut next = self.clone();
        for (dr, dc) in shape.filled_cells() {
            let (Some(r), Some(c)) = (row.checked_add(dr as i32), col.checked_add(dc as i32)) else {
                continue;
            };
            if let Some(idx) = Self::index(r, c) {
                next.cells[idx] = fill;
            }
        }
        next
    }

    /// Fail-closed placement: `InvalidPlacement` unless [`Board::can_place`] holds
    pub fn try_place(&self, shape: &Shape, row: i32, col: i32, fill: Cell) -> Result<Board, GameError> {
        if !self.can_place(shape, row, col) {
            return Err(GameError::InvalidPlacement { row, col });
        }
        Ok(self.place(shape, row, col, fill))
    }

    /// Rows and columns that are full right now, ascending
    pub fn full_lines(&self) -> (ArrayVec<u8, SIZE>, ArrayVec<u8, SIZE>) {
        let rows = (0..SIZE).filter(|&r| self.is_row_full(r)).map(|r| r as u8).collect();
        let cols = (0..SIZE).filter(|&c| self.is_col_full(c)).map(|c| c as u8).collect();
        (rows, cols)
    }

    /// Zero every full row and every full column.
    ///
    /// Fullness is decided on the board as passed in, before anything is
    /// cleared, so a cell can complete a row and a column at once. Each
    /// cleared row and each cleared column counts as one line.
    pub fn clear_full_lines(&self) -> LineClear {
        let (rows, cols) = self.full_lines();
        let mut board = self.clone();

        for &row in &rows {
            let start = row as usize * SIZE;
            board.cells[start..start + SIZE].fill(EMPTY_CELL);
        }
        for &col in &cols {
            for row in 0..SIZE {
                board.cells[row * SIZE + col as usize] = EMPTY_CELL;
            }
        }

        let lines_cleared = (rows.len() + cols.len()) as u32;
        LineClear {
            board,
            rows,
            cols,
            lines_cleared,
            score_delta: lines_cleared * LINE_CLEAR_POINTS,
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(SIZE)
    }

    /// Copy into a row-major grid
    pub fn to_grid(&self) -> [[Cell; SIZE]; SIZE] {
        let mut grid = [[EMPTY_CELL; SIZE]; SIZE];
        self.write_grid(&mut grid);
        grid
    }

    /// Write the board into a caller-provided grid without allocating
    pub fn write_grid(&self, out: &mut [[Cell; SIZE]; SIZE]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(0, 9), Some(9));
        assert_eq!(Board::index(1, 0), Some(10));
        assert_eq!(Board::index(9, 9), Some(99));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(0, 10), None);
        assert_eq!(Board::index(10, 0), None);
    }

    #[test]
    fn test_board_grid_roundtrip() {
        let mut grid = [[0; SIZE]; SIZE];
        grid[2][7] = 4;
        grid[9][0] = 1;

        let board = Board::from_grid(grid);
        assert_eq!(board.get(2, 7), Some(4));
        assert_eq!(board.cells[9 * SIZE], 1);
        assert_eq!(board.to_grid(), grid);
    }

    #[test]
    fn test_place_skips_cells_outside_grid() {
        let line = Shape::from_rows(&[&[1], &[1], &[1], &[1]]);
        let board = Board::new().place(&line, 8, 0, 3);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(8, 0), Some(3));
        assert_eq!(board.get(9, 0), Some(3));
    }

    #[test]
    fn test_place_overwrites_without_validation() {
        let dot = Shape::from_rows(&[&[1]]);
        let first = Board::new().place(&dot, 4, 4, 1);
        let second = first.place(&dot, 4, 4, 7);
        assert_eq!(first.get(4, 4), Some(1));
        assert_eq!(second.get(4, 4), Some(7));
    }

    #[test]
    fn test_clear_row_and_column_sharing_a_cell() {
        let mut grid = [[0; SIZE]; SIZE];
        for i in 0..SIZE {
            grid[3][i] = 1;
            grid[i][6] = 2;
        }
        let cleared = Board::from_grid(grid).clear_full_lines();
        assert_eq!(cleared.rows.as_slice(), &[3]);
        assert_eq!(cleared.cols.as_slice(), &[6]);
        assert_eq!(cleared.lines_cleared, 2);
        assert_eq!(cleared.score_delta, 200);
        assert!(cleared.board.is_empty());
    }
}
