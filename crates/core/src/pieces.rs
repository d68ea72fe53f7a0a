//! Pieces module - shape bitmasks and the fixed piece catalog
//!
//! A shape is a rectangular grid of filled/empty cells stored as a bitmask.
//! The catalog is a static, ordered list of twelve pieces; tray batches are
//! drawn from it by shuffling the whole catalog and taking a prefix.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::rng::shuffle;
use crate::types::{Cell, PieceColor, ShapeError, BOARD_SIZE, CATALOG_SIZE};

/// Row stride used for bit positions inside a shape mask
const MASK_STRIDE: usize = BOARD_SIZE as usize;

/// Immutable rectangular piece shape.
///
/// Bit `row * 10 + col` of `mask` is set for every filled cell. A shape always
/// has at least one filled cell and never exceeds the board in either
/// dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    mask: u128,
}

impl Shape {
    /// Build a shape from rows of `0`/`1` cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use block_blast_core::Shape;
    ///
    /// let corner = Shape::parse(&[&[1, 1], &[1, 0]]).unwrap();
    /// assert_eq!((corner.rows(), corner.cols()), (2, 2));
    /// assert_eq!(corner.cell_count(), 3);
    /// assert!(Shape::parse(&[&[0, 0]]).is_err());
    /// ```
    pub const fn parse(grid: &[&[u8]]) -> Result<Self, ShapeError> {
        let rows = grid.len();
        if rows == 0 || grid[0].is_empty() {
            return Err(ShapeError::Empty);
        }
        let cols = grid[0].len();
        if rows > MASK_STRIDE || cols > MASK_STRIDE {
            return Err(ShapeError::TooLarge { rows, cols });
        }

        let mut mask = 0u128;
        let mut r = 0;
        while r < rows {
            let row = grid[r];
            if row.len() != cols {
                return Err(ShapeError::Ragged);
            }
            let mut c = 0;
            while c < cols {
                match row[c] {
                    0 => {}
                    1 => mask |= 1u128 << (r * MASK_STRIDE + c),
                    _ => return Err(ShapeError::NonBinary),
                }
                c += 1;
            }
            r += 1;
        }

        if mask == 0 {
            return Err(ShapeError::NoFilledCells);
        }
        Ok(Self {
            rows: rows as u8,
            cols: cols as u8,
            mask,
        })
    }

    /// Like [`Shape::parse`], for grids known to be valid (catalog constants).
    ///
    /// Panics on an invalid grid; in a `const` item that is a compile error.
    pub const fn from_rows(grid: &[&[u8]]) -> Self {
        match Self::parse(grid) {
            Ok(shape) => shape,
            Err(_) => panic!("invalid piece shape"),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at shape-local (row, col) is filled
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.mask & Self::bit(row, col) != 0
    }

    /// Number of filled cells
    pub fn cell_count(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Shape-local coordinates of every filled cell, row-major
    pub fn filled_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows)
            .flat_map(move |r| (0..self.cols).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.mask & Self::bit(r, c) != 0)
    }

    /// Render as rows of `0`/`1`
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.is_filled(r, c) as u8).collect())
            .collect()
    }

    #[inline(always)]
    fn bit(row: u8, col: u8) -> u128 {
        1u128 << (row as usize * MASK_STRIDE + col as usize)
    }
}

impl TryFrom<&[&[u8]]> for Shape {
    type Error = ShapeError;

    fn try_from(grid: &[&[u8]]) -> Result<Self, Self::Error> {
        Self::parse(grid)
    }
}

/// A catalog entry: a shape plus its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Position in [`CATALOG`]
    pub id: u8,
    pub name: &'static str,
    pub shape: Shape,
    pub color: PieceColor,
}

impl Piece {
    /// Board value written by a placement of this piece (always non-zero).
    ///
    /// Maps back to the catalog entry through [`piece_for_cell`].
    pub fn placement_id(&self) -> Cell {
        self.id as Cell + 1
    }
}

const fn piece(id: u8, name: &'static str, color: PieceColor, grid: &[&[u8]]) -> Piece {
    Piece {
        id,
        name,
        shape: Shape::from_rows(grid),
        color,
    }
}

/// The fixed piece catalog, in draw-independent order
pub static CATALOG: [Piece; CATALOG_SIZE] = [
    piece(0, "square", PieceColor::Yellow, &[&[1, 1], &[1, 1]]),
    piece(1, "l", PieceColor::Blue, &[&[1, 0, 0], &[1, 0, 0], &[1, 1, 1]]),
    piece(2, "reverse_l", PieceColor::Orange, &[&[0, 0, 1], &[0, 0, 1], &[1, 1, 1]]),
    piece(3, "line", PieceColor::Cyan, &[&[1], &[1], &[1], &[1]]),
    piece(4, "t", PieceColor::Purple, &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
    piece(5, "z", PieceColor::Red, &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
    piece(6, "s", PieceColor::Green, &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
    piece(7, "cross", PieceColor::Pink, &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]),
    piece(8, "small_l", PieceColor::Indigo, &[&[1, 0], &[1, 1]]),
    piece(9, "dot", PieceColor::Gray, &[&[1]]),
    piece(10, "corner", PieceColor::Teal, &[&[1, 1], &[1, 0]]),
    piece(11, "small_t", PieceColor::Amber, &[&[1, 1, 1], &[0, 1, 0]]),
];

/// Look up a catalog piece by name
pub fn piece_by_name(name: &str) -> Option<&'static Piece> {
    CATALOG.iter().find(|p| p.name == name)
}

/// Catalog piece whose placement wrote `cell`, if any
pub fn piece_for_cell(cell: Cell) -> Option<&'static Piece> {
    let index = cell.checked_sub(1)? as usize;
    CATALOG.get(index)
}

/// Draw `count` pieces: a uniform shuffle of the whole catalog, truncated.
///
/// No piece repeats within one draw. `count` above the catalog size is
/// clamped to the catalog size.
pub fn draw_random_pieces<R: Rng>(count: usize, rng: &mut R) -> ArrayVec<Piece, CATALOG_SIZE> {
    let mut order: [usize; CATALOG_SIZE] = std::array::from_fn(|i| i);
    shuffle(&mut order, rng);
    order.iter().take(count).map(|&i| CATALOG[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    #[test]
    fn test_catalog_ids_match_positions() {
        for (i, piece) in CATALOG.iter().enumerate() {
            assert_eq!(piece.id as usize, i);
            assert_eq!(piece_for_cell(piece.placement_id()), Some(piece));
        }
    }

    #[test]
    fn test_piece_for_cell_rejects_empty_and_unknown() {
        assert_eq!(piece_for_cell(0), None);
        assert_eq!(piece_for_cell(CATALOG_SIZE as Cell + 1), None);
    }

    #[test]
    fn test_shape_mask_layout() {
        let t = piece_by_name("t").unwrap().shape;
        assert_eq!((t.rows(), t.cols()), (3, 3));
        assert!(!t.is_filled(0, 0));
        assert!(t.is_filled(0, 1));
        assert!(t.is_filled(1, 0));
        assert!(!t.is_filled(2, 1));
        assert!(!t.is_filled(3, 0));
        assert_eq!(t.cell_count(), 4);
        assert_eq!(
            t.filled_cells().collect::<Vec<_>>(),
            vec![(0, 1), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Shape::parse(&[]), Err(ShapeError::Empty));
        assert_eq!(Shape::parse(&[&[]]), Err(ShapeError::Empty));
        assert_eq!(Shape::parse(&[&[1, 1], &[1]]), Err(ShapeError::Ragged));
        assert_eq!(Shape::parse(&[&[2]]), Err(ShapeError::NonBinary));
        assert_eq!(Shape::parse(&[&[0]]), Err(ShapeError::NoFilledCells));
        let wide = [1u8; 11];
        assert_eq!(
            Shape::parse(&[&wide]),
            Err(ShapeError::TooLarge { rows: 1, cols: 11 })
        );
    }

    #[test]
    fn test_full_board_shape_fits_mask() {
        let row: &[u8] = &[1u8; 10];
        let grid = [row; 10];
        let shape = Shape::parse(&grid).unwrap();
        assert_eq!(shape.cell_count(), 100);
        assert!(shape.is_filled(9, 9));
    }

    #[test]
    fn test_draw_clamps_to_catalog() {
        let mut rng = SimpleRng::new(11);
        let drawn = draw_random_pieces(CATALOG_SIZE + 5, &mut rng);
        assert_eq!(drawn.len(), CATALOG_SIZE);
    }
}
