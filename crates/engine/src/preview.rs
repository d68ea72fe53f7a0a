use arrayvec::ArrayVec;
use rand::Rng;

use crate::core::{Board, GameState, Shape};
use crate::types::{GameError, BOARD_CELLS, BOARD_SIZE};

const SIZE: usize = BOARD_SIZE as usize;

/// What a renderer needs to draw a piece hovering over the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverPreview {
    pub tray_index: usize,
    pub row: i32,
    pub col: i32,
    /// Whether releasing here would place the piece
    pub valid: bool,
    /// Board cells the piece covers (cells off the grid are dropped)
    pub cells: ArrayVec<(u8, u8), BOARD_CELLS>,
    /// Rows the placement would clear; empty when `valid` is false
    pub rows_to_clear: ArrayVec<u8, SIZE>,
    /// Columns the placement would clear; empty when `valid` is false
    pub cols_to_clear: ArrayVec<u8, SIZE>,
}

/// Preview tray piece `index` with its top-left corner at (row, col).
///
/// Runs the same fit check as a real placement and leaves the state alone.
pub fn hover_preview<R: Rng>(
    state: &GameState<R>,
    index: usize,
    row: i32,
    col: i32,
) -> Result<HoverPreview, GameError> {
    let tray = state.tray();
    let piece = tray.get(index).ok_or(GameError::OutOfRange {
        index,
        len: tray.len(),
    })?;
    let board = state.board();
    let valid = board.can_place(&piece.shape, row, col);

    let cells = piece
        .shape
        .filled_cells()
        .filter_map(|(dr, dc)| Some((row.checked_add(dr as i32)?, col.checked_add(dc as i32)?)))
        .filter(|&(r, c)| board.get(r, c).is_some())
        .map(|(r, c)| (r as u8, c as u8))
        .collect();

    let (rows_to_clear, cols_to_clear) = if valid {
        board
            .place(&piece.shape, row, col, piece.placement_id())
            .full_lines()
    } else {
        (ArrayVec::new(), ArrayVec::new())
    };

    Ok(HoverPreview {
        tray_index: index,
        row,
        col,
        valid,
        cells,
        rows_to_clear,
        cols_to_clear,
    })
}

/// Every top-left position where `shape` fits on `board`, row-major
pub fn valid_positions<'a>(board: &'a Board, shape: &'a Shape) -> impl Iterator<Item = (i32, i32)> + 'a {
    let max_row = SIZE as i32 - shape.rows() as i32;
    let max_col = SIZE as i32 - shape.cols() as i32;
    (0..=max_row)
        .flat_map(move |r| (0..=max_col).map(move |c| (r, c)))
        .filter(move |&(r, c)| board.can_place(shape, r, c))
}

/// Whether any piece in the tray fits anywhere on the board.
///
/// An empty tray (refill pending) reports false.
pub fn has_available_move<R: Rng>(state: &GameState<R>) -> bool {
    state
        .tray()
        .pieces()
        .iter()
        .any(|piece| valid_positions(state.board(), &piece.shape).next().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece_by_name;

    #[test]
    fn preview_reports_covered_cells() {
        let gs = GameState::new(6);
        let piece = gs.tray().pieces()[0];

        let preview = hover_preview(&gs, 0, 2, 3).unwrap();
        assert!(preview.valid);
        assert_eq!(preview.cells.len() as u32, piece.shape.cell_count());
        assert!(preview.rows_to_clear.is_empty());
        assert!(preview.cols_to_clear.is_empty());
    }

    #[test]
    fn preview_off_board_is_invalid_and_clipped() {
        let gs = GameState::new(6);
        let preview = hover_preview(&gs, 0, 9, 9).unwrap();
        let piece = gs.tray().pieces()[0];
        if piece.shape.rows() > 1 || piece.shape.cols() > 1 {
            assert!(!preview.valid);
        }
        assert!(preview.cells.iter().all(|&(r, c)| r < 10 && c < 10));
    }

    #[test]
    fn preview_far_off_board_coordinates() {
        let gs = GameState::new(1);
        for (row, col) in [
            (i32::MAX, i32::MAX),
            (i32::MIN, i32::MIN),
            (i32::MAX, 0),
            (0, i32::MIN),
        ] {
            let preview = hover_preview(&gs, 0, row, col).unwrap();
            assert!(!preview.valid, "({}, {})", row, col);
            assert!(preview.cells.is_empty());
            assert!(preview.rows_to_clear.is_empty());
        }
    }

    #[test]
    fn preview_bad_index() {
        let gs = GameState::new(6);
        assert_eq!(
            hover_preview(&gs, 5, 0, 0).unwrap_err(),
            GameError::OutOfRange { index: 5, len: 3 }
        );
    }

    #[test]
    fn valid_positions_on_empty_board() {
        let board = Board::new();
        let square = piece_by_name("square").unwrap().shape;
        assert_eq!(valid_positions(&board, &square).count(), 81);

        let line = piece_by_name("line").unwrap().shape;
        assert_eq!(valid_positions(&board, &line).count(), 70);
    }

    #[test]
    fn new_game_has_moves() {
        assert!(has_available_move(&GameState::new(6)));
    }
}
