use arrayvec::ArrayVec;
use serde::Serialize;

use crate::pieces::Piece;
use crate::types::{Cell, PieceColor, BOARD_SIZE, CATALOG_SIZE, EMPTY_CELL};

const SIZE: usize = BOARD_SIZE as usize;

/// One tray entry as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TraySlot {
    pub piece_id: u8,
    pub color: PieceColor,
    pub rows: u8,
    pub cols: u8,
}

impl From<&Piece> for TraySlot {
    fn from(piece: &Piece) -> Self {
        Self {
            piece_id: piece.id,
            color: piece.color,
            rows: piece.shape.rows(),
            cols: piece.shape.cols(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: [[Cell; SIZE]; SIZE],
    pub tray: ArrayVec<TraySlot, CATALOG_SIZE>,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub placements: u32,
    pub epoch: u32,
    pub refill_pending: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[EMPTY_CELL; SIZE]; SIZE];
        self.tray.clear();
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.placements = 0;
        self.epoch = 0;
        self.refill_pending = false;
    }

    /// Whether the tray offers nothing right now
    pub fn awaiting_pieces(&self) -> bool {
        self.tray.is_empty()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[EMPTY_CELL; SIZE]; SIZE],
            tray: ArrayVec::new(),
            score: 0,
            level: 1,
            lines_cleared: 0,
            placements: 0,
            epoch: 0,
            refill_pending: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;

    #[test]
    fn snapshot_serializes_board_and_tray() {
        let state = GameState::new(3);
        let snap = state.snapshot();
        assert_eq!(snap.tray.len(), 3);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["board"].as_array().unwrap().len(), 10);
        assert_eq!(json["tray"].as_array().unwrap().len(), 3);
        assert_eq!(json["level"], 1);
        assert!(json["tray"][0]["color"].is_string());
    }

    #[test]
    fn snapshot_clear_resets_fields() {
        let mut snap = GameState::new(3).snapshot();
        snap.score = 40;
        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
        assert!(snap.awaiting_pieces());
    }
}
