//! Tray module - the batch of pieces currently offered to the player
//!
//! The tray never refills itself. Whoever consumes the last piece decides
//! when the next batch arrives (usually after a short pause).

use arrayvec::ArrayVec;
use rand::Rng;

use crate::pieces::{draw_random_pieces, Piece};
use crate::types::{GameError, CATALOG_SIZE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tray {
    pieces: ArrayVec<Piece, CATALOG_SIZE>,
}

impl Tray {
    /// Create an empty tray
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole tray with a fresh draw of `count` pieces
    pub fn refill<R: Rng>(&mut self, count: usize, rng: &mut R) {
        self.pieces = draw_random_pieces(count, rng);
    }

    /// Remove and return the piece at `index`, keeping the order of the rest
    pub fn consume(&mut self, index: usize) -> Result<Piece, GameError> {
        let len = self.pieces.len();
        self.pieces
            .pop_at(index)
            .ok_or(GameError::OutOfRange { index, len })
    }

    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
