//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management for the
//! block-placement puzzle. It has **no dependencies** on UI, timers, or I/O,
//! making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is a plain function over in-memory values
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x10 grid with placement checks and row/column clearing
//! - [`pieces`]: shape bitmasks and the fixed twelve-piece catalog
//! - [`tray`]: the batch of pieces currently on offer
//! - [`rng`]: seedable random source and Fisher-Yates shuffle
//! - [`scoring`]: placement bonus, line-clear points and levels
//! - [`game_state`]: the single owner of board, tray and score
//! - [`snapshot`]: renderer-facing copy of the state
//!
//! # Game Rules
//!
//! - A piece fits when its whole bounding box is on the grid and every filled
//!   cell lands on an empty one
//! - After a placement every full row and every full column is cleared; a
//!   row and a column sharing a cell both count
//! - Each placement scores 10, each cleared line 100; a level is 500 points
//! - The tray holds three pieces drawn without repeats; it is refilled only
//!   once empty, after a pause chosen by the caller
//!
//! # Example
//!
//! ```
//! use block_blast_core::GameState;
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.tray().len(), 3);
//!
//! // Every catalog piece fits in the top-left corner of an empty board.
//! let outcome = game.place_piece(0, 0, 0).unwrap();
//! assert_eq!(outcome.score, 10);
//! assert_eq!(game.tray().len(), 2);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tray;

pub use block_blast_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LineClear};
pub use game_state::{GameState, PlacementOutcome, RefillTicket};
pub use pieces::{draw_random_pieces, piece_by_name, piece_for_cell, Piece, Shape, CATALOG};
pub use rng::SimpleRng;
pub use scoring::{apply_placement_score, calculate_level, ScoreResult, ScoringRules};
pub use snapshot::{GameSnapshot, TraySlot};
pub use tray::Tray;
