//! Placement engine.
//!
//! Pure transitions over [`GameState`]: every function takes the current
//! state by reference and either reports on it or hands back the next state,
//! so callers can keep earlier states around for undo or replay.

pub mod place;
pub mod preview;

pub use block_blast_core as core;
pub use block_blast_types as types;

pub use block_blast_core::GameState;
pub use place::apply_place;
pub use preview::{has_available_move, hover_preview, valid_positions, HoverPreview};
