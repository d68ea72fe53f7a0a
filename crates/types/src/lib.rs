//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data: no game logic, no I/O, usable from the core
//! engine, the session layer and any renderer.
//!
//! # Board Dimensions
//!
//! The playfield is a square grid:
//!
//! - **Size**: 10 rows by 10 columns (indexed 0-9)
//! - **Cell value**: `0` for empty, any positive value for an occupied cell
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TRAY_SIZE` | 3 | Pieces offered per batch |
//! | `PLACEMENT_BONUS` | 10 | Points for every successful placement |
//! | `LINE_CLEAR_POINTS` | 100 | Points per cleared row or column |
//! | `LEVEL_SCORE_STEP` | 500 | Score needed per level |
//! | `REFILL_DELAY_MS` | 500 | Pause between an empty tray and the next batch |
//!
//! # Examples
//!
//! ```
//! use block_blast_types::{GameConfig, PieceColor, BOARD_SIZE};
//!
//! assert_eq!(BOARD_SIZE, 10);
//! assert_eq!(PieceColor::from_str("teal"), Some(PieceColor::Teal));
//!
//! let config = GameConfig::from_json(r#"{"tray_size": 2}"#).unwrap();
//! assert_eq!(config.tray_size, 2);
//! assert_eq!(config.refill_delay_ms, 500);
//! ```

use serde::{Deserialize, Serialize};

/// Board width and height in cells
pub const BOARD_SIZE: u8 = 10;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Number of entries in the piece catalog
pub const CATALOG_SIZE: usize = 12;

/// Pieces offered per tray batch
pub const DEFAULT_TRAY_SIZE: usize = 3;

/// Flat bonus awarded on every successful placement
pub const PLACEMENT_BONUS: u32 = 10;

/// Points per cleared row or column
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Score span of a single level
pub const LEVEL_SCORE_STEP: u32 = 500;

/// Pause between tray exhaustion and the next batch (milliseconds)
pub const REFILL_DELAY_MS: u64 = 500;

/// A board cell: `EMPTY_CELL` or the placement id of the piece occupying it
pub type Cell = u32;

/// Value of an unoccupied cell
pub const EMPTY_CELL: Cell = 0;

/// Display color attached to a catalog piece.
///
/// Purely cosmetic; no game rule looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    Yellow,
    Blue,
    Orange,
    Cyan,
    Purple,
    Red,
    Green,
    Pink,
    Indigo,
    Gray,
    Teal,
    Amber,
}

impl PieceColor {
    /// Parse a color from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_blast_types::PieceColor;
    ///
    /// assert_eq!(PieceColor::from_str("Cyan"), Some(PieceColor::Cyan));
    /// assert_eq!(PieceColor::from_str("magenta"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yellow" => Some(PieceColor::Yellow),
            "blue" => Some(PieceColor::Blue),
            "orange" => Some(PieceColor::Orange),
            "cyan" => Some(PieceColor::Cyan),
            "purple" => Some(PieceColor::Purple),
            "red" => Some(PieceColor::Red),
            "green" => Some(PieceColor::Green),
            "pink" => Some(PieceColor::Pink),
            "indigo" => Some(PieceColor::Indigo),
            "gray" | "grey" => Some(PieceColor::Gray),
            "teal" => Some(PieceColor::Teal),
            "amber" => Some(PieceColor::Amber),
            _ => None,
        }
    }

    /// Lowercase color name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceColor::Yellow => "yellow",
            PieceColor::Blue => "blue",
            PieceColor::Orange => "orange",
            PieceColor::Cyan => "cyan",
            PieceColor::Purple => "purple",
            PieceColor::Red => "red",
            PieceColor::Green => "green",
            PieceColor::Pink => "pink",
            PieceColor::Indigo => "indigo",
            PieceColor::Gray => "gray",
            PieceColor::Teal => "teal",
            PieceColor::Amber => "amber",
        }
    }
}

/// Reasons a shape grid is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("shape has no rows or no columns")]
    Empty,
    #[error("shape rows have different lengths")]
    Ragged,
    #[error("shape is {rows}x{cols}, larger than the board")]
    TooLarge { rows: usize, cols: usize },
    #[error("shape cells must be 0 or 1")]
    NonBinary,
    #[error("shape has no filled cells")]
    NoFilledCells,
}

/// Errors surfaced by the game engine.
///
/// Placement legality is normally queried with a boolean (`can_place`);
/// `InvalidPlacement` only comes out of the fail-closed paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("tray index {index} out of range (tray holds {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("cell ({row}, {col}) is outside the board")]
    CellOutOfRange { row: i32, col: i32 },
    #[error("piece cannot be placed at ({row}, {col})")]
    InvalidPlacement { row: i32, col: i32 },
    #[error("invalid shape: {0}")]
    InvalidShape(#[from] ShapeError),
    #[error("refill scheduled in epoch {ticket} ignored, game is in epoch {current}")]
    StaleRefill { ticket: u32, current: u32 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl GameError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            GameError::OutOfRange { .. } | GameError::CellOutOfRange { .. } => "out_of_range",
            GameError::InvalidPlacement { .. } => "invalid_placement",
            GameError::InvalidShape(_) => "invalid_shape",
            GameError::StaleRefill { .. } => "stale_refill",
            GameError::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// Tunable game parameters.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Pieces drawn per batch
    pub tray_size: usize,
    /// Pause between an empty tray and the next batch
    pub refill_delay_ms: u64,
    pub placement_bonus: u32,
    pub line_clear_points: u32,
    /// Score span of one level; must be non-zero
    pub level_step: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tray_size: DEFAULT_TRAY_SIZE,
            refill_delay_ms: REFILL_DELAY_MS,
            placement_bonus: PLACEMENT_BONUS,
            line_clear_points: LINE_CLEAR_POINTS,
            level_step: LEVEL_SCORE_STEP,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> Result<(), GameError> {
        if self.tray_size == 0 || self.tray_size > CATALOG_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "tray_size must be within 1..={}, got {}",
                CATALOG_SIZE, self.tray_size
            )));
        }
        if self.level_step == 0 {
            return Err(GameError::InvalidConfig(
                "level_step must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
