//! Game state module - owns the complete game state
//!
//! This module ties together all core components: board, tray, RNG, and
//! scoring. A placement runs as one atomic step (validate, place, clear,
//! score, consume); if any check fails the state is left untouched.
//!
//! Tray refills are deferred: when a placement empties the tray the outcome
//! carries a [`RefillTicket`], and the caller hands it back through
//! [`GameState::complete_refill`] once its pause is over. Tickets remember
//! the epoch they were issued in, and [`GameState::reset`] starts a new
//! epoch, so a refill scheduled before a reset can never clobber the new tray.

use arrayvec::ArrayVec;
use rand::Rng;
use tracing::{debug, info};

use crate::board::Board;
use crate::pieces::Piece;
use crate::rng::SimpleRng;
use crate::scoring::ScoringRules;
use crate::snapshot::{GameSnapshot, TraySlot};
use crate::tray::Tray;
use crate::types::{Cell, GameConfig, GameError, BOARD_SIZE};

/// Permission to refill the tray, issued when a placement empties it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefillTicket {
    pub epoch: u32,
}

/// Everything a successful placement changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub piece: Piece,
    pub row: i32,
    pub col: i32,
    /// Value written into the board for this placement
    pub fill: Cell,
    pub rows_cleared: ArrayVec<u8, { BOARD_SIZE as usize }>,
    pub cols_cleared: ArrayVec<u8, { BOARD_SIZE as usize }>,
    pub lines_cleared: u32,
    /// Points gained (line clears plus placement bonus)
    pub score_delta: u32,
    pub score: u32,
    pub level: u32,
    pub leveled_up: bool,
    /// Present when this placement consumed the last tray piece
    pub refill: Option<RefillTicket>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    config: GameConfig,
    rules: ScoringRules,
    board: Board,
    tray: Tray,
    score: u32,
    level: u32,
    /// Rows plus columns cleared since the last reset.
    lines_cleared: u32,
    placements: u32,
    /// Monotonic game id (increments on reset).
    epoch: u32,
    refill_pending: bool,
    rng: R,
}

impl GameState<SimpleRng> {
    /// Create a new game with the default config and the given RNG seed
    pub fn new(seed: u32) -> Self {
        let config = GameConfig::default();
        let rules = ScoringRules::from(&config);
        Self::build(config, rules, SimpleRng::new(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new game with an explicit config and random source
    pub fn with_config(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let rules = ScoringRules::from(&config);
        Ok(Self::build(config, rules, rng))
    }

    fn build(config: GameConfig, rules: ScoringRules, rng: R) -> Self {
        let mut state = Self {
            config,
            rules,
            board: Board::new(),
            tray: Tray::new(),
            score: 0,
            level: rules.level(0),
            lines_cleared: 0,
            placements: 0,
            epoch: 0,
            refill_pending: false,
            rng,
        };
        state.tray.refill(state.config.tray_size, &mut state.rng);
        info!(tray = state.tray.len(), "game started");
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// True between the placement that emptied the tray and the refill
    pub fn refill_pending(&self) -> bool {
        self.refill_pending
    }

    /// Whether tray piece `index` fits at (row, col); false for a bad index
    pub fn can_place(&self, index: usize, row: i32, col: i32) -> bool {
        self.tray
            .get(index)
            .is_some_and(|piece| self.board.can_place(&piece.shape, row, col))
    }

    /// Place tray piece `index` with its top-left corner at (row, col).
    ///
    /// Fails with `OutOfRange` for a bad tray index and `InvalidPlacement`
    /// when the piece does not fit; in both cases nothing changes.
    pub fn place_piece(&mut self, index: usize, row: i32, col: i32) -> Result<PlacementOutcome, GameError> {
        let piece = *self.tray.get(index).ok_or(GameError::OutOfRange {
            index,
            len: self.tray.len(),
        })?;
        let fill = piece.placement_id();
        let placed = self.board.try_place(&piece.shape, row, col, fill)?;

        let clear = placed.clear_full_lines();
        let line_score = self.rules.line_clear_score(clear.lines_cleared);
        let result = self.rules.apply_placement(self.score, line_score);
        let leveled_up = result.level > self.level;

        self.tray.consume(index)?;
        self.board = clear.board;
        self.score = result.score;
        self.level = result.level;
        self.lines_cleared = self.lines_cleared.saturating_add(clear.lines_cleared);
        self.placements = self.placements.saturating_add(1);

        let refill = if self.tray.is_empty() {
            self.refill_pending = true;
            Some(RefillTicket { epoch: self.epoch })
        } else {
            None
        };

        debug!(
            piece = piece.name,
            row,
            col,
            lines = clear.lines_cleared,
            score = self.score,
            level = self.level,
            tray = self.tray.len(),
            "piece placed"
        );

        Ok(PlacementOutcome {
            piece,
            row,
            col,
            fill,
            rows_cleared: clear.rows,
            cols_cleared: clear.cols,
            lines_cleared: clear.lines_cleared,
            score_delta: result.delta(),
            score: result.score,
            level: result.level,
            leveled_up,
            refill,
        })
    }

    /// Redeem a refill ticket.
    ///
    /// Returns `Ok(true)` when a new batch was drawn and `Ok(false)` when the
    /// tray was not empty (refills are idempotent). A ticket from an earlier
    /// epoch is rejected with `StaleRefill`.
    pub fn complete_refill(&mut self, ticket: RefillTicket) -> Result<bool, GameError> {
        if ticket.epoch != self.epoch {
            return Err(GameError::StaleRefill {
                ticket: ticket.epoch,
                current: self.epoch,
            });
        }
        if !self.tray.is_empty() {
            return Ok(false);
        }

        self.tray.refill(self.config.tray_size, &mut self.rng);
        self.refill_pending = false;
        info!(epoch = self.epoch, tray = self.tray.len(), "tray refilled");
        Ok(true)
    }

    /// Start over: empty board, zero score, fresh tray, new epoch
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.board = Board::new();
        self.score = 0;
        self.level = self.rules.level(0);
        self.lines_cleared = 0;
        self.placements = 0;
        self.refill_pending = false;
        self.tray.refill(self.config.tray_size, &mut self.rng);
        info!(epoch = self.epoch, "game reset");
    }

    /// Copy the renderer-facing view of the game into `out`
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.tray.clear();
        out.tray
            .extend(self.tray.pieces().iter().map(TraySlot::from));
        out.score = self.score;
        out.level = self.level;
        out.lines_cleared = self.lines_cleared;
        out.placements = self.placements;
        out.epoch = self.epoch;
        out.refill_pending = self.refill_pending;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_has_full_tray() {
        let state = GameState::new(1);
        assert_eq!(state.tray().len(), 3);
        assert!(state.board().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert!(!state.refill_pending());
    }

    #[test]
    fn test_rules_follow_config() {
        let config = GameConfig {
            placement_bonus: 7,
            line_clear_points: 40,
            level_step: 100,
            ..GameConfig::default()
        };
        let mut state = GameState::with_config(config, SimpleRng::new(2)).unwrap();
        assert_eq!(state.rules().line_clear_score(2), 80);
        assert_eq!(state.rules().level(250), 3);

        let outcome = state.place_piece(0, 0, 0).unwrap();
        assert_eq!(outcome.score, 7);
    }

    #[test]
    fn test_failed_placement_leaves_state_untouched() {
        let mut state = GameState::new(1);
        let before = state.snapshot();

        let err = state.place_piece(0, -1, 0).unwrap_err();
        assert!(matches!(err, GameError::InvalidPlacement { row: -1, col: 0 }));

        let err = state.place_piece(7, 0, 0).unwrap_err();
        assert_eq!(err, GameError::OutOfRange { index: 7, len: 3 });

        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_placement_writes_catalog_id() {
        let mut state = GameState::new(4);
        let piece = state.tray().pieces()[1];

        let outcome = state.place_piece(1, 0, 0).unwrap();
        assert_eq!(outcome.piece, piece);
        assert_eq!(outcome.fill, piece.id as Cell + 1);
        assert_eq!(outcome.score, 10);
        assert_eq!(outcome.refill, None);
        assert_eq!(
            state.board().filled_count() as u32,
            piece.shape.cell_count()
        );
        assert_eq!(state.tray().len(), 2);
    }

    #[test]
    fn test_stale_ticket_rejected_after_reset() {
        let mut state = GameState::new(9);
        let ticket = RefillTicket { epoch: state.epoch() };
        state.reset();

        let err = state.complete_refill(ticket).unwrap_err();
        assert_eq!(err, GameError::StaleRefill { ticket: 0, current: 1 });
        assert_eq!(err.code(), "stale_refill");
    }

    #[test]
    fn test_refill_is_noop_when_tray_not_empty() {
        let mut state = GameState::new(9);
        let before: Vec<u8> = state.tray().pieces().iter().map(|p| p.id).collect();
        let ticket = RefillTicket { epoch: state.epoch() };

        assert_eq!(state.complete_refill(ticket), Ok(false));
        let after: Vec<u8> = state.tray().pieces().iter().map(|p| p.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_can_place_checks_index() {
        let state = GameState::new(2);
        assert!(state.can_place(0, 0, 0));
        assert!(!state.can_place(3, 0, 0));
        assert!(!state.can_place(0, 10, 0));
    }
}
