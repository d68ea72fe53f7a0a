use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, warn};

use block_blast_engine::{apply_place, hover_preview, HoverPreview};

use crate::core::{GameSnapshot, GameState, PlacementOutcome, RefillTicket, SimpleRng};
use crate::refill::RefillScheduler;
use crate::types::{GameConfig, GameError};

/// A game plus the timer that refills its tray.
///
/// Must be created inside a tokio runtime; the refill timer is spawned onto
/// the runtime that was current at construction.
pub struct Session<R = SimpleRng> {
    state: GameState<R>,
    scheduler: RefillScheduler,
    refills: mpsc::UnboundedReceiver<RefillTicket>,
}

impl Session<SimpleRng> {
    /// Start a session with the default config
    pub fn new(seed: u32) -> Result<Self> {
        Self::with_state(GameState::new(seed))
    }

    /// Start a session from a JSON config document
    pub fn from_json_config(text: &str, seed: u32) -> Result<Self> {
        let config = GameConfig::from_json(text).context("failed to load game config")?;
        let state = GameState::with_config(config, SimpleRng::new(seed))?;
        Self::with_state(state)
    }
}

impl<R: Rng + Clone> Session<R> {
    /// Wrap an existing game state
    pub fn with_state(state: GameState<R>) -> Result<Self> {
        let handle = Handle::try_current().context("game session requires a tokio runtime")?;
        let delay = Duration::from_millis(state.config().refill_delay_ms);
        let (scheduler, refills) = RefillScheduler::new(handle, delay);
        info!(delay_ms = state.config().refill_delay_ms, "session started");
        Ok(Self {
            state,
            scheduler,
            refills,
        })
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Hover feedback for tray piece `index` at (row, col)
    pub fn preview(&self, index: usize, row: i32, col: i32) -> Result<HoverPreview, GameError> {
        hover_preview(&self.state, index, row, col)
    }

    /// Place a tray piece, scheduling the refill when the tray runs dry
    pub fn place(&mut self, index: usize, row: i32, col: i32) -> Result<PlacementOutcome, GameError> {
        let (next, outcome) = apply_place(&self.state, index, row, col)?;
        self.state = next;
        if let Some(ticket) = outcome.refill {
            self.scheduler.schedule(ticket);
        }
        Ok(outcome)
    }

    /// Whether a refill timer is still running
    pub fn refill_scheduled(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Apply every refill whose timer already fired, without waiting.
    ///
    /// Returns true if the tray was refilled.
    pub fn poll_refill(&mut self) -> bool {
        let mut refilled = false;
        while let Ok(ticket) = self.refills.try_recv() {
            refilled |= self.redeem(ticket);
        }
        refilled
    }

    /// Wait for the next refill timer and apply it.
    ///
    /// Returns false when the delivered ticket was stale or the tray was
    /// already full, and right away when no timer is running.
    pub async fn wait_refill(&mut self) -> Result<bool> {
        if !self.scheduler.is_pending() {
            return Ok(self.poll_refill());
        }
        let ticket = self
            .refills
            .recv()
            .await
            .context("refill channel closed")?;
        Ok(self.redeem(ticket))
    }

    /// Start a new game, dropping any refill still in flight
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.state.reset();
    }

    fn redeem(&mut self, ticket: RefillTicket) -> bool {
        match self.state.complete_refill(ticket) {
            Ok(refilled) => refilled,
            Err(err) => {
                warn!(code = err.code(), %err, "refill ignored");
                false
            }
        }
    }
}
