//! Deferred refill timer.
//!
//! Bridges the synchronous game state with a tokio timer: `schedule` spawns a
//! sleep, and when it fires the ticket is pushed onto a channel the session
//! drains.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::RefillTicket;

/// Runs at most one pending refill timer at a time.
#[derive(Debug)]
pub struct RefillScheduler {
    handle: Handle,
    delay: Duration,
    tx: mpsc::UnboundedSender<RefillTicket>,
    pending: Option<JoinHandle<()>>,
}

impl RefillScheduler {
    /// Create a scheduler spawning onto `handle`, plus the receiving end of
    /// its ticket channel.
    pub fn new(handle: Handle, delay: Duration) -> (Self, mpsc::UnboundedReceiver<RefillTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            handle,
            delay,
            tx,
            pending: None,
        };
        (scheduler, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Deliver `ticket` after the configured delay, replacing any pending timer
    pub fn schedule(&mut self, ticket: RefillTicket) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        debug!(epoch = ticket.epoch, delay_ms = delay.as_millis() as u64, "refill scheduled");
        self.pending = Some(self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session was dropped.
            let _ = tx.send(ticket);
        }));
    }

    /// Abort the pending timer. Returns true if one was still running.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(task) if !task.is_finished() => {
                task.abort();
                debug!("pending refill cancelled");
                true
            }
            _ => false,
        }
    }

    /// Whether a timer is still waiting to fire
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for RefillScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
