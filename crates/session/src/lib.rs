//! Session module - runs a game with real-time tray refills
//!
//! The core engine never waits: when a placement empties the tray it only
//! hands out a [`RefillTicket`](block_blast_core::RefillTicket). This crate
//! turns that ticket into a delayed task on a tokio runtime and feeds it back
//! into the game once the pause is over.
//!
//! # Reset safety
//!
//! A reset during the pause must not let the old refill overwrite the new
//! tray. Two guards cover it:
//!
//! - [`Session::reset`] aborts the pending timer task
//! - a ticket that still slips through carries the old epoch and is rejected
//!   by the game state
//!
//! # Example
//!
//! ```no_run
//! use block_blast_session::Session;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let mut session = Session::new(7)?;
//! // The tray shifts left after every placement, so always take slot 0.
//! for (row, col) in [(0, 0), (0, 4), (5, 0)] {
//!     session.place(0, row, col)?;
//! }
//! assert!(session.wait_refill().await?);
//! # Ok(())
//! # }
//! ```

pub mod refill;
pub mod session;

pub use block_blast_core as core;
pub use block_blast_types as types;

pub use refill::RefillScheduler;
pub use session::Session;
