//! Block Blast (workspace facade crate).
//!
//! Re-exports the member crates under one roof as
//! `block_blast::{core, engine, session, types}`. The implementation lives in
//! the dedicated crates under `crates/`.

pub use block_blast_core as core;
pub use block_blast_engine as engine;
pub use block_blast_session as session;
pub use block_blast_types as types;
