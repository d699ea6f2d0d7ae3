//! Repository layer: the ledger persistence adapter.
//!
//! # Responsibility
//! - Define the load/save contract the ledger store depends on.
//! - Isolate SQLite and serialization details from store orchestration.
//!
//! # Invariants
//! - `save` is a full overwrite of both keys, never an append.
//! - `load` reports malformed entries as absent instead of failing.

pub mod ledger_repo;
