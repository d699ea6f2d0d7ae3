//! Core use-case services.
//!
//! # Responsibility
//! - Own ledger state and route every mutation through one store.
//! - Derive display-ready projections from ledger snapshots.
//!
//! # Invariants
//! - Only `LedgerStore` mutates ledger state.
//! - Projections are pure functions of a `&Ledger`.

pub mod id_generator;
pub mod ledger_store;
pub mod projector;
