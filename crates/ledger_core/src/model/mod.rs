//! Ledger domain model.
//!
//! # Responsibility
//! - Define the canonical records owned by the ledger store.
//! - Provide text-to-amount parsing shared by every mutation entry point.
//!
//! # Invariants
//! - Every expense is identified by a stable `ExpenseId`.
//! - Expense order is insertion order; nothing here sorts by amount or time.

pub mod amount;
pub mod expense;
pub mod ledger;
