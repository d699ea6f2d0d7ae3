//! Ledger aggregate: income plus the ordered expense collection.
//!
//! # Invariants
//! - Expense ids are pairwise distinct.
//! - Expense order is insertion order.

use super::expense::{Expense, ExpenseId};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Income used when nothing has been persisted yet.
pub const DEFAULT_INCOME: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Complete financial state owned by the ledger store.
///
/// Consumers only ever see `&Ledger` or an owned clone; mutation goes through
/// `LedgerStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    pub income: Decimal,
    pub expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new(income: Decimal, expenses: Vec<Expense>) -> Self {
        Self { income, expenses }
    }

    pub fn find(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub(crate) fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|expense| expense.id == id)
    }

    /// Largest expense id currently held, if any.
    pub fn max_id(&self) -> Option<ExpenseId> {
        self.expenses.iter().map(|expense| expense.id).max()
    }

    /// Returns whether every expense id is unique.
    pub fn has_unique_ids(&self) -> bool {
        ids_are_unique(&self.expenses)
    }
}

/// Returns whether no two expenses share an id.
pub fn ids_are_unique(expenses: &[Expense]) -> bool {
    let mut seen = HashSet::with_capacity(expenses.len());
    expenses.iter().all(|expense| seen.insert(expense.id))
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_INCOME, Vec::new())
    }
}
