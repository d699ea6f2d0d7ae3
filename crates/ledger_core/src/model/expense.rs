//! Expense domain record.
//!
//! # Responsibility
//! - Define the single recorded outflow shown in lists and charts.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `description` is non-empty after trimming.
//! - `amount` sign is unconstrained.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable expense identifier.
///
/// Timestamp-like integer (epoch milliseconds or later), serialized as a bare
/// JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub i64);

impl ExpenseId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for expense invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription(ExpenseId),
}

impl Display for ExpenseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription(id) => write!(f, "expense {id} has an empty description"),
        }
    }
}

impl Error for ExpenseValidationError {}

/// One recorded outflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    /// Written as a decimal string; JSON numbers are accepted on read.
    pub amount: Decimal,
}

impl Expense {
    pub fn new(id: ExpenseId, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
        }
    }

    /// Checks model invariants.
    ///
    /// # Errors
    /// - Returns `EmptyDescription` when `description` is blank.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription(self.id));
        }
        Ok(())
    }
}
