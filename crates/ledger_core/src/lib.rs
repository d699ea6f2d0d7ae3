//! Core ledger logic for the personal finance tracker.
//! This crate is the single source of truth for ledger invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, LedgerConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::amount::parse_amount;
pub use model::expense::{Expense, ExpenseId, ExpenseValidationError};
pub use model::ledger::{Ledger, DEFAULT_INCOME};
pub use repo::ledger_repo::{
    LedgerRepository, RepoError, RepoResult, SqliteLedgerRepository, StoredLedger, EXPENSES_KEY,
    INCOME_KEY,
};
pub use service::id_generator::ExpenseIdGenerator;
pub use service::ledger_store::{LedgerStore, SubscriptionId};
pub use service::projector::{project_distribution, summarize, Distribution, LedgerSummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
