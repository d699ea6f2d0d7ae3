//! Ledger repository contract and SQLite key-value implementation.
//!
//! # Responsibility
//! - Persist income and the expense sequence under two fixed keys.
//! - Decode each key independently so one corrupt entry cannot hide the other.
//!
//! # Invariants
//! - Saving the same ledger twice leaves the stored rows untouched; a key is
//!   only rewritten (and its `updated_at` bumped) when its value changes.
//! - Malformed values decode to `None` and are logged by key name only.

use crate::db::DbError;
use crate::model::expense::Expense;
use crate::model::ledger::{ids_are_unique, Ledger};
use log::{debug, warn};
use rust_decimal::Decimal;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage key holding the income decimal string.
pub const INCOME_KEY: &str = "income";
/// Storage key holding the JSON expense sequence.
pub const EXPENSES_KEY: &str = "expenses";

const UPSERT_ENTRY_SQL: &str = "INSERT INTO ledger_entries (key, value, updated_at)
VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
ON CONFLICT(key) DO UPDATE SET
    value = excluded.value,
    updated_at = excluded.updated_at
WHERE ledger_entries.value IS NOT excluded.value;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for ledger persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize expenses: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Result of reading persisted state.
///
/// Each field is `None` when its key is missing or its bytes are malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredLedger {
    pub income: Option<Decimal>,
    pub expenses: Option<Vec<Expense>>,
}

impl StoredLedger {
    /// Applies per-field fallback and builds a ledger.
    pub fn into_ledger(self, default_income: Decimal) -> Ledger {
        Ledger::new(
            self.income.unwrap_or(default_income),
            self.expenses.unwrap_or_default(),
        )
    }
}

/// Persistence contract used by `LedgerStore`.
pub trait LedgerRepository {
    fn load(&self) -> RepoResult<StoredLedger>;
    fn save(&self, ledger: &Ledger) -> RepoResult<()>;
    fn clear(&self) -> RepoResult<()>;
}

impl<R: LedgerRepository + ?Sized> LedgerRepository for &R {
    fn load(&self) -> RepoResult<StoredLedger> {
        (**self).load()
    }

    fn save(&self, ledger: &Ledger) -> RepoResult<()> {
        (**self).save(ledger)
    }

    fn clear(&self) -> RepoResult<()> {
        (**self).clear()
    }
}

/// SQLite-backed ledger repository over the `ledger_entries` table.
pub struct SqliteLedgerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLedgerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Reads the raw stored value for `key`.
    pub fn get_entry(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM ledger_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Overwrites the raw stored value for `key`.
    pub fn put_entry(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(UPSERT_ENTRY_SQL, params![key, value])?;
        Ok(())
    }
}

impl LedgerRepository for SqliteLedgerRepository<'_> {
    fn load(&self) -> RepoResult<StoredLedger> {
        let income = self
            .get_entry(INCOME_KEY)?
            .and_then(|raw| decode_income(&raw));
        let expenses = self
            .get_entry(EXPENSES_KEY)?
            .and_then(|raw| decode_expenses(&raw));

        debug!(
            "event=ledger_load module=repo status=ok income_present={} expenses_present={}",
            income.is_some(),
            expenses.is_some()
        );
        Ok(StoredLedger { income, expenses })
    }

    fn save(&self, ledger: &Ledger) -> RepoResult<()> {
        let income = encode_income(ledger.income);
        let expenses = encode_expenses(&ledger.expenses)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(UPSERT_ENTRY_SQL, params![INCOME_KEY, income])?;
        tx.execute(UPSERT_ENTRY_SQL, params![EXPENSES_KEY, expenses])?;
        tx.commit()?;

        debug!(
            "event=ledger_save module=repo status=ok expense_count={}",
            ledger.expenses.len()
        );
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM ledger_entries WHERE key IN (?1, ?2);",
            params![INCOME_KEY, EXPENSES_KEY],
        )?;
        Ok(())
    }
}

/// Encodes income as a decimal string.
pub fn encode_income(income: Decimal) -> String {
    income.to_string()
}

/// Encodes the expense sequence as a JSON array in insertion order.
pub fn encode_expenses(expenses: &[Expense]) -> RepoResult<String> {
    Ok(serde_json::to_string(expenses)?)
}

/// Decodes a stored income value, `None` when malformed.
pub fn decode_income(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let decoded = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok();
    if decoded.is_none() {
        warn!("event=ledger_load module=repo status=skip key={INCOME_KEY} reason=malformed");
    }
    decoded
}

/// Decodes a stored expense sequence, `None` when malformed.
///
/// Blank descriptions and duplicate ids count as malformed for the whole key.
pub fn decode_expenses(raw: &str) -> Option<Vec<Expense>> {
    let expenses: Vec<Expense> = match serde_json::from_str(raw) {
        Ok(expenses) => expenses,
        Err(_) => {
            warn!("event=ledger_load module=repo status=skip key={EXPENSES_KEY} reason=malformed");
            return None;
        }
    };

    if expenses.iter().any(|expense| expense.validate().is_err()) {
        warn!("event=ledger_load module=repo status=skip key={EXPENSES_KEY} reason=invalid_record");
        return None;
    }

    if !ids_are_unique(&expenses) {
        warn!("event=ledger_load module=repo status=skip key={EXPENSES_KEY} reason=duplicate_id");
        return None;
    }

    Some(expenses)
}
