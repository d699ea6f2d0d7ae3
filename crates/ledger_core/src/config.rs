//! Runtime configuration for the ledger core.
//!
//! # Responsibility
//! - Hold the default income, database location and log level.
//! - Overlay values from `LEDGER_*` environment variables.
//!
//! # Invariants
//! - An unparseable environment value is an error, never silently dropped.

use crate::logging::{default_log_level, normalize_level_name};
use crate::model::amount::parse_amount;
use crate::model::ledger::DEFAULT_INCOME;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DEFAULT_INCOME: &str = "LEDGER_DEFAULT_INCOME";
pub const ENV_DB_PATH: &str = "LEDGER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "LEDGER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LEDGER_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { variable: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { variable, value } => {
                write!(f, "invalid value `{value}` for {variable}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Ledger core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Income used when nothing valid is persisted.
    pub default_income: Decimal,
    /// SQLite file; `None` means an in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_income: DEFAULT_INCOME,
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl LedgerConfig {
    /// Defaults overlaid with process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values returned by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_DEFAULT_INCOME) {
            config.default_income =
                parse_amount(&value).ok_or_else(|| ConfigError::InvalidValue {
                    variable: ENV_DEFAULT_INCOME,
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup(ENV_DB_PATH) {
            config.db_path = Some(non_empty_path(ENV_DB_PATH, value)?);
        }

        if let Some(value) = lookup(ENV_LOG_DIR) {
            config.log_dir = Some(non_empty_path(ENV_LOG_DIR, value)?);
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            config.log_level =
                normalize_level_name(&value).map_err(|_| ConfigError::InvalidValue {
                    variable: ENV_LOG_LEVEL,
                    value: value.clone(),
                })?;
        }

        Ok(config)
    }

    pub fn with_default_income(mut self, income: Decimal) -> Self {
        self.default_income = income;
        self
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }
}

fn non_empty_path(variable: &'static str, value: String) -> Result<PathBuf, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue { variable, value });
    }
    Ok(PathBuf::from(trimmed))
}
