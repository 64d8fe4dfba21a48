//! Application configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                | Default               |
//! |-------------------------|-----------------------|
//! | `RECIBO_DATABASE_PATH`  | `./recibos.db`        |
//! | `RECIBO_DAY_CONVENTION` | `30` (or `30.44`)     |
//! | `RECIBO_BACKUP_FILE`    | `backup-recibos.json` |

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use recibo_core::{CompanyProfile, DayConvention};

use crate::pool::DbConfig;

pub const DATABASE_PATH_VAR: &str = "RECIBO_DATABASE_PATH";
pub const DAY_CONVENTION_VAR: &str = "RECIBO_DAY_CONVENTION";
pub const BACKUP_FILE_VAR: &str = "RECIBO_BACKUP_FILE";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Days per warranty month, used when writing and reading durations
    pub day_convention: DayConvention,

    /// Default file for `recibo export` / `recibo import`
    pub backup_file: PathBuf,

    /// Company stamped onto new receipts
    pub company: CompanyProfile,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let day_convention = match non_empty(DAY_CONVENTION_VAR) {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue(DAY_CONVENTION_VAR.to_string()))?,
            None => DayConvention::default(),
        };

        Ok(AppConfig {
            database_path: non_empty(DATABASE_PATH_VAR)
                .unwrap_or_else(|| "./recibos.db".to_string())
                .into(),

            day_convention,

            backup_file: non_empty(BACKUP_FILE_VAR)
                .unwrap_or_else(|| "backup-recibos.json".to_string())
                .into(),

            company: CompanyProfile::default(),
        })
    }

    /// Pool configuration for [`AppConfig::database_path`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
