//! Runtime configuration for roster front ends.
//!
//! # Responsibility
//! - Collect store location, slot key and logging settings in one value.
//! - Reject settings the core cannot start with before anything is opened.
//!
//! # Invariants
//! - `storage_key` is never empty after `validate`.
//! - `log_dir`, when set, is absolute.

use crate::logging::default_log_level;
use crate::storage::employee_storage::DEFAULT_STORAGE_KEY;
use log::LevelFilter;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Store file used when none is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDbPath,
    EmptyStorageKey,
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => f.write_str("db path cannot be empty"),
            Self::EmptyStorageKey => f.write_str("storage key cannot be empty"),
            Self::RelativeLogDir(path) => write!(
                f,
                "log dir must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub log_level: LevelFilter,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl RosterConfig {
    /// Trims the slot key and checks every field.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDbPath);
        }

        let key = self.storage_key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        self.storage_key = key.to_string();

        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }

        Ok(self)
    }
}
