//! Employee collection storage adapter.
//!
//! # Responsibility
//! - Serialize the whole employee collection into one persisted slot.
//! - Offer fail-safe `load`/`save` for session code and fallible
//!   `try_load`/`try_save` for callers that must tell failure apart.
//!
//! # Invariants
//! - `load` never fails: absent, corrupted or unreadable slots yield `[]`.
//! - `save` never fails: errors are logged and reported as `false`.
//! - No retries; a failed call is final.

use crate::model::employee::Employee;
use crate::repo::slot_repo::{RepoError, SlotRepository};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used when no other key is configured.
pub const DEFAULT_STORAGE_KEY: &str = "employees_v1";

/// Failure reading or writing the persisted collection.
#[derive(Debug)]
pub enum StorageError {
    /// Backend could not read or write the slot.
    Repo(RepoError),
    /// Slot content is not a JSON array of employees.
    Corrupted(serde_json::Error),
    /// Collection could not be serialized.
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Corrupted(err) => write!(f, "stored employee data is corrupted: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize employees: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Corrupted(err) | Self::Serialize(err) => Some(err),
        }
    }
}

impl From<RepoError> for StorageError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Storage adapter binding a slot repository to one slot key.
pub struct EmployeeStorage<R: SlotRepository> {
    repo: R,
    key: String,
}

impl<R: SlotRepository> EmployeeStorage<R> {
    /// Uses [`DEFAULT_STORAGE_KEY`].
    pub fn new(repo: R) -> Self {
        Self::with_key(repo, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(repo: R, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted collection, or `[]` on any failure.
    pub fn load(&self) -> Vec<Employee> {
        match self.try_load() {
            Ok(employees) => employees,
            Err(err) => {
                error!(
                    "event=storage_load module=storage status=error key={} error={}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the persisted collection; `false` when that failed.
    pub fn save(&self, employees: &[Employee]) -> bool {
        match self.try_save(employees) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=storage_save module=storage status=error key={} count={} error={}",
                    self.key,
                    employees.len(),
                    err
                );
                false
            }
        }
    }

    /// Reads the persisted collection.
    ///
    /// A slot that was never written (or holds empty text) is an empty
    /// collection, not an error.
    pub fn try_load(&self) -> Result<Vec<Employee>, StorageError> {
        let Some(raw) = self
            .repo
            .read_slot(&self.key)?
            .filter(|raw| !raw.is_empty())
        else {
            debug!(
                "event=storage_load module=storage status=ok key={} slot=absent",
                self.key
            );
            return Ok(Vec::new());
        };

        let employees: Vec<Employee> =
            serde_json::from_str(&raw).map_err(StorageError::Corrupted)?;
        debug!(
            "event=storage_load module=storage status=ok key={} count={}",
            self.key,
            employees.len()
        );
        Ok(employees)
    }

    /// Serializes and persists `employees`, replacing the slot value.
    pub fn try_save(&self, employees: &[Employee]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(employees).map_err(StorageError::Serialize)?;
        self.repo.write_slot(&self.key, &raw)?;
        debug!(
            "event=storage_save module=storage status=ok key={} count={} bytes={}",
            self.key,
            employees.len(),
            raw.len()
        );
        Ok(())
    }
}
