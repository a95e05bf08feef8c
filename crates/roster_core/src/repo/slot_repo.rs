//! Key-value slot repository contracts and implementations.
//!
//! # Responsibility
//! - Provide whole-value get/set/clear over named persisted slots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - A write replaces the slot value entirely; there are no partial writes.
//! - Reading a slot that was never written, or was cleared, yields `None`.
//! - Clearing an absent slot is a no-op.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised by slot repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection schema is behind what this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// Write would grow the store past its byte quota.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    /// Backend-specific failure without a richer variant.
    Backend(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store schema version {actual_version} is behind required {expected_version}; open it with `open_db`"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "quota exceeded writing slot `{key}`: {required_bytes} bytes needed, quota is {quota_bytes}"
            ),
            Self::Backend(message) => write!(f, "slot backend failure: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Storage port for named slots holding one serialized document each.
pub trait SlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()>;
    fn clear_slot(&self, key: &str) -> RepoResult<()>;
}

impl<R: SlotRepository + ?Sized> SlotRepository for &R {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_slot(key, value)
    }

    fn clear_slot(&self, key: &str) -> RepoResult<()> {
        (**self).clear_slot(key)
    }
}

/// SQLite-backed slot repository over the `slots` table.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Wraps a connection after checking it was bootstrapped by `open_db`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when the version is current but `slots` is gone.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_slots: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'slots');",
            [],
            |row| row.get(0),
        )?;
        if !has_slots {
            return Err(RepoError::MissingRequiredTable("slots"));
        }

        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear_slot(&self, key: &str) -> RepoResult<()> {
        self.conn.execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// In-process slot repository, used as the swap-in fake for the SQLite store.
///
/// An optional quota caps the summed byte length of all keys and values,
/// mirroring how browser storage rejects oversized writes.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    slots: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository that rejects writes beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seeds a slot directly, bypassing the quota.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.slots.borrow_mut().insert(key.into(), value.into());
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.slots
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl SlotRepository for MemorySlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        if let Some(quota_bytes) = self.quota_bytes {
            let required_bytes = self.used_bytes_without(key) + key.len() + value.len();
            if required_bytes > quota_bytes {
                return Err(RepoError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear_slot(&self, key: &str) -> RepoResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySlotRepository, RepoError, SlotRepository};

    #[test]
    fn memory_quota_counts_replaced_value_once() {
        let repo = MemorySlotRepository::with_quota(10);
        repo.write_slot("k", "123456789").unwrap();
        repo.write_slot("k", "abcdefghi").unwrap();

        let err = repo.write_slot("k", "0123456789").unwrap_err();
        assert!(matches!(
            err,
            RepoError::QuotaExceeded {
                required_bytes: 11,
                quota_bytes: 10,
                ..
            }
        ));
        assert_eq!(repo.read_slot("k").unwrap().as_deref(), Some("abcdefghi"));
    }

    #[test]
    fn memory_clear_frees_quota_for_other_slots() {
        let repo = MemorySlotRepository::with_quota(10);
        repo.write_slot("a", "12345678").unwrap();
        assert!(repo.write_slot("b", "1234").is_err());

        repo.clear_slot("a").unwrap();
        repo.clear_slot("a").unwrap();

        assert_eq!(repo.read_slot("a").unwrap(), None);
        repo.write_slot("b", "1234").unwrap();
    }

    #[test]
    fn memory_unwritten_slot_reads_as_none() {
        let repo = MemorySlotRepository::new();
        repo.write_slot("other", "v").unwrap();
        assert_eq!(repo.read_slot("k").unwrap(), None);
    }
}
