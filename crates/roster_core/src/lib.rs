//! Core domain logic for the employee roster.
//! This crate is the single source of truth for roster rules: record shape,
//! validation, list queries, JSON transfer and slot persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod storage;
pub mod transfer;
pub mod validation;

pub use config::{ConfigError, RosterConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{generate_employee_id, Employee, EmployeeId, Gender, MAX_SALARY};
pub use query::roster_query::{filter, sort, RosterQuery, SortKey, SortOrder};
pub use repo::slot_repo::{
    MemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use service::roster_service::{RosterService, ServiceError, ServiceResult};
pub use storage::employee_storage::{EmployeeStorage, StorageError, DEFAULT_STORAGE_KEY};
pub use transfer::json_file::{
    export_all, export_json, export_to_dir, import_from_path, import_from_str, ExportError,
    ImportError, ImportSummary, EXPORT_FILE_NAME, INVALID_FORMAT_MESSAGE,
};
pub use validation::form::{validate, EmployeeForm, FieldErrors, FormField};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
