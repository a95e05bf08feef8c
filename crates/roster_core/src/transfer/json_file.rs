//! JSON export and import of the employee collection.
//!
//! # Responsibility
//! - Write the persisted collection to `employees.json`.
//! - Read an employee document back, replacing or extending the collection.
//!
//! # Invariants
//! - Export documents are JSON arrays indented by two spaces.
//! - Import only checks that the top-level value is an array of records;
//!   field values are not re-validated.
//! - Merge appends imported records after existing ones without
//!   de-duplicating ids.
//! - A failed persist after import does not fail the import; callers read
//!   `ImportSummary::persisted`.

use crate::model::employee::Employee;
use crate::repo::slot_repo::SlotRepository;
use crate::storage::employee_storage::{EmployeeStorage, StorageError};
use log::{error, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name written by [`export_all`].
pub const EXPORT_FILE_NAME: &str = "employees.json";

/// Message reported when the imported document is not an array.
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid employee data format";

/// Export failure.
#[derive(Debug)]
pub enum ExportError {
    Load(StorageError),
    Serialize(serde_json::Error),
    Write { path: PathBuf, source: std::io::Error },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize export: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

/// Import failure. `Display` is the user-facing message.
#[derive(Debug)]
pub enum ImportError {
    /// File could not be read.
    Read(std::io::Error),
    /// Content is not JSON, or an element is not an employee record.
    Parse(serde_json::Error),
    /// Top-level value is not an array.
    Format,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "{err}"),
            Self::Format => f.write_str(INVALID_FORMAT_MESSAGE),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Format => None,
        }
    }
}

/// Successful import outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    /// Records in the imported document, not the merged total.
    pub count: usize,
    /// Collection after the import, as handed to storage.
    pub employees: Vec<Employee>,
    /// Whether storage accepted the resulting collection.
    pub persisted: bool,
}

/// Renders the persisted collection as the export document.
pub fn export_json<R: SlotRepository>(storage: &EmployeeStorage<R>) -> Result<String, ExportError> {
    let employees = storage.try_load().map_err(ExportError::Load)?;
    serde_json::to_string_pretty(&employees).map_err(ExportError::Serialize)
}

/// Writes the export document to `dest_dir/employees.json`.
///
/// Returns the written path.
pub fn export_to_dir<R: SlotRepository>(
    storage: &EmployeeStorage<R>,
    dest_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let document = export_json(storage)?;
    let path = dest_dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, document).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Exports to `dest_dir`; `false` when loading, serializing or writing failed.
pub fn export_all<R: SlotRepository>(storage: &EmployeeStorage<R>, dest_dir: &Path) -> bool {
    match export_to_dir(storage, dest_dir) {
        Ok(path) => {
            info!(
                "event=export module=transfer status=ok path={}",
                path.display()
            );
            true
        }
        Err(err) => {
            error!("event=export module=transfer status=error error={err}");
            false
        }
    }
}

/// Imports an employee document.
///
/// `merge = true` appends the imported records to the persisted collection;
/// otherwise they replace it.
pub fn import_from_str<R: SlotRepository>(
    storage: &EmployeeStorage<R>,
    contents: &str,
    merge: bool,
) -> Result<ImportSummary, ImportError> {
    let result = decode_document(contents).map(|imported| {
        let count = imported.len();
        let employees = if merge {
            let mut current = storage.load();
            current.extend(imported);
            current
        } else {
            imported
        };

        let persisted = storage.save(&employees);
        if !persisted {
            warn!("event=import module=transfer status=unsaved count={count}");
        }
        ImportSummary {
            count,
            employees,
            persisted,
        }
    });

    match &result {
        Ok(summary) => info!(
            "event=import module=transfer status=ok merge={} count={} total={}",
            merge,
            summary.count,
            summary.employees.len()
        ),
        Err(err) => error!("event=import module=transfer status=error merge={merge} error={err}"),
    }
    result
}

/// Reads `path` and imports its contents.
pub fn import_from_path<R: SlotRepository>(
    storage: &EmployeeStorage<R>,
    path: &Path,
    merge: bool,
) -> Result<ImportSummary, ImportError> {
    let contents = std::fs::read_to_string(path).map_err(|err| {
        error!(
            "event=import module=transfer status=error path={} error={}",
            path.display(),
            err
        );
        ImportError::Read(err)
    })?;
    import_from_str(storage, &contents, merge)
}

fn decode_document(contents: &str) -> Result<Vec<Employee>, ImportError> {
    let value: Value = serde_json::from_str(contents).map_err(ImportError::Parse)?;
    if !value.is_array() {
        return Err(ImportError::Format);
    }
    serde_json::from_value(value).map_err(ImportError::Parse)
}
