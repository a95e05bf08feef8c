//! Roster use-case service.
//!
//! # Responsibility
//! - Hold the session's employee collection, loaded once at open.
//! - Apply add/edit/delete/import and re-persist the whole collection after
//!   each mutation.
//!
//! # Invariants
//! - The in-memory collection is the source of truth; storage mirrors it.
//! - A mutation that fails to persist is kept in memory and reported as
//!   `ServiceError::Persistence`.
//! - Edit and delete act on every record sharing the target id.

use crate::model::employee::{Employee, EmployeeId};
use crate::query::roster_query::RosterQuery;
use crate::repo::slot_repo::SlotRepository;
use crate::storage::employee_storage::EmployeeStorage;
use crate::transfer::json_file::{self, ImportError, ImportSummary};
use crate::validation::form::{EmployeeForm, FieldErrors};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Service error for roster mutations.
#[derive(Debug)]
pub enum ServiceError {
    /// Form input failed validation; nothing changed.
    Validation(FieldErrors),
    /// No record carries the target id; nothing changed.
    NotFound(EmployeeId),
    /// Change applied in memory but storage rejected it.
    Persistence,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "invalid employee: {errors}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::Persistence => f.write_str("change could not be saved to storage"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Session facade over the storage adapter.
pub struct RosterService<R: SlotRepository> {
    storage: EmployeeStorage<R>,
    employees: Vec<Employee>,
}

impl<R: SlotRepository> RosterService<R> {
    /// Loads the persisted collection once; unreadable storage starts empty.
    pub fn open(storage: EmployeeStorage<R>) -> Self {
        let employees = storage.load();
        info!(
            "event=roster_open module=service status=ok key={} count={}",
            storage.key(),
            employees.len()
        );
        Self { storage, employees }
    }

    pub fn storage(&self) -> &EmployeeStorage<R> {
        &self.storage
    }

    /// Full collection in insertion order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// First record with `id`.
    pub fn find(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    /// Filtered and sorted view of the collection.
    pub fn query(&self, query: &RosterQuery) -> Vec<Employee> {
        query.apply(&self.employees)
    }

    /// Validates `form` and appends a new record with a fresh id.
    pub fn add(&mut self, form: EmployeeForm) -> ServiceResult<Employee> {
        let employee = form.into_employee(None)?;
        self.employees.push(employee.clone());
        info!(
            "event=employee_add module=service status=ok id={}",
            employee.id
        );
        self.persist()?;
        Ok(employee)
    }

    /// Validates `form` and replaces every record whose id is `id`.
    pub fn update(&mut self, id: &str, form: EmployeeForm) -> ServiceResult<Employee> {
        if self.find(id).is_none() {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        let employee = form.into_employee(Some(id.to_string()))?;

        let mut replaced = 0_usize;
        for slot in self.employees.iter_mut().filter(|existing| existing.id == id) {
            *slot = employee.clone();
            replaced += 1;
        }
        info!("event=employee_update module=service status=ok id={id} replaced={replaced}");
        self.persist()?;
        Ok(employee)
    }

    /// Removes every record whose id is `id`; returns how many went.
    pub fn delete(&mut self, id: &str) -> ServiceResult<usize> {
        let before = self.employees.len();
        self.employees.retain(|employee| employee.id != id);
        let removed = before - self.employees.len();
        if removed == 0 {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        info!("event=employee_delete module=service status=ok id={id} removed={removed}");
        self.persist()?;
        Ok(removed)
    }

    /// Imports a document and adopts the resulting collection.
    pub fn import_from_str(
        &mut self,
        contents: &str,
        merge: bool,
    ) -> Result<ImportSummary, ImportError> {
        let summary = json_file::import_from_str(&self.storage, contents, merge)?;
        self.employees = summary.employees.clone();
        Ok(summary)
    }

    /// Reads `path` and imports it as [`Self::import_from_str`] does.
    pub fn import_from_path(
        &mut self,
        path: &Path,
        merge: bool,
    ) -> Result<ImportSummary, ImportError> {
        let summary = json_file::import_from_path(&self.storage, path, merge)?;
        self.employees = summary.employees.clone();
        Ok(summary)
    }

    /// Writes `employees.json` into `dest_dir`; `false` on failure.
    pub fn export_all(&self, dest_dir: &Path) -> bool {
        json_file::export_all(&self.storage, dest_dir)
    }

    fn persist(&self) -> ServiceResult<()> {
        if self.storage.save(&self.employees) {
            Ok(())
        } else {
            Err(ServiceError::Persistence)
        }
    }
}
