//! Name filter and single-key sort over the employee collection.
//!
//! # Invariants
//! - Filter always runs before sort.
//! - Sorting is stable: equal keys keep their input order, so re-sorting a
//!   sorted list is a no-op.
//! - Results are recomputed from the full collection on every call.

use crate::model::employee::Employee;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Sortable employee columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Salary,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Returns the opposite direction, as a column-header click toggles it.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Error for sort keys or orders outside the accepted names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortOption(pub String);

impl Display for UnknownSortOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown sort option `{}`", self.0)
    }
}

impl std::error::Error for UnknownSortOption {}

impl FromStr for SortKey {
    type Err = UnknownSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "salary" => Ok(Self::Salary),
            _ => Err(UnknownSortOption(value.to_string())),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(UnknownSortOption(value.to_string())),
        }
    }
}

/// Search term plus sort settings for one list view.
///
/// The default is the roster's initial view: no term, name ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterQuery {
    pub term: String,
    pub key: SortKey,
    pub order: SortOrder,
}

impl RosterQuery {
    pub fn new(term: impl Into<String>, key: SortKey, order: SortOrder) -> Self {
        Self {
            term: term.into(),
            key,
            order,
        }
    }

    /// Selects `key`; picking the active key again flips the order, picking
    /// a new key starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.toggled();
        } else {
            self.key = key;
            self.order = SortOrder::Asc;
        }
    }

    /// Filters by name, then sorts.
    pub fn apply(&self, employees: &[Employee]) -> Vec<Employee> {
        sort(&filter(employees, &self.term), self.key, self.order)
    }
}

/// Keeps employees whose name contains `term`, ignoring case.
///
/// An empty term keeps everyone.
pub fn filter(employees: &[Employee], term: &str) -> Vec<Employee> {
    if term.is_empty() {
        return employees.to_vec();
    }
    let needle = term.to_lowercase();
    employees
        .iter()
        .filter(|employee| employee.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Returns `employees` ordered by `key` in `order`.
///
/// Names compare lexicographically; salaries numerically.
pub fn sort(employees: &[Employee], key: SortKey, order: SortOrder) -> Vec<Employee> {
    let mut sorted = employees.to_vec();
    sorted.sort_by(|left, right| {
        let ordering = compare_by(left, right, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare_by(left: &Employee, right: &Employee, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => left.name.cmp(&right.name),
        SortKey::Salary => left.salary.total_cmp(&right.salary),
    }
}
