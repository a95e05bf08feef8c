//! Employee form validation.
//!
//! # Responsibility
//! - Check raw form input before a record is created or replaced.
//! - Turn valid input into an [`Employee`].
//!
//! # Invariants
//! - Every field is checked; errors are collected, never short-circuited.
//! - At most one message per field, the first failing rule in rule order.
//! - Validation is pure; it neither logs nor touches storage.

use crate::model::employee::{generate_employee_id, Employee, EmployeeId, Gender, MAX_SALARY};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const NAME_TOO_LONG: &str = "Name must be less than 50 characters";
pub const GENDER_REQUIRED: &str = "Please select a gender";
pub const SALARY_REQUIRED: &str = "Salary is required";
pub const SALARY_NOT_A_NUMBER: &str = "Please enter a valid number";
pub const SALARY_NOT_POSITIVE: &str = "Salary must be greater than 0";
pub const SALARY_TOO_LARGE: &str = "Salary amount is too large";

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;

// Leading decimal literal, as a browser `parseFloat` reads it: trailing
// garbage after the number is ignored.
static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex")
});

/// Form field names, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Gender,
    Salary,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Salary => "salary",
        }
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub gender: String,
    pub salary: String,
}

impl EmployeeForm {
    pub fn new(
        name: impl Into<String>,
        gender: impl Into<String>,
        salary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            gender: gender.into(),
            salary: salary.into(),
        }
    }

    /// Pre-fills an edit form from an existing record.
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            gender: employee.gender.as_str().to_string(),
            salary: employee.salary.to_string(),
        }
    }

    /// Validates the form and builds the record it describes.
    ///
    /// `id` is kept when editing; `None` generates a fresh id.
    pub fn into_employee(self, id: Option<EmployeeId>) -> Result<Employee, FieldErrors> {
        let errors = validate(&self);
        if !errors.is_empty() {
            return Err(errors);
        }

        // Validation passed, so both parses succeed.
        let (Ok(gender), Some(salary)) = (self.gender.parse::<Gender>(), parse_salary(&self.salary))
        else {
            return Err(errors);
        };

        Ok(Employee {
            id: id.unwrap_or_else(generate_employee_id),
            name: self.name.trim().to_string(),
            gender,
            salary,
        })
    }
}

/// Validates every field of `form`, collecting one message per failing field.
pub fn validate(form: &EmployeeForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if let Some(message) = name_error(&form.name) {
        errors.insert(FormField::Name, message);
    }
    if form.gender.parse::<Gender>().is_err() {
        errors.insert(FormField::Gender, GENDER_REQUIRED);
    }
    if let Some(message) = salary_error(&form.salary) {
        errors.insert(FormField::Salary, message);
    }

    errors
}

fn name_error(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some(NAME_REQUIRED);
    }
    let chars = name.trim().chars().count();
    if chars < NAME_MIN_CHARS {
        Some(NAME_TOO_SHORT)
    } else if chars > NAME_MAX_CHARS {
        Some(NAME_TOO_LONG)
    } else {
        None
    }
}

fn salary_error(salary: &str) -> Option<&'static str> {
    if salary.is_empty() {
        return Some(SALARY_REQUIRED);
    }
    match parse_salary(salary) {
        None => Some(SALARY_NOT_A_NUMBER),
        Some(value) if value <= 0.0 => Some(SALARY_NOT_POSITIVE),
        Some(value) if value > MAX_SALARY => Some(SALARY_TOO_LARGE),
        Some(_) => None,
    }
}

/// Reads the leading decimal number of `raw`, skipping leading whitespace.
///
/// Returns `None` when no digits lead the text. Literals too large for f64
/// come back as infinity so they fail the upper bound, not the number check.
pub fn parse_salary(raw: &str) -> Option<f64> {
    let literal = LEADING_NUMBER_RE.find(raw.trim_start())?.as_str();
    literal.parse::<f64>().ok()
}
