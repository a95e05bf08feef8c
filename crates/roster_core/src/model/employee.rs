//! Employee domain model.
//!
//! # Responsibility
//! - Define the single roster record and its wire shape.
//! - Generate stable ids for records created in this process.
//!
//! # Invariants
//! - `id` is never changed after assignment; edits replace the whole record.
//! - Wire fields are exactly `id`, `name`, `gender`, `salary`.
//! - Integral salaries serialize as JSON integers.
//! - Any gender text survives a load/save cycle unchanged; only the form
//!   path restricts it to the fixed choices.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of one roster record.
///
/// Kept as plain text because imported documents may carry ids minted by
/// other tools.
pub type EmployeeId = String;

/// Largest salary accepted by form validation.
pub const MAX_SALARY: f64 = 1_000_000_000.0;

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Gender of a roster record.
///
/// The form offers the three fixed choices. Stored and imported documents
/// are not re-validated, so any other text is carried as `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
    Unrecognized(String),
}

impl Gender {
    /// All selectable values, in form display order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Returns the wire/display label.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::Unrecognized(label) => label,
        }
    }

    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Male" => Self::Male,
            "Female" => Self::Female,
            "Other" => Self::Other,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Unrecognized(label) => label,
            selectable => selectable.as_str().to_string(),
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when text is not one of the [`Gender`] labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGender(pub String);

impl Display for UnknownGender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown gender `{}`; expected Male|Female|Other", self.0)
    }
}

impl std::error::Error for UnknownGender {}

impl FromStr for Gender {
    type Err = UnknownGender;

    /// Matches the selectable labels exactly, as the form select emits them.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match Gender::from(value.to_string()) {
            Gender::Unrecognized(label) => Err(UnknownGender(label)),
            selectable => Ok(selectable),
        }
    }
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub gender: Gender,
    #[serde(serialize_with = "serialize_salary")]
    pub salary: f64,
}

impl Employee {
    /// Creates a record with a freshly generated id.
    ///
    /// Does not validate; callers on the form path go through
    /// `EmployeeForm::into_employee`.
    pub fn new(name: impl Into<String>, gender: Gender, salary: f64) -> Self {
        Self::with_id(generate_employee_id(), name, gender, salary)
    }

    /// Creates a record with a caller-provided id.
    pub fn with_id(
        id: impl Into<EmployeeId>,
        name: impl Into<String>,
        gender: Gender,
        salary: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
            salary,
        }
    }
}

/// Generates a timestamp-derived id (UUIDv7 text form).
///
/// The leading 48 bits carry the creation time in milliseconds, so ids sort
/// roughly by creation order.
pub fn generate_employee_id() -> EmployeeId {
    Uuid::now_v7().to_string()
}

fn serialize_salary<S: Serializer>(salary: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if salary.is_finite() && salary.fract() == 0.0 && salary.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*salary as i64)
    } else {
        serializer.serialize_f64(*salary)
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_employee_id, Employee, Gender};

    #[test]
    fn gender_parses_exact_labels_only() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("female".parse::<Gender>().is_err());
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn unrecognized_gender_roundtrips_verbatim() {
        let employee: Employee =
            serde_json::from_str(r#"{"id":"1","name":"Ann","gender":"female","salary":100}"#)
                .unwrap();
        assert_eq!(employee.gender, Gender::Unrecognized("female".to_string()));
        assert!(!employee.gender.is_selectable());
        assert_eq!(
            serde_json::to_string(&employee).unwrap(),
            r#"{"id":"1","name":"Ann","gender":"female","salary":100}"#
        );

        let blank: Employee =
            serde_json::from_str(r#"{"id":"2","name":"Bo","gender":"","salary":1}"#).unwrap();
        assert_eq!(blank.gender.as_str(), "");
    }

    #[test]
    fn known_labels_deserialize_to_selectable_variants() {
        let gender: Gender = serde_json::from_str(r#""Male""#).unwrap();
        assert_eq!(gender, Gender::Male);
        assert!(gender.is_selectable());
    }

    #[test]
    fn integral_salary_serializes_without_fraction() {
        let employee = Employee::with_id("1", "Ada", Gender::Female, 50_000.0);
        let json = serde_json::to_string(&employee).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","name":"Ada","gender":"Female","salary":50000}"#
        );
    }

    #[test]
    fn fractional_salary_keeps_fraction() {
        let employee = Employee::with_id("1", "Ada", Gender::Female, 1234.5);
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["salary"], 1234.5);
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(generate_employee_id(), generate_employee_id());
    }

    #[test]
    fn new_assigns_generated_id() {
        let employee = Employee::new("Ada", Gender::Female, 1.0);
        assert_eq!(employee.id.len(), 36);
        assert_eq!(format!("{:<8}|", employee.gender), "Female  |");
    }
}
