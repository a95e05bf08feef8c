//! Roster domain model.
//!
//! # Responsibility
//! - Define the canonical employee record used by every core module.
//!
//! # Invariants
//! - Every record carries an `EmployeeId` assigned once at creation.
//! - Records are replaced whole; there is no partial field update.

pub mod employee;
