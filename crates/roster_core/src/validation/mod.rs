//! Form validation for employee records.
//!
//! # Responsibility
//! - Validate raw add/edit input and report per-field messages.
//!
//! # See also
//! - `service::roster_service`, which refuses to save until the form is clean.

pub mod form;
