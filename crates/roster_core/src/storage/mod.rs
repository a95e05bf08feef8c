//! Persisted employee collection.
//!
//! # Responsibility
//! - Mirror the in-memory collection into a single named slot.
//! - Absorb storage failures into safe defaults for session code.

pub mod employee_storage;
