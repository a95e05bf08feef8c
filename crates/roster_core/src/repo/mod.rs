//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the slot storage port consumed by the storage adapter.
//! - Isolate SQLite details from roster use-cases.
//!
//! # Invariants
//! - Repositories move opaque text; they never interpret employee JSON.

pub mod slot_repo;
