//! List queries over the in-memory collection.
//!
//! Pure functions only; nothing here is cached or indexed.

pub mod roster_query;
