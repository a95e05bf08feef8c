//! Employee document import and export.
//!
//! # Responsibility
//! - Move the whole collection in and out as a JSON file.
//! - Keep file format rules (array shape, indentation, file name) in one place.

pub mod json_file;
