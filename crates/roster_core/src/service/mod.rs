//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, queries, transfer and storage into roster
//!   use-cases.
//! - Keep the CLI decoupled from storage details.

pub mod roster_service;
