//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for user records.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Write paths re-validate drafts before SQL mutations.
//! - Repository APIs return semantic errors (`DuplicateEmail`, `NotFound`)
//!   in addition to storage transport errors.

pub mod user_repo;
