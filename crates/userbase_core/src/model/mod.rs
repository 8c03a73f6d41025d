//! Domain model for managed user records.
//!
//! # Responsibility
//! - Define the canonical record shape shared by repository and service.
//! - Own field validation and normalization rules.
//!
//! # Invariants
//! - Every persisted record carries a positive surrogate `id`.
//! - Email is the external lookup key and is globally unique.

pub mod user;
