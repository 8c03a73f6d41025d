//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into command-level APIs.
//! - Keep the CLI front-end decoupled from storage details.

pub mod user_service;
