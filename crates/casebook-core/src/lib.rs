//! Casebook Core: shared types, errors, and utilities.
//!
//! This crate provides the foundational types used across all Casebook
//! crates. It has no internal Casebook dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`record`]: The case-study record as stored in the remote table
//! - [`util`]: Slug utilities

pub mod error;
pub mod record;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use record::CaseStudyRecord;

// Convenience re-exports from util
pub use util::slug::generate_slug;
