//! Utility modules for Casebook.
//!
//! - [`slug`]: URL slug generation

pub mod slug;
