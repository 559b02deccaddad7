//! Case-study sources for Casebook.
//!
//! A [`CaseStudySource`] is the single read interface the viewer depends
//! on. Two implementations ship here:
//!
//! - [`StoreClient`]: the hosted `case_studies` table over its REST API
//! - [`MemorySource`]: a fixed set of records, optionally loaded from a
//!   JSON file (offline use and tests)
//!
//! # Example
//!
//! ```rust
//! use casebook_client::{CaseStudySource, MemorySource};
//! use casebook_core::CaseStudyRecord;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> casebook_client::Result<()> {
//! let source = MemorySource::new(vec![CaseStudyRecord::new("cs-1", "Edge Caching")]);
//! let record = source.fetch_by_id("cs-1").await?;
//! assert_eq!(record.title(), "Edge Caching");
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod source;
pub mod store;

pub use memory::MemorySource;
pub use source::CaseStudySource;
pub use store::{DEFAULT_TABLE, StoreClient, StoreConfig};

// Re-export core error types used in this crate's signatures
pub use casebook_core::{Error, Result};
