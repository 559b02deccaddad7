//! Case-study content processing for Casebook.
//!
//! Everything here is synchronous and infallible: records go in, view
//! models, summaries and metrics come out. Missing or unstructured input
//! degrades to empty blocks and fallback labels.
//!
//! # Modules
//!
//! - [`extract`]: [`CaseStudyContentExtractor`] and the [`CaseStudyViewModel`]
//! - [`quote`]: Pull-quote detection in a body
//! - [`listing`]: Listing summaries, filters, and categories
//! - [`metrics`]: Key-metric extraction for the detail page
//! - [`markdown`]: Markdown text extraction and cleaning
//!   - [`markdown::parser`]: Plain text, word counts, terminal rendering
//!   - [`markdown::helpers`]: Section, image, and escape helpers
//!
//! # Example
//!
//! ```rust
//! use casebook_content::extract;
//! use casebook_core::CaseStudyRecord;
//!
//! let mut record = CaseStudyRecord::new("cs-7", "Data Platform Migration");
//! record.content = Some("We moved everything to the cloud.".into());
//! record.category = Some("Cloud".into());
//!
//! let view = extract(&record);
//! assert!(view.is_unstructured());
//! assert_eq!(view.full_body, "We moved everything to the cloud.");
//! assert_eq!(view.tags, vec!["Cloud"]);
//! assert_eq!(view.author_name, "Anonymous");
//! ```

pub mod extract;
pub mod listing;
pub mod markdown;
pub mod metrics;
pub mod quote;

// Re-export commonly used types
pub use extract::{
    CaseStudyContentExtractor, CaseStudyViewModel, SectionKind, SectionMatch, SectionRule, extract,
};
pub use listing::{CaseStudyFilter, CaseStudySummary, available_categories, filter_summaries};
pub use metrics::{KeyMetric, MetricKind, extract_key_metrics};
pub use quote::{QuoteSource, extract_quote};
