//! Markdown parsing and content cleaning utilities.
//!
//! - [`parser`]: Text extraction and terminal rendering (pulldown-cmark)
//! - [`helpers`]: Regex heuristics for sections, images, and escapes
//!
//! # Example
//!
//! ```rust
//! use casebook_content::markdown::{extract_section, strip_images};
//!
//! let body = "## Solution\n\n![diagram](arch.png)\n\nA new pipeline.";
//! let solution = extract_section(body, "Solution").unwrap();
//! assert_eq!(strip_images(&solution), "A new pipeline.");
//! ```

pub mod helpers;
pub mod parser;

// Re-export key functions
pub use helpers::{extract_section, first_image_url, strip_images, unescape};
pub use parser::{extract_text_content as plain_text, render_plain_text, word_count};
