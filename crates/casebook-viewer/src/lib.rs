//! Case-study presentation shell for Casebook.
//!
//! # Modules
//!
//! - [`modal`]: [`CaseStudyModal`], the open/loading/error/ready dialog state
//! - [`detail`]: Detail-page lookup by slug, id, or generated slug
//! - [`render`]: Plain-text rendering of view models and states

pub mod detail;
pub mod modal;
pub mod render;

pub use detail::{DetailView, RELATED_LIMIT, load_detail, related, resolve_detail};
pub use modal::{CaseStudyModal, ModalState};
pub use render::TextRenderer;
