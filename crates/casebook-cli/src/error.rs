//! Error types for casebook-cli

use thiserror::Error;

/// Result type alias for casebook-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in casebook-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from casebook-core or one of the library crates
    #[error(transparent)]
    Core(#[from] casebook_core::Error),

    /// The dialog settled on its error state
    #[error("{message}")]
    Unavailable {
        /// Message the dialog displayed
        message: String,
    },

    /// The dialog never settled
    #[error("Dialog error: {0}")]
    Dialog(String),
}
