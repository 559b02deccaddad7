//! Error types for Casebook.

use std::path::{Path, PathBuf};

/// Message shown to readers when a case study cannot be found.
pub const NOT_FOUND_MESSAGE: &str = "Case study not found";

/// Errors that can occur while fetching or loading case studies.
///
/// Extraction itself never fails; these errors come from the data store,
/// the file system, or configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested identifier has no corresponding record.
    #[error("Case study not found: {id}")]
    NotFound {
        /// Identifier (id or slug) that was looked up
        id: String,
    },

    /// The fetch itself failed (network, HTTP status, service error).
    #[error("Transport error: {message}")]
    Transport {
        /// Human-readable error message, taken from the underlying failure
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error without path context
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific file
    #[error("I/O error at {}: {source}", .path.display())]
    File {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Casebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a not-found error for the given identifier.
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Error::NotFound { id: id.into() }
    }

    /// Creates a transport error with a message.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Error::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error with a message and source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::File {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// The message to surface to a reader.
    ///
    /// Not-found and transport failures are displayed the same way; the
    /// former gets a fixed wording, the latter the underlying message.
    pub fn user_message(&self) -> String {
        match self {
            Error::NotFound { .. } => NOT_FOUND_MESSAGE.to_string(),
            Error::Transport { message, .. } if !message.is_empty() => message.clone(),
            Error::Transport { .. } => "Failed to load case study".to_string(),
            other => other.to_string(),
        }
    }
}
