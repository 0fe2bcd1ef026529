//! Error types for the contact store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by contact store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The contact file is missing or zero-length at load time.
    #[error("contact file {} does not exist or is empty", .path.display())]
    NotFoundOrEmpty { path: PathBuf },

    /// The contact file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The contact file is not a well-formed contact document.
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// XML parsing or writing error not yet tied to a file.
    #[error("XML error: {0}")]
    Xml(String),

    /// Writing the contact file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No contact matches the given name.
    #[error("contact not found: {name}")]
    ContactNotFound { name: String },
}

impl Error {
    /// Whether this is a negative lookup result rather than a storage failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ContactNotFound { .. })
    }
}

/// Result type for contact store operations.
pub type Result<T> = std::result::Result<T, Error>;
