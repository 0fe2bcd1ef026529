//! Error types for table export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while exporting contacts.
#[derive(Debug, Error)]
pub enum Error {
    /// The contact snapshot could not be loaded.
    #[error("{0}")]
    Store(#[from] rolodex_store::Error),

    /// Writing the export file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error on a caller-supplied writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, Error>;
