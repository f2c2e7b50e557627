//! Error types for name table loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading name sources.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed GXT2 table.
    #[error("GXT2 error: {0}")]
    Gxt2(#[from] relkit_gxt2::Error),

    /// A text source is not valid UTF-8.
    #[error("{path} is not valid UTF-8: {source}")]
    Utf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The file extension does not name a supported source format.
    #[error("unsupported file type for {path}: expected {expected}")]
    UnsupportedExtension { path: PathBuf, expected: &'static str },
}

/// Result type for name table operations.
pub type Result<T> = std::result::Result<T, Error>;
