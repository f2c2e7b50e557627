//! Error types for tree parsing and indexing.

use thiserror::Error;

/// Errors that can occur when parsing or indexing attributed trees.
#[derive(Debug, Error)]
pub enum Error {
    /// A type index was requested over no types.
    #[error("type index needs at least one type name")]
    EmptyTypeNames,

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// The document contains no element.
    #[error("no root element found in XML")]
    NoRoot,
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, Error>;
