//! Error types for GXT2 parsing.

use thiserror::Error;

/// Errors that can occur when parsing GXT2 tables.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error (truncated input).
    #[error("{0}")]
    Common(#[from] relkit_common::Error),

    /// The leading magic is not a GXT2 header.
    #[error("bad header: expected 'GXT2' or '2TXG', got {actual:?}")]
    BadHeader { actual: [u8; 4] },

    /// The magic after the entry table is not a GXT2 header.
    #[error("corrupted midstream header: expected 'GXT2' or '2TXG', got {actual:?}")]
    CorruptedMidstreamHeader { actual: [u8; 4] },

    /// An entry's offset lies past the next entry's offset or the data length.
    #[error("entry {index} has invalid range: offset {offset} > end {end}")]
    InvalidEntryRange { index: usize, offset: u32, end: u32 },

    /// An entry's payload is not valid UTF-8.
    #[error("entry {hash:#010x} is not valid UTF-8: {source}")]
    InvalidString {
        hash: u32,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Result type for GXT2 operations.
pub type Result<T> = std::result::Result<T, Error>;
