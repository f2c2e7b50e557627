//! Error types for marker and variation decoding.

use std::num::ParseIntError;

use thiserror::Error;

/// Result type alias using the markers error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding markers or variation records.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("marker {index} has no {field} field")]
    MissingField { index: usize, field: &'static str },

    #[error("marker {index} has a non-numeric {field}: {value:?}")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{id} has no Events element")]
    MissingEvents { id: String },
}
