//! Common utilities for relkit.
//!
//! This crate provides foundational types and utilities used across all relkit crates:
//!
//! - [`BinaryReader`] - Forward-only binary reading from byte slices with a
//!   switchable byte order
//! - [`hash`] - The joaat one-at-a-time string hash and its `hash_XXXXXXXX`
//!   textual form

mod error;
mod reader;

pub mod hash;

pub use error::{Error, Result};
pub use hash::{format_hash, joaat, parse_hash_string, JoaatHash};
pub use reader::{BinaryReader, Endian};
