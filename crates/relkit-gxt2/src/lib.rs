//! GXT2 global text table reader and writer.
//!
//! GXT2 files map joaat hashes to UTF-8 strings (track titles, artist names,
//! UI labels). The layout is:
//!
//! ```text
//! magic | count | count x (hash, offset) | magic | data length | strings...
//! ```
//!
//! Each magic selects the byte order for the integers that follow it, so the
//! same table can come from either a PC or a console build.
//!
//! # Example
//!
//! ```no_run
//! use relkit_gxt2::Gxt2Table;
//!
//! let data = std::fs::read("trackid.gxt2")?;
//! let table = Gxt2Table::parse(&data)?;
//!
//! for entry in table.entries() {
//!     println!("{:08X} = {}", entry.hash, entry.text);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod error;
mod header;
mod parser;

pub use builder::Gxt2Builder;
pub use error::{Error, Result};
pub use header::Gxt2Magic;
pub use parser::{decode, Gxt2Entry, Gxt2Table};
