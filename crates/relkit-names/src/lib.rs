//! Hash to name resolution for relkit.
//!
//! Game data refers to most identifiers by joaat hash. A [`NameTable`]
//! collects known names from several sources and turns hashes, or
//! `hash_XXXXXXXX` identifiers, back into readable names:
//!
//! - plain name lists (`.txt`, one name per line, hashed on load)
//! - binary name tables (`.nametable`, NUL separated names, hashed on load)
//! - text tables (`.txt` with `HEX=value` lines, or binary `.gxt2`), whose
//!   keys already are hashes
//!
//! Rebinding a hash to a different name is recorded as a [`NameConflict`]
//! and the newer name wins.
//!
//! # Example
//!
//! ```no_run
//! use relkit_names::NameTable;
//!
//! let mut names = NameTable::new();
//! names.load_nametable_file("game.dat151.nametable")?;
//! names.load_text_table_file("trackid.gxt2")?;
//!
//! println!("{}", names.resolve_string("hash_09E34587"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod loader;
mod table;

pub use error::{Error, Result};
pub use loader::LoadOutcome;
pub use table::{NameConflict, NameTable};
