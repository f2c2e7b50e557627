//! Relkit - game audio metadata toolkit.
//!
//! This crate provides a unified interface to the relkit library ecosystem
//! for working with audio metadata (`*.rel.xml`) and its companion tables.
//!
//! # Crates
//!
//! - [`relkit_common`] - Common utilities (binary reading, joaat hashing)
//! - [`relkit_gxt2`] - GXT2 text table decoding and encoding
//! - [`relkit_names`] - Hash to name dictionary (`NameTable`)
//! - [`relkit_tree`] - Attributed tree normalization and type indexing
//! - [`relkit_markers`] - Radio marker and variation record decoders
//!
//! # Example
//!
//! ```no_run
//! use relkit::prelude::*;
//!
//! let mut names = NameTable::new();
//! names.load_nametable_file("game.dat151.nametable")?;
//!
//! let xml = std::fs::read_to_string("game.dat151.rel.xml")?;
//! let root = XmlElement::parse(&xml)?;
//! let items = root.child("Items").expect("no Items element");
//!
//! let index = TypeIndex::new(items, &["RadioStationSettings"], Some(&names))?;
//! for name in index.names("RadioStationSettings") {
//!     println!("{name}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use relkit_common as common;
pub use relkit_gxt2 as gxt2;
pub use relkit_markers as markers;
pub use relkit_names as names;
pub use relkit_tree as tree;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use relkit_common::{format_hash, joaat, parse_hash_string, BinaryReader, Endian, JoaatHash};
    pub use relkit_gxt2::{Gxt2Builder, Gxt2Table};
    pub use relkit_markers::{decode_markers, track_markers, Marker, MarkerKind, VariationHeader, VariationIds};
    pub use relkit_names::{LoadOutcome, NameTable};
    pub use relkit_tree::{collapse, AttributedNode, NormalizedValue, TypeIndex, XmlElement};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
