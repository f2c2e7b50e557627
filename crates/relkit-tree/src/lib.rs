//! Attributed tree normalization for relkit.
//!
//! Audio metadata (`*.rel.xml`) is a forest of items carrying attributes,
//! optional text and ordered, possibly repeated, children. This crate turns
//! such trees into plain [`NormalizedValue`]s (string / map / list) and
//! indexes items by their declared type and name.
//!
//! The normalizer works on anything implementing [`AttributedNode`];
//! [`XmlElement`] is the bundled implementation, parsed from XML text when the
//! `xml` feature is enabled.
//!
//! # Example
//!
//! ```no_run
//! use relkit_tree::{collapse, TypeIndex, XmlElement};
//!
//! let xml = std::fs::read_to_string("game.dat151.rel.xml")?;
//! let root = XmlElement::parse(&xml)?;
//! let items = root.child("Items").expect("no Items element");
//!
//! let index = TypeIndex::new(items, &["RadioStationSettings"], None)?;
//! if let Some(station) = index.get("RadioStationSettings", "radio_01_class_rock", true) {
//!     println!("{:?}", collapse(station, 1));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod collapse;
mod element;
mod error;
mod index;
mod node;
mod value;

#[cfg(feature = "xml")]
mod xml;

pub use collapse::{collapse, collapse_at, TEXT_FIELD};
pub use element::XmlElement;
pub use error::{Error, Result};
pub use index::{TypeIndex, NAME_FIELD, TYPE_ATTRIBUTE};
pub use node::AttributedNode;
pub use value::NormalizedValue;
