//! Marker and variation record decoders for relkit.
//!
//! - [`VariationHeader`] and [`VariationIds`] decode the small fixed-layout
//!   byte records attached to sound variations, usually stored as hex.
//! - [`decode_markers`] turns the `Events` of a `RadioTrackTextIDs` item into
//!   track (title/artist) or beat markers; [`track_markers`] finds both
//!   record kinds for a radio track in a [`TypeIndex`](relkit_tree::TypeIndex).
//!
//! # Example
//!
//! ```
//! use relkit_markers::VariationHeader;
//!
//! let header = VariationHeader::from_hex("032a01")?;
//! assert_eq!(header.variation_count, Some(3));
//! assert_eq!(header.container_index, Some(0x012a));
//! # Ok::<(), relkit_markers::Error>(())
//! ```

mod error;
mod marker;
mod variation;

pub use error::{Error, Result};
pub use marker::{
    decode_markers, track_marker_ids, track_markers, Marker, MarkerKind, TrackMarkers,
    TRACK_TEXT_IDS_TYPE,
};
pub use variation::{VariationHeader, VariationIds};
