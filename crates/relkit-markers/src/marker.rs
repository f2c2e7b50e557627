//! Radio track markers.
//!
//! Every radio track may own two `RadioTrackTextIDs` records: `rtt_*` lists
//! where each song starts (the text ids point at title and artist strings in
//! the track id text table) and `rtb_*` lists beat markers.

use tracing::debug;

use relkit_common::{format_hash, joaat, parse_hash_string};
use relkit_names::NameTable;
use relkit_tree::{collapse, AttributedNode, NormalizedValue, TypeIndex};

use crate::{Error, Result};

/// Item type of track and beat marker records.
pub const TRACK_TEXT_IDS_TYPE: &str = "RadioTrackTextIDs";

const EVENTS: &str = "Events";
const OFFSET_FIELD: &str = "OffsetMs";
const TEXT_ID_FIELD: &str = "TextId";

/// Which kind of marker record an `Events` list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Song changes, with title and artist.
    Track,
    /// Beat markers, with a numeric value.
    Beat,
}

/// A decoded marker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Marker {
    Track {
        #[cfg_attr(feature = "serde", serde(rename = "Offset"))]
        offset_ms: i64,
        #[cfg_attr(feature = "serde", serde(rename = "Title"))]
        title: Option<String>,
        #[cfg_attr(feature = "serde", serde(rename = "Artist"))]
        artist: Option<String>,
    },
    Beat {
        #[cfg_attr(feature = "serde", serde(rename = "Offset"))]
        offset_ms: i64,
        #[cfg_attr(feature = "serde", serde(rename = "Value"))]
        value: i64,
    },
}

impl Marker {
    /// Offset from the start of the track, in milliseconds.
    pub fn offset_ms(&self) -> i64 {
        match self {
            Self::Track { offset_ms, .. } | Self::Beat { offset_ms, .. } => *offset_ms,
        }
    }
}

/// Track and beat markers of one radio track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrackMarkers {
    #[cfg_attr(feature = "serde", serde(rename = "Track", skip_serializing_if = "Option::is_none"))]
    pub track: Option<Vec<Marker>>,
    #[cfg_attr(feature = "serde", serde(rename = "Beat", skip_serializing_if = "Option::is_none"))]
    pub beat: Option<Vec<Marker>>,
}

impl TrackMarkers {
    /// Check if neither record was found.
    pub fn is_empty(&self) -> bool {
        self.track.is_none() && self.beat.is_none()
    }
}

/// Ids of the track (`rtt_`) and beat (`rtb_`) marker records of a track.
///
/// A plain name gives `rtt_` followed by its lowercase hex hash. A track
/// already known only by its `hash_XXXXXXXX` form gives the hash strings of
/// those ids instead.
///
/// ```
/// use relkit_markers::track_marker_ids;
///
/// let (rtt, rtb) = track_marker_ids("some_track");
/// assert_eq!(rtt, "rtt_d6a05ecb");
/// assert_eq!(rtb, "rtb_d6a05ecb");
/// ```
pub fn track_marker_ids(track_name: &str) -> (String, String) {
    match parse_hash_string(track_name) {
        Some(hash) => (
            format_hash(joaat(&format!("rtt_{hash:08x}"))),
            format_hash(joaat(&format!("rtb_{hash:08x}"))),
        ),
        None => {
            let hash = joaat(track_name);
            (format!("rtt_{hash:08x}"), format!("rtb_{hash:08x}"))
        }
    }
}

/// Decode the entries of an `Events` node.
///
/// Each entry needs an `OffsetMs` and a `TextId`. Track markers look up
/// `joaat(TextId + "S")` (title) and `joaat(TextId + "A")` (artist) in
/// `track_ids`; beat markers read `TextId` as a number. A marker equal to the
/// one before it is dropped.
pub fn decode_markers<N: AttributedNode>(
    events: &N,
    kind: MarkerKind,
    track_ids: &NameTable,
) -> Result<Vec<Marker>> {
    let entries = collapse(events, 0);
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let mut markers: Vec<Marker> = Vec::new();
    for (index, entry) in entries.into_list().iter().enumerate() {
        let offset_ms = parse_number(index, OFFSET_FIELD, field(index, entry, OFFSET_FIELD)?)?;
        let text_id = field(index, entry, TEXT_ID_FIELD)?;

        let marker = match kind {
            MarkerKind::Track => Marker::Track {
                offset_ms,
                title: track_ids.resolve(joaat(&format!("{text_id}S"))).map(str::to_string),
                artist: track_ids.resolve(joaat(&format!("{text_id}A"))).map(str::to_string),
            },
            MarkerKind::Beat => Marker::Beat {
                offset_ms,
                value: parse_number(index, TEXT_ID_FIELD, text_id)?,
            },
        };

        if markers.last() != Some(&marker) {
            markers.push(marker);
        }
    }

    Ok(markers)
}

/// Find and decode the marker records of a radio track.
///
/// `index` must cover [`TRACK_TEXT_IDS_TYPE`]. A record that does not exist
/// leaves its side of the result unset.
pub fn track_markers<N: AttributedNode>(
    index: &TypeIndex<'_, N>,
    track_name: &str,
    track_ids: &NameTable,
) -> Result<TrackMarkers> {
    let (rtt_id, rtb_id) = track_marker_ids(track_name);

    let decode = |id: &str, kind: MarkerKind| -> Result<Option<Vec<Marker>>> {
        let Some(record) = index.get(TRACK_TEXT_IDS_TYPE, id, false) else {
            return Ok(None);
        };
        let events = record
            .first_child(EVENTS)
            .ok_or_else(|| Error::MissingEvents { id: id.to_string() })?;
        decode_markers(events, kind, track_ids).map(Some)
    };

    let markers = TrackMarkers {
        track: decode(&rtt_id, MarkerKind::Track)?,
        beat: decode(&rtb_id, MarkerKind::Beat)?,
    };

    debug!(
        track = track_name,
        track_markers = markers.track.as_ref().map_or(0, Vec::len),
        beat_markers = markers.beat.as_ref().map_or(0, Vec::len),
        "decoded track markers"
    );

    Ok(markers)
}

fn field<'v>(index: usize, entry: &'v NormalizedValue, name: &'static str) -> Result<&'v str> {
    entry
        .get(name)
        .and_then(NormalizedValue::as_str)
        .ok_or(Error::MissingField { index, field: name })
}

fn parse_number(index: usize, field: &'static str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|source| Error::InvalidNumber {
            index,
            field,
            value: value.to_string(),
            source,
        })
}
