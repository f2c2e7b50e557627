//! Sound variation records.
//!
//! Both records start with a count byte. Short buffers are not an error: any
//! field the buffer does not reach is left unset.

use relkit_common::BinaryReader;

use crate::Result;

/// Variation count and container index.
///
/// Layout: `u8` count, then a little-endian `u16` container index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VariationHeader {
    pub variation_count: Option<u8>,
    pub container_index: Option<u16>,
}

impl VariationHeader {
    /// Decode a header from raw bytes.
    pub fn decode(data: &[u8]) -> Self {
        let mut reader = BinaryReader::new(data);
        let variation_count = reader.read_u8().ok();
        let container_index = reader.read_u16().ok();

        Self {
            variation_count,
            container_index,
        }
    }

    /// Decode a header from a hex string.
    pub fn from_hex(payload: &str) -> Result<Self> {
        Ok(Self::decode(&hex::decode(payload.trim())?))
    }
}

/// Variation ids.
///
/// Layout: `u8` count, then `count` single-byte ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VariationIds {
    pub count: Option<u8>,
    /// Ids present in the buffer; fewer than `count` when it is short.
    pub ids: Vec<u8>,
}

impl VariationIds {
    /// Decode ids from raw bytes.
    pub fn decode(data: &[u8]) -> Self {
        let mut reader = BinaryReader::new(data);
        let Ok(count) = reader.read_u8() else {
            return Self::default();
        };

        let available = usize::from(count).min(reader.remaining());
        let ids = reader
            .read_bytes(available)
            .map(<[u8]>::to_vec)
            .unwrap_or_default();

        Self {
            count: Some(count),
            ids,
        }
    }

    /// Decode ids from a hex string.
    pub fn from_hex(payload: &str) -> Result<Self> {
        Ok(Self::decode(&hex::decode(payload.trim())?))
    }

    /// Check if the buffer held every announced id.
    pub fn is_complete(&self) -> bool {
        self.count.is_some_and(|count| self.ids.len() == usize::from(count))
    }
}
