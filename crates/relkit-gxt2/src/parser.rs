//! GXT2 parser.

use rustc_hash::FxHashMap;

use relkit_common::BinaryReader;

use crate::{Error, Gxt2Magic, Result};

/// One string of a GXT2 table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gxt2Entry {
    /// Joaat hash of the string's key.
    pub hash: u32,
    /// Decoded text with trailing NUL padding removed.
    pub text: String,
}

/// Parsed GXT2 table.
///
/// Entries keep the order of the table of contents, which is file order and
/// not necessarily sorted by hash.
#[derive(Debug, Clone)]
pub struct Gxt2Table {
    magic: Gxt2Magic,
    entries: Vec<Gxt2Entry>,
}

/// Table-of-contents record.
#[derive(Debug, Clone, Copy)]
struct TocEntry {
    hash: u32,
    offset: u32,
}

impl Gxt2Table {
    /// Check if data starts with a GXT2 magic.
    pub fn is_gxt2(data: &[u8]) -> bool {
        data.get(..4)
            .and_then(|magic| magic.try_into().ok())
            .and_then(Gxt2Magic::detect)
            .is_some()
    }

    /// Parse a GXT2 table from bytes.
    ///
    /// The buffer is consumed strictly front to back: header, table of
    /// contents, second header, data length, then each string in table order.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let actual = reader.read_array::<4>()?;
        let magic = Gxt2Magic::detect(&actual).ok_or(Error::BadHeader { actual })?;
        reader.set_endian(magic.endian());

        let entry_count = reader.read_u32()? as usize;
        // Each record is 8 bytes, so a count the buffer cannot hold is truncated input.
        let mut toc = Vec::with_capacity(entry_count.min(reader.remaining() / 8));
        for _ in 0..entry_count {
            let hash = reader.read_u32()?;
            let offset = reader.read_u32()?;
            toc.push(TocEntry { hash, offset });
        }

        // The second magic re-selects the byte order on its own.
        let actual = reader.read_array::<4>()?;
        let midstream = Gxt2Magic::detect(&actual).ok_or(Error::CorruptedMidstreamHeader { actual })?;
        reader.set_endian(midstream.endian());

        let data_length = reader.read_u32()?;

        let mut entries = Vec::with_capacity(toc.len());
        for (index, item) in toc.iter().enumerate() {
            let end = toc.get(index + 1).map_or(data_length, |next| next.offset);
            if end < item.offset {
                return Err(Error::InvalidEntryRange {
                    index,
                    offset: item.offset,
                    end,
                });
            }

            let text = reader
                .read_padded_string((end - item.offset) as usize)
                .map_err(|e| match e {
                    relkit_common::Error::Utf8(source) => Error::InvalidString {
                        hash: item.hash,
                        source,
                    },
                    other => Error::Common(other),
                })?;

            entries.push(Gxt2Entry {
                hash: item.hash,
                text: text.to_string(),
            });
        }

        Ok(Self { magic, entries })
    }

    /// Magic of the leading header.
    pub fn magic(&self) -> Gxt2Magic {
        self.magic
    }

    /// Entries in table-of-contents order.
    pub fn entries(&self) -> &[Gxt2Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a string by hash. The last entry wins if a hash repeats.
    pub fn get(&self, hash: u32) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.hash == hash)
            .map(|entry| entry.text.as_str())
    }

    /// Convert into a hash to string map. Later entries overwrite earlier ones.
    pub fn into_map(self) -> FxHashMap<u32, String> {
        let mut map = FxHashMap::with_capacity_and_hasher(self.entries.len(), Default::default());
        for entry in self.entries {
            map.insert(entry.hash, entry.text);
        }
        map
    }
}

/// Decode a GXT2 buffer straight into a hash to string map.
pub fn decode(data: &[u8]) -> Result<FxHashMap<u32, String>> {
    Gxt2Table::parse(data).map(Gxt2Table::into_map)
}
