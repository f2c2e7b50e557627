//! Builder for writing GXT2 tables.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use relkit_common::Endian;

use crate::{Gxt2Entry, Gxt2Magic};

/// Builder for constructing GXT2 tables.
///
/// Offsets are written as absolute file positions and the data length as the
/// total file size, matching tables shipped with the game.
///
/// # Example
///
/// ```
/// use relkit_common::{joaat, Endian};
/// use relkit_gxt2::{Gxt2Builder, Gxt2Table};
///
/// let bytes = Gxt2Builder::new(Endian::Little)
///     .entry(joaat("track_title"), "Title")
///     .build();
///
/// let table = Gxt2Table::parse(&bytes).unwrap();
/// assert_eq!(table.get(joaat("track_title")), Some("Title"));
/// ```
#[derive(Debug, Clone)]
pub struct Gxt2Builder {
    endian: Endian,
    entries: Vec<Gxt2Entry>,
}

impl Gxt2Builder {
    /// Create an empty builder writing integers in the given byte order.
    pub fn new(endian: Endian) -> Self {
        Self {
            endian,
            entries: Vec::new(),
        }
    }

    /// Add an entry. Entries are written in insertion order.
    pub fn entry(mut self, hash: u32, text: impl Into<String>) -> Self {
        self.entries.push(Gxt2Entry {
            hash,
            text: text.into(),
        });
        self
    }

    /// Add multiple entries.
    pub fn entries(mut self, entries: impl IntoIterator<Item = (u32, String)>) -> Self {
        self.entries
            .extend(entries.into_iter().map(|(hash, text)| Gxt2Entry { hash, text }));
        self
    }

    /// Build the GXT2 binary representation.
    pub fn build(&self) -> Vec<u8> {
        let magic = Gxt2Magic::for_endian(self.endian);

        // Layout: Magic | Count | Toc | Magic | DataLength | Strings
        let header_size = 4 + 4 + self.entries.len() * 8 + 4 + 4;
        let string_size: usize = self.entries.iter().map(|e| e.text.len() + 1).sum();
        let total_size = header_size + string_size;

        let mut output = Vec::with_capacity(total_size);
        output.extend_from_slice(magic.bytes());
        self.put_u32(&mut output, self.entries.len() as u32);

        let mut offset = header_size;
        for entry in &self.entries {
            self.put_u32(&mut output, entry.hash);
            self.put_u32(&mut output, offset as u32);
            offset += entry.text.len() + 1;
        }

        output.extend_from_slice(magic.bytes());
        self.put_u32(&mut output, total_size as u32);

        for entry in &self.entries {
            output.extend_from_slice(entry.text.as_bytes());
            output.push(0);
        }

        output
    }

    fn put_u32(&self, output: &mut Vec<u8>, value: u32) {
        let mut buf = [0u8; 4];
        match self.endian {
            Endian::Little => LittleEndian::write_u32(&mut buf, value),
            Endian::Big => BigEndian::write_u32(&mut buf, value),
        }
        output.extend_from_slice(&buf);
    }
}
