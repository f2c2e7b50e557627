//! Binary reader for forward-only parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! binary data from a byte slice without copying. Unlike most formats in the
//! game's archives, some tables (GXT2) are written in either byte order, so the
//! reader carries an [`Endian`] that can be switched mid-stream.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::{Error, Result};

/// Byte order used for multi-byte integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Least significant byte first (PC builds).
    #[default]
    Little,
    /// Most significant byte first (console builds).
    Big,
}

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// The position only ever moves forward.
///
/// # Example
///
/// ```
/// use relkit_common::{BinaryReader, Endian};
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x01, 0x02, 0x03, 0x04];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// reader.set_endian(Endian::Big);
/// assert_eq!(reader.read_u32().unwrap(), 0x01020304);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
    endian: Endian,
}

impl<'a> BinaryReader<'a> {
    /// Create a new little-endian reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            endian: Endian::Little,
        }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Byte order currently used for integer reads.
    #[inline]
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// Switch the byte order for all subsequent integer reads.
    #[inline]
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size byte array, e.g. a magic tag.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a u16 in the current byte order.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(match self.endian {
            Endian::Little => LittleEndian::read_u16(bytes),
            Endian::Big => BigEndian::read_u16(bytes),
        })
    }

    /// Read a u32 in the current byte order.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(match self.endian {
            Endian::Little => LittleEndian::read_u32(bytes),
            Endian::Big => BigEndian::read_u32(bytes),
        })
    }

    /// Read a string of a specific length, dropping trailing NUL padding.
    pub fn read_padded_string(&mut self, length: usize) -> Result<&'a str> {
        let bytes = self.read_bytes(length)?;
        let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        std::str::from_utf8(&bytes[..end]).map_err(Error::Utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // u32: 0x04030201
            0xFF, 0xFF, 0xFF, 0xFF, // u32: 0xFFFFFFFF
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.read_u32().unwrap(), 0xFFFFFFFF);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_big_endian() {
        let data = [0x12, 0x34, 0x00, 0x00, 0x00, 0x2A];
        let mut reader = BinaryReader::new(&data);
        reader.set_endian(Endian::Big);

        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 42);
        assert_eq!(reader.endian(), Endian::Big);
    }

    #[test]
    fn test_read_padded_string() {
        let data = b"abcd\0\0efgh\0";
        let mut reader = BinaryReader::new(data);

        assert_eq!(reader.read_padded_string(6).unwrap(), "abcd");
        assert_eq!(reader.read_padded_string(5).unwrap(), "efgh");
        assert_eq!(reader.position(), 11);
    }

    #[test]
    fn test_padded_string_all_nul() {
        let data = [0u8; 3];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_padded_string(3).unwrap(), "");
    }

    #[test]
    fn test_read_array() {
        let mut reader = BinaryReader::new(b"GXT2rest");
        assert_eq!(&reader.read_array::<4>().unwrap(), b"GXT2");
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_u32(),
            Err(Error::UnexpectedEof { needed: 4, available: 2 })
        ));
    }
}
