//! GXT2 magic handling.

use relkit_common::Endian;

/// The two accepted spellings of the GXT2 magic.
///
/// The magic is the u32 `'GXT2'`, so its on-disk byte sequence reveals the
/// byte order of the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gxt2Magic {
    /// `2TXG` on disk: little-endian integers follow.
    Little,
    /// `GXT2` on disk: big-endian integers follow.
    Big,
}

impl Gxt2Magic {
    /// On-disk bytes of a little-endian table.
    pub const LITTLE: &'static [u8; 4] = b"2TXG";

    /// On-disk bytes of a big-endian table.
    pub const BIG: &'static [u8; 4] = b"GXT2";

    /// Identify a magic, or `None` if the bytes are not a GXT2 header.
    pub fn detect(bytes: &[u8; 4]) -> Option<Self> {
        if bytes == Self::LITTLE {
            Some(Self::Little)
        } else if bytes == Self::BIG {
            Some(Self::Big)
        } else {
            None
        }
    }

    /// Magic matching a byte order.
    pub fn for_endian(endian: Endian) -> Self {
        match endian {
            Endian::Little => Self::Little,
            Endian::Big => Self::Big,
        }
    }

    /// Byte order selected by this magic.
    pub fn endian(self) -> Endian {
        match self {
            Self::Little => Endian::Little,
            Self::Big => Endian::Big,
        }
    }

    /// On-disk bytes of this magic.
    pub fn bytes(self) -> &'static [u8; 4] {
        match self {
            Self::Little => Self::LITTLE,
            Self::Big => Self::BIG,
        }
    }
}
