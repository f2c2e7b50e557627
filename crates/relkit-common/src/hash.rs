//! Joaat ("one-at-a-time") string hashing.
//!
//! Audio metadata, text tables and name tables identify strings by the
//! 32-bit joaat hash of their lowercased form. Identifiers whose original
//! string is unknown are written as `hash_XXXXXXXX` (8 uppercase hex digits).

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Prefix of an unresolved hash identifier.
pub const HASH_STRING_PREFIX: &str = "hash_";

/// Compute the joaat hash of a string.
///
/// The string is lowercased with Unicode rules and no locale (so a word-final
/// capital sigma becomes `ς`), then each code point is mixed in as a whole,
/// not as UTF-8 bytes.
///
/// # Example
///
/// ```
/// use relkit_common::joaat;
///
/// assert_eq!(joaat("a"), 0xCA2E9442);
/// assert_eq!(joaat("Foo"), joaat("foo"));
/// ```
pub fn joaat(s: &str) -> u32 {
    let mut h = 0u32;
    for c in s.to_lowercase().chars() {
        h = mix(h, c as u32);
    }
    finalize(h)
}

#[inline]
fn mix(mut h: u32, value: u32) -> u32 {
    h = h.wrapping_add(value);
    h = h.wrapping_add(h << 10);
    h ^ (h >> 6)
}

#[inline]
fn finalize(mut h: u32) -> u32 {
    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h.wrapping_add(h << 15)
}

/// Format a hash as `hash_XXXXXXXX`.
pub fn format_hash(hash: u32) -> String {
    format!("{HASH_STRING_PREFIX}{hash:08X}")
}

/// Parse a `hash_XXXXXXXX` identifier.
///
/// Returns `None` for anything that is not a hash string, including a bare
/// prefix, non-hex digits and a differently cased prefix. A value of zero is
/// a valid result.
pub fn parse_hash_string(s: &str) -> Option<u32> {
    let digits = s.strip_prefix(HASH_STRING_PREFIX)?;
    if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// A joaat hash value.
///
/// Displays as its `hash_XXXXXXXX` identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct JoaatHash(pub u32);

impl JoaatHash {
    /// Hash a string.
    pub fn of(s: &str) -> Self {
        Self(joaat(s))
    }

    /// Create a hash from a raw value.
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw hash value.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Parse a `hash_XXXXXXXX` identifier, see [`parse_hash_string`].
    pub fn parse(s: &str) -> Option<Self> {
        parse_hash_string(s).map(Self)
    }
}

impl From<u32> for JoaatHash {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for JoaatHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HASH_STRING_PREFIX}{:08X}", self.0)
    }
}

impl FromStr for JoaatHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidHashString(s.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for JoaatHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for JoaatHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_hashes() {
        assert_eq!(joaat(""), 0);
        assert_eq!(joaat("a"), 0xCA2E9442);
        assert_eq!(joaat("foo"), 0x238678DD);
        assert_eq!(joaat("radio_01_class_rock"), 0x09E34587);
        assert_eq!(joaat("hello world"), 0x3E4A5A57);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(joaat("Foo"), joaat("foo"));
        assert_eq!(joaat("RADIO_01_CLASS_ROCK"), joaat("radio_01_class_rock"));
    }

    #[test]
    fn test_code_point_hashing() {
        // Non-ASCII characters are mixed in by code point, not UTF-8 byte.
        assert_eq!(joaat("äbc"), 0x42D0BB82);
        assert_eq!(joaat("ÄBC"), 0x42D0BB82);
        assert_eq!(joaat("Straße"), 0x3A15EF25);
    }

    #[test]
    fn test_final_sigma() {
        assert_eq!(joaat("οδος"), 0x16585742);
        assert_eq!(joaat("ΟΔΟΣ"), 0x16585742);
    }

    #[test]
    fn test_format_hash() {
        assert_eq!(format_hash(0), "hash_00000000");
        assert_eq!(format_hash(0xDEADBEEF), "hash_DEADBEEF");
        assert_eq!(format_hash(0x1A), "hash_0000001A");
    }

    #[test]
    fn test_parse_hash_string() {
        assert_eq!(parse_hash_string("hash_DEADBEEF"), Some(0xDEADBEEF));
        assert_eq!(parse_hash_string("hash_deadbeef"), Some(0xDEADBEEF));
        assert_eq!(parse_hash_string("hash_00000000"), Some(0));
    }

    #[test]
    fn test_parse_rejects_non_hash_strings() {
        assert_eq!(parse_hash_string("hash_xyz"), None);
        assert_eq!(parse_hash_string("hash_"), None);
        assert_eq!(parse_hash_string(""), None);
        assert_eq!(parse_hash_string("HASH_00000000"), None);
        assert_eq!(parse_hash_string("hash_123456789"), None);
        assert_eq!(parse_hash_string("hash_+1234567"), None);
        assert_eq!(parse_hash_string("radio_01_class_rock"), None);
    }

    #[test]
    fn test_joaat_hash_display() {
        let hash = JoaatHash::of("a");
        assert_eq!(hash.value(), 0xCA2E9442);
        assert_eq!(hash.to_string(), "hash_CA2E9442");
        assert_eq!("hash_CA2E9442".parse::<JoaatHash>().unwrap(), hash);
        assert!("not_a_hash".parse::<JoaatHash>().is_err());
    }

    proptest! {
        #[test]
        fn prop_format_parse_roundtrip(h in any::<u32>()) {
            prop_assert_eq!(parse_hash_string(&format_hash(h)), Some(h));
        }

        #[test]
        fn prop_ascii_case_insensitive(s in "[ -~]{0,32}") {
            prop_assert_eq!(joaat(&s), joaat(&s.to_ascii_lowercase()));
            prop_assert_eq!(joaat(&s), joaat(&s.to_ascii_uppercase()));
        }
    }
}
