//! The hash to name dictionary.

use rustc_hash::FxHashMap;
use tracing::warn;

use relkit_common::{format_hash, joaat, parse_hash_string};

use crate::Result;

/// A hash that was rebound to a different name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    /// The rebound hash.
    pub hash: u32,
    /// Name the hash was bound to before.
    pub previous: String,
    /// Name the hash is bound to now.
    pub current: String,
}

/// Accumulating hash to name dictionary.
///
/// The table is owned by its caller and filled in load order; later sources
/// override earlier ones. Lookups never fail, unresolved hashes simply come
/// back as `None` (or unchanged, for [`resolve_string`](Self::resolve_string)).
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: FxHashMap<u32, String>,
    conflicts: Vec<NameConflict>,
}

impl NameTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge hash to name bindings.
    ///
    /// Rebinding a hash to an equal name is a no-op. Rebinding it to a
    /// different name records a [`NameConflict`] and overwrites the binding.
    ///
    /// Returns the number of conflicts this merge produced.
    pub fn merge<I, S>(&mut self, bindings: I) -> usize
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let before = self.conflicts.len();
        for (hash, name) in bindings {
            self.bind(hash, name.into());
        }
        self.conflicts.len() - before
    }

    fn bind(&mut self, hash: u32, name: String) {
        match self.names.get_mut(&hash) {
            Some(existing) if *existing == name => {}
            Some(existing) => {
                warn!(
                    hash = %format_hash(hash),
                    previous = %existing,
                    current = %name,
                    "name table conflict"
                );
                let previous = std::mem::replace(existing, name.clone());
                self.conflicts.push(NameConflict {
                    hash,
                    previous,
                    current: name,
                });
            }
            None => {
                self.names.insert(hash, name);
            }
        }
    }

    /// Bind `joaat(line) -> line` for every non-empty line.
    ///
    /// Lines are trimmed first. Returns the number of conflicts.
    pub fn load_plain_list<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let bindings: Vec<(u32, String)> = lines
            .into_iter()
            .filter_map(|line| {
                let line = line.as_ref().trim();
                (!line.is_empty()).then(|| (joaat(line), line.to_string()))
            })
            .collect();
        self.merge(bindings)
    }

    /// Bind pre-hashed keys given as hex strings to their values.
    ///
    /// Keys may carry a `0x` prefix. Keys that are not valid 32-bit hex are
    /// skipped with a warning. Returns the number of conflicts.
    pub fn load_key_value<I, K, V>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut bindings = Vec::new();
        for (key, value) in pairs {
            let key = key.as_ref().trim();
            let digits = key
                .strip_prefix("0x")
                .or_else(|| key.strip_prefix("0X"))
                .unwrap_or(key);
            match u32::from_str_radix(digits, 16) {
                Ok(hash) => bindings.push((hash, value.into())),
                Err(_) => warn!(key, "skipping text table entry with invalid hash key"),
            }
        }
        self.merge(bindings)
    }

    /// Decode a binary GXT2 table and merge its entries.
    ///
    /// The buffer is fully decoded before anything is merged, so a malformed
    /// table leaves the dictionary unchanged. Returns the number of bindings
    /// and the number of conflicts.
    pub fn load_binary(&mut self, data: &[u8]) -> Result<(usize, usize)> {
        let table = relkit_gxt2::Gxt2Table::parse(data)?;
        let bindings = table.len();
        let conflicts = self.merge(
            table
                .entries()
                .iter()
                .map(|entry| (entry.hash, entry.text.as_str())),
        );
        Ok((bindings, conflicts))
    }

    /// Look up the name bound to a hash.
    pub fn resolve(&self, hash: u32) -> Option<&str> {
        self.names.get(&hash).map(String::as_str)
    }

    /// Resolve a `hash_XXXXXXXX` identifier to its name.
    ///
    /// Anything that is not a hash string, and any hash without a non-empty
    /// name, comes back unchanged. Resolving a resolved string is a no-op
    /// unless the name itself looks like a hash string.
    pub fn resolve_string<'a>(&'a self, s: &'a str) -> &'a str {
        parse_hash_string(s)
            .and_then(|hash| self.resolve(hash))
            .filter(|name| !name.is_empty())
            .unwrap_or(s)
    }

    /// Check if a hash has a name.
    pub fn contains(&self, hash: u32) -> bool {
        self.names.contains_key(&hash)
    }

    /// Number of bound hashes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no hash is bound.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over all bindings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names.iter().map(|(&hash, name)| (hash, name.as_str()))
    }

    /// Conflicts recorded since creation or the last [`take_conflicts`](Self::take_conflicts).
    pub fn conflicts(&self) -> &[NameConflict] {
        &self.conflicts
    }

    /// Drain the recorded conflicts.
    pub fn take_conflicts(&mut self) -> Vec<NameConflict> {
        std::mem::take(&mut self.conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relkit_common::Endian;
    use relkit_gxt2::Gxt2Builder;

    #[test]
    fn test_merge_is_idempotent() {
        let mut names = NameTable::new();
        assert_eq!(names.merge([(1, "one"), (2, "two")]), 0);
        assert_eq!(names.merge([(1, "one"), (2, "two")]), 0);
        assert!(names.conflicts().is_empty());
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_conflict_last_writer_wins() {
        let mut names = NameTable::new();
        names.merge([(7, "old")]);
        assert_eq!(names.merge([(7, "new")]), 1);

        assert_eq!(names.resolve(7), Some("new"));
        assert_eq!(
            names.conflicts(),
            &[NameConflict {
                hash: 7,
                previous: "old".to_string(),
                current: "new".to_string(),
            }]
        );

        let taken = names.take_conflicts();
        assert_eq!(taken.len(), 1);
        assert!(names.conflicts().is_empty());
    }

    #[test]
    fn test_load_plain_list() {
        let mut names = NameTable::new();
        names.load_plain_list(["radio_01_class_rock", "", "  ", " foo \r"]);

        assert_eq!(names.len(), 2);
        assert_eq!(names.resolve(0x09E34587), Some("radio_01_class_rock"));
        assert_eq!(names.resolve(joaat("foo")), Some("foo"));
        assert!(!names.contains(0));
    }

    #[test]
    fn test_load_key_value_uses_literal_keys() {
        let mut names = NameTable::new();
        names.load_key_value([("DEADBEEF", "Title"), ("0x0000002A", "Answer"), ("zz", "Bad")]);

        assert_eq!(names.resolve(0xDEADBEEF), Some("Title"));
        assert_eq!(names.resolve(42), Some("Answer"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_load_binary() {
        let data = Gxt2Builder::new(Endian::Little)
            .entry(0x10, "ten")
            .entry(0x20, "twenty")
            .build();

        let mut names = NameTable::new();
        names.merge([(0x10, "TEN")]);
        let (bindings, conflicts) = names.load_binary(&data).unwrap();

        assert_eq!(bindings, 2);
        assert_eq!(conflicts, 1);
        assert_eq!(names.resolve(0x10), Some("ten"));
    }

    #[test]
    fn test_failed_binary_load_keeps_state() {
        let mut data = Gxt2Builder::new(Endian::Little)
            .entry(0x10, "ten")
            .entry(0x20, "twenty")
            .build();
        let len = data.len();
        data.truncate(len - 3);

        let mut names = NameTable::new();
        names.merge([(0x10, "kept")]);
        assert!(names.load_binary(&data).is_err());

        assert_eq!(names.len(), 1);
        assert_eq!(names.resolve(0x10), Some("kept"));
        assert!(names.conflicts().is_empty());
    }

    #[test]
    fn test_resolve_string() {
        let mut names = NameTable::new();
        names.load_plain_list(["radio_01_class_rock"]);

        assert_eq!(names.resolve_string("plain_name"), "plain_name");
        assert_eq!(names.resolve_string("hash_09E34587"), "radio_01_class_rock");
        assert_eq!(names.resolve_string("hash_DEADBEEF"), "hash_DEADBEEF");
        assert_eq!(names.resolve_string("HASH_09E34587"), "HASH_09E34587");

        let once = names.resolve_string("hash_09E34587");
        assert_eq!(names.resolve_string(once), once);
    }

    #[test]
    fn test_resolve_string_zero_hash() {
        let mut names = NameTable::new();
        names.merge([(0, "zero")]);
        assert_eq!(names.resolve_string("hash_00000000"), "zero");
    }

    #[test]
    fn test_resolve_string_skips_empty_names() {
        let mut names = NameTable::new();
        names.merge([(5, "")]);
        assert_eq!(names.resolve(5), Some(""));
        assert_eq!(names.resolve_string("hash_00000005"), "hash_00000005");
    }
}
