//! Loading name sources from disk.
//!
//! Every loader reads its file in one go and parses it completely before
//! merging, so a failed load never leaves half a source in the table. A
//! missing file is not an error: it is logged and reported as
//! [`LoadOutcome::Missing`].

use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, warn};

use relkit_common::joaat;

use crate::{Error, NameTable, Result};

/// Result of loading a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read and merged.
    Loaded {
        /// Number of bindings the source contained.
        bindings: usize,
        /// Number of conflicts the merge produced.
        conflicts: usize,
    },
    /// The file does not exist; the table is unchanged.
    Missing,
}

impl LoadOutcome {
    /// Check if the source was merged.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Read a whole file, mapping "not found" to `None`.
fn read_source(path: &Path, kind: &str) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "{kind} does not exist, skipping");
            Ok(None)
        }
        Err(e) => Err(Error::Io(e)),
    }
}

fn as_text<'a>(path: &Path, data: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(data).map_err(|source| Error::Utf8 {
        path: path.to_path_buf(),
        source,
    })
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

impl NameTable {
    /// Load a name list whose entries are hashed on load.
    ///
    /// - `.txt`: one name per line
    /// - `.nametable`: NUL separated names
    pub fn load_nametable_file(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = path.as_ref();
        let start = Instant::now();

        let Some(data) = read_source(path, "name table")? else {
            return Ok(LoadOutcome::Missing);
        };

        let (bindings, conflicts) = match extension(path) {
            Some("txt") => {
                let text = as_text(path, &data)?;
                let count = text.lines().filter(|line| !line.trim().is_empty()).count();
                (count, self.load_plain_list(text.lines()))
            }
            Some("nametable") => {
                let mut names = Vec::new();
                let mut offset = 0;
                for end in memchr::memchr_iter(0, &data).chain(std::iter::once(data.len())) {
                    let segment = &data[offset..end];
                    offset = end + 1;
                    if segment.is_empty() {
                        continue;
                    }
                    let name = as_text(path, segment)?;
                    names.push((joaat(name), name));
                }
                let count = names.len();
                (count, self.merge(names))
            }
            _ => {
                return Err(Error::UnsupportedExtension {
                    path: path.to_path_buf(),
                    expected: ".nametable or .txt",
                })
            }
        };

        debug!(
            path = %path.display(),
            bindings,
            conflicts,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "loaded name table"
        );
        Ok(LoadOutcome::Loaded { bindings, conflicts })
    }

    /// Load a text table whose keys are already hashes.
    ///
    /// - `.txt`: `HEX=value` lines; blank lines and lines without `=` are
    ///   skipped, key and value are trimmed
    /// - `.gxt2`: binary GXT2 table
    pub fn load_text_table_file(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = path.as_ref();
        let start = Instant::now();

        let Some(data) = read_source(path, "text table")? else {
            return Ok(LoadOutcome::Missing);
        };

        let (bindings, conflicts) = match extension(path) {
            Some("txt") => {
                let text = as_text(path, &data)?;
                let pairs: Vec<(&str, &str)> = text
                    .lines()
                    .filter_map(|line| line.trim().split_once('='))
                    .map(|(key, value)| (key.trim(), value.trim()))
                    .collect();
                let count = pairs.len();
                (count, self.load_key_value(pairs))
            }
            Some("gxt2") => self.load_binary(&data)?,
            _ => {
                return Err(Error::UnsupportedExtension {
                    path: path.to_path_buf(),
                    expected: ".gxt2 or .txt",
                })
            }
        };

        debug!(
            path = %path.display(),
            bindings,
            conflicts,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "loaded text table"
        );
        Ok(LoadOutcome::Loaded { bindings, conflicts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relkit_common::Endian;
    use relkit_gxt2::Gxt2Builder;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_soft_skip() {
        let dir = TempDir::new().unwrap();
        let mut names = NameTable::new();
        names.merge([(1, "kept")]);

        let outcome = names.load_nametable_file(dir.path().join("absent.nametable")).unwrap();
        assert_eq!(outcome, LoadOutcome::Missing);
        assert!(!outcome.is_loaded());

        let outcome = names.load_text_table_file(dir.path().join("absent.gxt2")).unwrap();
        assert_eq!(outcome, LoadOutcome::Missing);
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_plain_text_name_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("names.txt");
        fs::write(&path, "radio_01_class_rock\r\n\nfoo\n").unwrap();

        let mut names = NameTable::new();
        let outcome = names.load_nametable_file(&path).unwrap();

        assert_eq!(outcome, LoadOutcome::Loaded { bindings: 2, conflicts: 0 });
        assert_eq!(names.resolve_string("hash_09E34587"), "radio_01_class_rock");
        assert_eq!(names.resolve(joaat("foo")), Some("foo"));
    }

    #[test]
    fn test_binary_nametable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.dat151.nametable");
        fs::write(&path, b"radio_01_class_rock\0\0foo\0bar").unwrap();

        let mut names = NameTable::new();
        let outcome = names.load_nametable_file(&path).unwrap();

        assert_eq!(outcome, LoadOutcome::Loaded { bindings: 3, conflicts: 0 });
        assert_eq!(names.resolve(joaat("bar")), Some("bar"));
        assert_eq!(names.resolve(0x09E34587), Some("radio_01_class_rock"));
    }

    #[test]
    fn test_key_value_text_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trackid.txt");
        fs::write(&path, "E4C9B9DE = Song Title\n\n# comment\nAB8DC763=Some Artist\n").unwrap();

        let mut names = NameTable::new();
        let outcome = names.load_text_table_file(&path).unwrap();

        assert_eq!(outcome, LoadOutcome::Loaded { bindings: 2, conflicts: 0 });
        assert_eq!(names.resolve(joaat("123S")), Some("Song Title"));
        assert_eq!(names.resolve(joaat("123A")), Some("Some Artist"));
    }

    #[test]
    fn test_gxt2_text_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trackid.gxt2");
        let data = Gxt2Builder::new(Endian::Big)
            .entry(joaat("123S"), "Song Title")
            .build();
        fs::write(&path, data).unwrap();

        let mut names = NameTable::new();
        let outcome = names.load_text_table_file(&path).unwrap();

        assert_eq!(outcome, LoadOutcome::Loaded { bindings: 1, conflicts: 0 });
        assert_eq!(names.resolve(joaat("123S")), Some("Song Title"));
    }

    #[test]
    fn test_corrupt_gxt2_keeps_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.gxt2");
        fs::write(&path, b"NOPE\0\0\0\0").unwrap();

        let mut names = NameTable::new();
        names.merge([(1, "kept")]);
        let result = names.load_text_table_file(&path);

        assert!(matches!(
            result,
            Err(Error::Gxt2(relkit_gxt2::Error::BadHeader { .. }))
        ));
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("names.json");
        fs::write(&path, "{}").unwrap();

        let mut names = NameTable::new();
        assert!(matches!(
            names.load_nametable_file(&path),
            Err(Error::UnsupportedExtension { .. })
        ));
        assert!(matches!(
            names.load_text_table_file(&path),
            Err(Error::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn test_conflicts_across_sources() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        fs::write(&first, "0000000A=old\n").unwrap();
        fs::write(&second, "0000000A=new\n0000000B=other\n").unwrap();

        let mut names = NameTable::new();
        names.load_text_table_file(&first).unwrap();
        let outcome = names.load_text_table_file(&second).unwrap();

        assert_eq!(outcome, LoadOutcome::Loaded { bindings: 2, conflicts: 1 });
        assert_eq!(names.resolve(0x0A), Some("new"));
        assert_eq!(names.conflicts().len(), 1);
    }
}
