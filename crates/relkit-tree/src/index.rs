//! Type-partitioned index over attributed trees.

use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::debug;

use relkit_common::{format_hash, joaat};
use relkit_names::NameTable;

use crate::{AttributedNode, Error, Result};

/// Attribute declaring an item's type.
pub const TYPE_ATTRIBUTE: &str = "type";

/// Child element (or attribute) declaring an item's name.
pub const NAME_FIELD: &str = "Name";

/// Items of a tree grouped by declared type, keyed by declared name.
///
/// Built once from a root; lookups borrow the indexed nodes from that root.
#[derive(Debug)]
pub struct TypeIndex<'a, N> {
    index: FxHashMap<String, FxHashMap<String, &'a N>>,
}

impl<'a, N: AttributedNode> TypeIndex<'a, N> {
    /// Index every descendant of `root` whose `type` attribute is one of
    /// `type_names`.
    ///
    /// An item's name is the text of its first `Name` child, or its `Name`
    /// attribute when it has no such child; unnamed items are skipped. When a
    /// non-empty `name_table` is given, `hash_XXXXXXXX` names are resolved
    /// through it before being used as keys. Later items replace earlier ones
    /// with the same type and name.
    pub fn new<S: AsRef<str>>(
        root: &'a N,
        type_names: &[S],
        name_table: Option<&NameTable>,
    ) -> Result<Self> {
        if type_names.is_empty() {
            return Err(Error::EmptyTypeNames);
        }

        let start = Instant::now();
        let mut index: FxHashMap<String, FxHashMap<String, &'a N>> = type_names
            .iter()
            .map(|t| (t.as_ref().to_string(), FxHashMap::default()))
            .collect();
        let name_table = name_table.filter(|table| !table.is_empty());

        // Depth-first in document order, root excluded.
        let mut stack: Vec<&'a N> = root.children().collect();
        stack.reverse();
        let mut visited = 0usize;

        while let Some(node) = stack.pop() {
            visited += 1;

            if let Some(items) = node
                .attribute(TYPE_ATTRIBUTE)
                .and_then(|type_name| index.get_mut(type_name))
            {
                if let Some(name) = declared_name(node) {
                    let key = match name_table {
                        Some(table) => table.resolve_string(name).to_string(),
                        None => name.to_string(),
                    };
                    items.insert(key, node);
                }
            }

            let first_child = stack.len();
            stack.extend(node.children());
            stack[first_child..].reverse();
        }

        debug!(
            nodes = visited,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "built type index"
        );

        Ok(Self { index })
    }

    /// Look up an item by type and name.
    ///
    /// With `try_hash`, a miss is retried with the name's `hash_XXXXXXXX`
    /// form, so both plain and hashed keys are found.
    pub fn get(&self, type_name: &str, name: &str, try_hash: bool) -> Option<&'a N> {
        let items = self.index.get(type_name)?;
        if let Some(&node) = items.get(name) {
            return Some(node);
        }
        if try_hash {
            return items.get(&format_hash(joaat(name))).copied();
        }
        None
    }

    /// Names indexed under a type, in no particular order.
    pub fn names(&self, type_name: &str) -> Vec<&str> {
        self.index
            .get(type_name)
            .map(|items| items.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Indexed type names, in no particular order.
    pub fn types(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    /// Total number of indexed items.
    pub fn len(&self) -> usize {
        self.index.values().map(FxHashMap::len).sum()
    }

    /// Check if no item was indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn declared_name<N: AttributedNode>(node: &N) -> Option<&str> {
    let name = match node.first_child(NAME_FIELD) {
        Some(child) => child.text(),
        None => node.attribute(NAME_FIELD),
    }?;
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::XmlElement;

    fn item(type_name: &str, name: &str) -> XmlElement {
        XmlElement::new("Item")
            .attr(TYPE_ATTRIBUTE, type_name)
            .child_node(XmlElement::new(NAME_FIELD).with_text(name))
    }

    fn items() -> XmlElement {
        XmlElement::new("Items")
            .child_node(item("StreamingSound", "song_a").attr("marker", "first"))
            .child_node(item("SimpleSound", "song_a_left"))
            .child_node(item("Kind", &format_hash(joaat("foo"))))
            .child_node(item("Ignored", "nope"))
            .child_node(XmlElement::new("Item").attr(TYPE_ATTRIBUTE, "Kind"))
            .child_node(
                XmlElement::new("Group")
                    .child_node(item("SimpleSound", "nested").attr("Name", "ignored_attr")),
            )
            .child_node(XmlElement::new("Item").attr(TYPE_ATTRIBUTE, "Kind").attr("Name", "by_attr"))
    }

    #[test]
    fn test_empty_type_names() {
        let root = items();
        let types: [&str; 0] = [];
        assert!(matches!(
            TypeIndex::new(&root, &types, None),
            Err(Error::EmptyTypeNames)
        ));
    }

    #[test]
    fn test_direct_lookup() {
        let root = items();
        let index = TypeIndex::new(&root, &["StreamingSound", "SimpleSound"], None).unwrap();

        let song = index.get("StreamingSound", "song_a", false).unwrap();
        assert_eq!(song.attribute("marker"), Some("first"));
        assert!(index.get("SimpleSound", "song_a_left", false).is_some());
        assert!(index.get("SimpleSound", "nested", false).is_some());
        assert!(index.get("SimpleSound", "song_a", false).is_none());
        assert!(index.get("Ignored", "nope", false).is_none());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_hash_fallback() {
        let root = items();
        let index = TypeIndex::new(&root, &["Kind"], None).unwrap();

        assert!(index.get("Kind", "foo", false).is_none());
        assert!(index.get("Kind", "foo", true).is_some());
        assert!(index.get("Kind", "FOO", true).is_some());
        assert!(index.get("Kind", "bar", true).is_none());
    }

    #[test]
    fn test_name_attribute_fallback_and_unnamed() {
        let root = items();
        let index = TypeIndex::new(&root, &["Kind"], None).unwrap();

        assert!(index.get("Kind", "by_attr", false).is_some());
        assert_eq!(index.len(), 2);
        let mut names = index.names("Kind");
        names.sort_unstable();
        assert_eq!(names, vec!["by_attr", "hash_238678DD"]);
    }

    #[test]
    fn test_name_table_resolution() {
        let root = items();
        let mut names = NameTable::new();
        names.load_plain_list(["foo"]);

        let index = TypeIndex::new(&root, &["Kind"], Some(&names)).unwrap();
        assert!(index.get("Kind", "foo", false).is_some());
        assert!(index.get("Kind", "hash_238678DD", false).is_none());
    }

    #[test]
    fn test_empty_name_table_is_ignored() {
        let root = items();
        let names = NameTable::new();
        let index = TypeIndex::new(&root, &["Kind"], Some(&names)).unwrap();
        assert!(index.get("Kind", "hash_238678DD", false).is_some());
    }

    #[test]
    fn test_later_item_wins() {
        let root = XmlElement::new("Items")
            .child_node(item("Kind", "dup").attr("n", "1"))
            .child_node(item("Kind", "dup").attr("n", "2"));
        let index = TypeIndex::new(&root, &["Kind"], None).unwrap();
        assert_eq!(index.get("Kind", "dup", false).unwrap().attribute("n"), Some("2"));
    }

    #[test]
    fn test_name_is_trimmed() {
        let root = XmlElement::new("Items").child_node(
            XmlElement::new("Item")
                .attr(TYPE_ATTRIBUTE, "Kind")
                .child_node(XmlElement::new(NAME_FIELD).with_text("\n  padded  \n")),
        );
        let index = TypeIndex::new(&root, &["Kind"], None).unwrap();
        assert!(index.get("Kind", "padded", false).is_some());
        assert!(index.get("Kind", "\n  padded  \n", false).is_none());
    }

    #[test]
    fn test_root_not_indexed() {
        let root = item("Kind", "root");
        let index = TypeIndex::new(&root, &["Kind"], None).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.types(), vec!["Kind"]);
    }
}
