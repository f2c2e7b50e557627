//! Collapsing attributed trees into normalized values.
//!
//! The rules, applied per node:
//!
//! 1. Text only (no attributes, no children): the trimmed text.
//! 2. Otherwise a map seeded with the attributes; non-blank text is added
//!    raw under [`TEXT_FIELD`].
//! 3. Children are collapsed while the depth limit allows (0 = unlimited);
//!    empty or blank results are dropped.
//! 4. A repeated field name turns the field into a list, extended by later
//!    occurrences.
//! 5. A map with a single field is replaced by that field's value.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::{AttributedNode, NormalizedValue};

/// Field holding the text of a node that also has attributes or children.
pub const TEXT_FIELD: &str = "Text";

/// Collapse a node and its descendants.
///
/// `depth_limit` bounds how many levels of children are visited below `node`;
/// `0` means no limit.
pub fn collapse<N: AttributedNode>(node: &N, depth_limit: usize) -> NormalizedValue {
    collapse_at(node, depth_limit, 0)
}

/// Collapse a node that sits `depth` levels below the node collapsing started at.
pub fn collapse_at<N: AttributedNode>(node: &N, depth_limit: usize, depth: usize) -> NormalizedValue {
    let text = node.text().filter(|text| !text.trim().is_empty());

    if let Some(text) = text {
        if !node.has_attributes() && !node.has_children() {
            return NormalizedValue::Text(text.trim().to_string());
        }
    }

    let mut fields: IndexMap<String, NormalizedValue> = node
        .attributes()
        .map(|(key, value)| (key.to_string(), NormalizedValue::from(value)))
        .collect();

    if let Some(text) = text {
        fields.insert(TEXT_FIELD.to_string(), NormalizedValue::from(text));
    }

    if depth_limit == 0 || depth < depth_limit {
        for child in node.children() {
            let value = collapse_at(child, depth_limit, depth + 1);
            if value.is_empty() {
                continue;
            }
            push_field(&mut fields, child.tag_name(), value);
        }
    }

    if fields.len() == 1 {
        if let Some((_, value)) = fields.pop() {
            return value;
        }
    }

    NormalizedValue::Map(fields)
}

/// Add a child's value, coalescing repeated names into a list.
fn push_field(fields: &mut IndexMap<String, NormalizedValue>, name: &str, value: NormalizedValue) {
    match fields.entry(name.to_string()) {
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
        Entry::Occupied(mut entry) => match entry.get_mut() {
            NormalizedValue::List(list) => list.push(value),
            existing => {
                let first = std::mem::replace(existing, NormalizedValue::empty_map());
                *existing = NormalizedValue::List(vec![first, value]);
            }
        },
    }
}
