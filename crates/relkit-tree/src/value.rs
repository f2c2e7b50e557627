//! Normalized values produced by collapsing a tree.

use indexmap::IndexMap;

/// A collapsed tree: a string, an ordered map or a list.
///
/// Maps keep insertion order, so serializing the same tree always yields the
/// same output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json-export", derive(serde::Serialize), serde(untagged))]
pub enum NormalizedValue {
    /// Scalar text.
    Text(String),
    /// Fields in document order.
    Map(IndexMap<String, NormalizedValue>),
    /// Repeated fields in document order.
    List(Vec<NormalizedValue>),
}

impl NormalizedValue {
    /// An empty map.
    pub fn empty_map() -> Self {
        Self::Map(IndexMap::new())
    }

    /// Check if the value carries nothing: a blank string, an empty map or an
    /// empty list.
    ///
    /// Children collapsing to an empty value are dropped from their parent.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Map(map) => map.is_empty(),
            Self::List(list) => list.is_empty(),
        }
    }

    /// Get the text of a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the fields of a map.
    pub fn as_map(&self) -> Option<&IndexMap<String, NormalizedValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get the elements of a list.
    pub fn as_list(&self) -> Option<&[NormalizedValue]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Get a field of a map.
    pub fn get(&self, field: &str) -> Option<&NormalizedValue> {
        self.as_map().and_then(|map| map.get(field))
    }

    /// Turn the value into a list, wrapping anything that is not one.
    ///
    /// A field holds a bare value for one occurrence and a list for several;
    /// this gives both cases the same shape.
    pub fn into_list(self) -> Vec<NormalizedValue> {
        match self {
            Self::List(list) => list,
            other => vec![other],
        }
    }
}

impl From<&str> for NormalizedValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for NormalizedValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(NormalizedValue::from("").is_empty());
        assert!(NormalizedValue::from(" \t\n").is_empty());
        assert!(NormalizedValue::empty_map().is_empty());
        assert!(NormalizedValue::List(Vec::new()).is_empty());
        assert!(!NormalizedValue::from("0").is_empty());
        assert!(!NormalizedValue::List(vec!["".into()]).is_empty());
    }

    #[test]
    fn test_accessors() {
        let mut map = IndexMap::new();
        map.insert("A".to_string(), NormalizedValue::from("1"));
        let value = NormalizedValue::Map(map);

        assert_eq!(value.get("A").and_then(NormalizedValue::as_str), Some("1"));
        assert!(value.get("B").is_none());
        assert!(value.as_list().is_none());
        assert_eq!(NormalizedValue::from("x").get("A"), None);
    }

    #[test]
    fn test_into_list() {
        assert_eq!(NormalizedValue::from("a").into_list(), vec![NormalizedValue::from("a")]);
        let list = NormalizedValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.into_list().len(), 2);
    }

    #[cfg(feature = "json-export")]
    #[test]
    fn test_serialize_preserves_order() {
        let mut map = IndexMap::new();
        map.insert("Z".to_string(), NormalizedValue::from("1"));
        map.insert("A".to_string(), NormalizedValue::List(vec!["x".into(), "y".into()]));
        let json = serde_json::to_string(&NormalizedValue::Map(map)).unwrap();
        assert_eq!(json, r#"{"Z":"1","A":["x","y"]}"#);
    }
}
