//! Read-only view over a tree node.

/// A node of an attributed, ordered tree.
///
/// This is the narrow interface the normalizer and the type index need. Any
/// DOM-like structure (XML, CryXmlB, JSON) can implement it.
pub trait AttributedNode {
    /// Element name.
    fn tag_name(&self) -> &str;

    /// Attributes in document order.
    fn attributes(&self) -> impl Iterator<Item = (&str, &str)>;

    /// Raw text content preceding the first child, if any.
    fn text(&self) -> Option<&str>;

    /// Child nodes in document order.
    fn children(&self) -> impl Iterator<Item = &Self>;

    /// Value of the first attribute with the given name.
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes().find(|(key, _)| *key == name).map(|(_, value)| value)
    }

    /// First child with the given tag name.
    fn first_child(&self, tag: &str) -> Option<&Self> {
        self.children().find(|child| child.tag_name() == tag)
    }

    /// Check if the node has any attribute.
    fn has_attributes(&self) -> bool {
        self.attributes().next().is_some()
    }

    /// Check if the node has any child.
    fn has_children(&self) -> bool {
        self.children().next().is_some()
    }
}
