//! Parse XML text into an [`XmlElement`] tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Error, Result, XmlElement};

impl XmlElement {
    /// Parse XML text into an element tree.
    ///
    /// An element's text is the character data between its start tag and its
    /// first child element, entity-unescaped and untrimmed; character data
    /// after a child is ignored. Comments, processing instructions and the
    /// declaration are skipped.
    ///
    /// # Example
    ///
    /// ```
    /// use relkit_tree::{AttributedNode, XmlElement};
    ///
    /// let xml = r#"<?xml version="1.0"?>
    /// <Item type="SimpleSound">
    ///     <Name>beep</Name>
    ///     <Duration value="1234"/>
    /// </Item>"#;
    ///
    /// let root = XmlElement::parse(xml).unwrap();
    /// assert_eq!(root.attribute("type"), Some("SimpleSound"));
    /// assert_eq!(root.child("Name").unwrap().text(), Some("beep"));
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(element_from_start(&e)?);
                }
                Ok(Event::Empty(e)) => {
                    let node = element_from_start(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    if let Some(node) = stack.pop() {
                        attach(&mut stack, &mut root, node)?;
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    append_text(&mut stack, &text);
                }
                Ok(Event::CData(e)) => {
                    let text = std::str::from_utf8(&e)?;
                    append_text(&mut stack, text);
                }
                Ok(Event::Eof) => {
                    if let Some(open) = stack.last() {
                        return Err(Error::Xml(format!("missing end tag for <{}>", open.tag)));
                    }
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "parse error at position {}: {}",
                        reader.error_position(),
                        e
                    )))
                }
            }
        }

        root.ok_or(Error::NoRoot)
    }

    /// Parse XML bytes into an element tree.
    pub fn parse_bytes(xml: &[u8]) -> Result<Self> {
        let xml = std::str::from_utf8(xml)?;
        Self::parse(xml)
    }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = XmlElement::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, node: XmlElement) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => {
            return Err(Error::Xml(format!("multiple root elements, second is <{}>", node.tag)));
        }
        None => *root = Some(node),
    }
    Ok(())
}

fn append_text(stack: &mut [XmlElement], text: &str) {
    if let Some(node) = stack.last_mut() {
        if node.children.is_empty() {
            node.text.get_or_insert_with(String::new).push_str(text);
        }
    }
}
