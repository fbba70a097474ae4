//! Generic order-preserving XML document tree
//!
//! This module turns an arbitrary XML document into a uniform nested-node
//! representation: every element becomes a [`TreeNode`] carrying its
//! attributes, merged text content, and child elements grouped by tag name
//! in document order. Text, CDATA and comment content all merge into the
//! owning element's text and are never surfaced as children.
//!
//! Repeated sibling tags accumulate transparently: the first occurrence of a
//! tag is stored as a scalar slot, a second occurrence converts the slot
//! into an ordered sequence holding both, and later occurrences append. The
//! [`NodeSlot`] union makes the scalar-vs-sequence distinction explicit so
//! callers resolve it at each access site instead of relying on runtime
//! shape-shifting.

use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Default buffer capacity for XML parsing (4KB)
const XML_BUFFER_CAPACITY: usize = 4096;

/// Characters illegal in identifiers, with their reversible substitutions
///
/// The underscore is included so that the substitution is injective: a
/// literal `_2d_` in a source name cannot collide with an escaped `-`.
const NAME_ESCAPES: [(char, &str); 4] = [
    ('_', "_5f_"),
    ('-', "_2d_"),
    (':', "_3a_"),
    ('.', "_2e_"),
];

/// Replace identifier-illegal characters in a tag or attribute name
///
/// `-`, `:`, `.` (and the escape introducer `_` itself) are substituted with
/// `_xx_` hex tokens. The mapping is reversible via [`unescape_name`]:
/// `unescape_name(&escape_name(s)) == s` for every `s`.
///
/// # Examples
///
/// - `"x-offset"` becomes `"x_2d_offset"`
/// - `"xml:lang"` becomes `"xml_3a_lang"`
/// - `"Tilt_angle"` becomes `"Tilt_5f_angle"`
pub fn escape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match NAME_ESCAPES.iter().find(|(c, _)| *c == ch) {
            Some((_, sub)) => out.push_str(sub),
            None => out.push(ch),
        }
    }
    out
}

/// Restore a name mangled by [`escape_name`]
pub fn unescape_name(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut out = String::with_capacity(name.len());
    let mut i = 0;
    while i < bytes.len() {
        let token = name[i..].chars().next().unwrap_or('\0');
        if token == '_' && i + 4 <= bytes.len() {
            match NAME_ESCAPES.iter().find(|(_, sub)| name[i..].starts_with(sub)) {
                Some((ch, sub)) => {
                    out.push(*ch);
                    i += sub.len();
                    continue;
                }
                None => {}
            }
        }
        out.push(token);
        i += token.len_utf8();
    }
    out
}

/// One-or-many union for child elements sharing a tag name
///
/// A tag occurring once under a parent is a scalar [`NodeSlot::One`]; the
/// second occurrence converts the slot to [`NodeSlot::Many`] with both
/// entries, and subsequent occurrences append. Entry order always matches
/// document order.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeSlot {
    /// A tag that occurred exactly once
    One(TreeNode),
    /// A tag that occurred two or more times, in document order
    Many(Vec<TreeNode>),
}

impl NodeSlot {
    /// View the slot uniformly as an ordered slice of nodes
    pub fn as_slice(&self) -> &[TreeNode] {
        match self {
            NodeSlot::One(node) => std::slice::from_ref(node),
            NodeSlot::Many(nodes) => nodes,
        }
    }

    /// Whether this slot holds an ordered sequence (tag occurred 2+ times)
    pub fn is_sequence(&self) -> bool {
        matches!(self, NodeSlot::Many(_))
    }

    /// Number of nodes in the slot
    pub fn len(&self) -> usize {
        match self {
            NodeSlot::One(_) => 1,
            NodeSlot::Many(nodes) => nodes.len(),
        }
    }

    /// Whether the slot is empty (only possible transiently)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, node: TreeNode) {
        match self {
            NodeSlot::Many(nodes) => nodes.push(node),
            NodeSlot::One(_) => {
                // Promote the scalar slot to a sequence keeping both entries
                let old = std::mem::replace(self, NodeSlot::Many(Vec::with_capacity(2)));
                if let (NodeSlot::One(first), NodeSlot::Many(nodes)) = (old, &mut *self) {
                    nodes.push(first);
                    nodes.push(node);
                }
            }
        }
    }
}

/// A single element of a parsed XML document
///
/// Holds the element name, its attributes, the merged text content, and the
/// child elements grouped by tag name. Group order matches the document
/// order of each tag's first occurrence; nodes within a group match document
/// order. Tag name collisions never drop data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeNode {
    /// Element name as written in the document
    pub name: String,
    /// Attribute name-value pairs
    pub attributes: HashMap<String, String>,
    /// Merged text, CDATA and comment content in document order
    pub text: String,
    children: Vec<(String, NodeSlot)>,
}

impl TreeNode {
    /// Create an empty node with the given element name
    pub fn new(name: impl Into<String>) -> Self {
        TreeNode {
            name: name.into(),
            attributes: HashMap::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Parse a string that is either an existing file path or raw XML
    ///
    /// Dispatch rule: input starting with `<` (after leading whitespace) is
    /// treated as in-memory XML; otherwise it must name an existing file.
    /// Anything else fails with [`Error::InvalidXml`].
    pub fn parse(source: &str) -> Result<TreeNode> {
        if source.trim_start().starts_with('<') {
            return TreeNode::from_xml(source);
        }
        let path = Path::new(source);
        if path.is_file() {
            return TreeNode::from_path(path);
        }
        Err(Error::InvalidXml(format!(
            "'{}' is neither an existing file nor an XML document",
            source
        )))
    }

    /// Parse an in-memory XML string into a document tree
    pub fn from_xml(xml: &str) -> Result<TreeNode> {
        parse_events(Reader::from_str(xml))
    }

    /// Parse an XML document from a buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<TreeNode> {
        parse_events(Reader::from_reader(reader))
    }

    /// Parse an XML document from a file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<TreeNode> {
        let contents = std::fs::read_to_string(path)?;
        TreeNode::from_xml(&contents)
    }

    /// Look up an attribute by name
    ///
    /// The query may use either the document spelling or its
    /// [`escape_name`] form.
    pub fn attr(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.attributes.get(name) {
            return Some(value.as_str());
        }
        let raw = unescape_name(name);
        self.attributes.get(&raw).map(String::as_str)
    }

    /// First (or only) child element with the given tag name
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.slot(name).and_then(|slot| slot.as_slice().first())
    }

    /// All child elements with the given tag name, in document order
    ///
    /// Returns an empty slice when the tag is absent; a scalar slot yields a
    /// one-element slice so callers can treat both shapes uniformly.
    pub fn children(&self, name: &str) -> &[TreeNode] {
        self.slot(name).map_or(&[], NodeSlot::as_slice)
    }

    /// Whether a child element with the given tag name exists
    pub fn has_child(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    /// The raw slot for a tag name, exposing the scalar-vs-sequence shape
    ///
    /// The query may use either the document spelling or its
    /// [`escape_name`] form.
    pub fn slot(&self, name: &str) -> Option<&NodeSlot> {
        let found = self.children.iter().find(|(n, _)| n == name);
        let found = match found {
            Some(entry) => Some(entry),
            None => {
                let raw = unescape_name(name);
                self.children.iter().find(|(n, _)| *n == raw)
            }
        };
        found.map(|(_, slot)| slot)
    }

    /// Iterate child groups as `(tag name, nodes)` in document order
    pub fn child_groups(&self) -> impl Iterator<Item = (&str, &[TreeNode])> {
        self.children
            .iter()
            .map(|(name, slot)| (name.as_str(), slot.as_slice()))
    }

    /// Trimmed text content of a child element, if present
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|node| node.text.trim())
    }

    /// Attach a child element, accumulating repeated tags in order
    pub fn push_child(&mut self, node: TreeNode) {
        match self.children.iter_mut().find(|(n, _)| *n == node.name) {
            Some((_, slot)) => slot.push(node),
            None => self
                .children
                .push((node.name.clone(), NodeSlot::One(node))),
        }
    }
}

/// Build a node from a start/empty element event
fn open_node<R: BufRead>(_reader: &Reader<R>, e: &BytesStart) -> Result<TreeNode> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| Error::InvalidXml(err.to_string()))?
        .to_string();
    let mut node = TreeNode::new(name);

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| Error::InvalidXml(err.to_string()))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| Error::XmlAttr(err.to_string()))?;
        node.attributes.insert(key, value.into_owned());
    }

    Ok(node)
}

/// Attach a finished node to its parent, or install it as the document root
fn close_node(
    stack: &mut Vec<TreeNode>,
    root: &mut Option<TreeNode>,
    node: TreeNode,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(Error::InvalidXml(
            "document has more than one root element".to_string(),
        )),
    }
}

fn parse_events<R: BufRead>(mut reader: Reader<R>) -> Result<TreeNode> {
    reader.config_mut().trim_text(true);

    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);
    let mut stack: Vec<TreeNode> = Vec::new();
    let mut root: Option<TreeNode> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let node = open_node(&reader, e)?;
                stack.push(node);
            }
            Ok(Event::Empty(ref e)) => {
                let node = open_node(&reader, e)?;
                close_node(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().ok_or_else(|| {
                    Error::InvalidXml("closing tag without matching opening tag".to_string())
                })?;
                close_node(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(ref t)) => {
                if let Some(parent) = stack.last_mut() {
                    let text = t
                        .decode()
                        .map_err(|err| Error::InvalidXml(err.to_string()))?;
                    parent.text.push_str(&text);
                }
            }
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(parent) = stack.last_mut() {
                    let name = r
                        .decode()
                        .map_err(|err| Error::InvalidXml(err.to_string()))?;
                    let entity = format!("&{name};");
                    let text = quick_xml::escape::unescape(&entity)
                        .map_err(|err| Error::InvalidXml(err.to_string()))?;
                    parent.text.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(parent) = stack.last_mut() {
                    let bytes = t.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|err| Error::InvalidXml(err.to_string()))?;
                    parent.text.push_str(text);
                }
            }
            Ok(Event::Comment(ref t)) => {
                // Comment content merges into the owning element's text,
                // same as text and CDATA nodes
                if let Some(parent) = stack.last_mut() {
                    let text = std::str::from_utf8(t)
                        .map_err(|err| Error::InvalidXml(err.to_string()))?;
                    parent.text.push_str(text);
                }
            }
            Ok(Event::Decl(_)) | Ok(Event::DocType(_)) | Ok(Event::PI(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(Error::InvalidXml(format!(
            "element '{}' is never closed",
            stack[stack.len() - 1].name
        )));
    }

    root.ok_or_else(|| Error::InvalidXml("document has no root element".to_string()))
}
