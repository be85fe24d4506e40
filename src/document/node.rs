//! Element and node types of the markup tree.

use super::layout::{self, Layout};
use quick_xml::escape::{escape, unescape};
use std::borrow::Cow;

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A nested element
    Element(Element),

    /// Character data, kept escaped exactly as in the source
    Text(String),

    /// Markup kept verbatim: comments, CDATA, processing instructions, DOCTYPE
    Raw(String),
}

impl Node {
    /// Get the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Get the element mutably if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Check if this is a text node holding only whitespace.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(t) if t.chars().all(char::is_whitespace))
    }
}

/// An attribute with its unescaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name (e.g. `xlink:href`)
    pub name: String,

    /// Unescaped value
    pub value: String,
}

/// An element of the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) prefix: Option<String>,
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) children: Vec<Node>,
    /// Source text between `<` and `>` (minus a trailing `/`), dropped once
    /// the attributes are edited
    pub(crate) raw_start: Option<String>,
    pub(crate) self_closing: bool,
    /// Nesting level, the root element being 0
    pub(crate) depth: usize,
}

impl Element {
    /// Create a new empty element with a local name and no prefix.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            prefix: None,
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            raw_start: None,
            self_closing: true,
            depth: 0,
        }
    }

    /// Create an element from a possibly prefixed name (`se:Fill`).
    pub fn from_qualified(qname: &str) -> Self {
        match qname.split_once(':') {
            Some((prefix, local)) => Self::new(local).with_prefix(Some(prefix)),
            None => Self::new(qname),
        }
    }

    /// Set the namespace prefix.
    pub fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        self.prefix = prefix.map(str::to_string);
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Local name without prefix.
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Namespace prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Name as written in markup, including the prefix.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Check the local name, ignoring prefix and ASCII case.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Get all attributes.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get an attribute value by qualified name or by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .or_else(|| {
                self.attributes.iter().find(|a| {
                    let local = a.name.rsplit(':').next().unwrap_or(&a.name);
                    local.eq_ignore_ascii_case(name) && !a.name.starts_with("xmlns")
                })
            })
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing one of the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
        self.raw_start = None;
    }

    /// Child nodes.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|el| el.is(name))
    }

    /// First child element with the given local name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|el| el.is(name))
    }

    /// Node index of the first child element with the given local name.
    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|n| n.as_element().is_some_and(|el| el.is(name)))
    }

    /// Check whether a child element with the given local name exists.
    pub fn has_child(&self, name: &str) -> bool {
        self.child_index(name).is_some()
    }

    /// Elements below this one, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.elements().rev().collect(),
        }
    }

    /// Unescaped text of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Replace all content with a single text node.
    pub fn set_text(&mut self, text: &str) {
        self.children = vec![Node::Text(escape(text).into_owned())];
    }

    /// Get the element at a child index path.
    pub fn at(&self, path: &[usize]) -> Option<&Element> {
        path.iter().try_fold(self, |el, &idx| {
            el.children.get(idx).and_then(Node::as_element)
        })
    }

    /// Get the element at a child index path, mutably.
    pub fn at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut el = self;
        for &idx in path {
            el = el.children.get_mut(idx)?.as_element_mut()?;
        }
        Some(el)
    }

    /// Remove the child node at `index` together with the whitespace in
    /// front of it.
    pub fn remove_child(&mut self, index: usize) -> Option<Node> {
        if index >= self.children.len() {
            return None;
        }
        let removed = self.children.remove(index);
        if index > 0 && self.children[index - 1].is_whitespace() {
            self.children.remove(index - 1);
        }
        Some(removed)
    }

    /// Remove every child element with the given local name; returns how many
    /// were removed.
    pub fn remove_children_named(&mut self, name: &str) -> usize {
        let mut removed = 0;
        while let Some(idx) = self.child_index(name) {
            self.remove_child(idx);
            removed += 1;
        }
        removed
    }

    /// Insert a freshly built child at its conventional position for this
    /// container, reusing the surrounding indentation.
    pub fn insert_element(&mut self, child: Element, layout: &Layout) {
        let before = layout::rank(self.local_name(), child.local_name()).and_then(|rank| {
            self.children.iter().position(|n| {
                n.as_element()
                    .and_then(|el| layout::rank(self.local_name(), el.local_name()))
                    .is_some_and(|r| r > rank)
            })
        });
        match before {
            Some(idx) => self.insert_element_at(idx, child, layout),
            None => self.append_element(child, layout),
        }
    }

    /// Insert a freshly built child in front of the node at `index`.
    pub fn insert_element_at(&mut self, index: usize, mut child: Element, layout: &Layout) {
        if index >= self.children.len() {
            self.append_element(child, layout);
            return;
        }
        child.reindent(self.depth + 1, layout);
        let indent = index
            .checked_sub(1)
            .and_then(|i| whitespace_text(&self.children[i]));
        self.children.insert(index, Node::Element(child));
        if let Some(indent) = indent {
            self.children.insert(index + 1, Node::Text(indent));
        }
    }

    /// Append a freshly built child after the last child element.
    pub fn append_element(&mut self, mut child: Element, layout: &Layout) {
        child.reindent(self.depth + 1, layout);
        let last = self
            .children
            .iter()
            .rposition(|n| matches!(n, Node::Element(_)));
        match last {
            Some(j) => {
                let indent = j
                    .checked_sub(1)
                    .and_then(|i| whitespace_text(&self.children[i]));
                let mut at = j + 1;
                if let Some(indent) = indent {
                    self.children.insert(at, Node::Text(indent));
                    at += 1;
                }
                self.children.insert(at, Node::Element(child));
            }
            None if self.children.iter().all(Node::is_whitespace) => {
                self.children.clear();
                if layout.pretty {
                    self.children
                        .push(Node::Text(layout.line_indent(self.depth + 1)));
                    self.children.push(Node::Element(child));
                    self.children.push(Node::Text(layout.line_indent(self.depth)));
                } else {
                    self.children.push(Node::Element(child));
                }
            }
            None => self.children.push(Node::Element(child)),
        }
    }

    /// Lay out a freshly built subtree at `depth`.
    ///
    /// Elements with element content and no text of their own get one child
    /// per line.
    pub(crate) fn reindent(&mut self, depth: usize, layout: &Layout) {
        self.depth = depth;
        for child in self.children.iter_mut().filter_map(Node::as_element_mut) {
            child.reindent(depth + 1, layout);
        }

        let has_elements = self.children.iter().any(|n| matches!(n, Node::Element(_)));
        let has_text = self.children.iter().any(|n| matches!(n, Node::Text(_)));
        if !layout.pretty || !has_elements || has_text {
            return;
        }

        let children = std::mem::take(&mut self.children);
        for child in children {
            self.children.push(Node::Text(layout.line_indent(depth + 1)));
            self.children.push(child);
        }
        self.children.push(Node::Text(layout.line_indent(depth)));
    }
}

/// Preorder iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        self.stack.extend(el.elements().rev());
        Some(el)
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for node in &el.children {
        match node {
            Node::Text(raw) => out.push_str(&unescape_lossy(raw)),
            Node::Element(child) => collect_text(child, out),
            Node::Raw(_) => {}
        }
    }
}

fn whitespace_text(node: &Node) -> Option<String> {
    match node {
        Node::Text(t) if node.is_whitespace() => Some(t.clone()),
        _ => None,
    }
}

/// Unescape entity references, keeping the raw text when it is not valid.
pub(crate) fn unescape_lossy(raw: &str) -> Cow<'_, str> {
    unescape(raw).unwrap_or(Cow::Borrowed(raw))
}
