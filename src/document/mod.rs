//! Minimal typed markup tree for style documents.
//!
//! The tree is lossless: parsing a document and writing it back without
//! edits reproduces the input. Start tags keep their source text until their
//! attributes change, whitespace and comments are kept as nodes, and names
//! keep their namespace prefix. Lookups match local names ignoring prefix and
//! ASCII case.

mod layout;
mod node;
mod query;
mod reader;
pub(crate) mod writer;

pub use layout::Layout;
pub use node::{Attribute, Descendants, Element, Node};
pub use query::{select, select_first, NodePath};

use crate::error::{Error, Result};
use std::fmt;

/// A parsed style document.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTree {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl StyleTree {
    /// Parse markup text into a tree.
    pub fn parse(text: &str) -> Result<Self> {
        let mut nodes = reader::read_nodes(text)?;
        let root_idx = nodes
            .iter()
            .position(|n| matches!(n, Node::Element(_)))
            .ok_or_else(|| Error::Malformed("document has no root element".into()))?;

        let epilog = nodes.split_off(root_idx + 1);
        let root = match nodes.pop() {
            Some(Node::Element(root)) => root,
            _ => return Err(Error::Malformed("document has no root element".into())),
        };

        Ok(Self {
            prolog: nodes,
            root,
            epilog,
        })
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The root element, mutably.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Indentation style detected from the document.
    pub fn layout(&self) -> Layout {
        Layout::detect(&self.root)
    }

    /// Find all elements matching `selector`, in document order.
    pub fn select(&self, selector: &[&str]) -> Vec<NodePath> {
        query::select(&self.root, selector)
    }

    /// Find the first element matching `selector`.
    pub fn select_first(&self, selector: &[&str]) -> Option<&Element> {
        query::select_first(&self.root, selector)
    }

    /// Get the element at a path.
    pub fn get(&self, path: &[usize]) -> Option<&Element> {
        self.root.at(path)
    }

    /// Get the element at a path, mutably.
    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        self.root.at_mut(path)
    }

    /// Check whether any element has the given local name.
    pub fn contains(&self, name: &str) -> bool {
        self.root.is(name) || self.root.descendants().any(|el| el.is(name))
    }

    /// Prefix bound to a namespace URI on the root element.
    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.root.attributes().iter().find_map(|attr| {
            attr.name
                .strip_prefix("xmlns:")
                .filter(|_| attr.value == namespace)
        })
    }

    /// Serialize the tree back to markup.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        writer::write_nodes(&self.prolog, &mut out);
        writer::write_element(&self.root, &mut out);
        writer::write_nodes(&self.epilog, &mut out);
        out
    }
}

impl fmt::Display for StyleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}
