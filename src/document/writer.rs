//! Serialization of the markup tree.

use super::node::{Element, Node};
use quick_xml::escape::escape;

/// Write nodes to `out`.
pub(crate) fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(el) => write_element(el, out),
            Node::Text(raw) | Node::Raw(raw) => out.push_str(raw),
        }
    }
}

/// Write one element and its subtree.
pub(crate) fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    match &el.raw_start {
        Some(raw) => out.push_str(raw),
        None => {
            out.push_str(&el.qualified_name());
            for attr in &el.attributes {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape(attr.value.as_str()));
                out.push('"');
            }
        }
    }

    if el.children.is_empty() && el.self_closing {
        out.push_str("/>");
        return;
    }

    out.push('>');
    write_nodes(&el.children, out);
    out.push_str("</");
    out.push_str(&el.qualified_name());
    out.push('>');
}
