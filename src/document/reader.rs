//! Markup reader building the lossless tree from `quick-xml` events.

use super::node::{Attribute, Element, Node};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Read markup into top-level nodes.
///
/// Whitespace is kept as text nodes so untouched markup serializes back
/// unchanged.
pub(crate) fn read_nodes(text: &str) -> Result<Vec<Node>> {
    let mut reader = Reader::from_str(text);
    // Do not trim text; indentation is part of what gets written back.

    let mut stack: Vec<Element> = Vec::new();
    let mut top: Vec<Node> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let depth = stack.len();
                stack.push(element_from_start(&e, depth, false));
            }
            Event::Empty(e) => {
                let el = element_from_start(&e, stack.len(), true);
                push_node(&mut stack, &mut top, Node::Element(el));
            }
            Event::End(e) => {
                let el = stack.pop().ok_or_else(|| {
                    Error::Malformed(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                push_node(&mut stack, &mut top, Node::Element(el));
            }
            Event::Text(e) => {
                push_text(&mut stack, &mut top, &String::from_utf8_lossy(e.as_ref()));
            }
            Event::GeneralRef(e) => {
                let entity = format!("&{};", String::from_utf8_lossy(e.as_ref()));
                push_text(&mut stack, &mut top, &entity);
            }
            Event::CData(e) => {
                let raw = format!("<![CDATA[{}]]>", String::from_utf8_lossy(&e));
                push_node(&mut stack, &mut top, Node::Raw(raw));
            }
            Event::Comment(e) => {
                let raw = format!("<!--{}-->", String::from_utf8_lossy(&e));
                push_node(&mut stack, &mut top, Node::Raw(raw));
            }
            Event::Decl(e) => {
                let raw = format!("<?{}?>", String::from_utf8_lossy(&e));
                push_node(&mut stack, &mut top, Node::Raw(raw));
            }
            Event::PI(e) => {
                let raw = format!("<?{}?>", String::from_utf8_lossy(&e));
                push_node(&mut stack, &mut top, Node::Raw(raw));
            }
            Event::DocType(e) => {
                let raw = format!("<!DOCTYPE {}>", String::from_utf8_lossy(&e).trim_start());
                push_node(&mut stack, &mut top, Node::Raw(raw));
            }
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Malformed(format!(
            "unclosed element <{}>",
            open.qualified_name()
        )));
    }

    Ok(top)
}

fn element_from_start(e: &BytesStart<'_>, depth: usize, self_closing: bool) -> Element {
    let qname = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut el = Element::from_qualified(&qname);

    for attr in e.attributes().flatten() {
        let name = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw_value = String::from_utf8_lossy(&attr.value).to_string();
        let value = super::node::unescape_lossy(&raw_value).into_owned();
        el.attributes.push(Attribute { name, value });
    }

    el.raw_start = Some(String::from_utf8_lossy(e).to_string());
    el.self_closing = self_closing;
    el.depth = depth;
    el
}

fn push_node(stack: &mut [Element], top: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top.push(node),
    }
}

/// Append text, merging with a preceding text node so entity references
/// stay inside the text they interrupt.
fn push_text(stack: &mut [Element], top: &mut Vec<Node>, text: &str) {
    let nodes = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => top,
    };
    match nodes.last_mut() {
        Some(Node::Text(prev)) => prev.push_str(text),
        _ => nodes.push(Node::Text(text.to_string())),
    }
}
