//! Selector queries over the markup tree.
//!
//! A selector is a list of local names. The first name matches any element
//! at any depth, each following name a direct child of the previous match:
//! `["PointSymbolizer", "Graphic", "Mark"]` finds every `Mark` that is a
//! child of a `Graphic` that is a child of some `PointSymbolizer`.

use super::node::{Element, Node};

/// Child index path from the root element to a node.
///
/// Paths compare in document order.
pub type NodePath = Vec<usize>;

/// Find all elements matching `selector`, in document order.
pub fn select(root: &Element, selector: &[&str]) -> Vec<NodePath> {
    let Some((first, rest)) = selector.split_first() else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    let mut path = Vec::new();
    visit(root, first, rest, &mut path, &mut matches);
    matches.sort();
    matches.dedup();
    matches
}

/// Find the first element matching `selector`.
pub fn select_first<'a>(root: &'a Element, selector: &[&str]) -> Option<&'a Element> {
    select(root, selector)
        .first()
        .and_then(|path| root.at(path))
}

fn visit(
    el: &Element,
    first: &str,
    rest: &[&str],
    path: &mut NodePath,
    matches: &mut Vec<NodePath>,
) {
    if el.is(first) {
        follow(el, rest, path, matches);
    }
    for (idx, node) in el.children().iter().enumerate() {
        if let Node::Element(child) = node {
            path.push(idx);
            visit(child, first, rest, path, matches);
            path.pop();
        }
    }
}

fn follow(el: &Element, rest: &[&str], path: &mut NodePath, matches: &mut Vec<NodePath>) {
    let Some((next, tail)) = rest.split_first() else {
        matches.push(path.clone());
        return;
    };
    for (idx, node) in el.children().iter().enumerate() {
        if let Node::Element(child) = node {
            if child.is(next) {
                path.push(idx);
                follow(child, tail, path, matches);
                path.pop();
            }
        }
    }
}
