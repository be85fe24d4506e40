//! Indentation and child ordering used when inserting generated markup.

use super::node::{Element, Node};

/// Conventional child order of the containers the editor inserts into.
const CHILD_ORDER: &[(&str, &[&str])] = &[
    (
        "PolygonSymbolizer",
        &["Geometry", "Fill", "Stroke", "Displacement", "PerpendicularOffset", "VendorOption"],
    ),
    (
        "LineSymbolizer",
        &["Geometry", "Stroke", "PerpendicularOffset", "VendorOption"],
    ),
    ("PointSymbolizer", &["Geometry", "Graphic", "VendorOption"]),
    (
        "Graphic",
        &["ExternalGraphic", "Mark", "Opacity", "Size", "Rotation", "AnchorPoint", "Displacement"],
    ),
    (
        "Mark",
        &["WellKnownName", "OnlineResource", "InlineContent", "Format", "MarkIndex", "Fill", "Stroke"],
    ),
    (
        "TextSymbolizer",
        &[
            "Geometry",
            "Label",
            "Font",
            "LabelPlacement",
            "Halo",
            "Fill",
            "Graphic",
            "Priority",
            "VendorOption",
        ],
    ),
    ("Halo", &["Radius", "Fill"]),
    ("Fill", &["GraphicFill", "CssParameter", "SvgParameter"]),
    ("Stroke", &["GraphicFill", "GraphicStroke", "CssParameter", "SvgParameter"]),
];

/// Position of `child` among the children of `container`, if the pair is known.
pub(crate) fn rank(container: &str, child: &str) -> Option<usize> {
    CHILD_ORDER
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(container))
        .and_then(|(_, order)| order.iter().position(|n| n.eq_ignore_ascii_case(child)))
}

/// Indentation style of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// One level of indentation
    pub unit: String,

    /// Whether elements sit on their own lines
    pub pretty: bool,
}

impl Layout {
    /// Layout that puts every element on its own line.
    pub fn pretty(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            pretty: true,
        }
    }

    /// Layout that adds no whitespace.
    pub fn compact() -> Self {
        Self {
            unit: "  ".to_string(),
            pretty: false,
        }
    }

    /// Detect the layout from the whitespace in front of the root's children.
    pub fn detect(root: &Element) -> Self {
        let mut nodes = root.children().iter().peekable();
        while let Some(node) = nodes.next() {
            if let Node::Text(text) = node {
                let is_indent = node.is_whitespace() && text.contains('\n');
                if is_indent && matches!(nodes.peek(), Some(Node::Element(_))) {
                    let unit = text.rsplit('\n').next().unwrap_or_default();
                    if !unit.is_empty() {
                        return Self::pretty(unit);
                    }
                }
            }
        }

        let any_newline = root
            .descendants()
            .flat_map(|el| el.children())
            .chain(root.children())
            .any(|n| n.is_whitespace() && matches!(n, Node::Text(t) if t.contains('\n')));
        if any_newline {
            Self::pretty("  ")
        } else {
            Self::compact()
        }
    }

    /// Newline followed by indentation for `depth`.
    pub fn line_indent(&self, depth: usize) -> String {
        format!("\n{}", self.unit.repeat(depth))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::pretty("  ")
    }
}
