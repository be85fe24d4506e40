//! Where each property lives in a style document.
//!
//! Selectors start at a symbolizer so that a lookup for one kind never
//! reaches into another: the fill of a point mark and the fill inside a
//! polygon's hatch graphic are different scopes even though both are
//! `Fill` elements.

use crate::document::Element;

/// Title of the label rule owned by the editor.
pub const LABEL_RULE_TITLE: &str = "GeneratedLabelRule";

pub(crate) const POLYGON_FILL: &[&str] = &["PolygonSymbolizer", "Fill"];
pub(crate) const POLYGON_STROKE: &[&str] = &["PolygonSymbolizer", "Stroke"];
pub(crate) const LINE_STROKE: &[&str] = &["LineSymbolizer", "Stroke"];
pub(crate) const POINT_GRAPHIC: &[&str] = &["PointSymbolizer", "Graphic"];
pub(crate) const POINT_MARK: &[&str] = &["PointSymbolizer", "Graphic", "Mark"];
pub(crate) const MARK_FILL: &[&str] = &["PointSymbolizer", "Graphic", "Mark", "Fill"];
pub(crate) const MARK_STROKE: &[&str] = &["PointSymbolizer", "Graphic", "Mark", "Stroke"];
pub(crate) const POINT_SIZE: &[&str] = &["PointSymbolizer", "Graphic", "Size"];
pub(crate) const POINT_ROTATION: &[&str] = &["PointSymbolizer", "Graphic", "Rotation"];
pub(crate) const POINT_SHAPE: &[&str] = &["PointSymbolizer", "Graphic", "Mark", "WellKnownName"];
pub(crate) const POINT_ICON: &[&str] = &["PointSymbolizer", "Graphic", "ExternalGraphic"];
pub(crate) const HATCH_SHAPE: &[&str] = &[
    "PolygonSymbolizer",
    "Fill",
    "GraphicFill",
    "Graphic",
    "Mark",
    "WellKnownName",
];

/// Holders of the `fill` and `fill-opacity` parameters.
pub(crate) const FILL_SCOPES: &[&[&str]] = &[POLYGON_FILL, MARK_FILL];

/// Holders of the stroke parameters.
pub(crate) const STROKE_SCOPES: &[&[&str]] = &[POLYGON_STROKE, LINE_STROKE, MARK_STROKE];

/// Parameter holders that must exist inside each container before
/// parameters are written.
pub(crate) const REQUIRED_HOLDERS: &[(&str, &[&str])] = &[
    ("Fill", &["PolygonSymbolizer"]),
    ("Stroke", &["PolygonSymbolizer"]),
    ("Stroke", &["LineSymbolizer"]),
    ("Fill", POINT_MARK),
    ("Stroke", POINT_MARK),
];

/// Holders required inside the generated text symbolizer.
pub(crate) const LABEL_HOLDERS: &[(&str, &[&str])] = &[
    ("Halo", &["TextSymbolizer"]),
    ("Font", &["TextSymbolizer"]),
    ("Fill", &["TextSymbolizer"]),
];

/// Check if an element is a named style parameter (`CssParameter` or
/// `SvgParameter`).
pub(crate) fn is_parameter(el: &Element) -> bool {
    el.is("CssParameter") || el.is("SvgParameter")
}

/// Check if an element is a parameter with the given name.
pub(crate) fn is_parameter_named(el: &Element, name: &str) -> bool {
    is_parameter(el)
        && el
            .attribute("name")
            .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
}

/// Check if an element is the editor's label rule.
///
/// The title is accepted directly under the rule (SLD 1.0) or inside its
/// `Description` (SE 1.1).
pub fn is_label_rule(el: &Element) -> bool {
    if !el.is("Rule") {
        return false;
    }
    let has_title = |parent: &Element| {
        parent
            .elements()
            .any(|c| c.is("Title") && c.text().trim() == LABEL_RULE_TITLE)
    };
    has_title(el) || el.elements().filter(|c| c.is("Description")).any(has_title)
}

/// Check if an element is a vendor option with the given name.
pub(crate) fn is_vendor_option(el: &Element, name: &str) -> bool {
    el.is("VendorOption") && el.attribute("name").is_some_and(|n| n.trim() == name)
}
