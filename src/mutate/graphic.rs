//! Switching a point graphic between a well-known mark and an external icon.

use super::pipeline::Mutation;
use crate::document::{Element, StyleTree};
use crate::scope::POINT_GRAPHIC;

/// Namespace of the `xlink:href` reference on `OnlineResource`.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Image format for an icon URL, judged by its extension.
pub fn graphic_format(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "image/svg+xml",
    }
}

/// Replace the point graphic's content according to the requested icon URL
/// or shape.
pub(crate) fn switch_representation(tree: &mut StyleTree, ctx: &mut Mutation<'_>) {
    let url = ctx.props.external_graphic_url.trim();
    let shape = ctx.props.well_known_name.trim();
    if url.is_empty() && shape.is_empty() {
        return;
    }

    let graphics = tree.select(POINT_GRAPHIC);
    let Some(path) = graphics.first() else {
        ctx.stats.miss(POINT_GRAPHIC);
        return;
    };
    if graphics.len() > 1 {
        log::debug!("{} point graphics; switching the first", graphics.len());
    }

    let xlink = tree.prefix_for(XLINK_NAMESPACE).map(str::to_string);
    let Some(graphic) = tree.get_mut(path) else {
        return;
    };
    let prefix = graphic.prefix().map(str::to_string);

    if !url.is_empty() {
        if references(graphic, url) {
            return;
        }
        let removed = graphic.remove_children_named("Mark") + graphic.remove_children_named("ExternalGraphic");
        let icon = external_graphic(url, prefix.as_deref(), xlink.as_deref());
        graphic.insert_element(icon, &ctx.layout);
        ctx.stats.elements_removed += removed as u32;
        ctx.stats.elements_inserted += 1;
    } else if graphic.has_child("ExternalGraphic") {
        let removed = graphic.remove_children_named("ExternalGraphic") + graphic.remove_children_named("Mark");
        graphic.insert_element(mark(shape, prefix.as_deref()), &ctx.layout);
        ctx.stats.elements_removed += removed as u32;
        ctx.stats.elements_inserted += 1;
        log::debug!("Point icon replaced by mark {:?}", shape);
    }
}

/// Check if the graphic already is a single icon referencing `url`.
fn references(graphic: &Element, url: &str) -> bool {
    let icons: Vec<_> = graphic.elements().filter(|el| el.is("ExternalGraphic")).collect();
    icons.len() == 1
        && !graphic.has_child("Mark")
        && icons[0]
            .child("OnlineResource")
            .and_then(|resource| resource.attribute("href"))
            .is_some_and(|href| href.trim() == url)
}

/// `ExternalGraphic` referencing `url`.
///
/// `xlink` is the prefix the document binds to the xlink namespace; when it
/// has none, the namespace is declared on the resource itself.
fn external_graphic(url: &str, prefix: Option<&str>, xlink: Option<&str>) -> Element {
    let mut resource = Element::new("OnlineResource").with_prefix(prefix);
    let xlink = match xlink {
        Some(xlink) => xlink,
        None => {
            resource.set_attribute("xmlns:xlink", XLINK_NAMESPACE);
            "xlink"
        }
    };
    resource.set_attribute(format!("{}:type", xlink), "simple");
    resource.set_attribute(format!("{}:href", xlink), url);

    Element::new("ExternalGraphic")
        .with_prefix(prefix)
        .with_child(resource)
        .with_child(
            Element::new("Format")
                .with_prefix(prefix)
                .with_text(graphic_format(url)),
        )
}

/// `Mark` with a shape and empty holders for its parameters.
fn mark(shape: &str, prefix: Option<&str>) -> Element {
    Element::new("Mark")
        .with_prefix(prefix)
        .with_child(Element::new("WellKnownName").with_prefix(prefix).with_text(shape))
        .with_child(Element::new("Fill").with_prefix(prefix))
        .with_child(Element::new("Stroke").with_prefix(prefix))
}
