//! Polygon fill switching between a solid fill and a hatch pattern.

use super::params::{format_number, non_negative, text_value};
use super::pipeline::Mutation;
use crate::document::{Element, StyleTree};
use crate::model::DEFAULT_STROKE;

const POLYGON: &[&str] = &["PolygonSymbolizer"];

/// Rebuild the polygon's `GraphicFill` for a hatch pattern, or drop it for a
/// solid or outline fill.
///
/// The outline pattern makes the fill transparent for the rest of the
/// mutation.
pub(crate) fn switch_fill(tree: &mut StyleTree, ctx: &mut Mutation<'_>) {
    let hatched = ctx.props.is_hatched();
    if ctx.props.is_outline() {
        ctx.fill_opacity = 0.0;
    }

    let polygons = tree.select(POLYGON);
    let Some(path) = polygons.first() else {
        if hatched {
            ctx.stats.miss(POLYGON);
        }
        return;
    };
    let Some(polygon) = tree.get_mut(path) else {
        return;
    };

    if hatched {
        if !polygon.has_child("Fill") {
            let fill = Element::new("Fill").with_prefix(polygon.prefix());
            polygon.insert_element(fill, &ctx.layout);
            ctx.stats.elements_inserted += 1;
        }
        let Some(fill) = polygon.child_mut("Fill") else {
            return;
        };
        let removed = fill.remove_children_named("GraphicFill");
        let pattern = hatch_fill(
            ctx.props.hatch_pattern.trim(),
            &text_value(&ctx.props.stroke).unwrap_or_else(|| DEFAULT_STROKE.to_string()),
            ctx,
            fill.prefix(),
        );
        fill.insert_element(pattern, &ctx.layout);
        ctx.stats.elements_removed += removed as u32;
        ctx.stats.elements_inserted += 1;
    } else if let Some(fill) = polygon.child_mut("Fill") {
        let removed = fill.remove_children_named("GraphicFill");
        if removed > 0 {
            log::debug!("Hatch pattern removed; polygon fill is solid");
            ctx.stats.elements_removed += removed as u32;
        }
    }
}

/// `GraphicFill` drawing `pattern` with lines of the given color.
fn hatch_fill(pattern: &str, color: &str, ctx: &Mutation<'_>, prefix: Option<&str>) -> Element {
    let el = |name: &str| Element::new(name).with_prefix(prefix);
    let param = |name: &str, value: &str| {
        Element::new(ctx.flavor.element_name())
            .with_prefix(prefix)
            .with_attribute("name", name)
            .with_text(value)
    };

    let stroke = el("Stroke")
        .with_child(param("stroke", color))
        .with_child(param(
            "stroke-width",
            &format_number(non_negative(ctx.options.hatch_stroke_width)),
        ));
    let mark = el("Mark")
        .with_child(el("WellKnownName").with_text(pattern))
        .with_child(stroke);
    let graphic = el("Graphic")
        .with_child(mark)
        .with_child(el("Size").with_text(&format_number(non_negative(ctx.options.hatch_size))));

    el("GraphicFill").with_child(graphic)
}
