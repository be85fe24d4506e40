//! Point graphic scalars: `Size`, `Rotation` and the mark's `WellKnownName`.

use super::params::{format_number, non_negative};
use super::pipeline::Mutation;
use crate::document::{Element, StyleTree};
use crate::scope::{POINT_GRAPHIC, POINT_MARK};

/// Write the point graphic scalars. An empty shape keeps the current one.
pub(crate) fn write_scalars(tree: &mut StyleTree, ctx: &mut Mutation<'_>) {
    if tree.select(POINT_GRAPHIC).is_empty() {
        log::debug!("No point graphic; size and rotation not written");
        return;
    }

    let size = format_number(non_negative(ctx.props.size));
    let rotation = format_number(if ctx.props.rotation.is_finite() {
        ctx.props.rotation
    } else {
        0.0
    });
    write_scalar(tree, POINT_GRAPHIC, "Size", &size, ctx);
    write_scalar(tree, POINT_GRAPHIC, "Rotation", &rotation, ctx);

    let shape = ctx.props.well_known_name.trim();
    if !shape.is_empty() {
        write_scalar(tree, POINT_MARK, "WellKnownName", shape, ctx);
    }
}

/// Overwrite the `name` child of the first `parent` match in place, or
/// insert it when missing.
fn write_scalar(tree: &mut StyleTree, parent: &[&str], name: &str, value: &str, ctx: &mut Mutation<'_>) {
    let Some(path) = tree.select(parent).into_iter().next() else {
        ctx.stats.miss(parent);
        return;
    };
    let Some(parent) = tree.get_mut(&path) else {
        return;
    };

    match parent.child_index(name) {
        Some(idx) => {
            if let Some(scalar) = parent.children[idx].as_element_mut() {
                if scalar.text().trim() != value {
                    scalar.set_text(value);
                }
            }
        }
        None => {
            let scalar = Element::new(name).with_prefix(parent.prefix()).with_text(value);
            parent.insert_element(scalar, &ctx.layout);
            ctx.stats.elements_inserted += 1;
        }
    }
}
