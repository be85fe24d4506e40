//! Creation of missing parameter holders (`Fill`, `Stroke`, `Halo`, `Font`).

use super::pipeline::Mutation;
use super::result::MutationStats;
use crate::document::{self, Element, Layout, StyleTree};
use crate::scope::REQUIRED_HOLDERS;

/// Insert each `(holder, container)` holder that is missing from its
/// container, using the container's prefix. Returns how many were created.
pub(crate) fn ensure_holders(
    root: &mut Element,
    pairs: &[(&str, &[&str])],
    layout: &Layout,
    stats: &mut MutationStats,
) -> usize {
    let mut created = 0;
    for (holder, container) in pairs {
        let containers = document::select(root, container);
        for path in containers.iter().rev() {
            let Some(container) = root.at_mut(path) else {
                continue;
            };
            if container.has_child(holder) {
                continue;
            }
            let el = Element::new(*holder).with_prefix(container.prefix());
            container.insert_element(el, layout);
            stats.elements_inserted += 1;
            created += 1;
        }
    }
    created
}

/// Make sure every polygon, line and point mark has its fill and stroke
/// holders before parameters are written.
pub(crate) fn ensure_document_holders(tree: &mut StyleTree, ctx: &mut Mutation<'_>) {
    let created = ensure_holders(tree.root_mut(), REQUIRED_HOLDERS, &ctx.layout, &mut ctx.stats);
    if created > 0 {
        log::debug!("Created {} missing parameter holders", created);
    }
}
