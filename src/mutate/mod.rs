//! Writing a [`PropertyModel`] back into a style document.
//!
//! The document is parsed into a [`StyleTree`], run through an ordered set
//! of stages and serialized again. Markup the stages do not touch is
//! written back exactly as it was read.
//!
//! Stages, in order:
//! 1. point graphic switch between mark and external icon
//! 2. polygon hatch, solid or outline fill
//! 3. creation of missing fill and stroke holders
//! 4. removal of the generated label rule and building of its replacement
//! 5. fill and stroke parameters in every holder in scope
//! 6. point `Size`, `Rotation` and `WellKnownName`
//! 7. attaching the new label rule to the `FeatureTypeStyle`

mod graphic;
mod hatch;
mod holders;
mod label;
mod options;
mod params;
mod pipeline;
mod result;
mod scalars;

pub use graphic::{graphic_format, XLINK_NAMESPACE};
pub use label::{vendor_options, OGC_NAMESPACE};
pub use options::{ApplyOptions, ErrorMode, DEFAULT_HATCH_SIZE, DEFAULT_HATCH_STROKE_WIDTH};
pub use result::{ApplyResult, MutationStats};

use crate::document::StyleTree;
use crate::error::Result;
use crate::model::PropertyModel;
use pipeline::Mutation;

/// Apply properties to a style document.
///
/// Never fails: a document that cannot be parsed is returned unchanged.
///
/// # Example
///
/// ```
/// use sldstyle::{mutate::apply, PropertyModel};
///
/// let doc = r##"<StyledLayerDescriptor><PolygonSymbolizer><Fill>
///   <CssParameter name="fill">#cccccc</CssParameter>
/// </Fill></PolygonSymbolizer></StyledLayerDescriptor>"##;
/// let props = PropertyModel {
///     fill: "#ff0000".to_string(),
///     ..Default::default()
/// };
/// let out = apply(doc, &props);
/// assert!(out.contains(r##"<CssParameter name="fill">#ff0000</CssParameter>"##));
/// ```
pub fn apply(doc: &str, props: &PropertyModel) -> String {
    match try_apply(doc, props, &ApplyOptions::default()) {
        Ok(result) => result.document,
        Err(e) => {
            log::warn!("Style document could not be parsed, left unchanged: {}", e);
            doc.to_string()
        }
    }
}

/// Apply properties with explicit options.
///
/// In [`ErrorMode::Lenient`] an unparsable document is passed through
/// unchanged; in [`ErrorMode::Strict`] the parse error is returned.
pub fn try_apply(doc: &str, props: &PropertyModel, options: &ApplyOptions) -> Result<ApplyResult> {
    let mut tree = match StyleTree::parse(doc) {
        Ok(tree) => tree,
        Err(e) if options.error_mode == ErrorMode::Lenient => {
            log::warn!("Style document could not be parsed, left unchanged: {}", e);
            return Ok(ApplyResult::unchanged(doc));
        }
        Err(e) => return Err(e),
    };

    let stats = apply_tree(doc, &mut tree, props, options);
    Ok(ApplyResult::new(tree.to_xml(), stats))
}

/// Apply properties to an already parsed tree.
///
/// `source` is the text the tree was parsed from; it is used to detect the
/// document's format.
pub fn apply_tree(
    source: &str,
    tree: &mut StyleTree,
    props: &PropertyModel,
    options: &ApplyOptions,
) -> MutationStats {
    let ctx = Mutation::new(source, tree, props, options);
    pipeline::run(tree, ctx)
}
