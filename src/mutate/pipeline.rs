//! The ordered mutation stages and the state they share.

use super::options::ApplyOptions;
use super::result::MutationStats;
use super::{graphic, hatch, holders, label, params, scalars};
use crate::detect::{self, ParameterFlavor};
use crate::document::{Element, Layout, StyleTree};
use crate::model::PropertyModel;

/// State threaded through the stages of one mutation.
pub(crate) struct Mutation<'a> {
    pub(crate) props: &'a PropertyModel,
    pub(crate) options: &'a ApplyOptions,
    pub(crate) layout: Layout,
    pub(crate) flavor: ParameterFlavor,
    /// Symbology Encoding 1.1 document
    pub(crate) se: bool,
    /// Fill opacity to write; the outline pattern forces it to 0
    pub(crate) fill_opacity: f64,
    /// Label rule built but not yet attached
    pub(crate) label_rule: Option<Element>,
    pub(crate) stats: MutationStats,
}

impl<'a> Mutation<'a> {
    pub(crate) fn new(
        source: &str,
        tree: &StyleTree,
        props: &'a PropertyModel,
        options: &'a ApplyOptions,
    ) -> Self {
        let format = detect::detect_style_format(source).ok();
        let flavor = format
            .as_ref()
            .map(|f| f.flavor)
            .or_else(|| detect::parameter_flavor(source))
            .unwrap_or_default();
        let se = format.map_or(flavor == ParameterFlavor::Svg, |f| f.is_se());

        let layout = match &options.indent {
            Some(unit) => Layout::pretty(unit.clone()),
            None => tree.layout(),
        };

        Self {
            props,
            options,
            layout,
            flavor,
            se,
            fill_opacity: props.fill_opacity,
            label_rule: None,
            stats: MutationStats::new(),
        }
    }
}

type Stage = fn(&mut StyleTree, &mut Mutation<'_>);

/// Stages in the order they must run; later stages rely on the structure
/// earlier ones leave behind.
const STAGES: &[(&str, Stage)] = &[
    ("graphic", graphic::switch_representation),
    ("hatch", hatch::switch_fill),
    ("holders", holders::ensure_document_holders),
    ("label", label::strip_and_rebuild),
    ("parameters", params::write_document_parameters),
    ("scalars", scalars::write_scalars),
    ("attach", label::attach),
];

/// Run every stage over `tree`.
pub(crate) fn run(tree: &mut StyleTree, mut ctx: Mutation<'_>) -> MutationStats {
    for (name, stage) in STAGES {
        log::debug!("Mutation stage: {}", name);
        stage(tree, &mut ctx);
    }
    ctx.stats
}
