//! Named parameter writes (`CssParameter` / `SvgParameter`).

use super::pipeline::Mutation;
use super::result::MutationStats;
use crate::detect::ParameterFlavor;
use crate::document::{Element, Layout, StyleTree};
use crate::model::PropertyModel;
use crate::scope::{self, FILL_SCOPES, STROKE_SCOPES};

/// Format a number the way it is written into markup (`1`, `0.5`).
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Also catches -0.0
        return "0".to_string();
    }
    format!("{}", value)
}

pub(crate) fn unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0)
}

/// String value to write; empty means the parameter is removed.
pub(crate) fn text_value(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Rewrite, insert or remove the parameter `name` directly inside `holder`.
///
/// Only the first matching parameter is rewritten. A value equal to the
/// current text leaves the node byte-for-byte untouched.
pub(crate) fn write_parameter(
    holder: &mut Element,
    name: &str,
    value: Option<&str>,
    flavor: ParameterFlavor,
    layout: &Layout,
    stats: &mut MutationStats,
) {
    let existing = holder.children.iter().position(|node| {
        node.as_element()
            .is_some_and(|el| scope::is_parameter_named(el, name))
    });

    match (existing, value) {
        (Some(idx), Some(value)) => {
            if let Some(param) = holder.children[idx].as_element_mut() {
                if param.text().trim() != value {
                    param.set_text(value);
                }
            }
            stats.parameters_written += 1;
        }
        (Some(idx), None) => {
            holder.remove_child(idx);
            stats.parameters_removed += 1;
        }
        (None, Some(value)) => {
            let param = Element::new(flavor.element_name())
                .with_prefix(holder.prefix())
                .with_attribute("name", name)
                .with_text(value);
            holder.insert_element(param, layout);
            stats.parameters_inserted += 1;
        }
        (None, None) => {}
    }
}

/// Fill parameters, using the effective fill opacity of this mutation.
pub(crate) fn fill_values(props: &PropertyModel, fill_opacity: f64) -> [(&'static str, Option<String>); 2] {
    [
        ("fill", text_value(&props.fill)),
        ("fill-opacity", Some(format_number(unit_interval(fill_opacity)))),
    ]
}

pub(crate) fn stroke_values(props: &PropertyModel) -> [(&'static str, Option<String>); 6] {
    [
        ("stroke", text_value(&props.stroke)),
        ("stroke-width", Some(format_number(non_negative(props.stroke_width)))),
        ("stroke-opacity", Some(format_number(unit_interval(props.stroke_opacity)))),
        ("stroke-dasharray", text_value(&props.stroke_dasharray)),
        ("stroke-linecap", text_value(&props.stroke_linecap)),
        ("stroke-linejoin", text_value(&props.stroke_linejoin)),
    ]
}

/// Write the fill and stroke parameters into every holder in scope.
pub(crate) fn write_document_parameters(tree: &mut StyleTree, ctx: &mut Mutation<'_>) {
    let fills = fill_values(ctx.props, ctx.fill_opacity);
    let strokes = stroke_values(ctx.props);

    write_scoped(tree, FILL_SCOPES, &fills, ctx);
    write_scoped(tree, STROKE_SCOPES, &strokes, ctx);
}

fn write_scoped(
    tree: &mut StyleTree,
    scopes: &[&[&str]],
    values: &[(&str, Option<String>)],
    ctx: &mut Mutation<'_>,
) {
    let mut holders: Vec<_> = scopes.iter().flat_map(|selector| tree.select(selector)).collect();
    if holders.is_empty() {
        log::debug!("No holders for {}", values[0].0);
        return;
    }
    holders.sort();

    for path in &holders {
        let Some(holder) = tree.get_mut(path) else {
            continue;
        };
        for (name, value) in values {
            write_parameter(
                holder,
                name,
                value.as_deref(),
                ctx.flavor,
                &ctx.layout,
                &mut ctx.stats,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(text: &str) -> Element {
        StyleTree::parse(text).unwrap().root().clone()
    }

    fn to_xml(el: &Element) -> String {
        let mut out = String::new();
        crate::document::writer::write_element(el, &mut out);
        out
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(34_123.673_339_843_75), "34123.67333984375");
    }

    #[test]
    fn test_clamping() {
        assert_eq!(unit_interval(1.5), 1.0);
        assert_eq!(unit_interval(-0.2), 0.0);
        assert_eq!(unit_interval(f64::NAN), 0.0);
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(2.5), 2.5);
    }

    #[test]
    fn test_rewrite_keeps_other_parameters() {
        let mut fill = holder(
            "<Fill><CssParameter name=\"fill\">#cccccc</CssParameter><CssParameter name=\"fill-opacity\">1</CssParameter></Fill>",
        );
        let mut stats = MutationStats::new();
        write_parameter(&mut fill, "fill", Some("#ff0000"), ParameterFlavor::Css, &Layout::compact(), &mut stats);
        assert_eq!(
            to_xml(&fill),
            "<Fill><CssParameter name=\"fill\">#ff0000</CssParameter><CssParameter name=\"fill-opacity\">1</CssParameter></Fill>"
        );
        assert_eq!(stats.parameters_written, 1);
    }

    #[test]
    fn test_unchanged_value_keeps_bytes() {
        let text = "<Fill><CssParameter name=\"fill\"> #cccccc </CssParameter></Fill>";
        let mut fill = holder(text);
        let mut stats = MutationStats::new();
        write_parameter(&mut fill, "fill", Some("#cccccc"), ParameterFlavor::Css, &Layout::compact(), &mut stats);
        assert_eq!(to_xml(&fill), text);
    }

    #[test]
    fn test_insert_inherits_prefix_and_flavor() {
        let mut stroke = holder("<se:Stroke>\n  <se:SvgParameter name=\"stroke\">#000000</se:SvgParameter>\n</se:Stroke>");
        let mut stats = MutationStats::new();
        write_parameter(&mut stroke, "stroke-width", Some("2"), ParameterFlavor::Svg, &Layout::default(), &mut stats);
        assert_eq!(
            to_xml(&stroke),
            "<se:Stroke>\n  <se:SvgParameter name=\"stroke\">#000000</se:SvgParameter>\n  <se:SvgParameter name=\"stroke-width\">2</se:SvgParameter>\n</se:Stroke>"
        );
        assert_eq!(stats.parameters_inserted, 1);
    }

    #[test]
    fn test_empty_value_removes_parameter() {
        let mut stroke = holder(
            "<Stroke>\n  <CssParameter name=\"stroke\">#000000</CssParameter>\n  <CssParameter name=\"stroke-dasharray\">4 2</CssParameter>\n</Stroke>",
        );
        let mut stats = MutationStats::new();
        write_parameter(&mut stroke, "stroke-dasharray", None, ParameterFlavor::Css, &Layout::default(), &mut stats);
        assert_eq!(
            to_xml(&stroke),
            "<Stroke>\n  <CssParameter name=\"stroke\">#000000</CssParameter>\n</Stroke>"
        );
        assert_eq!(stats.parameters_removed, 1);
    }

    #[test]
    fn test_first_match_only() {
        let mut fill = holder(
            "<Fill><CssParameter name=\"fill\">#111111</CssParameter><CssParameter name=\"fill\">#222222</CssParameter></Fill>",
        );
        let mut stats = MutationStats::new();
        write_parameter(&mut fill, "FILL", Some("#333333"), ParameterFlavor::Css, &Layout::compact(), &mut stats);
        assert!(to_xml(&fill).contains("#333333</CssParameter><CssParameter name=\"fill\">#222222"));
    }
}
