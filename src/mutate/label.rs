//! Lifecycle of the generated label rule.
//!
//! Every mutation removes the previous generated rule. A new one is built
//! when a label attribute is requested and attached to the first
//! `FeatureTypeStyle` once all other writes are done, so the document-wide
//! fill and stroke writes never see it.

use super::holders::ensure_holders;
use super::params::{format_number, non_negative, text_value, write_parameter};
use super::pipeline::Mutation;
use crate::document::{Element, Layout, StyleTree};
use crate::model::PropertyModel;
use crate::scale;
use crate::scope::{self, LABEL_HOLDERS, LABEL_RULE_TITLE};

/// Namespace of `PropertyName` in label expressions.
pub const OGC_NAMESPACE: &str = "http://www.opengis.net/ogc";

const FEATURE_TYPE_STYLE: &[&str] = &["FeatureTypeStyle"];

/// Remove any generated label rule, then build the replacement if a label
/// is requested.
pub(crate) fn strip_and_rebuild(tree: &mut StyleTree, ctx: &mut Mutation<'_>) {
    let removed = strip_label_rules(tree.root_mut());
    if removed > 0 {
        log::debug!("Removed {} generated label rule(s)", removed);
        ctx.stats.elements_removed += removed as u32;
    }

    if !ctx.props.has_label() {
        return;
    }

    let prefix = tree
        .select_first(FEATURE_TYPE_STYLE)
        .and_then(Element::prefix)
        .map(str::to_string);
    let ogc = tree.prefix_for(OGC_NAMESPACE).map(str::to_string);
    ctx.label_rule = Some(build_label_rule(prefix.as_deref(), ogc.as_deref(), ctx));
}

/// Attach the rule built by [`strip_and_rebuild`] as the last child of the
/// first `FeatureTypeStyle`.
pub(crate) fn attach(tree: &mut StyleTree, ctx: &mut Mutation<'_>) {
    let Some(rule) = ctx.label_rule.take() else {
        return;
    };
    let Some(path) = tree.select(FEATURE_TYPE_STYLE).into_iter().next() else {
        ctx.stats.miss(FEATURE_TYPE_STYLE);
        return;
    };
    if let Some(style) = tree.get_mut(&path) {
        style.append_element(rule, &ctx.layout);
        ctx.stats.elements_inserted += 1;
    }
}

/// Remove every generated label rule below `el`; returns how many.
fn strip_label_rules(el: &mut Element) -> usize {
    let mut removed = 0;
    let mut idx = 0;
    while idx < el.children.len() {
        let is_label_rule = el.children[idx]
            .as_element()
            .is_some_and(scope::is_label_rule);
        if is_label_rule {
            let took_whitespace = idx > 0 && el.children[idx - 1].is_whitespace();
            el.remove_child(idx);
            removed += 1;
            if took_whitespace {
                idx -= 1;
            }
        } else {
            if let Some(child) = el.children[idx].as_element_mut() {
                removed += strip_label_rules(child);
            }
            idx += 1;
        }
    }
    removed
}

/// Vendor options of the generated text symbolizer, in output order.
pub fn vendor_options(props: &PropertyModel) -> Vec<(&'static str, String)> {
    let repeat = if props.static_label { 0 } else { props.repeat };
    vec![
        ("group", if props.suppress_duplicates { "yes" } else { "no" }.to_string()),
        ("labelAllGroup", "false".to_string()),
        ("partials", "true".to_string()),
        ("repeat", repeat.to_string()),
        ("spaceAround", "10".to_string()),
        ("conflictResolution", "true".to_string()),
        ("goodnessOfFit", "0".to_string()),
        ("maxDisplacement", "40".to_string()),
        ("autoWrap", "100".to_string()),
    ]
}

/// Build a complete, unattached label rule.
///
/// The fragment is built compact; it is laid out when attached.
fn build_label_rule(prefix: Option<&str>, ogc: Option<&str>, ctx: &mut Mutation<'_>) -> Element {
    let props = ctx.props;
    let el = |name: &str| Element::new(name).with_prefix(prefix);

    let title = el("Title").with_text(LABEL_RULE_TITLE);
    let mut rule = if ctx.se {
        el("Rule").with_child(el("Description").with_child(title))
    } else {
        el("Rule").with_child(title)
    };
    if !props.static_label {
        let max_scale = format_number(scale::zoom_to_scale(props.min_zoom));
        rule = rule.with_child(el("MaxScaleDenominator").with_text(&max_scale));
    }

    let property = Element::new("PropertyName")
        .with_prefix(ogc)
        .with_text(props.label_attribute.trim());
    let anchor = el("AnchorPoint")
        .with_child(el("AnchorPointX").with_text("0.5"))
        .with_child(el("AnchorPointY").with_text("0.5"));
    let mut text = el("TextSymbolizer")
        .with_child(el("Label").with_child(property))
        .with_child(el("LabelPlacement").with_child(el("PointPlacement").with_child(anchor)));
    for (name, value) in vendor_options(props) {
        text = text.with_child(el("VendorOption").with_attribute("name", name).with_text(&value));
    }

    let compact = Layout::compact();
    ensure_holders(&mut text, LABEL_HOLDERS, &compact, &mut ctx.stats);
    write_text_parameters(&mut text, &compact, ctx);

    rule.with_child(text)
}

/// Font, halo and label color of the generated text symbolizer.
fn write_text_parameters(text: &mut Element, layout: &Layout, ctx: &mut Mutation<'_>) {
    let props = ctx.props;
    let flavor = ctx.flavor;

    if let Some(font) = text.child_mut("Font") {
        let values = [
            ("font-family", text_value(&props.font_family)),
            ("font-size", Some(format_number(non_negative(props.font_size)))),
            ("font-style", text_value(&props.font_style)),
            ("font-weight", text_value(&props.font_weight)),
        ];
        for (name, value) in &values {
            write_parameter(font, name, value.as_deref(), flavor, layout, &mut ctx.stats);
        }
    }

    if let Some(halo) = text.child_mut("Halo") {
        let radius = Element::new("Radius")
            .with_prefix(halo.prefix())
            .with_text(&format_number(non_negative(props.halo_radius)));
        halo.insert_element(radius, layout);
        let fill = Element::new("Fill").with_prefix(halo.prefix());
        halo.insert_element(fill, layout);
        if let Some(fill) = halo.child_mut("Fill") {
            let color = text_value(&props.halo_color);
            write_parameter(fill, "fill", color.as_deref(), flavor, layout, &mut ctx.stats);
        }
    }

    if let Some(fill) = text.child_mut("Fill") {
        let color = text_value(&props.font_color);
        write_parameter(fill, "fill", color.as_deref(), flavor, layout, &mut ctx.stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::mutate::apply;

    const STYLE_DOC: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<StyledLayerDescriptor version="1.0.0" xmlns="http://www.opengis.net/sld" xmlns:ogc="http://www.opengis.net/ogc">
  <NamedLayer>
    <UserStyle>
      <FeatureTypeStyle>
        <Rule>
          <PolygonSymbolizer>
            <Fill>
              <CssParameter name="fill">#cccccc</CssParameter>
            </Fill>
          </PolygonSymbolizer>
        </Rule>
      </FeatureTypeStyle>
    </UserStyle>
  </NamedLayer>
</StyledLayerDescriptor>"##;

    fn labelled(attribute: &str) -> PropertyModel {
        PropertyModel {
            label_attribute: attribute.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_label_rule_is_appended_last() {
        let out = apply(STYLE_DOC, &labelled("NAME"));
        let rule_at = out.find(LABEL_RULE_TITLE).unwrap();
        let polygon_at = out.find("PolygonSymbolizer").unwrap();
        assert!(polygon_at < rule_at);
        assert!(out.contains("<ogc:PropertyName>NAME</ogc:PropertyName>"));
        assert!(out.contains("        <Rule>\n          <Title>GeneratedLabelRule</Title>"));
        assert!(out.contains("        </Rule>\n      </FeatureTypeStyle>"));
    }

    #[test]
    fn test_static_label_has_no_scale_gate() {
        let out = apply(STYLE_DOC, &labelled("NAME"));
        assert!(!out.contains("MaxScaleDenominator"));
        assert!(out.contains("<VendorOption name=\"repeat\">0</VendorOption>"));
    }

    #[test]
    fn test_zoom_gated_label() {
        let props = PropertyModel {
            static_label: false,
            min_zoom: 14,
            repeat: 150,
            suppress_duplicates: true,
            ..labelled("NAME")
        };
        let out = apply(STYLE_DOC, &props);
        assert!(out.contains("<MaxScaleDenominator>34123.67333984375</MaxScaleDenominator>"));

        let (extracted, _) = extract(&out);
        assert!(!extracted.static_label);
        assert_eq!(extracted.min_zoom, 14);
        assert_eq!(extracted.repeat, 150);
        assert!(extracted.suppress_duplicates);
    }

    #[test]
    fn test_vendor_options_order() {
        let names: Vec<_> = vendor_options(&PropertyModel::default())
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec![
                "group",
                "labelAllGroup",
                "partials",
                "repeat",
                "spaceAround",
                "conflictResolution",
                "goodnessOfFit",
                "maxDisplacement",
                "autoWrap"
            ]
        );
    }

    #[test]
    fn test_rule_is_replaced_not_duplicated() {
        let once = apply(STYLE_DOC, &labelled("NAME"));
        let twice = apply(&once, &labelled("CODE"));
        assert_eq!(twice.matches(LABEL_RULE_TITLE).count(), 1);
        assert_eq!(extract(&twice).0.label_attribute, "CODE");
    }

    #[test]
    fn test_clearing_label_removes_rule() {
        let once = apply(STYLE_DOC, &labelled("NAME"));
        let cleared = apply(&once, &labelled(""));
        assert!(!cleared.contains(LABEL_RULE_TITLE));
        assert!(!cleared.contains("TextSymbolizer"));
    }

    #[test]
    fn test_strip_keeps_other_rules() {
        let mut tree = StyleTree::parse(
            "<FeatureTypeStyle>\n  <Rule><Title>Roads</Title></Rule>\n  <Rule><Title>GeneratedLabelRule</Title></Rule>\n</FeatureTypeStyle>",
        )
        .unwrap();
        assert_eq!(strip_label_rules(tree.root_mut()), 1);
        assert_eq!(
            tree.to_xml(),
            "<FeatureTypeStyle>\n  <Rule><Title>Roads</Title></Rule>\n</FeatureTypeStyle>"
        );
    }

    #[test]
    fn test_se_rule_title_in_description() {
        let doc = r##"<StyledLayerDescriptor version="1.1.0" xmlns:se="http://www.opengis.net/se">
<se:FeatureTypeStyle>
<se:Rule><se:PolygonSymbolizer><se:Fill/></se:PolygonSymbolizer></se:Rule>
</se:FeatureTypeStyle>
</StyledLayerDescriptor>"##;
        let out = apply(doc, &labelled("NAME"));
        assert!(out.contains("<se:Description>\n        <se:Title>GeneratedLabelRule</se:Title>"));
        assert!(out.contains("<se:SvgParameter name=\"font-family\">SansSerif</se:SvgParameter>"));
        assert!(out.contains("<PropertyName>NAME</PropertyName>"));

        let once = apply(&out, &labelled("NAME"));
        assert_eq!(once.matches("GeneratedLabelRule").count(), 1);
    }
}
