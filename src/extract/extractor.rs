//! Property extraction from a parsed style document.

use super::value::{number_or, parse_number};
use crate::document::{self, Element, StyleTree};
use crate::model::{AvailabilityMap, Property, PropertyModel};
use crate::scale;
use crate::scope::{self, FILL_SCOPES, STROKE_SCOPES};

const POLYGON_PROPERTIES: &[Property] = &[
    Property::Fill,
    Property::FillOpacity,
    Property::HatchPattern,
    Property::Stroke,
    Property::StrokeWidth,
    Property::StrokeOpacity,
    Property::StrokeDasharray,
    Property::StrokeLinecap,
    Property::StrokeLinejoin,
];

const LINE_PROPERTIES: &[Property] = &[
    Property::Stroke,
    Property::StrokeWidth,
    Property::StrokeOpacity,
    Property::StrokeDasharray,
    Property::StrokeLinecap,
    Property::StrokeLinejoin,
];

const POINT_PROPERTIES: &[Property] = &[
    Property::Size,
    Property::Rotation,
    Property::WellKnownName,
    Property::ExternalGraphicUrl,
    Property::Fill,
    Property::FillOpacity,
    Property::Stroke,
    Property::StrokeWidth,
    Property::StrokeOpacity,
];

const TEXT_PROPERTIES: &[Property] = &[
    Property::LabelAttribute,
    Property::FontFamily,
    Property::FontSize,
    Property::FontWeight,
    Property::FontStyle,
    Property::FontColor,
    Property::HaloColor,
    Property::HaloRadius,
    Property::StaticLabel,
    Property::MinZoom,
    Property::SuppressDuplicates,
    Property::Repeat,
];

/// Result of extracting properties from a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Property values, defaults where the document had none
    pub properties: PropertyModel,

    /// Properties the document offers for editing
    pub availability: AvailabilityMap,
}

/// Reads a [`PropertyModel`] out of a style tree.
///
/// Extraction never fails: a missing scope or unparsable value leaves the
/// property at its default and its availability unset.
pub struct Extractor<'a> {
    tree: &'a StyleTree,
    props: PropertyModel,
    availability: AvailabilityMap,
}

impl<'a> Extractor<'a> {
    /// Create an extractor over a parsed tree.
    pub fn new(tree: &'a StyleTree) -> Self {
        Self {
            tree,
            props: PropertyModel::default(),
            availability: AvailabilityMap::new(),
        }
    }

    /// Run every extraction rule.
    pub fn extract(mut self) -> Extraction {
        self.extract_fill();
        self.extract_stroke();
        self.extract_graphic();
        self.extract_label();
        self.extract_label_rule();
        self.extract_vendor_options();
        self.mark_symbolizer_kinds();

        Extraction {
            properties: self.props,
            availability: self.availability,
        }
    }

    fn extract_fill(&mut self) {
        let defaults = PropertyModel::default();

        if let Some(fill) = self.parameter(FILL_SCOPES, "fill") {
            self.props.fill = fill;
            self.availability.mark(Property::Fill);
        }
        if let Some(opacity) = self.parameter(FILL_SCOPES, "fill-opacity") {
            self.props.fill_opacity = number_or(&opacity, defaults.fill_opacity, "fill-opacity");
            self.availability.mark(Property::FillOpacity);
        }
        if let Some(hatch) = self.scalar(scope::HATCH_SHAPE) {
            self.props.hatch_pattern = hatch;
            self.availability.mark(Property::HatchPattern);
        }
    }

    fn extract_stroke(&mut self) {
        let defaults = PropertyModel::default();

        if let Some(stroke) = self.parameter(STROKE_SCOPES, "stroke") {
            self.props.stroke = stroke;
            self.availability.mark(Property::Stroke);
        }
        if let Some(width) = self.parameter(STROKE_SCOPES, "stroke-width") {
            self.props.stroke_width = number_or(&width, defaults.stroke_width, "stroke-width");
            self.availability.mark(Property::StrokeWidth);
        }
        if let Some(opacity) = self.parameter(STROKE_SCOPES, "stroke-opacity") {
            self.props.stroke_opacity =
                number_or(&opacity, defaults.stroke_opacity, "stroke-opacity");
            self.availability.mark(Property::StrokeOpacity);
        }
        if let Some(dash) = self.parameter(STROKE_SCOPES, "stroke-dasharray") {
            self.props.stroke_dasharray = dash;
            self.availability.mark(Property::StrokeDasharray);
        }
        if let Some(cap) = self.parameter(STROKE_SCOPES, "stroke-linecap") {
            self.props.stroke_linecap = cap;
            self.availability.mark(Property::StrokeLinecap);
        }
        if let Some(join) = self.parameter(STROKE_SCOPES, "stroke-linejoin") {
            self.props.stroke_linejoin = join;
            self.availability.mark(Property::StrokeLinejoin);
        }
    }

    fn extract_graphic(&mut self) {
        let defaults = PropertyModel::default();

        if let Some(size) = self.scalar(scope::POINT_SIZE) {
            self.props.size = number_or(&size, defaults.size, "size");
            self.availability.mark(Property::Size);
        }
        if let Some(rotation) = self.scalar(scope::POINT_ROTATION) {
            self.props.rotation = number_or(&rotation, defaults.rotation, "rotation");
            self.availability.mark(Property::Rotation);
        }
        if let Some(shape) = self.scalar(scope::POINT_SHAPE) {
            self.props.well_known_name = shape;
            self.availability.mark(Property::WellKnownName);
        }

        let url = self
            .tree
            .select_first(scope::POINT_ICON)
            .and_then(|graphic| graphic.child("OnlineResource"))
            .and_then(|resource| resource.attribute("href"))
            .map(|href| href.trim().to_string());
        if let Some(url) = url {
            self.props.external_graphic_url = url;
            self.availability.mark(Property::ExternalGraphicUrl);
        }
    }

    fn extract_label(&mut self) {
        let Some(text) = self.text_symbolizer() else {
            log::debug!("No TextSymbolizer; label properties keep their defaults");
            return;
        };
        let defaults = PropertyModel::default();

        let label = text
            .child("Label")
            .and_then(|label| label.child("PropertyName"))
            .map(|name| name.text().trim().to_string());

        let font = text.child("Font");
        let font_param = |name: &str| font.and_then(|font| parameter_in(font, name));
        let font_family = font_param("font-family");
        let font_size = font_param("font-size");
        let font_weight = font_param("font-weight");
        let font_style = font_param("font-style");

        let font_color = text.child("Fill").and_then(|fill| parameter_in(fill, "fill"));

        let halo = text.child("Halo");
        let halo_radius = halo
            .and_then(|halo| halo.child("Radius"))
            .map(|radius| radius.text().trim().to_string());
        let halo_color = halo
            .and_then(|halo| halo.child("Fill"))
            .and_then(|fill| parameter_in(fill, "fill"));

        if let Some(label) = label {
            self.props.label_attribute = label;
            self.availability.mark(Property::LabelAttribute);
        }
        if let Some(family) = font_family {
            self.props.font_family = family;
            self.availability.mark(Property::FontFamily);
        }
        if let Some(size) = font_size {
            self.props.font_size = number_or(&size, defaults.font_size, "font-size");
            self.availability.mark(Property::FontSize);
        }
        if let Some(weight) = font_weight {
            self.props.font_weight = weight;
            self.availability.mark(Property::FontWeight);
        }
        if let Some(style) = font_style {
            self.props.font_style = style;
            self.availability.mark(Property::FontStyle);
        }
        if let Some(color) = font_color {
            self.props.font_color = color;
            self.availability.mark(Property::FontColor);
        }
        if let Some(radius) = halo_radius {
            self.props.halo_radius = number_or(&radius, defaults.halo_radius, "halo radius");
            self.availability.mark(Property::HaloRadius);
        }
        if let Some(color) = halo_color {
            self.props.halo_color = color;
            self.availability.mark(Property::HaloColor);
        }
    }

    fn extract_label_rule(&mut self) {
        let Some(rule) = self.label_rule() else {
            return;
        };

        let zoom = rule
            .child("MaxScaleDenominator")
            .and_then(|max| {
                let text = max.text();
                let scale = parse_number(&text);
                if scale.is_none() {
                    log::debug!("Malformed MaxScaleDenominator {:?}", text.trim());
                }
                scale
            })
            .and_then(scale::scale_to_zoom_level);

        if let Some(zoom) = zoom {
            self.props.static_label = false;
            self.props.min_zoom = zoom;
            self.availability.mark(Property::MinZoom);
        }
        self.availability.mark(Property::StaticLabel);
    }

    fn extract_vendor_options(&mut self) {
        if let Some(group) = self.vendor_option("group") {
            self.props.suppress_duplicates = group.trim() == "yes";
            self.availability.mark(Property::SuppressDuplicates);
        }
        if let Some(repeat) = self.vendor_option("repeat") {
            self.props.repeat = parse_number(&repeat)
                .map(|n| n.round().max(0.0) as u32)
                .unwrap_or_else(|| {
                    log::debug!("Malformed repeat value {:?}, using 0", repeat.trim());
                    0
                });
            self.availability.mark(Property::Repeat);
        }
    }

    /// Offer the standard controls of every symbolizer kind present, whether
    /// or not each property has backing markup yet.
    fn mark_symbolizer_kinds(&mut self) {
        let kinds: [(&str, &[Property]); 4] = [
            ("PolygonSymbolizer", POLYGON_PROPERTIES),
            ("LineSymbolizer", LINE_PROPERTIES),
            ("PointSymbolizer", POINT_PROPERTIES),
            ("TextSymbolizer", TEXT_PROPERTIES),
        ];
        for (kind, properties) in kinds {
            if self.tree.contains(kind) {
                self.availability.mark_all(properties);
            }
        }
    }

    /// First parameter with `name` across the holders matched by `scopes`,
    /// taken in document order.
    fn parameter(&self, scopes: &[&[&str]], name: &str) -> Option<String> {
        let mut holders: Vec<_> = scopes
            .iter()
            .flat_map(|selector| self.tree.select(selector))
            .collect();
        holders.sort();
        if holders.len() > 1 {
            log::debug!(
                "{} holders for {:?}; first match in document order wins",
                holders.len(),
                name
            );
        }

        holders
            .iter()
            .filter_map(|path| self.tree.get(path))
            .find_map(|holder| parameter_in(holder, name))
    }

    fn scalar(&self, selector: &[&str]) -> Option<String> {
        self.tree
            .select_first(selector)
            .map(|el| el.text().trim().to_string())
    }

    fn label_rule(&self) -> Option<&'a Element> {
        let tree: &'a StyleTree = self.tree;
        tree.select(&["Rule"])
            .into_iter()
            .filter_map(|path| tree.get(&path))
            .find(|rule| scope::is_label_rule(rule))
    }

    /// The label rule's text symbolizer, else the first in the document.
    fn text_symbolizer(&self) -> Option<&'a Element> {
        let tree: &'a StyleTree = self.tree;
        self.label_rule()
            .and_then(|rule| document::select_first(rule, &["TextSymbolizer"]))
            .or_else(|| tree.select_first(&["TextSymbolizer"]))
    }

    /// Vendor option from the label's text symbolizer, else from anywhere
    /// in the document.
    fn vendor_option(&self, name: &str) -> Option<String> {
        let tree: &'a StyleTree = self.tree;
        let find_in = |el: &'a Element| {
            std::iter::once(el)
                .chain(el.descendants())
                .find(|el| scope::is_vendor_option(el, name))
                .map(Element::text)
        };
        self.text_symbolizer()
            .and_then(find_in)
            .or_else(|| find_in(tree.root()))
    }
}

/// Trimmed text of the first parameter named `name` directly inside `holder`.
pub(crate) fn parameter_in(holder: &Element, name: &str) -> Option<String> {
    holder
        .elements()
        .find(|el| scope::is_parameter_named(el, name))
        .map(|el| el.text().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Extraction {
        let tree = StyleTree::parse(text).unwrap();
        Extractor::new(&tree).extract()
    }

    #[test]
    fn test_scoped_fill_ignores_text_fill() {
        let doc = r##"<Style>
  <TextSymbolizer><Fill><CssParameter name="fill">#111111</CssParameter></Fill></TextSymbolizer>
  <PolygonSymbolizer><Fill><CssParameter name="fill">#cccccc</CssParameter></Fill></PolygonSymbolizer>
</Style>"##;
        let result = extract(doc);
        assert_eq!(result.properties.fill, "#cccccc");
        assert_eq!(result.properties.font_color, "#111111");
    }

    #[test]
    fn test_hatch_is_not_point_shape() {
        let doc = r##"<Style><PolygonSymbolizer><Fill><GraphicFill><Graphic><Mark>
  <WellKnownName>shape://slash</WellKnownName>
</Mark></Graphic></GraphicFill></Fill></PolygonSymbolizer></Style>"##;
        let result = extract(doc);
        assert_eq!(result.properties.hatch_pattern, "shape://slash");
        assert_eq!(result.properties.well_known_name, "");
    }

    #[test]
    fn test_malformed_numbers_use_defaults() {
        let doc = r##"<Style><LineSymbolizer><Stroke>
  <CssParameter name="stroke-width">wide</CssParameter>
  <CssParameter name="stroke-opacity">0.4</CssParameter>
</Stroke></LineSymbolizer></Style>"##;
        let result = extract(doc);
        assert_eq!(result.properties.stroke_width, 1.0);
        assert_eq!(result.properties.stroke_opacity, 0.4);
        assert!(result.availability.is_available(Property::StrokeWidth));
    }

    #[test]
    fn test_label_rule_without_scale_is_static() {
        let doc = r##"<FeatureTypeStyle><Rule><Title>GeneratedLabelRule</Title>
  <TextSymbolizer><Label><PropertyName>NAME</PropertyName></Label></TextSymbolizer>
</Rule></FeatureTypeStyle>"##;
        let result = extract(doc);
        assert!(result.properties.static_label);
        assert_eq!(result.properties.label_attribute, "NAME");
    }

    #[test]
    fn test_non_positive_scale_is_static() {
        let doc = r##"<FeatureTypeStyle><Rule><Title>GeneratedLabelRule</Title>
  <MaxScaleDenominator>0</MaxScaleDenominator>
</Rule></FeatureTypeStyle>"##;
        let result = extract(doc);
        assert!(result.properties.static_label);
        assert_eq!(result.properties.min_zoom, 0);
    }

    #[test]
    fn test_vendor_options() {
        let doc = r##"<TextSymbolizer>
  <VendorOption name="group">yes</VendorOption>
  <VendorOption name="repeat">150</VendorOption>
</TextSymbolizer>"##;
        let result = extract(doc);
        assert!(result.properties.suppress_duplicates);
        assert_eq!(result.properties.repeat, 150);
    }

    #[test]
    fn test_kind_availability_without_parameters() {
        let result = extract("<Style><PolygonSymbolizer/></Style>");
        assert!(result.availability.is_available(Property::StrokeDasharray));
        assert!(result.availability.is_available(Property::HatchPattern));
        assert!(!result.availability.is_available(Property::Size));
        assert!(!result.availability.is_available(Property::LabelAttribute));
    }

    #[test]
    fn test_external_graphic_url() {
        let doc = r##"<PointSymbolizer xmlns:xlink="http://www.w3.org/1999/xlink"><Graphic><ExternalGraphic>
  <OnlineResource xlink:type="simple" xlink:href=" icons/pin.svg "/>
  <Format>image/svg+xml</Format>
</ExternalGraphic></Graphic></PointSymbolizer>"##;
        let result = extract(doc);
        assert_eq!(result.properties.external_graphic_url, "icons/pin.svg");
    }

    #[test]
    fn test_vendor_options_prefer_label_rule() {
        let doc = r##"<FeatureTypeStyle>
  <Rule><TextSymbolizer>
    <VendorOption name="group">no</VendorOption>
    <VendorOption name="repeat">5</VendorOption>
  </TextSymbolizer></Rule>
  <Rule><Title>GeneratedLabelRule</Title><TextSymbolizer>
    <VendorOption name="group">yes</VendorOption>
    <VendorOption name="repeat">100</VendorOption>
  </TextSymbolizer></Rule>
</FeatureTypeStyle>"##;
        let props = extract(doc).properties;
        assert!(props.suppress_duplicates);
        assert_eq!(props.repeat, 100);
    }

    #[test]
    fn test_vendor_option_outside_text_symbolizer() {
        let doc = r##"<FeatureTypeStyle><Rule><TextSymbolizer/></Rule>
  <VendorOption name="repeat">40</VendorOption>
</FeatureTypeStyle>"##;
        assert_eq!(extract(doc).properties.repeat, 40);
    }
}
