//! Editing one symbolizer kind leaves the markup of the others untouched.

use sldstyle::{apply, extract, PropertyModel};

const PARCELS: &str = include_str!("fixtures/parcels.sld");

/// Text from the first `open` to the end of the following `close`.
fn section<'a>(doc: &'a str, open: &str, close: &str) -> &'a str {
    let start = doc.find(open).unwrap_or_else(|| panic!("{} not found", open));
    let end = doc[start..].find(close).unwrap_or_else(|| panic!("{} not found", close)) + start;
    &doc[start..end + close.len()]
}

fn label_rule(doc: &str) -> &str {
    let title = doc.find("<Title>GeneratedLabelRule</Title>").unwrap();
    let start = doc[..title].rfind("<Rule>").unwrap();
    let end = doc[title..].find("</Rule>").unwrap() + title;
    &doc[start..end + "</Rule>".len()]
}

/// The fixture's polygon and line strokes agree, since stroke parameters
/// are written to every stroke holder on each apply.
#[test]
fn test_polygon_fill_edit_leaves_point_line_and_label() {
    let (props, _) = extract(PARCELS);
    let before = apply(PARCELS, &props);

    let edited = PropertyModel {
        fill: "#ff0000".to_string(),
        fill_opacity: 0.4,
        ..props.clone()
    };
    let after = apply(&before, &edited);

    assert_ne!(before, after);
    for (open, close) in [
        ("<LineSymbolizer>", "</LineSymbolizer>"),
        ("<PointSymbolizer>", "</PointSymbolizer>"),
        ("<Stroke>", "</Stroke>"),
    ] {
        assert_eq!(section(&before, open, close), section(&after, open, close));
    }
    assert_eq!(label_rule(&before), label_rule(&after));

    let (reread, _) = extract(&after);
    assert_eq!(reread.fill, "#ff0000");
    assert_eq!(reread.size, props.size);
    assert_eq!(reread.stroke, props.stroke);
    assert_eq!(reread.external_graphic_url, props.external_graphic_url);
    assert_eq!(reread.label_attribute, props.label_attribute);
}

#[test]
fn test_untouched_sections_keep_source_bytes() {
    let (props, _) = extract(PARCELS);
    let out = apply(PARCELS, &props);

    for (open, close) in [
        ("<PolygonSymbolizer>", "</PolygonSymbolizer>"),
        ("<LineSymbolizer>", "</LineSymbolizer>"),
        ("<PointSymbolizer>", "</PointSymbolizer>"),
    ] {
        assert_eq!(section(PARCELS, open, close), section(&out, open, close));
    }
}

#[test]
fn test_text_fill_is_not_a_polygon_fill() {
    let (props, _) = extract(PARCELS);
    let edited = PropertyModel {
        fill: "#00ff00".to_string(),
        ..props.clone()
    };
    let (reread, _) = extract(&apply(PARCELS, &edited));
    assert_eq!(reread.font_color, props.font_color);
    assert_eq!(reread.halo_color, props.halo_color);
}

const SPLIT_STROKES: &str = r##"<StyledLayerDescriptor version="1.0.0">
  <FeatureTypeStyle>
    <Rule>
      <PolygonSymbolizer>
        <Fill>
          <CssParameter name="fill">#cccccc</CssParameter>
        </Fill>
        <Stroke>
          <CssParameter name="stroke">#111111</CssParameter>
        </Stroke>
      </PolygonSymbolizer>
    </Rule>
    <Rule>
      <LineSymbolizer>
        <Stroke>
          <CssParameter name="stroke">#222222</CssParameter>
        </Stroke>
      </LineSymbolizer>
    </Rule>
  </FeatureTypeStyle>
</StyledLayerDescriptor>"##;

#[test]
fn test_first_stroke_holder_wins() {
    let (props, _) = extract(SPLIT_STROKES);
    assert_eq!(props.stroke, "#111111");
}

#[test]
fn test_fill_edit_aligns_stroke_holders() {
    let (props, _) = extract(SPLIT_STROKES);
    let edited = PropertyModel {
        fill: "#ff0000".to_string(),
        ..props
    };
    let out = apply(SPLIT_STROKES, &edited);

    let line = section(&out, "<LineSymbolizer>", "</LineSymbolizer>");
    assert!(line.contains("#111111"));
    assert!(!out.contains("#222222"));
    assert!(section(&out, "<PolygonSymbolizer>", "</PolygonSymbolizer>").contains("#ff0000"));
}
