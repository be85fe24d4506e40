//! Editable style properties.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default fill color.
pub const DEFAULT_FILL: &str = "#808080";
/// Default stroke color.
pub const DEFAULT_STROKE: &str = "#000000";
/// Default mark size in pixels.
pub const DEFAULT_SIZE: f64 = 6.0;
/// Default label font size in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// The flat set of human-editable style properties.
///
/// Values are plain data; a model carries no reference to the document it
/// was extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyModel {
    // Fill
    /// Fill color (`#rrggbb`)
    pub fill: String,

    /// Fill opacity in `[0, 1]`
    pub fill_opacity: f64,

    /// Hatch pattern well-known name (`shape://horline` etc.), the
    /// `"outline"` sentinel, or empty for a solid fill
    pub hatch_pattern: String,

    // Stroke
    /// Stroke color
    pub stroke: String,

    /// Stroke width in pixels
    pub stroke_width: f64,

    /// Stroke opacity in `[0, 1]`
    pub stroke_opacity: f64,

    /// Dash pattern (`"5 2"`), empty for a solid line
    pub stroke_dasharray: String,

    /// Line cap (`butt`, `round`, `square`)
    pub stroke_linecap: String,

    /// Line join (`miter`, `round`, `bevel`)
    pub stroke_linejoin: String,

    // Point graphic
    /// Graphic size in pixels
    pub size: f64,

    /// Graphic rotation in degrees
    pub rotation: f64,

    /// Built-in marker shape (`circle`, `square`, ...), empty when unset
    pub well_known_name: String,

    /// External icon URL, empty when unset
    pub external_graphic_url: String,

    // Label
    /// Feature attribute rendered as label text, empty for no label
    pub label_attribute: String,

    /// Label font family
    pub font_family: String,

    /// Label font size in pixels
    pub font_size: f64,

    /// Label font weight (`normal`, `bold`)
    pub font_weight: String,

    /// Label font style (`normal`, `italic`, `oblique`)
    pub font_style: String,

    /// Label text color
    pub font_color: String,

    /// Halo color
    pub halo_color: String,

    /// Halo radius in pixels
    pub halo_radius: f64,

    /// Show labels at every zoom level instead of from `min_zoom` on
    pub static_label: bool,

    /// First zoom level at which labels show when not static
    pub min_zoom: u8,

    /// Suppress duplicate labels (`group` vendor option)
    pub suppress_duplicates: bool,

    /// Label repeat spacing in pixels (`repeat` vendor option)
    pub repeat: u32,
}

impl PropertyModel {
    /// Create a model holding every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a label should be generated.
    pub fn has_label(&self) -> bool {
        !self.label_attribute.trim().is_empty()
    }

    /// Check whether the hatch pattern selects a graphic fill.
    pub fn is_hatched(&self) -> bool {
        let pattern = self.hatch_pattern.trim();
        !pattern.is_empty() && pattern != OUTLINE_PATTERN
    }

    /// Check whether the hatch pattern selects an outline-only polygon.
    pub fn is_outline(&self) -> bool {
        self.hatch_pattern.trim() == OUTLINE_PATTERN
    }
}

/// Hatch pattern sentinel for a transparent polygon fill.
pub const OUTLINE_PATTERN: &str = "outline";

impl Default for PropertyModel {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL.to_string(),
            fill_opacity: 1.0,
            hatch_pattern: String::new(),
            stroke: DEFAULT_STROKE.to_string(),
            stroke_width: 1.0,
            stroke_opacity: 1.0,
            stroke_dasharray: String::new(),
            stroke_linecap: "butt".to_string(),
            stroke_linejoin: "miter".to_string(),
            size: DEFAULT_SIZE,
            rotation: 0.0,
            well_known_name: String::new(),
            external_graphic_url: String::new(),
            label_attribute: String::new(),
            font_family: "SansSerif".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: "normal".to_string(),
            font_style: "normal".to_string(),
            font_color: "#000000".to_string(),
            halo_color: "#ffffff".to_string(),
            halo_radius: 1.0,
            static_label: true,
            min_zoom: 0,
            suppress_duplicates: false,
            repeat: 0,
        }
    }
}

/// Names of the editable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    Fill,
    FillOpacity,
    HatchPattern,
    Stroke,
    StrokeWidth,
    StrokeOpacity,
    StrokeDasharray,
    StrokeLinecap,
    StrokeLinejoin,
    Size,
    Rotation,
    WellKnownName,
    ExternalGraphicUrl,
    LabelAttribute,
    FontFamily,
    FontSize,
    FontWeight,
    FontStyle,
    FontColor,
    HaloColor,
    HaloRadius,
    StaticLabel,
    MinZoom,
    SuppressDuplicates,
    Repeat,
}

impl Property {
    /// Every property, in declaration order.
    pub const ALL: [Property; 25] = [
        Property::Fill,
        Property::FillOpacity,
        Property::HatchPattern,
        Property::Stroke,
        Property::StrokeWidth,
        Property::StrokeOpacity,
        Property::StrokeDasharray,
        Property::StrokeLinecap,
        Property::StrokeLinejoin,
        Property::Size,
        Property::Rotation,
        Property::WellKnownName,
        Property::ExternalGraphicUrl,
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

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Property::Fill => "fill",
            Property::FillOpacity => "fill-opacity",
            Property::HatchPattern => "hatch-pattern",
            Property::Stroke => "stroke",
            Property::StrokeWidth => "stroke-width",
            Property::StrokeOpacity => "stroke-opacity",
            Property::StrokeDasharray => "stroke-dasharray",
            Property::StrokeLinecap => "stroke-linecap",
            Property::StrokeLinejoin => "stroke-linejoin",
            Property::Size => "size",
            Property::Rotation => "rotation",
            Property::WellKnownName => "well-known-name",
            Property::ExternalGraphicUrl => "external-graphic-url",
            Property::LabelAttribute => "label-attribute",
            Property::FontFamily => "font-family",
            Property::FontSize => "font-size",
            Property::FontWeight => "font-weight",
            Property::FontStyle => "font-style",
            Property::FontColor => "font-color",
            Property::HaloColor => "halo-color",
            Property::HaloRadius => "halo-radius",
            Property::StaticLabel => "static-label",
            Property::MinZoom => "min-zoom",
            Property::SuppressDuplicates => "suppress-duplicates",
            Property::Repeat => "repeat",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::Other(format!("Unknown style property: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let props = PropertyModel::default();
        assert_eq!(props.fill, DEFAULT_FILL);
        assert_eq!(props.fill_opacity, 1.0);
        assert!(props.static_label);
        assert!(!props.has_label());
        assert!(!props.is_hatched());
    }

    #[test]
    fn test_hatch_predicates() {
        let mut props = PropertyModel::new();
        props.hatch_pattern = "shape://slash".to_string();
        assert!(props.is_hatched());
        assert!(!props.is_outline());

        props.hatch_pattern = OUTLINE_PATTERN.to_string();
        assert!(!props.is_hatched());
        assert!(props.is_outline());
    }

    #[test]
    fn test_property_names_roundtrip() {
        for property in Property::ALL {
            assert_eq!(property.name().parse::<Property>().unwrap(), property);
        }
        assert!("no-such-thing".parse::<Property>().is_err());
    }

    #[test]
    fn test_blank_label_is_no_label() {
        let mut props = PropertyModel::new();
        props.label_attribute = "  ".to_string();
        assert!(!props.has_label());
    }
}
