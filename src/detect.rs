//! Style document format detection.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Element flavor used for named style parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterFlavor {
    /// `CssParameter` (SLD 1.0)
    #[default]
    Css,
    /// `SvgParameter` (Symbology Encoding 1.1)
    Svg,
}

impl ParameterFlavor {
    /// Local element name for this flavor.
    pub fn element_name(self) -> &'static str {
        match self {
            ParameterFlavor::Css => "CssParameter",
            ParameterFlavor::Svg => "SvgParameter",
        }
    }
}

/// Style document format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleFormat {
    /// SLD version (e.g., "1.0.0", "1.1.0")
    pub version: String,
    /// Parameter element flavor used by the document
    pub flavor: ParameterFlavor,
}

impl StyleFormat {
    /// Check if the document follows Symbology Encoding 1.1.
    pub fn is_se(&self) -> bool {
        self.version.starts_with("1.1")
    }
}

impl fmt::Display for StyleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SLD {}", self.version)
    }
}

const DEFAULT_VERSION: &str = "1.0.0";

fn root_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(?:[\w.-]+:)?StyledLayerDescriptor\b([^>]*)>").unwrap())
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\bversion\s*=\s*["']([^"']+)["']"#).unwrap())
}

fn parameter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(?:[\w.-]+:)?(CssParameter|SvgParameter)\b").unwrap())
}

/// Detect the style format of a document.
///
/// # Returns
/// * `Ok(StyleFormat)` if the text has a `StyledLayerDescriptor` root
/// * `Err(Error::UnknownFormat)` otherwise
///
/// # Example
/// ```
/// use sldstyle::detect::{detect_style_format, ParameterFlavor};
///
/// let format = detect_style_format(r#"<StyledLayerDescriptor version="1.1.0"/>"#).unwrap();
/// assert_eq!(format.version, "1.1.0");
/// assert_eq!(format.flavor, ParameterFlavor::Svg);
/// ```
pub fn detect_style_format(text: &str) -> Result<StyleFormat> {
    let root = root_regex().captures(text).ok_or(Error::UnknownFormat)?;
    let attributes = root.get(1).map_or("", |m| m.as_str());

    let version = version_regex()
        .captures(attributes)
        .and_then(|c| c.get(1))
        .map_or(DEFAULT_VERSION, |m| m.as_str())
        .to_string();

    let flavor = parameter_flavor(text).unwrap_or(if version.starts_with("1.1") {
        ParameterFlavor::Svg
    } else {
        ParameterFlavor::Css
    });

    Ok(StyleFormat { version, flavor })
}

/// Flavor of the first parameter element in the text, if any.
pub fn parameter_flavor(text: &str) -> Option<ParameterFlavor> {
    parameter_regex()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| match m.as_str() {
            "SvgParameter" => ParameterFlavor::Svg,
            _ => ParameterFlavor::Css,
        })
}

/// Check if text looks like a style document.
pub fn is_style_document(text: &str) -> bool {
    detect_style_format(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_sld_10() {
        let text = r#"<?xml version="1.0"?><StyledLayerDescriptor version="1.0.0" xmlns="http://www.opengis.net/sld"><CssParameter name="fill"/></StyledLayerDescriptor>"#;
        let format = detect_style_format(text).unwrap();
        assert_eq!(format.version, "1.0.0");
        assert_eq!(format.flavor, ParameterFlavor::Css);
        assert!(!format.is_se());
    }

    #[test]
    fn test_detect_prefixed_se_11() {
        let text = r#"<sld:StyledLayerDescriptor version='1.1.0' xmlns:sld="http://www.opengis.net/sld"></sld:StyledLayerDescriptor>"#;
        let format = detect_style_format(text).unwrap();
        assert_eq!(format.version, "1.1.0");
        assert_eq!(format.flavor, ParameterFlavor::Svg);
        assert!(format.is_se());
    }

    #[test]
    fn test_explicit_parameter_wins() {
        let text = r#"<StyledLayerDescriptor version="1.1.0"><se:CssParameter/></StyledLayerDescriptor>"#;
        assert_eq!(detect_style_format(text).unwrap().flavor, ParameterFlavor::Css);
    }

    #[test]
    fn test_missing_version_defaults() {
        let format = detect_style_format("<StyledLayerDescriptor>").unwrap();
        assert_eq!(format.version, DEFAULT_VERSION);
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_style_format("<html></html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
        assert!(!is_style_document("plain text"));
    }
}
