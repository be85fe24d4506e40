//! Extraction of editable properties from style documents.
//!
//! Simple fill and stroke parameters are read from the first parameter
//! holder of the right symbolizer scope; graphic scalars from the point
//! symbolizer's `Graphic`; label properties from the generated label rule's
//! `TextSymbolizer` (or the first one in the document). The generated label
//! rule's `MaxScaleDenominator` becomes a minimum zoom level.

mod extractor;
mod value;

pub use extractor::{Extraction, Extractor};
pub use value::parse_number;

use crate::document::StyleTree;
use crate::error::Result;
use crate::model::{AvailabilityMap, PropertyModel};

/// Extract properties from a style document.
///
/// Never fails: an unparsable document yields the defaults and an empty
/// availability map.
///
/// # Example
///
/// ```
/// use sldstyle::extract::extract;
///
/// let doc = r##"<StyledLayerDescriptor><PolygonSymbolizer><Fill>
///   <CssParameter name="fill">#cccccc</CssParameter>
/// </Fill></PolygonSymbolizer></StyledLayerDescriptor>"##;
/// let (props, availability) = extract(doc);
/// assert_eq!(props.fill, "#cccccc");
/// assert!(availability.is_available(sldstyle::Property::Fill));
/// ```
pub fn extract(doc: &str) -> (PropertyModel, AvailabilityMap) {
    match try_extract(doc) {
        Ok(extraction) => (extraction.properties, extraction.availability),
        Err(e) => {
            log::warn!("Style document could not be parsed, using defaults: {}", e);
            (PropertyModel::default(), AvailabilityMap::new())
        }
    }
}

/// Extract properties, reporting documents that cannot be parsed.
pub fn try_extract(doc: &str) -> Result<Extraction> {
    let tree = StyleTree::parse(doc)?;
    Ok(extract_tree(&tree))
}

/// Extract properties from an already parsed tree.
pub fn extract_tree(tree: &StyleTree) -> Extraction {
    Extractor::new(tree).extract()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Property;

    #[test]
    fn test_unparsable_document_yields_defaults() {
        let (props, availability) = extract("<StyledLayerDescriptor><Fill>");
        assert_eq!(props, PropertyModel::default());
        assert!(availability.is_empty());
    }

    #[test]
    fn test_try_extract_reports_error() {
        assert!(try_extract("not markup at all").is_err());
    }

    #[test]
    fn test_empty_style_has_nothing_available() {
        let extraction = try_extract("<StyledLayerDescriptor/>").unwrap();
        assert_eq!(extraction.properties, PropertyModel::default());
        assert!(!extraction.availability.is_available(Property::Fill));
    }
}
