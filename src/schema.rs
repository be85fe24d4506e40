//! Layer attribute catalog used to validate label attributes.
//!
//! The catalog itself (typically a remote schema-description service) lives
//! outside this crate; only the attribute name list it returns is consumed.

use crate::error::{Error, Result};
use crate::model::PropertyModel;

/// Source of attribute names for a data layer.
pub trait AttributeCatalog {
    /// Attribute names of `layer`, as spelled by the data source.
    fn attribute_names(&self, layer: &str) -> Result<Vec<String>>;
}

impl<F> AttributeCatalog for F
where
    F: Fn(&str) -> Result<Vec<String>>,
{
    fn attribute_names(&self, layer: &str) -> Result<Vec<String>> {
        self(layer)
    }
}

/// Resolve the label attribute against the layer's catalog.
///
/// Returns `Ok(None)` when no label is requested, otherwise the catalog's
/// spelling of the attribute (matched ignoring case).
///
/// # Errors
/// * [`Error::UnknownAttribute`] if the layer has no such attribute
/// * any error the catalog reports
///
/// # Example
/// ```
/// use sldstyle::schema::resolve_label_attribute;
/// use sldstyle::PropertyModel;
///
/// let catalog = |_: &str| -> sldstyle::Result<Vec<String>> {
///     Ok(vec!["NAME".to_string(), "POP".to_string()])
/// };
/// let props = PropertyModel {
///     label_attribute: "name".to_string(),
///     ..Default::default()
/// };
/// let resolved = resolve_label_attribute(&props, &catalog, "cities").unwrap();
/// assert_eq!(resolved.as_deref(), Some("NAME"));
/// ```
pub fn resolve_label_attribute(
    props: &PropertyModel,
    catalog: &dyn AttributeCatalog,
    layer: &str,
) -> Result<Option<String>> {
    let requested = props.label_attribute.trim();
    if requested.is_empty() {
        return Ok(None);
    }

    let names = catalog.attribute_names(layer)?;
    log::debug!("Layer {} has {} attributes", layer, names.len());

    let exact = names.iter().find(|name| name.as_str() == requested);
    let found = exact.or_else(|| names.iter().find(|name| name.eq_ignore_ascii_case(requested)));
    match found {
        Some(name) => Ok(Some(name.clone())),
        None => Err(Error::UnknownAttribute {
            attribute: requested.to_string(),
            layer: layer.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedCatalog {
        names: Vec<&'static str>,
        calls: Cell<usize>,
    }

    impl AttributeCatalog for FixedCatalog {
        fn attribute_names(&self, layer: &str) -> Result<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            if layer == "missing" {
                return Err(Error::Catalog(format!("no layer {}", layer)));
            }
            Ok(self.names.iter().map(|n| n.to_string()).collect())
        }
    }

    fn catalog() -> FixedCatalog {
        FixedCatalog {
            names: vec!["name", "NAME", "population"],
            calls: Cell::new(0),
        }
    }

    fn label(attribute: &str) -> PropertyModel {
        PropertyModel {
            label_attribute: attribute.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_label_skips_catalog() {
        let catalog = catalog();
        assert_eq!(resolve_label_attribute(&label(" "), &catalog, "roads").unwrap(), None);
        assert_eq!(catalog.calls.get(), 0);
    }

    #[test]
    fn test_exact_spelling_wins() {
        let resolved = resolve_label_attribute(&label("NAME"), &catalog(), "roads").unwrap();
        assert_eq!(resolved.as_deref(), Some("NAME"));
    }

    #[test]
    fn test_case_insensitive_match() {
        let resolved = resolve_label_attribute(&label("Population"), &catalog(), "roads").unwrap();
        assert_eq!(resolved.as_deref(), Some("population"));
    }

    #[test]
    fn test_unknown_attribute() {
        let err = resolve_label_attribute(&label("area"), &catalog(), "roads").unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { ref attribute, .. } if attribute == "area"));
    }

    #[test]
    fn test_catalog_errors_propagate() {
        let err = resolve_label_attribute(&label("name"), &catalog(), "missing").unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }
}
