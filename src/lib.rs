//! # sldstyle
//!
//! Two-way editing of map style documents (OGC Styled Layer Descriptor and
//! Symbology Encoding).
//!
//! A style document is reduced to a flat [`PropertyModel`] of editable
//! values (fill, stroke, point graphic, label) and the model is written back
//! into the document, leaving every part of the markup that was not edited
//! exactly as it was.
//!
//! ## Quick Start
//!
//! ```
//! use sldstyle::{apply, extract};
//!
//! let doc = r##"<StyledLayerDescriptor version="1.0.0">
//!   <PolygonSymbolizer>
//!     <Fill>
//!       <CssParameter name="fill">#cccccc</CssParameter>
//!     </Fill>
//!   </PolygonSymbolizer>
//! </StyledLayerDescriptor>"##;
//!
//! // Read the editable properties
//! let (mut props, availability) = extract(doc);
//! assert_eq!(props.fill, "#cccccc");
//! assert!(availability.is_available(sldstyle::Property::Fill));
//!
//! // Change them and write them back
//! props.fill = "#ff0000".to_string();
//! props.fill_opacity = 0.5;
//! let updated = apply(doc, &props);
//!
//! let (reread, _) = extract(&updated);
//! assert_eq!(reread.fill, "#ff0000");
//! assert_eq!(reread.fill_opacity, 0.5);
//! ```
//!
//! ## Features
//!
//! - **Lossless**: untouched markup, comments and indentation survive
//! - **Scoped**: polygon, line, point and label properties never leak into
//!   each other
//! - **Generated label rule**: a single owned `Rule` holds the label, with an
//!   optional zoom gate
//! - **Total entry points**: [`extract`] and [`apply`] never fail

pub mod detect;
pub mod document;
pub mod error;
pub mod extract;
pub mod model;
pub mod mutate;
pub mod scale;
pub mod schema;
pub mod scope;

// Re-export commonly used types
pub use detect::{detect_style_format, is_style_document, ParameterFlavor, StyleFormat};
pub use document::StyleTree;
pub use error::{Error, Result};
pub use extract::{extract, try_extract, Extraction};
pub use model::{from_json, to_json, AvailabilityMap, JsonFormat, Property, PropertyModel};
pub use mutate::{apply, try_apply, ApplyOptions, ApplyResult, ErrorMode, MutationStats};
pub use scale::{scale_to_zoom, scale_to_zoom_level, zoom_to_scale};
pub use schema::{resolve_label_attribute, AttributeCatalog};

/// Extract properties and serialize them as JSON.
///
/// # Example
///
/// ```
/// use sldstyle::{extract_json, JsonFormat};
///
/// let json = extract_json("<StyledLayerDescriptor/>", JsonFormat::Compact).unwrap();
/// assert!(json.contains("\"fill\":\"#808080\""));
/// ```
pub fn extract_json(doc: &str, format: JsonFormat) -> Result<String> {
    let (props, _) = extract(doc);
    to_json(&props, format)
}

/// Apply properties given as a JSON object.
///
/// Missing fields take their defaults.
pub fn apply_json(doc: &str, json: &str) -> Result<String> {
    let props = from_json(json)?;
    Ok(apply(doc, &props))
}

/// Builder for reading and rewriting style documents.
///
/// # Example
///
/// ```
/// use sldstyle::StyleEditor;
///
/// let doc = r##"<StyledLayerDescriptor><LineSymbolizer><Stroke>
///   <CssParameter name="stroke">#000000</CssParameter>
/// </Stroke></LineSymbolizer></StyledLayerDescriptor>"##;
///
/// let result = StyleEditor::new()
///     .strict()
///     .edit(doc, |props| props.stroke = "#0000ff".to_string())?;
/// assert!(result.document.contains("#0000ff"));
/// # Ok::<(), sldstyle::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleEditor {
    options: ApplyOptions,
}

impl StyleEditor {
    /// Create a new editor builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report unparsable documents as errors.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Pass unparsable documents through unchanged.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Set the hatch pattern spacing.
    pub fn with_hatch_size(mut self, size: f64) -> Self {
        self.options = self.options.with_hatch_size(size);
        self
    }

    /// Set the hatch pattern line width.
    pub fn with_hatch_stroke_width(mut self, width: f64) -> Self {
        self.options = self.options.with_hatch_stroke_width(width);
        self
    }

    /// Set the indentation unit of generated markup.
    pub fn with_indent(mut self, unit: impl Into<String>) -> Self {
        self.options = self.options.with_indent(unit);
        self
    }

    /// Options the editor applies with.
    pub fn options(&self) -> &ApplyOptions {
        &self.options
    }

    /// Extract properties from a document.
    pub fn extract(&self, doc: &str) -> Result<Extraction> {
        match try_extract(doc) {
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Style document could not be parsed, using defaults: {}", e);
                Ok(Extraction::default())
            }
            result => result,
        }
    }

    /// Apply properties to a document.
    pub fn apply(&self, doc: &str, props: &PropertyModel) -> Result<ApplyResult> {
        try_apply(doc, props, &self.options)
    }

    /// Extract the document's properties, let `edit` change them and apply
    /// the result, parsing the document once.
    pub fn edit<F>(&self, doc: &str, edit: F) -> Result<ApplyResult>
    where
        F: FnOnce(&mut PropertyModel),
    {
        let mut tree = match StyleTree::parse(doc) {
            Ok(tree) => tree,
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Style document could not be parsed, left unchanged: {}", e);
                return Ok(ApplyResult::unchanged(doc));
            }
            Err(e) => return Err(e),
        };

        let mut props = extract::extract_tree(&tree).properties;
        edit(&mut props);
        let stats = mutate::apply_tree(doc, &mut tree, &props, &self.options);
        Ok(ApplyResult::new(tree.to_xml(), stats))
    }
}
