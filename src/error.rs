//! Error types for sldstyle library.

use thiserror::Error;

/// Result type alias for sldstyle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the fallible (`try_*`) entry points.
///
/// The total entry points ([`crate::extract()`], [`crate::apply()`]) never
/// return these; they degrade to defaults or pass the document through.
#[derive(Error, Debug)]
pub enum Error {
    /// The markup could not be tokenized.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The markup tokenized but does not form a balanced tree.
    #[error("Malformed style document: {0}")]
    Malformed(String),

    /// The text is not recognized as a style document.
    #[error("Unknown format: not a StyledLayerDescriptor document")]
    UnknownFormat,

    /// Error serializing or deserializing a property model.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The label attribute is not part of the layer schema.
    #[error("Unknown attribute '{attribute}' for layer '{layer}'")]
    UnknownAttribute {
        /// Requested attribute name
        attribute: String,
        /// Layer whose schema was consulted
        layer: String,
    },

    /// The attribute catalog failed to describe a layer.
    #[error("Attribute catalog error: {0}")]
    Catalog(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
