//! Property model types shared by extraction and mutation.
//!
//! A [`PropertyModel`] is the flat, human-editable view of a style document;
//! an [`AvailabilityMap`] records which of its properties the document backs.

mod availability;
mod json;
mod properties;

pub use availability::AvailabilityMap;
pub use json::{from_json, to_json, JsonFormat};
pub use properties::{
    Property, PropertyModel, DEFAULT_FILL, DEFAULT_FONT_SIZE, DEFAULT_SIZE, DEFAULT_STROKE,
    OUTLINE_PATTERN,
};
