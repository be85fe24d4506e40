//! JSON rendering for property models.

use super::PropertyModel;
use crate::error::Result;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a property model to JSON.
pub fn to_json(props: &PropertyModel, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(props)?,
        JsonFormat::Compact => serde_json::to_string(props)?,
    };
    Ok(json)
}

/// Read a property model from JSON; missing fields take their defaults.
pub fn from_json(json: &str) -> Result<PropertyModel> {
    Ok(serde_json::from_str(json)?)
}
