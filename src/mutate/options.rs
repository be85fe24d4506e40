//! Mutation options and configuration.

/// Options for applying properties to a style document.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Spacing of the generated hatch pattern (`Graphic/Size`)
    pub hatch_size: f64,

    /// Line width of the generated hatch pattern
    pub hatch_stroke_width: f64,

    /// Indentation unit for generated markup; detected from the document
    /// when unset
    pub indent: Option<String>,
}

impl ApplyOptions {
    /// Create new apply options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Report unparsable documents as errors.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Pass unparsable documents through unchanged.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the hatch pattern spacing.
    pub fn with_hatch_size(mut self, size: f64) -> Self {
        self.hatch_size = size;
        self
    }

    /// Set the hatch pattern line width.
    pub fn with_hatch_stroke_width(mut self, width: f64) -> Self {
        self.hatch_stroke_width = width;
        self
    }

    /// Set the indentation unit used for generated markup.
    pub fn with_indent(mut self, unit: impl Into<String>) -> Self {
        self.indent = Some(unit.into());
        self
    }
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            hatch_size: DEFAULT_HATCH_SIZE,
            hatch_stroke_width: DEFAULT_HATCH_STROKE_WIDTH,
            indent: None,
        }
    }
}

/// Default hatch pattern spacing.
pub const DEFAULT_HATCH_SIZE: f64 = 8.0;

/// Default hatch pattern line width.
pub const DEFAULT_HATCH_STROKE_WIDTH: f64 = 1.0;

/// Error handling mode when a document cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Return the parse error
    Strict,
    /// Return the document unchanged
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_options_builder() {
        let options = ApplyOptions::new()
            .strict()
            .with_hatch_size(12.0)
            .with_hatch_stroke_width(2.0)
            .with_indent("\t");

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.hatch_size, 12.0);
        assert_eq!(options.hatch_stroke_width, 2.0);
        assert_eq!(options.indent.as_deref(), Some("\t"));
    }

    #[test]
    fn test_default_options() {
        let options = ApplyOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.hatch_size, DEFAULT_HATCH_SIZE);
        assert!(options.indent.is_none());
    }
}
