//! Parsing options and configuration.

/// Options for parsing DOCX documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for optional parts
    pub error_mode: ErrorMode,

    /// Whether to read core properties (`docProps/core.xml`)
    pub include_metadata: bool,

    /// Apply Unicode NFC normalization to all text
    pub normalize: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (ignore malformed optional parts).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable metadata extraction.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            include_metadata: true,
            normalize: false,
        }
    }
}

/// Error handling mode during parsing.
///
/// Only optional parts (styles, core properties) are affected; a broken
/// main document part is always an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip malformed optional parts and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .lenient()
            .with_metadata(false)
            .with_normalization(true);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.include_metadata);
        assert!(options.normalize);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.include_metadata);
        assert!(!options.normalize);
    }
}
