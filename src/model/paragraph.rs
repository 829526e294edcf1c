//! Paragraph and run types.

use serde::{Deserialize, Serialize};

/// Style name a paragraph takes when it declares none.
pub const DEFAULT_STYLE_NAME: &str = "Normal";

/// A paragraph of text content.
///
/// `text` is kept separately from `runs`: runs nested inside hyperlinks
/// contribute to the text but are not direct runs of the paragraph, so a
/// paragraph can carry text with no runs at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Full paragraph text
    pub text: String,

    /// Resolved style name (e.g. "Heading 1")
    pub style_name: String,

    /// Direct text runs in document order
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph with the default style.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            style_name: DEFAULT_STYLE_NAME.to_string(),
            runs: Vec::new(),
        }
    }

    /// Create a paragraph with a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_run(TextRun::new(text));
        p
    }

    /// Create a paragraph from runs; the text is their concatenation.
    pub fn from_runs(runs: impl IntoIterator<Item = TextRun>) -> Self {
        let mut p = Self::new();
        for run in runs {
            p.add_run(run);
        }
        p
    }

    /// Create a paragraph with the given style name.
    pub fn styled(style_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_text(text).with_style(style_name)
    }

    /// Set the style name and return self.
    pub fn with_style(mut self, style_name: impl Into<String>) -> Self {
        self.style_name = style_name.into();
        self
    }

    /// Append a run, extending the paragraph text.
    pub fn add_run(&mut self, run: TextRun) {
        self.text.push_str(&run.text);
        self.runs.push(run);
    }

    /// Append text that is not part of a direct run (e.g. hyperlink text).
    pub fn add_detached_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Get the trimmed text.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.trimmed_text().is_empty()
    }

    /// Check if the first run is bold.
    pub fn starts_bold(&self) -> bool {
        self.runs.first().is_some_and(|r| r.bold)
    }

    /// Check if any run is bold.
    pub fn has_bold(&self) -> bool {
        self.runs.iter().any(|r| r.bold)
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// A run of text sharing formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Directly applied bold formatting
    pub bold: bool,
}

impl TextRun {
    /// Create a new non-bold run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
