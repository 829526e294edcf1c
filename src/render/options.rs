//! Rendering options and configuration.

/// Trimmed length (in characters) below which a bold-led paragraph is
/// promoted to a level-1 heading.
pub const DEFAULT_HEADING_MAX_CHARS: usize = 100;

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Value of the `lang` attribute on the `<html>` element
    pub lang: String,

    /// Escape `&`, `<`, `>` and `"` in document text
    pub escape_html: bool,

    /// Explicit page title
    pub title: Option<String>,

    /// Use the document's metadata title when no explicit title is set
    pub use_document_title: bool,

    /// Bold-led paragraphs shorter than this become level-1 headings
    pub heading_max_chars: usize,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Enable or disable HTML escaping of document text.
    ///
    /// Disabling embeds text verbatim, so documents containing markup
    /// characters produce broken output.
    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    /// Set an explicit page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Take the page title from document metadata.
    pub fn with_document_title(mut self, enable: bool) -> Self {
        self.use_document_title = enable;
        self
    }

    /// Set the heading promotion threshold.
    pub fn with_heading_max_chars(mut self, chars: usize) -> Self {
        self.heading_max_chars = chars;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            lang: "ko".to_string(),
            escape_html: true,
            title: None,
            use_document_title: false,
            heading_max_chars: DEFAULT_HEADING_MAX_CHARS,
            collect_stats: false,
        }
    }
}
