//! # undocx
//!
//! DOCX rubric extraction to static HTML, with SQLite row publishing.
//!
//! Documents are read into a small block model (paragraphs with runs,
//! tables with cell text) and rendered to a self-contained HTML page. The
//! rendered pages can then be copied into database rows by id.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undocx::{parse_file, render};
//!
//! fn main() -> undocx::Result<()> {
//!     let doc = parse_file("rubric.docx")?;
//!
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structural classification**: headings, bold-run paragraphs, tables
//! - **Safe output**: document text is HTML-escaped by default
//! - **Batch conversion**: manifest-driven, skips missing sources
//! - **Publishing**: single-transaction SQLite row updates
//! - **CJK support**: optional NFC normalization for Korean text

pub mod convert;
pub mod detect;
pub mod error;
pub mod manifest;
pub mod model;
pub mod parser;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use convert::{
    convert_batch, convert_file, convert_job, BatchReport, ConvertJob, ConvertOptions,
    ConvertOutcome,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocxFormat};
pub use error::{Error, Result};
pub use manifest::{Manifest, PostEntry};
pub use model::{Block, Document, Metadata, Paragraph, Table, TableCell, TableRow, TextRun};
pub use parser::{DocxParser, ErrorMode, ParseOptions};
pub use render::{
    ExtractionStats, Fragment, FragmentKind, HtmlRenderer, JsonFormat, RenderOptions,
    RenderResult,
};
pub use store::{RowUpdater, TargetColumn, UpdateOutcome, UpdateReport};

use std::io::{Read, Seek};
use std::path::Path;

/// Parse a DOCX file and return a structured document.
///
/// # Example
///
/// ```no_run
/// use undocx::parse_file;
///
/// let doc = parse_file("rubric.docx").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = DocxParser::open(path)?;
    parser.parse()
}

/// Parse a DOCX file with custom options.
///
/// # Example
///
/// ```no_run
/// use undocx::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().with_normalization(true);
/// let doc = parse_file_with_options("rubric.docx", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a DOCX from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = DocxParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a DOCX from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a DOCX from a seekable reader.
pub fn parse_reader<R: Read + Seek>(reader: R) -> Result<Document> {
    let parser = DocxParser::from_reader(reader)?;
    parser.parse()
}

/// Extract plain text from a DOCX file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_text(&doc))
}

/// Convert a DOCX file to an HTML page.
///
/// # Example
///
/// ```no_run
/// use undocx::to_html;
///
/// let html = to_html("rubric.docx").unwrap();
/// std::fs::write("rubric.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Convert a DOCX file to an HTML page with custom options.
pub fn to_html_with_options<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, options)
}

/// Convert a DOCX file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting DOCX documents.
///
/// # Example
///
/// ```no_run
/// use undocx::Undocx;
///
/// let html = Undocx::new()
///     .lenient()
///     .with_lang("en")
///     .with_document_title()
///     .parse("rubric.docx")?
///     .to_html()?;
/// # Ok::<(), undocx::Error>(())
/// ```
pub struct Undocx {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Undocx {
    /// Create a new Undocx builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Apply NFC normalization to document text.
    pub fn normalized(mut self) -> Self {
        self.parse_options = self.parse_options.with_normalization(true);
        self
    }

    /// Embed document text without HTML escaping.
    pub fn raw(mut self) -> Self {
        self.render_options = self.render_options.with_escape(false);
        self
    }

    /// Set the page language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_lang(lang);
        self
    }

    /// Use the document title as page title.
    pub fn with_document_title(mut self) -> Self {
        self.render_options = self.render_options.with_document_title(true);
        self
    }

    /// Parse a DOCX file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UndocxResult> {
        let parser = DocxParser::open_with_options(path, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UndocxResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a DOCX from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UndocxResult> {
        let parser = DocxParser::from_bytes_with_options(data, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UndocxResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Undocx {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a DOCX document.
pub struct UndocxResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UndocxResult {
    /// Convert to an HTML page.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to HTML and write it to `path`.
    pub fn write_html<P: AsRef<Path>>(&self, path: P) -> Result<RenderResult> {
        render::write_html(&self.document, path, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
