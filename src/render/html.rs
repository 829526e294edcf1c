//! HTML rendering for DOCX documents.
//!
//! Each non-empty block becomes one fragment. Paragraphs are classified
//! by the first matching rule:
//!
//! 1. style name starting with "Heading 1", or a bold first run with
//!    trimmed text shorter than the heading threshold: `<h1>`
//! 2. style name starting with "Heading": `<h2>`
//! 3. any bold run: `<p>` with `<strong>` around bold runs
//! 4. otherwise: `<p>` with the trimmed text
//!
//! Tables render their first row as header cells and every later row as
//! data cells.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Block, Document, Paragraph, Table};

use super::{template, ExtractionStats, RenderOptions, RenderResult};

const BLOCK_INDENT: &str = "    ";
const ROW_INDENT: &str = "        ";
const CELL_INDENT: &str = "            ";

/// Convert a document to a complete HTML page.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render_with_stats(doc)
}

/// Render a document and write the page to `path`, replacing any
/// existing file and creating missing parent directories.
pub fn write_html<P: AsRef<Path>>(
    doc: &Document,
    path: P,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let path = path.as_ref();
    let result = to_html_with_stats(doc, options)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &result.content)?;
    Ok(result)
}

/// How a block was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// `<table>` with header and data rows
    Table,
    /// `<h1>`
    Heading1,
    /// `<h2>`
    Heading2,
    /// `<p>` containing `<strong>` runs
    RichParagraph,
    /// `<p>` with the trimmed paragraph text
    Paragraph,
}

/// One rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub html: String,
}

/// Classify a paragraph, or `None` if it is skipped as empty.
pub fn classify_paragraph(para: &Paragraph, heading_max_chars: usize) -> Option<FragmentKind> {
    let text = para.trimmed_text();
    if text.is_empty() {
        return None;
    }

    let kind = if para.style_name.starts_with("Heading 1")
        || (para.starts_bold() && text.chars().count() < heading_max_chars)
    {
        FragmentKind::Heading1
    } else if para.style_name.starts_with("Heading") {
        FragmentKind::Heading2
    } else if para.has_bold() {
        FragmentKind::RichParagraph
    } else {
        FragmentKind::Paragraph
    };
    Some(kind)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to a complete HTML page.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document with extraction statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        self.stats.count_text(&doc.plain_text());

        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    /// Render blocks to fragments, in block order.
    pub fn fragments(&mut self, blocks: &[Block]) -> Vec<Fragment> {
        blocks
            .iter()
            .filter_map(|block| self.render_block(block))
            .collect()
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let fragments = self.fragments(&doc.blocks);
        let title = self.options.title.as_deref().or_else(|| {
            self.options
                .use_document_title
                .then_some(doc.metadata.title.as_deref())
                .flatten()
        });

        Ok(template::wrap(
            &self.options.lang,
            title,
            fragments.iter().map(|f| f.html.as_str()),
        ))
    }

    fn render_block(&mut self, block: &Block) -> Option<Fragment> {
        match block {
            Block::Table(t) => {
                if self.options.collect_stats {
                    self.stats.add_table(t.row_count());
                }
                Some(Fragment {
                    kind: FragmentKind::Table,
                    html: self.render_table(t),
                })
            }
            Block::Paragraph(p) => self.render_paragraph(p),
        }
    }

    fn render_paragraph(&mut self, para: &Paragraph) -> Option<Fragment> {
        let Some(kind) = classify_paragraph(para, self.options.heading_max_chars) else {
            if self.options.collect_stats {
                self.stats.add_skipped();
            }
            return None;
        };

        let text = para.trimmed_text();
        let html = match kind {
            FragmentKind::Heading1 => {
                format!("{}<h1>{}</h1>", BLOCK_INDENT, self.escape(text))
            }
            FragmentKind::Heading2 => {
                format!("{}<h2>{}</h2>", BLOCK_INDENT, self.escape(text))
            }
            FragmentKind::RichParagraph => {
                let mut html = format!("{}<p>", BLOCK_INDENT);
                for run in &para.runs {
                    if run.bold {
                        html.push_str("<strong>");
                        html.push_str(&self.escape(&run.text));
                        html.push_str("</strong>");
                    } else {
                        html.push_str(&self.escape(&run.text));
                    }
                }
                html.push_str("</p>");
                html
            }
            FragmentKind::Paragraph | FragmentKind::Table => {
                format!("{}<p>{}</p>", BLOCK_INDENT, self.escape(text))
            }
        };

        if self.options.collect_stats {
            match kind {
                FragmentKind::Heading1 => self.stats.add_heading1(),
                FragmentKind::Heading2 => self.stats.add_heading2(),
                FragmentKind::RichParagraph => self.stats.add_rich_paragraph(),
                FragmentKind::Paragraph | FragmentKind::Table => self.stats.add_paragraph(),
            }
        }

        Some(Fragment { kind, html })
    }

    fn render_table(&self, table: &Table) -> String {
        let mut lines = vec![format!("{}<table>", BLOCK_INDENT)];

        for (i, row) in table.rows.iter().enumerate() {
            let tag = if i == 0 { "th" } else { "td" };
            lines.push(format!("{}<tr>", ROW_INDENT));
            for cell in &row.cells {
                lines.push(format!(
                    "{}<{}>{}</{}>",
                    CELL_INDENT,
                    tag,
                    self.escape(cell.trimmed_text()),
                    tag
                ));
            }
            lines.push(format!("{}</tr>", ROW_INDENT));
        }

        lines.push(format!("{}</table>", BLOCK_INDENT));
        lines.join("\n")
    }

    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.options.escape_html {
            escape_html(text)
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Escape characters reserved in HTML text and attribute values.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
