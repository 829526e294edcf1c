//! Rendering result with metadata and statistics.

use crate::model::Metadata;
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered page
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ExtractionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: ExtractionStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while classifying blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of tables rendered
    pub table_count: u32,

    /// Number of table rows rendered (header rows included)
    pub table_row_count: u32,

    /// Number of level-1 headings
    pub heading1_count: u32,

    /// Number of level-2 headings
    pub heading2_count: u32,

    /// Number of paragraphs rendered with bold runs
    pub rich_paragraph_count: u32,

    /// Number of plain paragraphs
    pub paragraph_count: u32,

    /// Number of empty paragraphs skipped
    pub skipped_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rendered table with the given number of rows.
    pub fn add_table(&mut self, rows: usize) {
        self.table_count += 1;
        self.table_row_count += rows as u32;
    }

    pub fn add_heading1(&mut self) {
        self.heading1_count += 1;
    }

    pub fn add_heading2(&mut self) {
        self.heading2_count += 1;
    }

    pub fn add_rich_paragraph(&mut self) {
        self.rich_paragraph_count += 1;
    }

    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    pub fn add_skipped(&mut self) {
        self.skipped_count += 1;
    }

    /// Total number of fragments emitted.
    pub fn fragment_count(&self) -> u32 {
        self.table_count
            + self.heading1_count
            + self.heading2_count
            + self.rich_paragraph_count
            + self.paragraph_count
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.heading1_count += other.heading1_count;
        self.heading2_count += other.heading2_count;
        self.rich_paragraph_count += other.rich_paragraph_count;
        self.paragraph_count += other.paragraph_count;
        self.skipped_count += other.skipped_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
