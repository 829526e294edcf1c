//! Document-level types.

use super::{Block, Paragraph, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed DOCX document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Core properties (title, author, etc.)
    pub metadata: Metadata,

    /// Body blocks in document order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from blocks.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            metadata: Metadata::default(),
            blocks: blocks.into_iter().collect(),
        }
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// Iterate over tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(Block::as_table)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter(|b| !b.is_empty())
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document core properties (`docProps/core.xml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Document author
    pub creator: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Description / comments
    pub description: Option<String>,

    /// Last author to save the document
    pub last_modified_by: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Check if no property is set.
    pub fn is_empty(&self) -> bool {
        self == &Metadata::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRun;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.block_count(), 0);
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn test_document_iterators() {
        let mut doc = Document::new();
        doc.add_block(Paragraph::with_text("Intro"));
        doc.add_block(Table::from_rows([["a"]]));
        doc.add_block(Paragraph::from_runs([TextRun::bold("Bold")]));

        assert_eq!(doc.paragraphs().count(), 2);
        assert_eq!(doc.tables().count(), 1);
    }

    #[test]
    fn test_plain_text_skips_empty_paragraphs() {
        let doc = Document::from_blocks([
            Block::from(Paragraph::with_text("One")),
            Block::from(Paragraph::with_text("  ")),
            Block::from(Paragraph::with_text("Two")),
        ]);

        assert_eq!(doc.plain_text(), "One\n\nTwo");
    }
}
