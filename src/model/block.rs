//! Body-level block type.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// One structural unit of a document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// A table
    Table(Table),
}

impl Block {
    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.text.clone(),
            Block::Table(t) => t.plain_text(),
        }
    }

    /// Check if the block renders to nothing.
    ///
    /// Tables are never empty in this sense: even a table without rows
    /// produces its opening and closing tags.
    pub fn is_empty(&self) -> bool {
        match self {
            Block::Paragraph(p) => p.is_empty(),
            Block::Table(_) => false,
        }
    }

    /// Get the paragraph, if this block is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }

    /// Get the table, if this block is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        }
    }
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

impl From<Table> for Block {
    fn from(t: Table) -> Self {
        Block::Table(t)
    }
}
