//! Document model types for DOCX content representation.
//!
//! This module defines the intermediate representation that bridges
//! DOCX parsing and HTML rendering. Blocks keep the document order of
//! the body they were read from.

mod block;
mod document;
mod paragraph;
mod table;

pub use block::Block;
pub use document::{Document, Metadata};
pub use paragraph::{Paragraph, TextRun, DEFAULT_STYLE_NAME};
pub use table::{Table, TableCell, TableRow};
