//! Plain text rendering for DOCX documents.

use crate::model::Document;

/// Convert a document to plain text.
///
/// Non-empty blocks are separated by a blank line; table cells by tabs.
pub fn to_text(doc: &Document) -> String {
    doc.plain_text().trim().to_string()
}
