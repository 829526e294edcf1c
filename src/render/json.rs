//! JSON rendering for DOCX documents.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, TextRun};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new();
        doc.metadata.title = Some("Rubric".to_string());
        doc.add_block(Paragraph::from_runs([TextRun::bold("Level 4")]));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Rubric\""));
        assert!(json.contains("\"type\": \"paragraph\""));
        assert!(json.contains("\"bold\": true"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_round_trip() {
        let mut doc = Document::new();
        doc.add_block(Paragraph::styled("Heading 1", "Title"));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
