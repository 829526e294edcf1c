//! Paragraph style table from `word/styles.xml`.

use std::collections::HashMap;

use super::xml::{parse_tree, XmlElement};
use crate::error::Result;
use crate::model::DEFAULT_STYLE_NAME;

/// Built-in styles Word stores under a lower-case name.
const UI_NAME_ALIASES: &[(&str, &str)] = &[
    ("caption", "Caption"),
    ("footer", "Footer"),
    ("header", "Header"),
    ("heading 1", "Heading 1"),
    ("heading 2", "Heading 2"),
    ("heading 3", "Heading 3"),
    ("heading 4", "Heading 4"),
    ("heading 5", "Heading 5"),
    ("heading 6", "Heading 6"),
    ("heading 7", "Heading 7"),
    ("heading 8", "Heading 8"),
    ("heading 9", "Heading 9"),
];

/// Maps paragraph style ids to their display names.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleSheet {
    /// Create an empty style sheet (every paragraph resolves to "Normal").
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `word/styles.xml` part.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = parse_tree(xml)?;
        Ok(Self::from_element(&root))
    }

    fn from_element(root: &XmlElement) -> Self {
        let mut sheet = Self::new();

        for style in root.children_named("style") {
            if style.attr("type") != Some("paragraph") {
                continue;
            }
            let Some(id) = style.attr("styleId") else {
                continue;
            };
            let name = style
                .child("name")
                .and_then(|n| n.attr("val"))
                .map(ui_name)
                .unwrap_or_else(|| id.to_string());

            if matches!(style.attr("default"), Some("1" | "true" | "on")) {
                sheet.default_paragraph = Some(name.clone());
            }
            sheet.names.insert(id.to_string(), name);
        }

        log::debug!("Loaded {} paragraph styles", sheet.names.len());
        sheet
    }

    /// Register a style by id.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Number of known paragraph styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no styles are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the default paragraph style.
    pub fn default_name(&self) -> &str {
        self.default_paragraph
            .as_deref()
            .unwrap_or(DEFAULT_STYLE_NAME)
    }

    /// Resolve a paragraph's style id to a name.
    ///
    /// Missing or unknown ids fall back to the default paragraph style.
    pub fn resolve(&self, style_id: Option<&str>) -> String {
        style_id
            .and_then(|id| self.names.get(id))
            .map(String::as_str)
            .unwrap_or_else(|| self.default_name())
            .to_string()
    }
}

/// Map an internal style name to the name shown in the Word UI.
fn ui_name(internal: &str) -> String {
    UI_NAME_ALIASES
        .iter()
        .find(|(alias, _)| *alias == internal)
        .map(|(_, ui)| ui.to_string())
        .unwrap_or_else(|| internal.to_string())
}
