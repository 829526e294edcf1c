//! DOCX parsing module.

mod docx_parser;
mod options;
mod styles;
mod xml;

pub use docx_parser::DocxParser;
pub use options::{ErrorMode, ParseOptions};
pub use styles::StyleSheet;
