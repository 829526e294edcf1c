//! Rendering module for converting documents to output formats.

mod html;
mod json;
mod options;
mod result;
mod template;
mod text;

pub use html::{
    classify_paragraph, escape_html, to_html, to_html_with_stats, write_html, Fragment,
    FragmentKind, HtmlRenderer,
};
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, DEFAULT_HEADING_MAX_CHARS};
pub use result::{ExtractionStats, RenderResult};
pub use text::to_text;
