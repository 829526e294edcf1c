//! Shared fixtures: minimal DOCX packages built in memory.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/></w:style>
  <w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/></w:style>
</w:styles>"#;

/// Build a DOCX package from `w:body` inner XML.
pub fn docx_bytes(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
        W_NS, body
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.start_file("word/styles.xml", options).unwrap();
    writer.write_all(STYLES_XML.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Write a DOCX package to `path`.
pub fn write_docx(path: &Path, body: &str) {
    std::fs::write(path, docx_bytes(body)).unwrap();
}

fn run_xml(text: &str, bold: bool) -> String {
    let rpr = if bold { "<w:rPr><w:b/></w:rPr>" } else { "" };
    format!(
        r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
        rpr,
        xml_escape(text)
    )
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Plain paragraph with a single run.
pub fn para(text: &str) -> String {
    format!("<w:p>{}</w:p>", run_xml(text, false))
}

/// Paragraph whose runs are `(text, bold)` pairs.
pub fn runs(parts: &[(&str, bool)]) -> String {
    let runs: String = parts.iter().map(|(t, b)| run_xml(t, *b)).collect();
    format!("<w:p>{}</w:p>", runs)
}

/// Paragraph with a style id.
pub fn styled(style_id: &str, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>{}</w:p>"#,
        style_id,
        run_xml(text, false)
    )
}

/// Table with one paragraph per cell.
pub fn table(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in *row {
            xml.push_str("<w:tc>");
            xml.push_str(&para(cell));
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// Lines of the page between `<body>` and `</body>`.
pub fn body_lines(html: &str) -> Vec<&str> {
    let start = html.find("<body>\n").unwrap() + "<body>\n".len();
    let end = html.rfind("</body>").unwrap();
    html[start..end].lines().collect()
}
