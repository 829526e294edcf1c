//! DOCX document parser over the OOXML package.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use chrono::{DateTime, Utc};
use unicode_normalization::UnicodeNormalization;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::{is_zip_header, CORE_PROPERTIES_PART, DOCUMENT_PART, STYLES_PART};
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Paragraph, Table, TableCell, TableRow, TextRun};

use super::options::{ErrorMode, ParseOptions};
use super::styles::StyleSheet;
use super::xml::{parse_tree, XmlElement};

/// DOCX document parser.
///
/// The package parts are read eagerly when the parser is created, so
/// `parse` does no further I/O.
pub struct DocxParser {
    document_xml: String,
    styles_xml: Option<String>,
    core_xml: Option<String>,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader_with_options(BufReader::new(file), options)
    }

    /// Parse a DOCX from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        if !is_zip_header(data) {
            return Err(Error::UnknownFormat);
        }
        Self::from_reader_with_options(Cursor::new(data), options)
    }

    /// Parse a DOCX from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a DOCX from a seekable reader with custom options.
    pub fn from_reader_with_options<R: Read + Seek>(reader: R, options: ParseOptions) -> Result<Self> {
        let mut archive = ZipArchive::new(reader).map_err(|e| match e {
            ZipError::Io(io) => Error::Io(io),
            _ => Error::UnknownFormat,
        })?;

        let document_xml = read_part(&mut archive, DOCUMENT_PART)?
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))?;
        let styles_xml = read_part(&mut archive, STYLES_PART)?;
        let core_xml = if options.include_metadata {
            read_part(&mut archive, CORE_PROPERTIES_PART)?
        } else {
            None
        };

        Ok(Self {
            document_xml,
            styles_xml,
            core_xml,
            options,
        })
    }

    /// Parse the package into a document.
    pub fn parse(&self) -> Result<Document> {
        let styles = self.load_styles()?;
        let root = parse_tree(&self.document_xml)?;
        let body = root
            .child("body")
            .ok_or_else(|| Error::MissingPart("w:body".to_string()))?;

        let reader = BodyReader {
            styles: &styles,
            normalize: self.options.normalize,
        };

        let mut doc = Document::new();
        for element in body.elements() {
            match element.name.as_str() {
                "p" => doc.add_block(reader.paragraph(element)),
                "tbl" => doc.add_block(reader.table(element)?),
                other => log::debug!("Skipping body element <{}>", other),
            }
        }

        if self.options.include_metadata {
            doc.metadata = self.load_metadata()?;
        }

        log::debug!(
            "Parsed {} blocks ({} tables)",
            doc.block_count(),
            doc.tables().count()
        );
        Ok(doc)
    }

    fn load_styles(&self) -> Result<StyleSheet> {
        let Some(ref xml) = self.styles_xml else {
            return Ok(StyleSheet::new());
        };
        match StyleSheet::from_xml(xml) {
            Ok(sheet) => Ok(sheet),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Ignoring malformed {}: {}", STYLES_PART, e);
                Ok(StyleSheet::new())
            }
            Err(e) => Err(e),
        }
    }

    fn load_metadata(&self) -> Result<Metadata> {
        let Some(ref xml) = self.core_xml else {
            return Ok(Metadata::default());
        };
        match parse_core_properties(xml) {
            Ok(metadata) => Ok(metadata),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Ignoring malformed {}: {}", CORE_PROPERTIES_PART, e);
                Ok(Metadata::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Read a package part as UTF-8 text, or `None` if the package lacks it.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            Ok(Some(content))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Walks `w:body` content into model blocks.
struct BodyReader<'a> {
    styles: &'a StyleSheet,
    normalize: bool,
}

impl BodyReader<'_> {
    fn paragraph(&self, p: &XmlElement) -> Paragraph {
        let style_id = p
            .child("pPr")
            .and_then(|ppr| ppr.child("pStyle"))
            .and_then(|s| s.attr("val"));

        let mut para = Paragraph::new().with_style(self.styles.resolve(style_id));
        for child in p.elements() {
            match child.name.as_str() {
                "r" => para.add_run(self.run(child)),
                "hyperlink" => {
                    for r in child.children_named("r") {
                        para.add_detached_text(&self.run(r).text);
                    }
                }
                _ => {}
            }
        }
        para
    }

    fn run(&self, r: &XmlElement) -> TextRun {
        let mut text = String::new();
        for child in r.elements() {
            match child.name.as_str() {
                "t" => text.push_str(&child.text()),
                "tab" | "ptab" => text.push('\t'),
                "br" => {
                    if !matches!(child.attr("type"), Some("page" | "column")) {
                        text.push('\n');
                    }
                }
                "cr" => text.push('\n'),
                "noBreakHyphen" => text.push('-'),
                _ => {}
            }
        }

        let bold = r
            .child("rPr")
            .and_then(|rpr| rpr.child("b"))
            .is_some_and(|b| on_off(b.attr("val")));

        TextRun {
            text: self.normalized(text),
            bold,
        }
    }

    fn table(&self, tbl: &XmlElement) -> Result<Table> {
        let mut table = Table::new();
        // Text per grid column of the previous row, for vertical merges.
        let mut above: Vec<String> = Vec::new();

        for tr in tbl.children_named("tr") {
            let mut cells = Vec::new();
            let mut column = tr
                .child("trPr")
                .and_then(|pr| pr.child("gridBefore"))
                .and_then(|g| g.attr("val"))
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            grid_end(column, 0)?;

            for tc in tr.children_named("tc") {
                let props = tc.child("tcPr");
                let span = props
                    .and_then(|pr| pr.child("gridSpan"))
                    .and_then(|g| g.attr("val"))
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(1)
                    .max(1);
                let continues = props
                    .and_then(|pr| pr.child("vMerge"))
                    .is_some_and(|m| m.attr("val") != Some("restart"));

                let text = if continues {
                    above.get(column).cloned().unwrap_or_default()
                } else {
                    self.cell_text(tc)
                };

                let end = grid_end(column, span)?;
                if above.len() < end {
                    above.resize(end, String::new());
                }
                for slot in &mut above[column..end] {
                    slot.clone_from(&text);
                }
                cells.extend(std::iter::repeat(TableCell::text(text)).take(span));
                column = end;
            }

            table.add_row(TableRow::new(cells));
        }

        Ok(table)
    }

    fn cell_text(&self, tc: &XmlElement) -> String {
        tc.children_named("p")
            .map(|p| self.paragraph(p).text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn normalized(&self, text: String) -> String {
        if self.normalize {
            text.nfc().collect()
        } else {
            text
        }
    }
}

/// Widest table grid accepted. Word itself stops at 63 columns.
const MAX_GRID_COLUMNS: usize = 1024;

/// Grid column after a cell starting at `column` spanning `span` columns.
fn grid_end(column: usize, span: usize) -> Result<usize> {
    column
        .checked_add(span)
        .filter(|&end| end <= MAX_GRID_COLUMNS)
        .ok_or_else(|| {
            Error::Xml(format!(
                "table row exceeds {} grid columns (column {}, span {})",
                MAX_GRID_COLUMNS, column, span
            ))
        })
}

/// Interpret a WordprocessingML on/off value; absence means "on".
fn on_off(val: Option<&str>) -> bool {
    !matches!(val, Some("0" | "false" | "off"))
}

/// Parse `docProps/core.xml`.
fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let root = parse_tree(xml)?;
    let text_of = |name: &str| {
        root.child(name)
            .map(|e| e.text().trim().to_string())
            .filter(|s| !s.is_empty())
    };
    let date_of = |name: &str| {
        text_of(name).and_then(|s| match DateTime::parse_from_rfc3339(&s) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                log::debug!("Unparseable {} date {:?}: {}", name, s, e);
                None
            }
        })
    };

    Ok(Metadata {
        title: text_of("title"),
        subject: text_of("subject"),
        creator: text_of("creator"),
        keywords: text_of("keywords"),
        description: text_of("description"),
        last_modified_by: text_of("lastModifiedBy"),
        created: date_of("created"),
        modified: date_of("modified"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn parse_body(body: &str, styles: &StyleSheet) -> Vec<Block> {
        let xml = format!(
            r#"<w:document xmlns:w="urn:w"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        );
        let root = parse_tree(&xml).unwrap();
        let reader = BodyReader {
            styles,
            normalize: false,
        };
        root.child("body")
            .unwrap()
            .elements()
            .filter_map(|e| match e.name.as_str() {
                "p" => Some(Block::Paragraph(reader.paragraph(e))),
                "tbl" => Some(Block::Table(reader.table(e).unwrap())),
                _ => None,
            })
            .collect()
    }

    fn paragraph(block: &Block) -> &Paragraph {
        block.as_paragraph().unwrap()
    }

    #[test]
    fn test_runs_and_bold() {
        let blocks = parse_body(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Score</w:t></w:r><w:r><w:t xml:space="preserve"> 4: </w:t></w:r><w:r><w:rPr><w:b w:val="0"/></w:rPr><w:t>done</w:t></w:r></w:p>"#,
            &StyleSheet::new(),
        );
        let p = paragraph(&blocks[0]);

        assert_eq!(p.text, "Score 4: done");
        assert_eq!(p.style_name, "Normal");
        assert_eq!(
            p.runs,
            vec![
                TextRun::bold("Score"),
                TextRun::new(" 4: "),
                TextRun::new("done")
            ]
        );
    }

    #[test]
    fn test_hyperlink_text_without_runs() {
        let blocks = parse_body(
            r#"<w:p><w:hyperlink r:id="rId4"><w:r><w:t>example.org</w:t></w:r></w:hyperlink></w:p>"#,
            &StyleSheet::new(),
        );
        let p = paragraph(&blocks[0]);

        assert_eq!(p.text, "example.org");
        assert!(p.runs.is_empty());
    }

    #[test]
    fn test_special_run_content() {
        let blocks = parse_body(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t><w:br w:type="page"/><w:noBreakHyphen/></w:r></w:p>"#,
            &StyleSheet::new(),
        );
        assert_eq!(paragraph(&blocks[0]).text, "a\tb\nc-");
    }

    #[test]
    fn test_style_resolution() {
        let mut styles = StyleSheet::new();
        styles.insert("Heading2", "Heading 2");
        let blocks = parse_body(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Criteria</w:t></w:r></w:p>"#,
            &styles,
        );
        assert_eq!(paragraph(&blocks[0]).style_name, "Heading 2");
    }

    #[test]
    fn test_body_order_and_skipped_elements() {
        let blocks = parse_body(
            r#"<w:p><w:r><w:t>one</w:t></w:r></w:p><w:bookmarkStart/><w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl><w:p/>"#,
            &StyleSheet::new(),
        );
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::Paragraph(_)));
        assert!(matches!(blocks[1], Block::Table(_)));
        assert!(blocks[2].is_empty());
    }

    #[test]
    fn test_table_cells_and_merges() {
        let blocks = parse_body(
            r#"<w:tbl>
  <w:tr>
    <w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr><w:p><w:r><w:t>Wide</w:t></w:r></w:p></w:tc>
    <w:tc><w:tcPr><w:vMerge w:val="restart"/></w:tcPr><w:p><w:r><w:t>Tall</w:t></w:r></w:p></w:tc>
  </w:tr>
  <w:tr>
    <w:tc><w:p><w:r><w:t>line 1</w:t></w:r></w:p><w:p><w:r><w:t>line 2</w:t></w:r></w:p></w:tc>
    <w:tc><w:p/></w:tc>
    <w:tc><w:tcPr><w:vMerge/></w:tcPr><w:p/></w:tc>
  </w:tr>
</w:tbl>"#,
            &StyleSheet::new(),
        );
        let table = blocks[0].as_table().unwrap();

        assert_eq!(table.rows[0].plain_text(), "Wide\tWide\tTall");
        assert_eq!(table.rows[1].cells[0].text, "line 1\nline 2");
        assert_eq!(table.rows[1].cells[1].text, "");
        assert_eq!(table.rows[1].cells[2].text, "Tall");
    }

    #[test]
    fn test_oversized_grid_span_is_error() {
        let styles = StyleSheet::new();
        let reader = BodyReader {
            styles: &styles,
            normalize: false,
        };
        for attrs in [
            r#"<w:tcPr><w:gridSpan w:val="18446744073709551615"/></w:tcPr>"#,
            r#"<w:tcPr><w:gridSpan w:val="100000000"/></w:tcPr>"#,
        ] {
            let xml = format!(
                r#"<w:tbl xmlns:w="urn:w"><w:tr><w:tc>{}<w:p/></w:tc></w:tr></w:tbl>"#,
                attrs
            );
            let tbl = parse_tree(&xml).unwrap();
            assert!(matches!(reader.table(&tbl), Err(Error::Xml(_))));
        }
    }

    #[test]
    fn test_oversized_grid_before_is_error() {
        let xml = r#"<w:tbl xmlns:w="urn:w"><w:tr><w:trPr><w:gridBefore w:val="18446744073709551615"/></w:trPr><w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr><w:p/></w:tc></w:tr></w:tbl>"#;
        let tbl = parse_tree(xml).unwrap();
        let styles = StyleSheet::new();
        let reader = BodyReader {
            styles: &styles,
            normalize: false,
        };
        assert!(reader.table(&tbl).is_err());
    }

    #[test]
    fn test_grid_end_bounds() {
        assert_eq!(grid_end(2, 3).unwrap(), 5);
        assert_eq!(grid_end(0, MAX_GRID_COLUMNS).unwrap(), MAX_GRID_COLUMNS);
        assert!(grid_end(1, MAX_GRID_COLUMNS).is_err());
        assert!(grid_end(usize::MAX, 1).is_err());
    }

    #[test]
    fn test_on_off_values() {
        assert!(on_off(None));
        assert!(on_off(Some("1")));
        assert!(on_off(Some("true")));
        assert!(!on_off(Some("0")));
        assert!(!on_off(Some("false")));
        assert!(!on_off(Some("off")));
    }

    #[test]
    fn test_core_properties() {
        let xml = r#"<cp:coreProperties xmlns:cp="urn:cp" xmlns:dc="urn:dc" xmlns:dcterms="urn:dcterms">
  <dc:title>Regents Rubric</dc:title>
  <dc:creator>Rubric Author</dc:creator>
  <cp:lastModifiedBy>Editor</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created>
  <dcterms:modified>not a date</dcterms:modified>
</cp:coreProperties>"#;
        let metadata = parse_core_properties(xml).unwrap();

        assert_eq!(metadata.title.as_deref(), Some("Regents Rubric"));
        assert_eq!(metadata.creator.as_deref(), Some("Rubric Author"));
        assert_eq!(metadata.last_modified_by.as_deref(), Some("Editor"));
        assert_eq!(
            metadata.created.unwrap().to_rfc3339(),
            "2024-03-01T09:30:00+00:00"
        );
        assert!(metadata.modified.is_none());
        assert!(metadata.subject.is_none());
    }

    #[test]
    fn test_from_bytes_rejects_non_zip() {
        assert!(matches!(
            DocxParser::from_bytes(b"<html></html>"),
            Err(Error::UnknownFormat)
        ));
    }
}
