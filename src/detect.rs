//! DOCX format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// DOCX package information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Number of entries in the ZIP container
    pub entry_count: usize,
    /// Whether the package carries a style part (`word/styles.xml`)
    pub has_styles: bool,
    /// Whether the package carries core properties (`docProps/core.xml`)
    pub has_core_properties: bool,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DOCX ({} parts)", self.entry_count)
    }
}

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Main document part every WordprocessingML package must contain.
pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// Detect DOCX format from a file path.
///
/// # Returns
/// * `Ok(DocxFormat)` if the file is a ZIP package with a main document part
/// * `Err(Error::UnknownFormat)` otherwise
///
/// # Example
/// ```no_run
/// use undocx::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("rubric.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut header = [0u8; 4];
    if reader.read_exact(&mut header).is_err() || !is_zip_header(&header) {
        return Err(Error::UnknownFormat);
    }
    reader.rewind()?;
    inspect_package(reader)
}

/// Detect DOCX format from the complete file content.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if !is_zip_header(data) {
        return Err(Error::UnknownFormat);
    }
    inspect_package(std::io::Cursor::new(data))
}

fn inspect_package<R: Read + Seek>(reader: R) -> Result<DocxFormat> {
    let archive = zip::ZipArchive::new(reader).map_err(|_| Error::UnknownFormat)?;
    let has_part = |name: &str| archive.file_names().any(|n| n == name);

    if !has_part(DOCUMENT_PART) {
        return Err(Error::UnknownFormat);
    }

    Ok(DocxFormat {
        entry_count: archive.len(),
        has_styles: has_part(STYLES_PART),
        has_core_properties: has_part(CORE_PROPERTIES_PART),
    })
}

/// Check whether the data starts with a ZIP local file header.
pub fn is_zip_header(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

/// Check if a file is a valid DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes represent a valid DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
