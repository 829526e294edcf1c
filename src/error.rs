//! Error types for undocx library.

use std::io;
use thiserror::Error;

/// Result type alias for undocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during DOCX conversion and publishing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as DOCX.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// A required package part is missing (e.g. `word/document.xml`).
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Error reading the ZIP container.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error parsing an XML part.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// Error talking to the SQLite database.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A table or column name that cannot be used in SQL.
    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Error loading or validating a manifest.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(e) => Error::Io(io::Error::new(e.kind(), e.to_string())),
            _ => Error::Xml(err.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Manifest(err.to_string())
    }
}
