//! Conversion and publishing manifest.
//!
//! A manifest names the documents to convert and the post ids their HTML
//! is published to. The built-in default is the rubric set; a JSON file
//! with the same shape can replace it.
//!
//! ```json
//! {
//!   "source_dir": "uploads",
//!   "output_dir": "public/rubric-docs",
//!   "documents": ["a.docx"],
//!   "database": "app.sqlite",
//!   "posts": [{ "id": 10, "file": "a.html" }]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::convert::ConvertJob;
use crate::error::{Error, Result};

/// Rubric documents converted by default.
pub const RUBRIC_DOCUMENTS: &[&str] = &[
    "뉴욕 주 리젠트 시험 논증적 글쓰기 루브릭.docx",
    "뉴욕 주 리젠트 시험 분석적 글쓰기 루브릭.docx",
    "뉴욕 주 중학교 논술 루브릭.docx",
    "뉴욕 주 초등학교 논술 루브릭.docx",
    "IB 중등 프로그램 고등학교 개인과 사회 논술 루브릭.docx",
    "IB 중등 프로그램 중학교 개인과 사회 논술 루브릭.docx",
    "IB 중등 프로그램 과학 논술 루브릭.docx",
];

/// Post id each default rubric is published to.
pub const RUBRIC_POSTS: &[(i64, &str)] = &[
    (10, "뉴욕 주 리젠트 시험 논증적 글쓰기 루브릭.html"),
    (11, "뉴욕 주 리젠트 시험 분석적 글쓰기 루브릭.html"),
    (12, "뉴욕 주 중학교 논술 루브릭.html"),
    (13, "뉴욕 주 초등학교 논술 루브릭.html"),
    (14, "IB 중등 프로그램 고등학교 개인과 사회 논술 루브릭.html"),
    (15, "IB 중등 프로그램 중학교 개인과 사회 논술 루브릭.html"),
    (16, "IB 중등 프로그램 과학 논술 루브릭.html"),
];

pub const DEFAULT_TABLE: &str = "resource_posts";
pub const DEFAULT_KEY_COLUMN: &str = "id";
pub const DEFAULT_CONTENT_COLUMN: &str = "content";

/// One id → HTML file pairing for the row updater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEntry {
    /// Primary key of the target row
    pub id: i64,
    /// HTML file name, relative to the output directory
    pub file: String,
}

impl PostEntry {
    pub fn new(id: i64, file: impl Into<String>) -> Self {
        Self {
            id,
            file: file.into(),
        }
    }
}

/// Documents to convert and rows to update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory holding the source documents
    pub source_dir: PathBuf,

    /// Directory receiving the HTML files (and read by the row updater)
    pub output_dir: PathBuf,

    /// Source document file names
    pub documents: Vec<String>,

    /// SQLite database path
    pub database: Option<PathBuf>,

    /// Table receiving the HTML
    pub table: String,

    /// Integer primary key column
    pub key_column: String,

    /// Text column receiving the HTML
    pub column: String,

    /// Row updates
    pub posts: Vec<PostEntry>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from("public/rubric-docs"),
            documents: RUBRIC_DOCUMENTS.iter().map(|s| s.to_string()).collect(),
            database: None,
            table: DEFAULT_TABLE.to_string(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            column: DEFAULT_CONTENT_COLUMN.to_string(),
            posts: RUBRIC_POSTS
                .iter()
                .map(|(id, file)| PostEntry::new(*id, *file))
                .collect(),
        }
    }
}

impl Manifest {
    /// Create the built-in rubric manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest from a JSON file; missing fields take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let manifest = Self::from_json(&content)
            .map_err(|e| Error::Manifest(format!("{}: {}", path.display(), e)))?;
        log::debug!(
            "Loaded manifest {} ({} documents, {} posts)",
            path.display(),
            manifest.documents.len(),
            manifest.posts.len()
        );
        Ok(manifest)
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check that post ids are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for post in &self.posts {
            if !seen.insert(post.id) {
                return Err(Error::Manifest(format!("duplicate post id {}", post.id)));
            }
        }
        Ok(())
    }

    /// Set the source directory.
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the database path.
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(path.into());
        self
    }

    /// Conversion jobs: each document into `output_dir` with an `.html` name.
    pub fn conversion_jobs(&self) -> Vec<ConvertJob> {
        self.documents
            .iter()
            .map(|name| {
                ConvertJob::new(
                    self.source_dir.join(name),
                    self.output_dir.join(html_file_name(name)),
                )
            })
            .collect()
    }

    /// Post ids with the full path of their HTML file.
    pub fn post_paths(&self) -> Vec<(i64, PathBuf)> {
        self.posts
            .iter()
            .map(|post| (post.id, self.output_dir.join(&post.file)))
            .collect()
    }
}

/// Replace a `.docx` extension with `.html`.
///
/// Names without the extension get `.html` appended.
pub fn html_file_name(docx_name: &str) -> String {
    match docx_name.strip_suffix(".docx") {
        Some(stem) => format!("{}.html", stem),
        None => format!("{}.html", docx_name),
    }
}
