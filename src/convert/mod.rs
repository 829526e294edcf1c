//! File-level conversion: DOCX in, HTML page out.
//!
//! A batch is a list of `(source, destination)` jobs. A job whose source
//! file does not exist is reported as missing and skipped; every other
//! failure aborts the batch.
//!
//! # Example
//!
//! ```no_run
//! use undocx::convert::{convert_batch, ConvertOptions};
//! use undocx::Manifest;
//!
//! fn main() -> undocx::Result<()> {
//!     let manifest = Manifest::default().with_source_dir("uploads");
//!     let report = convert_batch(&manifest.conversion_jobs(), &ConvertOptions::default())?;
//!     println!("{} converted, {} missing", report.converted_count(), report.missing_count());
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::parser::{DocxParser, ParseOptions};
use crate::render::{write_html, ExtractionStats, RenderOptions, RenderResult};

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Convert batch jobs on the rayon thread pool
    pub parallel: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable or disable parallel batch conversion.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// One source document and the HTML file it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertJob {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl ConvertJob {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// What happened to one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// The page was written
    Converted {
        source: PathBuf,
        destination: PathBuf,
        stats: ExtractionStats,
    },
    /// The source file does not exist
    Missing { source: PathBuf },
}

impl ConvertOutcome {
    /// Source path of the job.
    pub fn source(&self) -> &Path {
        match self {
            ConvertOutcome::Converted { source, .. } | ConvertOutcome::Missing { source } => {
                source
            }
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ConvertOutcome::Converted { .. })
    }
}

/// Outcomes of a batch, in job order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<ConvertOutcome>,
}

impl BatchReport {
    pub fn converted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    pub fn missing_count(&self) -> usize {
        self.outcomes.len() - self.converted_count()
    }

    /// Statistics summed over converted documents.
    pub fn total_stats(&self) -> ExtractionStats {
        let mut total = ExtractionStats::new();
        for outcome in &self.outcomes {
            if let ConvertOutcome::Converted { stats, .. } = outcome {
                total.merge(stats);
            }
        }
        total
    }
}

/// Convert one DOCX file and write the HTML page to `destination`.
///
/// The source must exist; use [`convert_job`] for skip-if-missing
/// semantics.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    options: &ConvertOptions,
) -> Result<RenderResult> {
    let parser = DocxParser::open_with_options(source, options.parse.clone())?;
    let doc = parser.parse()?;
    write_html(&doc, destination, &options.render)
}

/// Run one job, skipping it if its source file does not exist.
pub fn convert_job(job: &ConvertJob, options: &ConvertOptions) -> Result<ConvertOutcome> {
    if !job.source.exists() {
        log::warn!("File not found: {}", job.source.display());
        return Ok(ConvertOutcome::Missing {
            source: job.source.clone(),
        });
    }

    let result = convert_file(&job.source, &job.destination, options)?;
    log::info!(
        "Converted {} -> {} ({} fragments)",
        job.source.display(),
        job.destination.display(),
        result.stats.fragment_count()
    );

    Ok(ConvertOutcome::Converted {
        source: job.source.clone(),
        destination: job.destination.clone(),
        stats: result.stats,
    })
}

/// Run every job and collect the outcomes in job order.
pub fn convert_batch(jobs: &[ConvertJob], options: &ConvertOptions) -> Result<BatchReport> {
    let outcomes = if options.parallel {
        jobs.par_iter()
            .map(|job| convert_job(job, options))
            .collect::<Result<Vec<_>>>()?
    } else {
        jobs.iter()
            .map(|job| convert_job(job, options))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(BatchReport { outcomes })
}
