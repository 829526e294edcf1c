//! undocx CLI - DOCX rubric to HTML conversion and publishing tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use undocx::{
    convert_batch, convert_job, parse_file_with_options, ConvertOptions, ConvertOutcome,
    JsonFormat, Manifest, ParseOptions, RenderOptions, RowUpdater, TargetColumn, UpdateOutcome,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "undocx")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert DOCX rubrics to HTML and publish them to SQLite", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one DOCX file to an HTML page
    Html {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Embed document text without HTML escaping
        #[arg(long)]
        raw: bool,

        /// Page language attribute
        #[arg(long, default_value = "ko")]
        lang: String,

        /// Page title
        #[arg(long)]
        title: Option<String>,

        /// Apply Unicode NFC normalization
        #[arg(long)]
        nfc: bool,
    },

    /// Convert every manifest document to HTML
    Convert {
        /// Manifest file (built-in rubric set if not specified)
        #[arg(short, long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Directory holding the source documents
        #[arg(long, value_name = "DIR")]
        source_dir: Option<PathBuf>,

        /// Directory receiving the HTML files
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Convert documents in parallel
        #[arg(long)]
        parallel: bool,

        /// Apply Unicode NFC normalization
        #[arg(long)]
        nfc: bool,

        /// Embed document text without HTML escaping
        #[arg(long)]
        raw: bool,
    },

    /// Store converted HTML files into database rows
    Store {
        /// Manifest file (built-in rubric set if not specified)
        #[arg(short, long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// SQLite database path
        #[arg(long, value_name = "PATH", env = "UNDOCX_DB")]
        db: Option<PathBuf>,

        /// Directory holding the HTML files
        #[arg(long, value_name = "DIR")]
        html_dir: Option<PathBuf>,

        /// Table to update
        #[arg(long)]
        table: Option<String>,

        /// Column receiving the HTML
        #[arg(long)]
        column: Option<String>,
    },

    /// Convert DOCX to JSON
    Json {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            raw,
            lang,
            title,
            nfc,
        }) => cmd_html(&input, output.as_deref(), raw, lang, title, nfc),
        Some(Commands::Convert {
            manifest,
            source_dir,
            output_dir,
            parallel,
            nfc,
            raw,
        }) => cmd_convert(
            manifest.as_deref(),
            source_dir,
            output_dir,
            parallel,
            nfc,
            raw,
        ),
        Some(Commands::Store {
            manifest,
            db,
            html_dir,
            table,
            column,
        }) => cmd_store(manifest.as_deref(), db, html_dir, table, column),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: undocx <COMMAND>".yellow());
            println!("       undocx --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_manifest(path: Option<&Path>) -> Result<Manifest, undocx::Error> {
    match path {
        Some(path) => Manifest::from_file(path),
        None => {
            log::debug!("Using built-in rubric manifest");
            Ok(Manifest::default())
        }
    }
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    raw: bool,
    lang: String,
    title: Option<String>,
    nfc: bool,
) -> CliResult {
    let options = ParseOptions::new().with_normalization(nfc);
    let doc = parse_file_with_options(input, options)?;

    let mut render_options = RenderOptions::new().with_lang(lang).with_escape(!raw);
    if let Some(title) = title {
        render_options = render_options.with_title(title);
    }

    if let Some(path) = output {
        undocx::render::write_html(&doc, path, &render_options)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        let html = undocx::render::to_html(&doc, &render_options)?;
        println!("{}", html);
    }

    Ok(())
}

fn cmd_convert(
    manifest: Option<&Path>,
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    parallel: bool,
    nfc: bool,
    raw: bool,
) -> CliResult {
    let mut manifest = load_manifest(manifest)?;
    if let Some(dir) = source_dir {
        manifest = manifest.with_source_dir(dir);
    }
    if let Some(dir) = output_dir {
        manifest = manifest.with_output_dir(dir);
    }

    let options = ConvertOptions::new()
        .with_parse_options(ParseOptions::new().with_normalization(nfc))
        .with_render_options(RenderOptions::new().with_escape(!raw))
        .with_parallel(parallel);

    let jobs = manifest.conversion_jobs();
    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    if parallel {
        pb.set_message("Converting...");
        let report = convert_batch(&jobs, &options)?;
        pb.set_position(jobs.len() as u64);
        for outcome in &report.outcomes {
            pb.suspend(|| println!("{}", convert_line(outcome)));
        }
    } else {
        for job in &jobs {
            pb.set_message(file_name(&job.source));
            let outcome = convert_job(job, &options)?;
            pb.suspend(|| println!("{}", convert_line(&outcome)));
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    println!("{}", "Conversion complete!".green().bold());
    Ok(())
}

fn convert_line(outcome: &ConvertOutcome) -> String {
    match outcome {
        ConvertOutcome::Converted {
            source,
            destination,
            ..
        } => format!(
            "{} {} -> {}",
            "Converted:".green(),
            file_name(source),
            file_name(destination)
        ),
        ConvertOutcome::Missing { source } => {
            format!("{} {}", "File not found:".yellow(), file_name(source))
        }
    }
}

fn cmd_store(
    manifest: Option<&Path>,
    db: Option<PathBuf>,
    html_dir: Option<PathBuf>,
    table: Option<String>,
    column: Option<String>,
) -> CliResult {
    let mut manifest = load_manifest(manifest)?;
    if let Some(dir) = html_dir {
        manifest = manifest.with_output_dir(dir);
    }
    if let Some(path) = db {
        manifest = manifest.with_database(path);
    }

    let db_path = manifest
        .database
        .clone()
        .ok_or("No database given; pass --db or set UNDOCX_DB")?;
    let target = TargetColumn::new(
        table.unwrap_or_else(|| manifest.table.clone()),
        manifest.key_column.clone(),
        column.unwrap_or_else(|| manifest.column.clone()),
    )?;

    let mut updater = RowUpdater::open(&db_path)?.with_target(target);
    let report = updater.update_all(manifest.post_paths())?;

    for outcome in &report.outcomes {
        match outcome {
            UpdateOutcome::Updated { id, path, .. } => {
                println!("{} {}: {}", "Updated ID".green(), id, file_name(path))
            }
            UpdateOutcome::Missing { path, .. } => {
                println!("{} {}", "File not found:".yellow(), file_name(path))
            }
        }
    }

    println!("{}", "All HTML content stored in database!".green().bold());
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool) -> CliResult {
    let doc = undocx::parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = undocx::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> CliResult {
    // Metadata is still worth showing when an optional part is broken
    let options = ParseOptions::new().lenient();
    let doc = parse_file_with_options(input, options)?;
    let format = undocx::detect_format_from_path(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Parts".bold(), format.entry_count);
    println!(
        "{}: {}",
        "Styles".bold(),
        if format.has_styles { "Yes" } else { "No" }
    );

    let meta = &doc.metadata;
    if let Some(ref title) = meta.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref subject) = meta.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(ref creator) = meta.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref last_modified_by) = meta.last_modified_by {
        println!("{}: {}", "Last modified by".bold(), last_modified_by);
    }
    if let Some(ref created) = meta.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = meta.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    let result = undocx::render::to_html_with_stats(&doc, &RenderOptions::new())?;
    let stats = &result.stats;

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), doc.block_count());
    println!(
        "{}: {} ({} rows)",
        "Tables".bold(),
        stats.table_count,
        stats.table_row_count
    );
    println!(
        "{}: {} h1, {} h2",
        "Headings".bold(),
        stats.heading1_count,
        stats.heading2_count
    );
    println!(
        "{}: {} rich, {} plain, {} skipped",
        "Paragraphs".bold(),
        stats.rich_paragraph_count,
        stats.paragraph_count,
        stats.skipped_count
    );
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "undocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX rubric to HTML conversion tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/undocx".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_store_args() {
        let cli = Cli::try_parse_from([
            "undocx", "store", "--db", "app.sqlite", "--table", "posts", "--column", "body",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Store {
                db, table, column, ..
            }) => {
                assert_eq!(db, Some(PathBuf::from("app.sqlite")));
                assert_eq!(table.as_deref(), Some("posts"));
                assert_eq!(column.as_deref(), Some("body"));
            }
            _ => panic!("expected store command"),
        }
    }

    #[test]
    fn test_html_defaults() {
        let cli = Cli::try_parse_from(["undocx", "html", "a.docx"]).unwrap();
        match cli.command {
            Some(Commands::Html { lang, raw, .. }) => {
                assert_eq!(lang, "ko");
                assert!(!raw);
            }
            _ => panic!("expected html command"),
        }
    }

    #[test]
    fn test_store_with_all_files_missing_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let result = cmd_store(
            None,
            Some(dir.path().join("fresh.sqlite")),
            Some(dir.path().join("html")),
            None,
            None,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_convert_with_all_files_missing_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        let result = cmd_convert(
            None,
            Some(dir.path().to_path_buf()),
            Some(output.clone()),
            false,
            false,
            false,
        );
        assert!(result.is_ok());
        assert!(!output.exists());
    }

    #[test]
    fn test_store_without_database_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = cmd_store(None, None, Some(dir.path().to_path_buf()), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_line_uses_file_names() {
        colored::control::set_override(false);
        let line = convert_line(&ConvertOutcome::Converted {
            source: PathBuf::from("uploads/a.docx"),
            destination: PathBuf::from("public/rubric-docs/a.html"),
            stats: Default::default(),
        });
        assert_eq!(line, "Converted: a.docx -> a.html");

        let line = convert_line(&ConvertOutcome::Missing {
            source: PathBuf::from("uploads/b.docx"),
        });
        assert_eq!(line, "File not found: b.docx");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("out/a.html")), "a.html");
    }
}
