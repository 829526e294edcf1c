//! Integration tests for manifest-driven batch conversion.

mod common;

use std::fs;

use common::{para, styled, write_docx};
use undocx::{convert_batch, ConvertOptions, ConvertOutcome, Manifest};

fn manifest_for(source: &std::path::Path, output: &std::path::Path) -> Manifest {
    Manifest::from_json(r#"{"documents": ["a.docx", "missing.docx", "b.docx"]}"#)
        .unwrap()
        .with_source_dir(source)
        .with_output_dir(output)
}

#[test]
fn test_batch_skips_missing_sources() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("uploads");
    let output = dir.path().join("public").join("rubric-docs");
    fs::create_dir_all(&source).unwrap();
    write_docx(&source.join("a.docx"), &styled("Heading1", "A"));
    write_docx(&source.join("b.docx"), &para("B"));

    let manifest = manifest_for(&source, &output);
    let report = convert_batch(&manifest.conversion_jobs(), &ConvertOptions::default()).unwrap();

    assert_eq!(report.converted_count(), 2);
    assert_eq!(report.missing_count(), 1);
    assert!(matches!(
        &report.outcomes[1],
        ConvertOutcome::Missing { source: s } if s.ends_with("missing.docx")
    ));

    let a = fs::read_to_string(output.join("a.html")).unwrap();
    assert!(a.contains("    <h1>A</h1>"));
    let b = fs::read_to_string(output.join("b.html")).unwrap();
    assert!(b.contains("    <p>B</p>"));
    assert!(!output.join("missing.html").exists());
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("src");
    fs::create_dir_all(&source).unwrap();
    write_docx(&source.join("a.docx"), &para("one"));
    write_docx(&source.join("b.docx"), &para("two"));

    let sequential = manifest_for(&source, &dir.path().join("seq"));
    let parallel = manifest_for(&source, &dir.path().join("par"));

    let seq_report =
        convert_batch(&sequential.conversion_jobs(), &ConvertOptions::default()).unwrap();
    let par_report = convert_batch(
        &parallel.conversion_jobs(),
        &ConvertOptions::default().with_parallel(true),
    )
    .unwrap();

    assert_eq!(seq_report.converted_count(), par_report.converted_count());
    let sources: Vec<_> = par_report.outcomes.iter().map(|o| o.source()).collect();
    assert!(sources[0].ends_with("a.docx"));
    assert!(sources[2].ends_with("b.docx"));

    for name in ["a.html", "b.html"] {
        assert_eq!(
            fs::read_to_string(dir.path().join("seq").join(name)).unwrap(),
            fs::read_to_string(dir.path().join("par").join(name)).unwrap()
        );
    }
}

#[test]
fn test_rerun_overwrites_with_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("a.docx"), &para("same"));
    let manifest = Manifest::from_json(r#"{"documents": ["a.docx"]}"#)
        .unwrap()
        .with_source_dir(dir.path())
        .with_output_dir(dir.path().join("out"));

    let target = dir.path().join("out").join("a.html");
    fs::create_dir_all(dir.path().join("out")).unwrap();
    fs::write(&target, "stale").unwrap();

    convert_batch(&manifest.conversion_jobs(), &ConvertOptions::default()).unwrap();
    let first = fs::read_to_string(&target).unwrap();
    convert_batch(&manifest.conversion_jobs(), &ConvertOptions::default()).unwrap();
    let second = fs::read_to_string(&target).unwrap();

    assert_ne!(first, "stale");
    assert_eq!(first, second);
}

#[test]
fn test_corrupt_source_aborts_batch() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.docx"), b"not a docx").unwrap();
    let manifest = Manifest::from_json(r#"{"documents": ["a.docx"]}"#)
        .unwrap()
        .with_source_dir(dir.path())
        .with_output_dir(dir.path());

    assert!(convert_batch(&manifest.conversion_jobs(), &ConvertOptions::default()).is_err());
}
