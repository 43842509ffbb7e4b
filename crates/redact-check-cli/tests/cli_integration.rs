//! End-to-end tests driving the built `redact-check` binary directly,
//! rather than the library API.

use std::path::PathBuf;
use std::process::Command;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tempfile::tempdir;

fn cli_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("redact-check");
    #[cfg(windows)]
    path.set_extension("exe");
    path
}

/// A one-page PDF with a black rectangle painted over a block of text.
fn redacted_pdf_bytes() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 50.into(), 700.into()]),
        Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), 12.into()]),
        Operation::new(
            "Tj",
            vec![Object::String(b"account number 4111 1111 1111 1111 on file".to_vec(), lopdf::StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
        Operation::new("rg", vec![0.into(), 0.into(), 0.into()]),
        Operation::new("re", vec![48.into(), 696.into(), 200.into(), 20.into()]),
        Operation::new("f", vec![]),
    ];
    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(612), Object::Integer(792)],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! { "Type" => "Pages", "Kids" => vec![page_id.into()], "Count" => 1 }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

#[test]
fn analyze_json_flags_a_redacted_document() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("redacted.pdf");
    std::fs::write(&input, redacted_pdf_bytes()).unwrap();

    let output = Command::new(cli_path()).args(["analyze", "--format", "json"]).arg(&input).output().unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["pages_flagged"], 1);
    assert_eq!(report["pages"][0]["risk"], "flagged");
}

#[test]
fn clean_writes_a_pdf_with_the_overlay_removed() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("redacted.pdf");
    let output_path = dir.path().join("cleaned.pdf");
    std::fs::write(&input, redacted_pdf_bytes()).unwrap();

    let output =
        Command::new(cli_path()).args(["clean", "--output"]).arg(&output_path).arg(&input).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["removed_overlay_ops_estimate"], 1);

    assert!(output_path.exists());
    let cleaned_bytes = std::fs::read(&output_path).unwrap();
    assert!(cleaned_bytes.starts_with(b"%PDF-"));

    let reanalyze = Command::new(cli_path()).args(["analyze", "--format", "json"]).arg(&output_path).output().unwrap();
    assert!(reanalyze.status.success());
    let report: serde_json::Value = serde_json::from_slice(&reanalyze.stdout).unwrap();
    assert_eq!(report["summary"]["pages_flagged"], 0);
}

#[test]
fn analyze_rejects_a_missing_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.pdf");

    let output = Command::new(cli_path()).args(["analyze"]).arg(&missing).output().unwrap();
    assert!(!output.status.success());
}
