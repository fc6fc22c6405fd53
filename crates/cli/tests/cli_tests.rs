//! Exit-code tests for the `pdf-to-image` binary.
//!
//! These cases fail before any page is rendered, so they do not need pdfium.

use std::process::Command;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pdf-to-image"))
}

#[test]
fn test_malformed_page_range_exits_with_one() {
    let temp = TempDir::new().unwrap();
    let pdf = temp.path().join("doc.pdf");
    std::fs::write(&pdf, b"%PDF-1.4\n").unwrap();

    let output = bin().arg(&pdf).args(["--pages", "x-y"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("x-y"), "stdout: {}", stdout);
}

#[test]
fn test_missing_source_exits_with_one() {
    let temp = TempDir::new().unwrap();
    let output = bin()
        .arg(temp.path().join("missing.pdf"))
        .args(["--pdfium-lib", temp.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PDF file not found"), "stdout: {}", stdout);
}

#[test]
fn test_batch_with_invalid_dpi_exits_with_one() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.pdf");
    let b = temp.path().join("b.pdf");
    std::fs::write(&a, b"%PDF-1.4\n").unwrap();
    std::fs::write(&b, b"%PDF-1.4\n").unwrap();

    let output = bin().arg(&a).arg(&b).args(["--dpi", "0"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp.path().join("a").exists());
}

#[test]
fn test_no_arguments_is_usage_error() {
    let output = bin().output().unwrap();
    assert!(!output.status.success());
}
