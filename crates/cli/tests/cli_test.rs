//! # CLI Command Tests
//!
//! Runs the `rentlaw` binary against generated PDFs.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use rentlaw_test_utils::fixtures::PDF_LAW_PAGES;
use rentlaw_test_utils::helpers::generate_test_pdf_pages;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

/// Helper to write a generated PDF fixture into a given directory.
fn create_fixture_pdf(dir: &Path, pages: &[&str]) -> PathBuf {
    let file_path = dir.join("sample.pdf");
    let pdf_data = generate_test_pdf_pages(pages).expect("Failed to generate fixture PDF");
    fs::write(&file_path, pdf_data).expect("Failed to write fixture PDF");
    file_path
}

/// A `rentlaw` command isolated from the caller's configuration.
fn rentlaw(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rentlaw").unwrap();
    cmd.current_dir(dir)
        .env_remove("RENTLAW_LAW_PDF")
        .env_remove("RENTLAW_CHAPTER_PATTERN")
        .env_remove("RENTLAW_PARAGRAPH_PATTERN");
    cmd
}

#[test]
fn test_text_command_by_page() {
    // Arrange
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_pdf(temp_dir.path(), &["First page", "Second page"]);

    // Act & Assert
    rentlaw(temp_dir.path())
        .arg("text")
        .arg(&fixture_path)
        .arg("--by-page")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- page 1 ---\nFirst page\n"))
        .stdout(predicate::str::contains("--- page 2 ---\nSecond page\n"));
}

#[test]
fn test_segment_command_emits_paragraph_units() {
    // Arrange
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_pdf(temp_dir.path(), &PDF_LAW_PAGES);

    // Act
    let output = rentlaw(temp_dir.path())
        .arg("segment")
        .arg(&fixture_path)
        .arg("--format")
        .arg("jsonl")
        .output()
        .unwrap();

    // Assert
    assert!(output.status.success());
    let units: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let summary: Vec<_> = units
        .iter()
        .map(|u| {
            (
                u["title"].as_str().unwrap().to_string(),
                u["parent_title"].as_str().unwrap().to_string(),
                u["page"].as_u64(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("§ 1.".to_string(), "Kapitel 1".to_string(), Some(0)),
            ("§ 2.".to_string(), "Kapitel 1".to_string(), Some(0)),
            ("§ 3.".to_string(), "Kapitel 2".to_string(), Some(1)),
        ]
    );
    assert_eq!(units[2]["content"], "§ 3. Udlejeren kan kræve depositum.");
}

#[test]
fn test_segment_command_no_file() {
    let temp_dir = tempdir().unwrap();

    rentlaw(temp_dir.path())
        .arg("segment")
        .arg("a/non/existent/law.pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("segment failed"));
}

#[test]
fn test_segment_command_without_input_or_config() {
    let temp_dir = tempdir().unwrap();

    rentlaw(temp_dir.path())
        .arg("segment")
        .assert()
        .failure()
        .stderr(predicate::str::contains("`law_pdf` is not configured"));
}

#[test]
fn test_segment_command_uses_configured_law_pdf() {
    // Arrange
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_pdf(temp_dir.path(), &["No headings here."]);
    let output_path = temp_dir.path().join("units.json");
    fs::write(
        temp_dir.path().join("rentlaw.yml"),
        format!("law_pdf: \"{}\"\n", fixture_path.display()),
    )
    .unwrap();

    // Act
    rentlaw(temp_dir.path())
        .arg("segment")
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    // Assert
    let units: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert!(units.is_array());
}

#[test]
fn test_invalid_pattern_from_environment() {
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_pdf(temp_dir.path(), &["No headings here."]);

    rentlaw(temp_dir.path())
        .env("RENTLAW_PARAGRAPH_PATTERN", "(unclosed")
        .arg("segment")
        .arg(&fixture_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid heading pattern"));
}

#[test]
fn test_inspect_command_reports_and_strict_mode() {
    // Arrange
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_pdf(temp_dir.path(), &["A contract, not a law."]);

    // Act & Assert
    // A. The report is printed and marks the document as not well formed.
    rentlaw(temp_dir.path())
        .arg("inspect")
        .arg(&fixture_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"well_formed\": false"));

    // B. Strict mode turns that into a failure.
    rentlaw(temp_dir.path())
        .arg("inspect")
        .arg("--strict")
        .arg(&fixture_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not well formed"));
}

#[test]
fn test_inspect_command_accepts_well_formed_law() {
    let temp_dir = tempdir().unwrap();
    let fixture_path = create_fixture_pdf(temp_dir.path(), &PDF_LAW_PAGES);

    rentlaw(temp_dir.path())
        .arg("inspect")
        .arg("--strict")
        .arg(&fixture_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"well_formed\": true"));
}
