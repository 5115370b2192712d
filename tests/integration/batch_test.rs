//! Batch runs driven by CSV input and a fake clone client

use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;
use repopilot::{
    batch::{export_to_csv, export_to_json, read_batch_file, validate_csv, BatchProcessor},
    error::RepoPilotError,
    github::{VcsClient, VcsError},
    models::config::Settings,
};

struct FakeGit;

impl VcsClient for FakeGit {
    fn shallow_clone(&self, url: &str, destination: &Path, _depth: u32, _timeout: Duration) -> Result<(), VcsError> {
        if url.ends_with("/private") {
            return Err(VcsError::CommandFailed("fatal: Authentication failed".to_string()));
        }
        if url.ends_with("/slow") {
            return Err(VcsError::TimedOut(Duration::from_secs(60)));
        }
        fs::create_dir_all(destination.join("src")).unwrap();
        fs::write(destination.join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();
        fs::write(destination.join("src/main.rs"), "mod cli;\nfn main() {}\n").unwrap();
        fs::write(destination.join("src/cli.rs"), "pub fn run() {}\n").unwrap();
        Ok(())
    }
}

fn quiet_settings() -> Settings {
    Settings {
        show_progress: false,
        quiet: true,
        ..Default::default()
    }
}

const CSV: &str = "url,name,description
https://github.com/acme/engine,Engine,Core engine
https://github.com/acme/private,,Needs credentials
https://github.com/acme/slow,Slow,
";

#[test]
fn test_batch_isolates_failures() {
    let entries = validate_csv(CSV).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].name, "private");

    let processor = BatchProcessor::with_client(&quiet_settings(), FakeGit).unwrap();
    let results = processor.process_batch(&entries);

    assert_eq!(results.total_repos, 3);
    assert_eq!(results.successful, 1);
    assert_eq!(results.failed, 2);

    let engine = &results.analyses[0];
    assert!(engine.success);
    assert_eq!(engine.owner, "acme");
    assert_eq!(engine.repo, "engine");
    let metadata = engine.metadata.as_ref().unwrap();
    assert_eq!(metadata.total_files, 3);
    assert_eq!(metadata.primary_language.as_deref(), Some("rust"));

    let private = &results.analyses[1];
    assert!(!private.success);
    assert_eq!(
        private.error.as_deref(),
        Some("Cannot access private repository without authentication")
    );

    let slow = &results.analyses[2];
    assert!(slow.error.as_deref().unwrap().starts_with("Clone timed out after 60s"));
}

#[test]
fn test_batch_exports() {
    let entries = validate_csv(CSV).unwrap();
    let results = BatchProcessor::with_client(&quiet_settings(), FakeGit)
        .unwrap()
        .process_batch(&entries);

    let json: serde_json::Value = serde_json::from_str(&export_to_json(&results).unwrap()).unwrap();
    assert_eq!(json["total_repos"], 3);
    assert_eq!(json["analyses"][0]["success"], true);
    assert!(json["analyses"][1].get("metadata").is_none());

    let csv_output = export_to_csv(&results).unwrap();
    let lines: Vec<&str> = csv_output.lines().collect();
    assert_eq!(
        lines[0],
        "Repository,Owner,Status,Total Files,Primary Language,Files Analyzed,Dependencies,Timestamp"
    );
    assert!(lines[1].starts_with("engine,acme,Success,3,rust,3,"));
    assert!(lines[2].contains("Failed: Cannot access private repository"));
    assert!(lines[2].contains("N/A"));
}

#[test]
fn test_csv_validation_errors() {
    assert!(matches!(validate_csv(""), Err(RepoPilotError::BatchValidation { .. })));

    let err = validate_csv("url,name\nhttps://example.com/a/b,b\n").unwrap_err();
    assert!(err.to_string().contains("Row 2: Invalid GitHub URL"));

    let err = validate_csv("name,description\nfoo,bar\n").unwrap_err();
    assert!(err.to_string().contains("Row 2: Missing 'url' column"));
}

#[test]
fn test_read_batch_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("repos.csv");
    fs::write(&path, CSV).unwrap();

    assert_eq!(read_batch_file(&path).unwrap().len(), 3);
    assert!(read_batch_file(&dir.path().join("missing.csv")).is_err());
}
