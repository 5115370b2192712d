use std::fs;
use std::path::Path;
use tempfile::tempdir;
use repopilot::{
    core::analyzer::{Analyzer, RepositoryTarget},
    models::{analysis::AnalysisResult, config::{OutputFormat, Settings}},
    output::{create_formatter, create_writer, Formatter, OutputWriter},
};

fn analyzed_project() -> AnalysisResult {
    let dir = tempdir().unwrap();
    let root: &Path = dir.path();
    fs::create_dir_all(root.join("app")).unwrap();
    fs::write(root.join("requirements.txt"), "flask\n").unwrap();
    fs::write(root.join("app/server.py"), "from flask import Flask\nimport app.routes\n").unwrap();
    fs::write(root.join("app/routes.py"), "def index():\n    return 'ok'\n").unwrap();

    Analyzer::new(&Settings::default())
        .unwrap()
        .analyze(&RepositoryTarget::Local(root.to_path_buf()))
        .unwrap()
}

#[test]
fn test_every_format_renders() {
    let result = analyzed_project();

    let text = create_formatter(OutputFormat::Text, false, false, false).format(&result).unwrap();
    assert!(text.contains("Primary language: python"));

    let json = create_formatter(OutputFormat::Json, false, false, false).format(&result).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["structure"]["total_files"], 3);
    assert_eq!(value["dependencies"]["dependencies"]["app/server.py"][0], "app.routes");

    let csv_output = create_formatter(OutputFormat::Csv, false, false, false).format(&result).unwrap();
    assert_eq!(csv_output.lines().count(), 5);

    let html = create_formatter(OutputFormat::Html, false, false, false).format(&result).unwrap();
    assert!(html.contains("</html>"));
}

#[test]
fn test_quiet_text_is_one_line() {
    let result = analyzed_project();
    let quiet = create_formatter(OutputFormat::Text, false, false, true).format(&result).unwrap();
    assert_eq!(quiet.trim_end().lines().count(), 1);
}

#[test]
fn test_writer_targets_file() {
    let result = analyzed_project();
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.html");

    let rendered = create_formatter(OutputFormat::Html, false, false, false).format(&result).unwrap();
    create_writer(Some(&path)).write(&rendered).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), rendered);
}
