//! Tests for output formatting

use super::*;
use crate::models::analysis::{AnalysisError, AnalysisMetadata, IssueSeverity, RepositoryStructure, Summaries};
use crate::models::batch::{ComparisonDelta, ComparisonSnapshot, RepositoryReport};
use crate::models::clustering::{ClusterMethod, ClusterResult};
use crate::models::dependency_graph::{DependencyGraph, DependencyReport, DependencySet};
use crate::models::file_entry::{FileEntry, Language};
use std::collections::BTreeMap;
use std::fs;
use tempfile::tempdir;

fn create_test_result() -> AnalysisResult {
    let files = vec![
        FileEntry::file("README.md", "README.md", 120, Language::Markdown, true),
        FileEntry::directory("src", "src"),
        FileEntry::file("src/app.py", "app.py", 2048, Language::Python, false),
        FileEntry::file("src/util.py", "util.py", 300, Language::Python, false),
    ];
    let structure = RepositoryStructure::from_entries(files);

    let mut graph = DependencyGraph::new();
    for path in ["README.md", "src/app.py", "src/util.py"] {
        graph.add_node(path.to_string());
    }
    graph.add_edge("src/app.py", "src/util.py");
    let mut deps: BTreeMap<String, DependencySet> = BTreeMap::new();
    deps.insert("src/app.py".to_string(), ["src/util.py".to_string()].into_iter().collect());
    let dependencies = DependencyReport::from_graph(&graph, &deps, 10);

    let mut clustering = ClusterResult::empty(2, ClusterMethod::Heuristic);
    clustering.clusters.insert("core".to_string(), vec!["src/app.py".to_string()]);
    clustering.patterns.insert("core".to_string(), "Core Logic".to_string());

    let mut files = BTreeMap::new();
    files.insert("src/app.py".to_string(), "[PYTHON] 1 import(s)".to_string());

    AnalysisResult {
        metadata: AnalysisMetadata {
            repository: "demo <repo>".to_string(),
            path: "/tmp/demo".to_string(),
            source: "local".to_string(),
            timestamp: chrono::Utc::now(),
            tool_version: "0.1.0".to_string(),
        },
        structure,
        dependencies,
        clustering: Some(clustering),
        summaries: Summaries {
            overview: "Repository with 3 files across 1 directories.\nPrimary language: python.".to_string(),
            architecture: None,
            files,
        },
        errors: vec![AnalysisError {
            path: "secret".to_string(),
            message: "Permission denied accessing secret".to_string(),
            severity: IssueSeverity::Warning,
        }],
    }
}

fn snapshot(name: &str, files: usize, edges: usize) -> ComparisonSnapshot {
    ComparisonSnapshot {
        repository: name.to_string(),
        source: "local".to_string(),
        total_files: files,
        total_directories: 1,
        primary_language: Some("python".to_string()),
        languages: BTreeMap::new(),
        total_edges: edges,
        density: 0.5,
        key_files: Vec::new(),
    }
}

fn create_comparison() -> ComparisonReport {
    ComparisonReport {
        left: snapshot("left", 3, 1),
        right: snapshot("right", 5, 0),
        delta: ComparisonDelta {
            files: 2,
            directories: 0,
            edges: -1,
            density: 0.0,
        },
        shared_languages: vec!["python".to_string()],
        only_left: Vec::new(),
        only_right: Vec::new(),
    }
}

#[test]
fn test_text_formatter() {
    let result = create_test_result();

    let normal = TextFormatter::new(false, false, false).format(&result).unwrap();
    assert!(normal.contains("Repository Analysis: demo <repo>"));
    assert!(normal.contains("  Files: 3"));
    assert!(normal.contains("  Primary language: python"));
    assert!(normal.contains("  Edges: 1"));
    assert!(normal.contains("Architecture (heuristic)"));
    assert!(normal.contains("Issues encountered: 1"));
    assert!(!normal.contains("[WARNING]"));

    let verbose = TextFormatter::new(false, true, false).format(&result).unwrap();
    assert!(verbose.contains("src/app.py -> src/util.py"));
    assert!(verbose.contains("[WARNING] secret"));

    let quiet = TextFormatter::new(false, false, true).format(&result).unwrap();
    assert_eq!(quiet.lines().count(), 1);
    assert!(quiet.contains("3 files, 1 directories, 1 dependency edges"));
}

#[test]
fn test_text_colors() {
    let result = create_test_result();
    let colored = TextFormatter::new(true, false, false).format(&result).unwrap();
    let plain = TextFormatter::new(false, false, false).format(&result).unwrap();
    assert!(colored.contains("\u{1b}["));
    assert!(!plain.contains("\u{1b}["));
}

#[test]
fn test_json_formatter() {
    let result = create_test_result();
    let json = JsonFormatter::new(true).format(&result).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    for key in ["metadata", "structure", "dependencies", "clustering", "summaries"] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(value["dependencies"]["edges"][0]["source"], "src/app.py");
    assert_eq!(value["structure"]["files"][1]["type"], "directory");
    assert!(value["structure"]["files"][1]["language"].is_null());
}

#[test]
fn test_csv_formatter() {
    let result = create_test_result();
    let csv_output = CsvFormatter::new().format(&result).unwrap();
    let lines: Vec<&str> = csv_output.lines().collect();

    assert_eq!(lines[0], "Path,Type,Language,Size (bytes),Key File,Dependencies");
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "README.md,file,markdown,120,true,");
    assert_eq!(lines[2], "src,directory,,0,false,");
    assert_eq!(lines[3], "src/app.py,file,python,2048,false,1");
}

#[test]
fn test_html_formatter_escapes() {
    let result = create_test_result();
    let html = HtmlFormatter::new().format(&result).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("demo &lt;repo&gt;"));
    assert!(!html.contains("demo <repo>"));
    assert!(html.contains("<td>python</td><td>2</td>"));
    assert!(html.contains("Most Connected Files"));
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("a<b & \"c\" 'd'"), "a&lt;b &amp; &quot;c&quot; &#39;d&#39;");
}

#[test]
fn test_batch_formatters() {
    let results = BatchResults::from_reports(vec![
        RepositoryReport::failed("https://github.com/a/gone", "a", "gone", "Repository not found: https://github.com/a/gone"),
    ]);

    let text = TextFormatter::new(false, false, false).format_batch(&results).unwrap();
    assert!(text.contains("Failed: 1"));
    assert!(text.contains("[FAILED] https://github.com/a/gone: Repository not found"));

    let csv_output = CsvFormatter::new().format_batch(&results).unwrap();
    assert!(csv_output.starts_with("Repository,Owner,Status"));

    let html = HtmlFormatter::new().format_batch(&results).unwrap();
    assert!(html.contains("Failed: Repository not found"));
}

#[test]
fn test_comparison_formatters() {
    let report = create_comparison();

    let text = TextFormatter::new(false, false, false).format_comparison(&report).unwrap();
    assert!(text.contains("Comparison: left vs right"));
    assert!(text.contains("+2"));
    assert!(text.contains("-1"));
    assert!(text.contains("Shared languages: python"));

    let csv_output = CsvFormatter::new().format_comparison(&report).unwrap();
    let lines: Vec<&str> = csv_output.lines().collect();
    assert_eq!(lines[0], "Metric,left,right,Delta");
    assert_eq!(lines[1], "Files,3,5,2");
    assert_eq!(lines[3], "Dependency Edges,1,0,-1");

    let json = JsonFormatter::new(false).format_comparison(&report).unwrap();
    assert!(json.contains("\"only_right\":[]"));
}

#[test]
fn test_create_formatter() {
    let result = create_test_result();
    let html = create_formatter(OutputFormat::Html, false, false, false).format(&result).unwrap();
    assert!(html.contains("<html>"));
    let json = create_formatter(OutputFormat::Json, false, false, false).format(&result).unwrap();
    assert!(json.trim_start().starts_with('{'));
}

#[test]
fn test_file_writer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let writer = FileWriter::new(&path);
    writer.write("hello").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
}

#[test]
fn test_file_writer_missing_directory() {
    let writer = FileWriter::new("/no/such/dir/out.txt");
    assert!(matches!(
        writer.write("x"),
        Err(crate::error::RepoPilotError::OutputWrite { .. })
    ));
}
