//! Full pipeline runs over local directories and fake clones

use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;
use repopilot::{
    batch::compare_targets,
    core::analyzer::{save_json, Analyzer, RepositoryTarget},
    error::RepoPilotError,
    github::{VcsClient, VcsError},
    models::{analysis::AnalysisResult, clustering::ClusterMethod, config::Settings},
};

fn touch(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn create_web_project(root: &Path) {
    touch(root, "package.json", "{\"name\": \"web\"}\n");
    touch(root, "README.md", "# web\n");
    touch(
        root,
        "src/index.js",
        "import { helper } from 'src/utils/helper.js';\nconst cfg = require('src/config.js');\nimport React from 'react';\n",
    );
    touch(root, "src/utils/helper.js", "export function helper() {}\n");
    touch(root, "src/config.js", "module.exports = {};\n");
    touch(root, "tests/index.test.js", "import 'src/index.js';\n");
}

/// Clones by copying a fixture tree, counting calls
struct FixtureClient {
    calls: Cell<usize>,
}

impl VcsClient for FixtureClient {
    fn shallow_clone(&self, url: &str, destination: &Path, _depth: u32, _timeout: Duration) -> Result<(), VcsError> {
        self.calls.set(self.calls.get() + 1);
        if url.contains("missing") {
            return Err(VcsError::CommandFailed("remote: Repository not found.".to_string()));
        }
        create_web_project(destination);
        Ok(())
    }
}

fn analyze_local(root: &Path, settings: &Settings) -> AnalysisResult {
    Analyzer::new(settings)
        .unwrap()
        .analyze(&RepositoryTarget::Local(root.to_path_buf()))
        .unwrap()
}

#[test]
fn test_local_analysis_end_to_end() {
    let dir = tempdir().unwrap();
    create_web_project(dir.path());

    let result = analyze_local(dir.path(), &Settings::default());

    assert_eq!(result.metadata.source, "local");
    assert_eq!(result.structure.total_files, 6);
    assert_eq!(result.structure.total_directories, 3);
    assert_eq!(result.structure.primary_language.as_deref(), Some("javascript"));
    assert!(result.structure.key_files.contains(&"package.json".to_string()));

    let edges: Vec<(&str, &str)> = result
        .dependencies
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(edges.len(), 3);
    assert!(edges.contains(&("src/index.js", "src/utils/helper.js")));
    assert!(edges.contains(&("src/index.js", "src/config.js")));
    assert!(edges.contains(&("tests/index.test.js", "src/index.js")));
    assert_eq!(result.dependencies.metrics.most_connected[0], "src/index.js");
    assert!(result.dependencies.dependencies["src/index.js"].contains(&"react".to_string()));

    let clustering = result.clustering.as_ref().unwrap();
    assert_eq!(clustering.file_count(), 6);
    assert!(result.summaries.architecture.is_some());
    assert!(result.summaries.files.contains_key("src/index.js"));
    assert!(result.summaries.overview.contains("Node.js/JavaScript project"));
}

#[test]
fn test_heuristic_clustering_and_disabled_clustering() {
    let dir = tempdir().unwrap();
    create_web_project(dir.path());

    let heuristic = Analyzer::new(&Settings::default())
        .unwrap()
        .with_heuristic_clustering()
        .analyze(&RepositoryTarget::Local(dir.path().to_path_buf()))
        .unwrap();
    let clustering = heuristic.clustering.unwrap();
    assert_eq!(clustering.method, ClusterMethod::Heuristic);
    assert_eq!(clustering.n_clusters, 4);
    assert!(clustering.clusters["config"].contains(&"src/config.js".to_string()));
    assert!(clustering.clusters["tests"].contains(&"tests/index.test.js".to_string()));

    let settings = Settings {
        enable_clustering: false,
        ..Default::default()
    };
    let plain = analyze_local(dir.path(), &settings);
    assert!(plain.clustering.is_none());
    assert!(plain.summaries.architecture.is_none());
}

#[test]
fn test_github_analysis_uses_clone() {
    let client = FixtureClient { calls: Cell::new(0) };
    let analyzer = Analyzer::with_client(&Settings::default(), client).unwrap();

    let url = "https://github.com/acme/web";
    let result = analyzer.analyze(&RepositoryTarget::GitHub(url.to_string())).unwrap();

    assert_eq!(result.metadata.source, url);
    assert_eq!(result.metadata.repository, "acme/web");
    assert_eq!(result.structure.total_files, 6);
    assert!(!Path::new(&result.metadata.path).exists());
}

#[test]
fn test_github_failures_surface_as_errors() {
    let analyzer = Analyzer::with_client(&Settings::default(), FixtureClient { calls: Cell::new(0) }).unwrap();

    let invalid = analyzer.analyze(&RepositoryTarget::GitHub("https://gitlab.com/a/b".to_string()));
    assert!(matches!(invalid, Err(RepoPilotError::InvalidGitHubUrl { .. })));

    let missing = analyzer.analyze(&RepositoryTarget::GitHub("https://github.com/acme/missing".to_string()));
    match missing {
        Err(RepoPilotError::Clone { message, .. }) => assert!(message.starts_with("Repository not found")),
        other => panic!("unexpected result: {:?}", other.map(|r| r.metadata.repository)),
    }
}

#[test]
fn test_empty_repository() {
    let dir = tempdir().unwrap();
    let result = analyze_local(dir.path(), &Settings::default());

    assert_eq!(result.structure.total_files, 0);
    assert!(result.structure.primary_language.is_none());
    assert!(result.dependencies.edges.is_empty());
    assert_eq!(result.dependencies.metrics.density, 0.0);
    assert_eq!(result.clustering.unwrap().file_count(), 0);
}

#[test]
fn test_save_json_round_trip() {
    let dir = tempdir().unwrap();
    create_web_project(dir.path());
    let result = analyze_local(dir.path(), &Settings::default());

    let out = tempdir().unwrap();
    let path = out.path().join("analysis.json");
    save_json(&result, &path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for key in ["metadata", "structure", "dependencies", "clustering", "summaries"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(value["dependencies"]["metrics"]["total_edges"], 3);
}

#[test]
fn test_compare_local_targets() {
    let left = tempdir().unwrap();
    create_web_project(left.path());
    let right = tempdir().unwrap();
    touch(right.path(), "main.py", "import os\n");

    let analyzer = Analyzer::new(&Settings::default()).unwrap();
    let report = compare_targets(
        &analyzer,
        &RepositoryTarget::Local(left.path().to_path_buf()),
        &RepositoryTarget::Local(right.path().to_path_buf()),
    )
    .unwrap();

    assert_eq!(report.left.total_files, 6);
    assert_eq!(report.right.total_files, 1);
    assert_eq!(report.delta.files, -5);
    assert_eq!(report.delta.edges, -3);
    assert_eq!(report.only_right, vec!["python".to_string()]);
    assert!(report.only_left.contains(&"javascript".to_string()));
}
