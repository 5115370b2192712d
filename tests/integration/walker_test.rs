//! Walker behavior against real directory trees

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use repopilot::{
    core::walker::RepositoryWalker,
    models::{config::Settings, file_entry::Language},
};

fn touch(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn create_project(root: &Path) {
    touch(root, "README.md", "# demo\n");
    touch(root, "requirements.txt", "requests\n");
    touch(root, "src/app.py", "import os\n");
    touch(root, "src/lib/helpers.py", "def helper():\n    pass\n");
    touch(root, "web/index.TS", "export const x = 1;\n");
    touch(root, "node_modules/left-pad/index.js", "module.exports = 1;\n");
    touch(root, ".git/HEAD", "ref: refs/heads/main\n");
    touch(root, "__pycache__/app.cpython-311.pyc", "");
    touch(root, ".env", "SECRET=1\n");
    touch(root, "dist/bundle.js", "");
}

#[test]
fn test_walk_skips_ignored_and_hidden_entries() {
    let dir = tempdir().unwrap();
    create_project(dir.path());

    let walker = RepositoryWalker::new(&Settings::default()).unwrap();
    let outcome = walker.walk(dir.path()).unwrap();
    let paths: Vec<&str> = outcome.entries.iter().map(|e| e.path.as_str()).collect();

    assert_eq!(
        paths,
        vec![
            "README.md",
            "requirements.txt",
            "src",
            "src/app.py",
            "src/lib",
            "src/lib/helpers.py",
            "web",
            "web/index.TS",
        ]
    );
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.file_count(), 5);
    assert_eq!(outcome.directory_count(), 3);
}

#[test]
fn test_walk_classifies_entries() {
    let dir = tempdir().unwrap();
    create_project(dir.path());

    let outcome = RepositoryWalker::new(&Settings::default())
        .unwrap()
        .walk(dir.path())
        .unwrap();
    let find = |path: &str| outcome.entries.iter().find(|e| e.path == path).unwrap();

    assert!(find("README.md").is_key_file);
    assert!(find("requirements.txt").is_key_file);
    assert!(!find("src/app.py").is_key_file);
    assert_eq!(find("src/app.py").language, Some(Language::Python));
    assert_eq!(find("web/index.TS").language, Some(Language::TypeScript));
    assert_eq!(find("src").language, None);
    assert_eq!(find("src/app.py").size, 10);
}

#[test]
fn test_exclude_patterns_and_depth() {
    let dir = tempdir().unwrap();
    create_project(dir.path());

    let settings = Settings {
        exclude_patterns: vec!["web".to_string(), "*.txt".to_string()],
        max_depth: Some(2),
        ..Default::default()
    };
    let outcome = RepositoryWalker::new(&settings).unwrap().walk(dir.path()).unwrap();
    let paths: Vec<&str> = outcome.entries.iter().map(|e| e.path.as_str()).collect();

    assert_eq!(paths, vec!["README.md", "src", "src/app.py", "src/lib"]);
}

#[test]
fn test_missing_root_is_an_error() {
    let walker = RepositoryWalker::new(&Settings::default()).unwrap();
    assert!(walker.walk(Path::new("/definitely/not/a/repo")).is_err());
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_skipped() {
    use repopilot::models::analysis::IssueSeverity;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    touch(dir.path(), "a_first.py", "import os\n");
    touch(dir.path(), "locked/secret.py", "import sys\n");
    touch(dir.path(), "z_last.py", "");

    let locked = dir.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // Running with privileges that bypass file modes
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = RepositoryWalker::new(&Settings::default()).unwrap().walk(dir.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let outcome = result.unwrap();
    let paths: Vec<&str> = outcome.entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["a_first.py", "locked", "z_last.py"]);

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].path, "locked");
    assert_eq!(outcome.errors[0].severity, IssueSeverity::Warning);
    assert!(outcome.errors[0].message.contains("permission denied"));
}
