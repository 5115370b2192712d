//! Directory walking functionality
//!
//! Enumerates every file and directory under a repository root, skipping
//! noise directories and dot-prefixed entries, and tags files with their
//! language and key-file status.

use crate::error::{RepoPilotError, Result, ResultExt};
use crate::models::analysis::AnalysisError;
use crate::models::config::Settings;
use crate::models::file_entry::FileEntry;
use glob::Pattern;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

pub use crate::models::file_entry::Language;

/// Names that are never walked, in addition to any dot-prefixed name
pub const SKIP_NAMES: &[&str] = &[".git", "__pycache__", "node_modules", ".venv", "venv", "dist", "build"];

/// Well-known project configuration and documentation files
pub const KEY_FILES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "setup.py",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "Makefile",
    "Rakefile",
    "CMakeLists.txt",
    "pom.xml",
    "build.gradle",
    ".env",
    ".env.example",
    "README.md",
    "README.rst",
    "CONTRIBUTING.md",
    "LICENSE",
    "tsconfig.json",
    "webpack.config.js",
    ".eslintrc",
    ".prettier",
    "Procfile",
    "tox.ini",
    "pytest.ini",
    "setup.cfg",
];

/// Whether an entry with this name is left out of the walk
pub fn should_skip(name: &str) -> bool {
    name.starts_with('.') || SKIP_NAMES.contains(&name)
}

/// Whether a file name is one of the well-known key files
pub fn is_key_file(name: &str) -> bool {
    KEY_FILES.contains(&name)
}

/// Convert a path under `root` into a `/`-separated relative path
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Entries found by a walk plus the non-fatal problems met along the way
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    pub entries: Vec<FileEntry>,
    pub errors: Vec<AnalysisError>,
}

impl WalkOutcome {
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_file()).count()
    }

    pub fn directory_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_directory()).count()
    }
}

/// Repository walker configured from settings
#[derive(Debug, Clone)]
pub struct RepositoryWalker {
    exclude_patterns: Vec<Pattern>,
    max_depth: Option<usize>,
    follow_links: bool,
}

impl RepositoryWalker {
    /// Create a walker, compiling the configured exclude globs
    pub fn new(settings: &Settings) -> Result<Self> {
        let exclude_patterns = settings
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(RepoPilotError::from))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            exclude_patterns,
            max_depth: settings.max_depth,
            follow_links: settings.follow_links,
        })
    }

    /// Walk `root`, returning entries in pre-order with siblings sorted by name
    pub fn walk(&self, root: &Path) -> Result<WalkOutcome> {
        if !root.is_dir() {
            return Err(RepoPilotError::InvalidPath {
                path: root.to_path_buf(),
            });
        }

        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.follow_links)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()));
        if let Some(max_depth) = self.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut outcome = WalkOutcome::default();
        let iter = walker.into_iter().filter_entry(|entry| !self.is_filtered(root, entry));

        for item in iter {
            let failed_path = item.as_ref().err().and_then(|e| e.path().map(Path::to_path_buf));
            let path = failed_path.as_deref().unwrap_or(root);
            match item.with_file_context(path) {
                Ok(entry) => outcome.entries.push(self.to_file_entry(root, &entry)),
                Err(error) => {
                    tracing::warn!(path = %path.display(), "skipping unreadable entry: {}", error);
                    outcome.errors.push(AnalysisError::new(relative_path(root, path), &error));
                }
            }
        }

        tracing::debug!(
            files = outcome.file_count(),
            directories = outcome.directory_count(),
            "walk finished for {}",
            root.display()
        );
        Ok(outcome)
    }

    /// Check if a path matches any exclude pattern
    pub fn is_excluded(&self, relative: &str, name: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(relative) || pattern.matches(name))
    }

    fn is_filtered(&self, root: &Path, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if should_skip(&name) {
            return true;
        }
        !self.exclude_patterns.is_empty() && self.is_excluded(&relative_path(root, entry.path()), &name)
    }

    fn to_file_entry(&self, root: &Path, entry: &DirEntry) -> FileEntry {
        let path = relative_path(root, entry.path());
        let name = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type().is_dir() {
            return FileEntry::directory(path, name);
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        let language = Language::from_path(entry.path());
        let key = is_key_file(&name);
        FileEntry::file(path, name, size, language, key)
    }
}
