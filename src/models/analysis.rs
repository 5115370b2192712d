//! Analysis result structures

use super::clustering::ClusterResult;
use super::dependency_graph::DependencyReport;
use super::file_entry::{FileEntry, Language};
use crate::error::{self, RepoPilotError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Complete analysis of one repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: AnalysisMetadata,
    pub structure: RepositoryStructure,
    pub dependencies: DependencyReport,
    pub clustering: Option<ClusterResult>,
    pub summaries: Summaries,
    /// Non-fatal problems met during the run
    #[serde(default)]
    pub errors: Vec<AnalysisError>,
}

impl AnalysisResult {
    /// Count of warning-level issues
    pub fn warning_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| e.severity == IssueSeverity::Warning)
            .count()
    }
}

/// Where the analysis came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Repository name (directory name or `owner/repo`)
    pub repository: String,
    /// Absolute path that was walked
    pub path: String,
    /// `local` or the GitHub URL that was cloned
    pub source: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub tool_version: String,
}

/// File tree statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryStructure {
    pub total_files: usize,
    pub total_directories: usize,
    pub files: Vec<FileEntry>,
    pub key_files: Vec<String>,
    /// Language to file count, `unknown` excluded
    pub languages: BTreeMap<String, usize>,
    pub primary_language: Option<String>,
}

impl RepositoryStructure {
    /// Derive counts and language statistics from walked entries
    pub fn from_entries(files: Vec<FileEntry>) -> Self {
        let total_files = files.iter().filter(|f| f.is_file()).count();
        let total_directories = files.iter().filter(|f| f.is_directory()).count();
        let key_files = files
            .iter()
            .filter(|f| f.is_key_file)
            .map(|f| f.path.clone())
            .collect();

        let mut languages = BTreeMap::new();
        for entry in files.iter().filter(|f| f.is_file()) {
            let language = entry.language_or_unknown();
            if language != Language::Unknown {
                *languages.entry(language.as_str().to_string()).or_insert(0) += 1;
            }
        }
        let primary_language = primary_language(&languages);

        Self {
            total_files,
            total_directories,
            files,
            key_files,
            languages,
            primary_language,
        }
    }

    /// File entries only, in walk order
    pub fn file_entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().filter(|f| f.is_file())
    }

    /// Languages ordered by file count descending, ties alphabetical
    pub fn languages_by_count(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .languages
            .iter()
            .map(|(lang, count)| (lang.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Language with the highest count; ties go to the alphabetically first
pub fn primary_language(languages: &BTreeMap<String, usize>) -> Option<String> {
    let mut best: Option<(&String, usize)> = None;
    for (language, &count) in languages {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((language, count));
        }
    }
    best.map(|(language, _)| language.clone())
}

/// Generated descriptions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summaries {
    pub overview: String,
    pub architecture: Option<String>,
    /// Per-file summaries for hot spots
    pub files: BTreeMap<String, String>,
}

/// Error that occurred during analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisError {
    pub path: String,
    pub message: String,
    pub severity: IssueSeverity,
}

impl AnalysisError {
    /// Record an error against a repository-relative path
    pub fn new(path: impl Into<String>, error: &RepoPilotError) -> Self {
        Self {
            path: path.into(),
            message: error.user_message(),
            severity: IssueSeverity::from(error),
        }
    }
}

/// Severity level of recorded analysis errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
    Error,
    Critical,
}

impl From<&RepoPilotError> for IssueSeverity {
    fn from(error: &RepoPilotError) -> Self {
        match error.severity() {
            error::ErrorSeverity::Warning => IssueSeverity::Warning,
            error::ErrorSeverity::Error => IssueSeverity::Error,
            error::ErrorSeverity::Critical => IssueSeverity::Critical,
        }
    }
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Warning => write!(f, "warning"),
            IssueSeverity::Error => write!(f, "error"),
            IssueSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Format a byte count as a human-readable string
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{}B", size)
    } else if size < 1024 * 1024 {
        format!("{:.2}KB", size as f64 / 1024.0)
    } else if size < 1024 * 1024 * 1024 {
        format!("{:.2}MB", size as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2}GB", size as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
