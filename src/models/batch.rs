//! Batch and comparison result structures

use super::analysis::AnalysisResult;
use super::clustering::ClusterResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of hot spots kept in a flattened per-repository report
pub const REPORT_HOT_SPOTS: usize = 5;

/// One repository requested by a batch CSV row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub url: String,
    pub name: String,
    pub description: String,
}

/// Flattened analysis of one repository in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub url: String,
    pub owner: String,
    pub repo: String,
    pub success: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<ReportMetadata>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dependencies: Option<ReportDependencies>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub clustering: Option<ClusterResult>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,
}

impl RepositoryReport {
    /// Report for a repository whose clone or analysis failed
    pub fn failed(url: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            owner: owner.into(),
            repo: repo.into(),
            success: false,
            timestamp: chrono::Utc::now(),
            error: Some(error.into()),
            metadata: None,
            dependencies: None,
            clustering: None,
            summary: None,
        }
    }

    /// Flatten a full analysis into a report
    pub fn from_analysis(url: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>, analysis: &AnalysisResult) -> Self {
        let structure = &analysis.structure;
        let metrics = &analysis.dependencies.metrics;

        Self {
            url: url.into(),
            owner: owner.into(),
            repo: repo.into(),
            success: true,
            timestamp: chrono::Utc::now(),
            error: None,
            metadata: Some(ReportMetadata {
                total_files: structure.total_files,
                total_directories: structure.total_directories,
                primary_language: structure.primary_language.clone(),
                languages: structure.languages.clone(),
                key_files: structure.key_files.clone(),
            }),
            dependencies: Some(ReportDependencies {
                total_nodes: metrics.total_nodes,
                total_edges: metrics.total_edges,
                density: metrics.density,
                most_connected: metrics
                    .most_connected
                    .iter()
                    .take(REPORT_HOT_SPOTS)
                    .cloned()
                    .collect(),
            }),
            clustering: analysis.clustering.clone(),
            summary: Some(analysis.summaries.overview.clone()),
        }
    }
}

/// Structure statistics kept in a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub total_files: usize,
    pub total_directories: usize,
    pub primary_language: Option<String>,
    pub languages: BTreeMap<String, usize>,
    pub key_files: Vec<String>,
}

/// Graph metrics kept in a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDependencies {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub density: f64,
    pub most_connected: Vec<String>,
}

/// Aggregate of a whole batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub total_repos: usize,
    pub successful: usize,
    pub failed: usize,
    pub analyses: Vec<RepositoryReport>,
}

impl BatchResults {
    /// Collect reports, counting successes and failures
    pub fn from_reports(analyses: Vec<RepositoryReport>) -> Self {
        let successful = analyses.iter().filter(|a| a.success).count();
        Self {
            timestamp: chrono::Utc::now(),
            total_repos: analyses.len(),
            successful,
            failed: analyses.len() - successful,
            analyses,
        }
    }
}

/// Headline numbers for one side of a comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSnapshot {
    pub repository: String,
    pub source: String,
    pub total_files: usize,
    pub total_directories: usize,
    pub primary_language: Option<String>,
    pub languages: BTreeMap<String, usize>,
    pub total_edges: usize,
    pub density: f64,
    pub key_files: Vec<String>,
}

/// Differences computed as `right - left`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDelta {
    pub files: i64,
    pub directories: i64,
    pub edges: i64,
    pub density: f64,
}

/// Side-by-side comparison of two analyses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub left: ComparisonSnapshot,
    pub right: ComparisonSnapshot,
    pub delta: ComparisonDelta,
    pub shared_languages: Vec<String>,
    pub only_left: Vec<String>,
    pub only_right: Vec<String>,
}
