//! Side-by-side comparison of two analyses

use crate::core::analyzer::{Analyzer, RepositoryTarget};
use crate::error::Result;
use crate::github::VcsClient;
use crate::models::analysis::AnalysisResult;
use crate::models::batch::{ComparisonDelta, ComparisonReport, ComparisonSnapshot};

impl From<&AnalysisResult> for ComparisonSnapshot {
    fn from(analysis: &AnalysisResult) -> Self {
        let structure = &analysis.structure;
        Self {
            repository: analysis.metadata.repository.clone(),
            source: analysis.metadata.source.clone(),
            total_files: structure.total_files,
            total_directories: structure.total_directories,
            primary_language: structure.primary_language.clone(),
            languages: structure.languages.clone(),
            total_edges: analysis.dependencies.metrics.total_edges,
            density: analysis.dependencies.metrics.density,
            key_files: structure.key_files.clone(),
        }
    }
}

/// Compare two finished analyses; deltas are `right - left`
pub fn compare_results(left: &AnalysisResult, right: &AnalysisResult) -> ComparisonReport {
    let left = ComparisonSnapshot::from(left);
    let right = ComparisonSnapshot::from(right);

    let delta = ComparisonDelta {
        files: right.total_files as i64 - left.total_files as i64,
        directories: right.total_directories as i64 - left.total_directories as i64,
        edges: right.total_edges as i64 - left.total_edges as i64,
        density: right.density - left.density,
    };

    let shared_languages = left
        .languages
        .keys()
        .filter(|lang| right.languages.contains_key(*lang))
        .cloned()
        .collect();
    let only_left = left
        .languages
        .keys()
        .filter(|lang| !right.languages.contains_key(*lang))
        .cloned()
        .collect();
    let only_right = right
        .languages
        .keys()
        .filter(|lang| !left.languages.contains_key(*lang))
        .cloned()
        .collect();

    ComparisonReport {
        left,
        right,
        delta,
        shared_languages,
        only_left,
        only_right,
    }
}

/// Analyze two targets one after the other and compare them
pub fn compare_targets<C: VcsClient>(
    analyzer: &Analyzer<C>,
    left: &RepositoryTarget,
    right: &RepositoryTarget,
) -> Result<ComparisonReport> {
    tracing::info!("comparing {} with {}", left, right);
    let left = analyzer.analyze(left)?;
    let right = analyzer.analyze(right)?;
    Ok(compare_results(&left, &right))
}
