//! Sequential batch analysis of GitHub repositories
//!
//! Each repository gets its own clone, analysis and cleanup. A failure is
//! recorded as a failed report and the batch moves on to the next row.

use crate::core::analyzer::Analyzer;
use crate::error::{RepoPilotError, Result};
use crate::github::{parse_github_url, CloneOutcome, GitCommandClient, VcsClient};
use crate::models::batch::{BatchEntry, BatchResults, RepositoryReport};
use crate::models::config::Settings;
use crate::output::ProgressReporter;

/// Header of the flattened CSV export
pub const CSV_HEADER: [&str; 8] = [
    "Repository",
    "Owner",
    "Status",
    "Total Files",
    "Primary Language",
    "Files Analyzed",
    "Dependencies",
    "Timestamp",
];

/// Runs the analysis pipeline over a list of repositories
pub struct BatchProcessor<C: VcsClient = GitCommandClient> {
    analyzer: Analyzer<C>,
    progress: ProgressReporter,
}

impl BatchProcessor<GitCommandClient> {
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_client(settings, GitCommandClient)
    }
}

impl<C: VcsClient> BatchProcessor<C> {
    /// Create a processor that clones through `client`
    pub fn with_client(settings: &Settings, client: C) -> Result<Self> {
        let progress = if settings.show_progress {
            ProgressReporter::new(settings.quiet, settings.verbose)
        } else {
            ProgressReporter::hidden()
        };
        Ok(Self {
            analyzer: Analyzer::with_client(settings, client)?,
            progress,
        })
    }

    /// Clone, analyze and clean up one repository
    pub fn analyze_repository(&self, url: &str) -> RepositoryReport {
        let (owner, repo) = match parse_github_url(url) {
            Ok(parsed) => (parsed.owner, parsed.repo),
            Err(_) => (String::new(), String::new()),
        };

        let cloned = match self.analyzer.cloner().clone_repository(url) {
            CloneOutcome::Cloned(cloned) => cloned,
            CloneOutcome::Failed(failure) => {
                return RepositoryReport::failed(url, owner, repo, failure.message);
            }
        };

        let report = match self.analyzer.analyze_named(cloned.path(), &cloned.repo.full_name(), url) {
            Ok(analysis) => RepositoryReport::from_analysis(url, owner, repo, &analysis),
            Err(err) => {
                tracing::warn!(url, "analysis failed: {}", err);
                RepositoryReport::failed(url, owner, repo, format!("Analysis failed: {}", err))
            }
        };

        if let Err(err) = cloned.cleanup() {
            tracing::warn!("failed to remove clone directory: {}", err);
        }
        report
    }

    /// Analyze every entry in order
    pub fn process_batch(&self, entries: &[BatchEntry]) -> BatchResults {
        let total = entries.len();
        self.progress.start(total, "Analyzing repositories");

        let mut reports = Vec::with_capacity(total);
        for (index, entry) in entries.iter().enumerate() {
            let message = format!("Analyzing {}/{}: {}...", index + 1, total, entry.name);
            self.progress.update(index, total, &message);
            tracing::info!("{}", message);

            let report = self.analyze_repository(&entry.url);
            if let Some(error) = &report.error {
                self.progress.print(&format!("{}: {}", entry.name, error));
            }
            reports.push(report);
        }

        let results = BatchResults::from_reports(reports);
        self.progress.finish(&format!(
            "{} succeeded, {} failed",
            results.successful, results.failed
        ));
        results
    }
}

/// Pretty-printed JSON of a batch run
pub fn export_to_json(results: &BatchResults) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// One flattened CSV row per repository
pub fn export_to_csv(results: &BatchResults) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(CSV_HEADER)?;

    for report in &results.analyses {
        let timestamp = report.timestamp.to_rfc3339();
        match (&report.metadata, &report.dependencies) {
            (Some(metadata), Some(dependencies)) if report.success => {
                let total_files = metadata.total_files.to_string();
                writer.write_record([
                    report.repo.as_str(),
                    report.owner.as_str(),
                    "Success",
                    total_files.as_str(),
                    metadata.primary_language.as_deref().unwrap_or("Unknown"),
                    total_files.as_str(),
                    dependencies.total_edges.to_string().as_str(),
                    timestamp.as_str(),
                ])?;
            }
            _ => {
                let status = format!("Failed: {}", report.error.as_deref().unwrap_or("unknown error"));
                writer.write_record([
                    report.url.as_str(),
                    "N/A",
                    status.as_str(),
                    "N/A",
                    "N/A",
                    "N/A",
                    "N/A",
                    timestamp.as_str(),
                ])?;
            }
        }
    }

    let bytes = writer.into_inner()?;
    String::from_utf8(bytes).map_err(|source| RepoPilotError::CsvSerialize { source })
}
