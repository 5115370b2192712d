//! Repository analysis pipeline
//!
//! Runs walk, dependency graph, clustering and summaries in sequence and
//! assembles one [`AnalysisResult`]. GitHub targets are shallow-cloned into a
//! temporary directory that is removed once the analysis finishes.

use crate::core::clustering::{detect_strategy, ClusterStrategy, HeuristicClusterer};
use crate::core::summarizer::{Summarizer, SummarizerConfig};
use crate::core::walker::RepositoryWalker;
use crate::error::{RepoPilotError, Result};
use crate::github::{looks_like_url, GitCommandClient, GitHubCloner, VcsClient};
use crate::models::analysis::{AnalysisError, AnalysisMetadata, AnalysisResult, RepositoryStructure, Summaries};
use crate::models::config::Settings;
use crate::parsers::dependency_graph_builder::{DependencyGraphBuilder, GraphBuilderConfig};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Source value recorded for local analyses
pub const LOCAL_SOURCE: &str = "local";

/// What to analyze
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryTarget {
    Local(PathBuf),
    GitHub(String),
}

impl RepositoryTarget {
    /// Interpret a command-line argument as a URL or a path
    pub fn parse(target: &str) -> Self {
        if looks_like_url(target) {
            RepositoryTarget::GitHub(target.trim().to_string())
        } else {
            RepositoryTarget::Local(PathBuf::from(target))
        }
    }
}

impl fmt::Display for RepositoryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryTarget::Local(path) => write!(f, "{}", path.display()),
            RepositoryTarget::GitHub(url) => write!(f, "{}", url),
        }
    }
}

/// Sequences the analysis stages for one repository at a time
pub struct Analyzer<C: VcsClient = GitCommandClient> {
    walker: RepositoryWalker,
    graph_builder: DependencyGraphBuilder,
    clusterer: Option<Box<dyn ClusterStrategy>>,
    n_clusters: Option<usize>,
    summarizer: Summarizer,
    file_summary_limit: usize,
    cloner: GitHubCloner<C>,
}

impl Analyzer<GitCommandClient> {
    /// Create an analyzer that clones with the `git` executable
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_client(settings, GitCommandClient)
    }
}

impl<C: VcsClient> Analyzer<C> {
    /// Create an analyzer with a specific version-control client
    pub fn with_client(settings: &Settings, client: C) -> Result<Self> {
        let clusterer = if settings.enable_clustering {
            let strategy = detect_strategy();
            tracing::info!("clustering method: {}", strategy.method());
            Some(strategy)
        } else {
            None
        };

        let summarizer = Summarizer::from_config(&SummarizerConfig {
            api_key: settings.openai_api_key.clone(),
            model: Some(settings.openai_model.clone()),
        });

        Ok(Self {
            walker: RepositoryWalker::new(settings)?,
            graph_builder: DependencyGraphBuilder::new(GraphBuilderConfig {
                hot_spot_limit: settings.hot_spot_limit,
            }),
            clusterer,
            n_clusters: settings.n_clusters,
            summarizer,
            file_summary_limit: settings.file_summary_limit,
            cloner: GitHubCloner::new(client)
                .with_depth(settings.clone_depth)
                .with_timeout(Duration::from_secs(settings.clone_timeout_secs)),
        })
    }

    /// Replace the clustering strategy, e.g. to force heuristic grouping
    pub fn with_clusterer(mut self, clusterer: Box<dyn ClusterStrategy>) -> Self {
        self.clusterer = Some(clusterer);
        self
    }

    /// Use rule-based clustering regardless of compiled features
    pub fn with_heuristic_clustering(self) -> Self {
        self.with_clusterer(Box::new(HeuristicClusterer))
    }

    pub fn cloner(&self) -> &GitHubCloner<C> {
        &self.cloner
    }

    /// Analyze a local directory or a GitHub repository
    pub fn analyze(&self, target: &RepositoryTarget) -> Result<AnalysisResult> {
        match target {
            RepositoryTarget::Local(path) => self.analyze_path(path, LOCAL_SOURCE),
            RepositoryTarget::GitHub(url) => {
                let cloned = self.cloner.clone_repository(url).into_result()?;
                tracing::info!("{}", cloned.message);
                let result = self.analyze_named(cloned.path(), &cloned.repo.full_name(), url);
                if let Err(err) = cloned.cleanup() {
                    tracing::warn!("failed to remove clone directory: {}", err);
                }
                result
            }
        }
    }

    /// Analyze the directory at `root`, recording `source` in the metadata
    pub fn analyze_path(&self, root: &Path, source: &str) -> Result<AnalysisResult> {
        let name = directory_name(root);
        self.analyze_named(root, &name, source)
    }

    /// Analyze `root` under an explicit repository name
    pub fn analyze_named(&self, root: &Path, repository: &str, source: &str) -> Result<AnalysisResult> {
        tracing::info!(repository, "analyzing {}", root.display());

        let walk = self.walker.walk(root)?;
        let mut errors = walk.errors;
        let structure = RepositoryStructure::from_entries(walk.entries);

        let graph = self.graph_builder.build_with_errors(root, &structure.files);
        errors.extend(graph.errors);
        let dependencies = graph.report;

        let clustering = self
            .clusterer
            .as_ref()
            .map(|strategy| strategy.cluster(&structure.files, self.n_clusters));

        let mut files = BTreeMap::new();
        for path in dependencies.metrics.most_connected.iter().take(self.file_summary_limit) {
            let Some(entry) = structure.files.iter().find(|f| &f.path == path) else {
                continue;
            };
            match self.summarizer.summarize_entry(root, entry) {
                Ok(summary) => {
                    files.insert(path.clone(), summary);
                }
                Err(err) => {
                    tracing::warn!("{}", err);
                    errors.push(AnalysisError::new(path.clone(), &err));
                }
            }
        }

        let summaries = Summaries {
            overview: self.summarizer.generate_repo_overview(&structure),
            architecture: clustering.as_ref().map(|c| c.architecture_summary()),
            files,
        };

        let metadata = AnalysisMetadata {
            repository: repository.to_string(),
            path: absolute_display(root),
            source: source.to_string(),
            timestamp: chrono::Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(AnalysisResult {
            metadata,
            structure,
            dependencies,
            clustering,
            summaries,
            errors,
        })
    }
}

/// Write `result` as pretty-printed JSON
pub fn save_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json).map_err(|source| RepoPilotError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("analysis saved to {}", path.display());
    Ok(())
}

fn directory_name(root: &Path) -> String {
    let resolved = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string())
}

fn absolute_display(root: &Path) -> String {
    fs::canonicalize(root)
        .unwrap_or_else(|_| root.to_path_buf())
        .display()
        .to_string()
}
