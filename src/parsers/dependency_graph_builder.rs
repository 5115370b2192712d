//! Dependency graph construction from extracted imports
//!
//! Every walked file becomes a node. An import string becomes an edge only
//! when it is literally the path of another tracked file; bare module names
//! and unresolved relative specifiers never produce edges.

use crate::models::analysis::AnalysisError;
use crate::models::dependency_graph::{DependencyGraph, DependencyReport, DependencySet};
use crate::models::file_entry::FileEntry;
use crate::parsers::dependency_extractor::DependencyExtractor;
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration for dependency graph building
#[derive(Debug, Clone)]
pub struct GraphBuilderConfig {
    /// Number of most-connected files reported
    pub hot_spot_limit: usize,
}

impl Default for GraphBuilderConfig {
    fn default() -> Self {
        Self { hot_spot_limit: 10 }
    }
}

/// Graph, exported report and read failures from one build
#[derive(Debug, Clone)]
pub struct GraphBuildOutcome {
    pub graph: DependencyGraph,
    pub report: DependencyReport,
    pub errors: Vec<AnalysisError>,
}

/// Builds the intra-repository dependency graph
#[derive(Debug, Clone, Default)]
pub struct DependencyGraphBuilder {
    extractor: DependencyExtractor,
    config: GraphBuilderConfig,
}

impl DependencyGraphBuilder {
    /// Create a new dependency graph builder
    pub fn new(config: GraphBuilderConfig) -> Self {
        Self {
            extractor: DependencyExtractor::new(),
            config,
        }
    }

    /// Build the graph and return its serializable report
    pub fn build(&self, root: &Path, files: &[FileEntry]) -> DependencyReport {
        self.build_with_errors(root, files).report
    }

    /// Build the graph, keeping read failures for the caller
    pub fn build_with_errors(&self, root: &Path, files: &[FileEntry]) -> GraphBuildOutcome {
        let mut graph = DependencyGraph::new();
        let mut dependencies: BTreeMap<String, DependencySet> = BTreeMap::new();
        let mut errors = Vec::new();

        for entry in files.iter().filter(|f| f.is_file()) {
            graph.add_node(entry.path.clone());
        }

        for entry in files.iter().filter(|f| f.is_file()) {
            let deps = match self.extractor.try_extract(entry, root) {
                Ok(deps) => deps,
                Err(err) => {
                    tracing::warn!("{}", err);
                    errors.push(AnalysisError::new(entry.path.clone(), &err));
                    DependencySet::new()
                }
            };

            for dep in &deps {
                if graph.contains(dep) {
                    graph.add_edge(&entry.path, dep);
                }
            }
            dependencies.insert(entry.path.clone(), deps);
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "dependency graph built"
        );

        let report = DependencyReport::from_graph(&graph, &dependencies, self.config.hot_spot_limit);
        GraphBuildOutcome { graph, report, errors }
    }
}
