//! Import extraction and dependency graph construction

pub mod dependency_extractor;
pub mod dependency_graph_builder;
pub mod import_patterns;

pub use dependency_extractor::DependencyExtractor;
pub use dependency_graph_builder::{DependencyGraphBuilder, GraphBuildOutcome, GraphBuilderConfig};
pub use import_patterns::IMPORT_PATTERNS;
