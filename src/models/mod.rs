//! Data models and structures for RepoPilot

pub mod analysis;
pub mod batch;
pub mod clustering;
pub mod config;
pub mod dependency_graph;
pub mod file_entry;

pub use analysis::{AnalysisError, AnalysisMetadata, AnalysisResult, IssueSeverity, RepositoryStructure, Summaries};
pub use batch::{BatchEntry, BatchResults, ComparisonReport, RepositoryReport};
pub use clustering::{ClusterMethod, ClusterResult};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use dependency_graph::{DependencyEdge, DependencyGraph, DependencyReport, DependencySet, GraphMetrics};
pub use file_entry::{EntryKind, FileEntry, Language};
