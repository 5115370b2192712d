//! RepoPilot - repository structure and architecture analyzer
//!
//! Walks a local directory or a cloned GitHub repository, extracts import
//! statements with language-specific patterns, builds an internal dependency
//! graph, groups files into architectural clusters and produces textual
//! summaries. Results serialize to JSON and render as text, CSV or HTML.

pub mod batch;
pub mod ci;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod github;
pub mod logging;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use crate::core::{Analyzer, RepositoryTarget};
pub use error::{ErrorSeverity, RepoPilotError, Result, ResultExt};
pub use models::{
    analysis::{AnalysisResult, RepositoryStructure},
    batch::{BatchResults, ComparisonReport},
    config::Settings,
    dependency_graph::{DependencyGraph, DependencyReport},
    file_entry::{FileEntry, Language},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
