//! Core analysis pipeline: walking, clustering, summarizing and orchestration

pub mod analyzer;
pub mod clustering;
pub mod summarizer;
pub mod walker;

pub use analyzer::{save_json, Analyzer, RepositoryTarget, LOCAL_SOURCE};
pub use clustering::{detect_strategy, ClusterStrategy, HeuristicClusterer};
#[cfg(feature = "clustering")]
pub use clustering::KMeansClusterer;
pub use summarizer::{Summarizer, SummarizerConfig, SummaryGenerator};
pub use walker::{RepositoryWalker, WalkOutcome};
