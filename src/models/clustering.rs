//! Cluster assignments produced by the pattern clusterer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

/// How a clustering was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterMethod {
    /// Statistical k-means over file features
    KMeans,
    /// Rule-based bucketing by path substrings
    Heuristic,
}

impl fmt::Display for ClusterMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterMethod::KMeans => write!(f, "kmeans"),
            ClusterMethod::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Files grouped into architectural clusters
///
/// Every file that entered clustering appears in exactly one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    /// Cluster id to member paths
    pub clusters: BTreeMap<String, Vec<String>>,
    /// Cluster id to human-readable label
    pub patterns: BTreeMap<String, String>,
    pub n_clusters: usize,
    pub method: ClusterMethod,
}

impl ClusterResult {
    /// Result with no clusters, used for empty input
    pub fn empty(n_clusters: usize, method: ClusterMethod) -> Self {
        Self {
            clusters: BTreeMap::new(),
            patterns: BTreeMap::new(),
            n_clusters,
            method,
        }
    }

    /// Cluster ids in display order: numeric ids ascending, then named ids
    pub fn ordered_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        ids.sort_by_key(|id| (id.parse::<usize>().map_err(|_| *id), *id));
        ids
    }

    /// Total number of files across all clusters
    pub fn file_count(&self) -> usize {
        self.clusters.values().map(Vec::len).sum()
    }

    /// Render each cluster with its label, size and a few example files
    pub fn architecture_summary(&self) -> String {
        let mut summary = String::from("Identified Architectural Pattern:\n\n");

        for id in self.ordered_ids() {
            let label = &self.patterns[id];
            let files = self.clusters.get(id).map(Vec::as_slice).unwrap_or(&[]);

            let _ = writeln!(summary, "[{}]", label);
            let _ = writeln!(summary, "  Files: {}", files.len());
            for file in files.iter().take(3) {
                let _ = writeln!(summary, "    - {}", file);
            }
            if files.len() > 3 {
                let _ = writeln!(summary, "    ... and {} more", files.len() - 3);
            }
            summary.push('\n');
        }

        summary
    }
}
