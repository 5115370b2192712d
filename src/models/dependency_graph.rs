//! Directed dependency graph between tracked files
//!
//! Nodes are repository-relative file paths. An edge `a -> b` means file `a`
//! contains an import string that is exactly the path of file `b`. Only the
//! queries the analysis needs are provided: degree, density and a
//! degree-ranked hot-spot list.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Raw dependency strings extracted from one file, kept sorted
pub type DependencySet = BTreeSet<String>;

/// Directed graph keyed by file path
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
    edge_set: HashSet<(usize, usize)>,
    in_degree: Vec<usize>,
    out_degree: Vec<usize>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning false if it was already present
    pub fn add_node(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.index.contains_key(&path) {
            return false;
        }
        self.index.insert(path.clone(), self.nodes.len());
        self.nodes.push(path);
        self.in_degree.push(0);
        self.out_degree.push(0);
        true
    }

    /// Add a directed edge between two existing nodes
    ///
    /// Returns false when either endpoint is unknown or the edge already
    /// exists, so edge endpoints are always members of the node set.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        let (Some(&from), Some(&to)) = (self.index.get(source), self.index.get(target)) else {
            return false;
        };
        if !self.edge_set.insert((from, to)) {
            return false;
        }
        self.edges.push((from, to));
        self.out_degree[from] += 1;
        self.in_degree[to] += 1;
        true
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(|&(from, to)| (self.nodes[from].as_str(), self.nodes[to].as_str()))
    }

    /// Total degree (in + out) of a node, `None` if it is not in the graph
    pub fn degree(&self, path: &str) -> Option<usize> {
        self.index
            .get(path)
            .map(|&idx| self.in_degree[idx] + self.out_degree[idx])
    }

    pub fn in_degree(&self, path: &str) -> Option<usize> {
        self.index.get(path).map(|&idx| self.in_degree[idx])
    }

    pub fn out_degree(&self, path: &str) -> Option<usize> {
        self.index.get(path).map(|&idx| self.out_degree[idx])
    }

    /// Directed graph density, `m / (n * (n - 1))`, zero below two nodes
    pub fn density(&self) -> f64 {
        let n = self.nodes.len();
        if n < 2 {
            return 0.0;
        }
        self.edges.len() as f64 / (n as f64 * (n as f64 - 1.0))
    }

    /// Up to `limit` nodes ranked by total degree, ties kept in insertion order
    pub fn most_connected(&self, limit: usize) -> Vec<String> {
        let mut ranked: Vec<usize> = (0..self.nodes.len()).collect();
        // sort_by is stable, so equal degrees keep first-seen order
        ranked.sort_by(|&a, &b| {
            let degree_a = self.in_degree[a] + self.out_degree[a];
            let degree_b = self.in_degree[b] + self.out_degree[b];
            degree_b.cmp(&degree_a)
        });
        ranked
            .into_iter()
            .take(limit)
            .map(|idx| self.nodes[idx].clone())
            .collect()
    }

    /// Compute the summary metrics exported with every analysis
    pub fn metrics(&self, hot_spot_limit: usize) -> GraphMetrics {
        GraphMetrics {
            total_nodes: self.node_count(),
            total_edges: self.edge_count(),
            density: self.density(),
            most_connected: self.most_connected(hot_spot_limit),
        }
    }
}

/// An edge in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// The importing file
    pub source: String,
    /// The imported file
    pub target: String,
}

/// Graph-level metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub density: f64,
    /// Hot spots, highest total degree first
    pub most_connected: Vec<String>,
}

/// Serializable view of a built dependency graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyReport {
    pub nodes: Vec<String>,
    pub edges: Vec<DependencyEdge>,
    /// Raw dependency strings per file
    pub dependencies: BTreeMap<String, Vec<String>>,
    pub metrics: GraphMetrics,
}

impl DependencyReport {
    /// Snapshot a graph together with the raw dependency sets it was built from
    pub fn from_graph(
        graph: &DependencyGraph,
        dependencies: &BTreeMap<String, DependencySet>,
        hot_spot_limit: usize,
    ) -> Self {
        Self {
            nodes: graph.nodes().map(str::to_string).collect(),
            edges: graph
                .edges()
                .map(|(source, target)| DependencyEdge {
                    source: source.to_string(),
                    target: target.to_string(),
                })
                .collect(),
            dependencies: dependencies
                .iter()
                .map(|(path, deps)| (path.clone(), deps.iter().cloned().collect()))
                .collect(),
            metrics: graph.metrics(hot_spot_limit),
        }
    }

    /// Report for an empty repository
    pub fn empty() -> Self {
        Self::from_graph(&DependencyGraph::new(), &BTreeMap::new(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_small_graphs() {
        let mut graph = DependencyGraph::new();
        assert_eq!(graph.density(), 0.0);

        graph.add_node("a.py");
        assert_eq!(graph.density(), 0.0);

        graph.add_node("b.py");
        assert!(graph.add_edge("a.py", "b.py"));
        assert_eq!(graph.density(), 0.5);
    }

    #[test]
    fn test_edges_require_known_endpoints() {
        let mut graph = DependencyGraph::new();
        graph.add_node("a.py");
        assert!(!graph.add_edge("a.py", "os"));
        assert!(!graph.add_edge("missing.py", "a.py"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let mut graph = DependencyGraph::new();
        graph.add_node("a.js");
        graph.add_node("b.js");
        assert!(graph.add_edge("a.js", "b.js"));
        assert!(!graph.add_edge("a.js", "b.js"));
        assert!(!graph.add_node("a.js"));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_degrees() {
        let mut graph = DependencyGraph::new();
        for node in ["a", "b", "c"] {
            graph.add_node(node);
        }
        graph.add_edge("a", "b");
        graph.add_edge("c", "b");

        assert_eq!(graph.in_degree("b"), Some(2));
        assert_eq!(graph.out_degree("b"), Some(0));
        assert_eq!(graph.degree("a"), Some(1));
        assert_eq!(graph.degree("zzz"), None);
    }

    #[test]
    fn test_most_connected_ties_keep_insertion_order() {
        let mut graph = DependencyGraph::new();
        for node in ["x", "y", "hub", "z"] {
            graph.add_node(node);
        }
        graph.add_edge("x", "hub");
        graph.add_edge("y", "hub");

        assert_eq!(graph.most_connected(3), vec!["hub", "x", "y"]);
        assert_eq!(graph.most_connected(10).len(), 4);
        assert!(graph.most_connected(0).is_empty());
    }

    #[test]
    fn test_report_round_trip() {
        let mut graph = DependencyGraph::new();
        graph.add_node("src/a.js");
        graph.add_node("src/b.js");
        graph.add_edge("src/a.js", "src/b.js");

        let mut deps = BTreeMap::new();
        deps.insert(
            "src/a.js".to_string(),
            DependencySet::from(["src/b.js".to_string(), "react".to_string()]),
        );
        deps.insert("src/b.js".to_string(), DependencySet::new());

        let report = DependencyReport::from_graph(&graph, &deps, 10);
        assert_eq!(report.dependencies["src/a.js"], vec!["react", "src/b.js"]);

        let json = serde_json::to_string(&report).unwrap();
        let parsed: DependencyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.nodes, report.nodes);
        assert_eq!(parsed.edges, report.edges);
        assert_eq!(parsed.dependencies, report.dependencies);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
    }
}
