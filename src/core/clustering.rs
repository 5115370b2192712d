//! Architectural clustering of repository files
//!
//! Two strategies share the [`ClusterStrategy`] interface: seeded k-means over
//! a small per-file feature vector (cargo feature `clustering`) and a
//! rule-based bucketing used when the statistical strategy is not compiled in
//! or is disabled.

use crate::models::clustering::{ClusterMethod, ClusterResult};
use crate::models::file_entry::FileEntry;
use std::collections::BTreeMap;

/// Labels assigned by cluster id when no majority flag applies
pub const PATTERN_NAMES: &[&str] = &[
    "Core Logic & Algorithms",
    "Configuration & Setup",
    "Testing & Validation",
    "Utilities & Helpers",
    "API & Interfaces",
    "Data & Models",
];

/// Common interface of the clustering strategies
pub trait ClusterStrategy {
    /// Method reported in results
    fn method(&self) -> ClusterMethod;

    /// Partition the file entries of `files` into groups
    ///
    /// `n_clusters` is the requested group count; `None` derives it from the
    /// number of files.
    fn cluster(&self, files: &[FileEntry], n_clusters: Option<usize>) -> ClusterResult;
}

/// Pick the best available strategy
pub fn detect_strategy() -> Box<dyn ClusterStrategy> {
    #[cfg(feature = "clustering")]
    {
        tracing::debug!("using k-means clustering");
        Box::new(KMeansClusterer::default())
    }
    #[cfg(not(feature = "clustering"))]
    {
        tracing::info!("k-means clustering not compiled in, using heuristic clustering");
        Box::new(HeuristicClusterer)
    }
}

/// Default group count for `file_count` files
pub fn default_cluster_count(file_count: usize) -> usize {
    (file_count / 3).clamp(2, 4)
}

/// Group count after shrinking for small inputs
pub fn effective_cluster_count(file_count: usize, requested: Option<usize>) -> usize {
    let requested = requested.unwrap_or_else(|| default_cluster_count(file_count));
    if file_count < requested {
        (file_count / 2).max(2)
    } else {
        requested
    }
}

/// Numeric features of one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileFeatures {
    pub path: String,
    pub import_count: usize,
    pub function_count: usize,
    pub class_count: usize,
    pub size: u64,
    pub is_test: bool,
    pub is_config: bool,
    pub is_util: bool,
    pub depth: usize,
}

impl FileFeatures {
    pub fn from_entry(entry: &FileEntry) -> Self {
        let lower = entry.path.to_lowercase();
        Self {
            path: entry.path.clone(),
            import_count: 0,
            function_count: 0,
            class_count: 0,
            size: entry.size,
            is_test: lower.contains("test"),
            is_config: ["config", "setup", "requirements"].iter().any(|k| lower.contains(k)),
            is_util: lower.contains("util") || lower.contains("helper"),
            depth: entry.path.matches('/').count(),
        }
    }

    /// Eight-dimensional vector fed to the clusterer
    pub fn to_vector(&self) -> [f64; 8] {
        [
            self.import_count as f64,
            self.function_count as f64,
            self.class_count as f64,
            (self.size as f64 / 10000.0).min(10.0),
            flag(self.is_test),
            flag(self.is_config),
            flag(self.is_util),
            self.depth as f64,
        ]
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Features for the file entries only, in input order
pub fn extract_features(files: &[FileEntry]) -> Vec<FileFeatures> {
    files
        .iter()
        .filter(|f| f.is_file())
        .map(FileFeatures::from_entry)
        .collect()
}

/// Scale each column to zero mean and unit variance
///
/// Columns with zero variance become all zeros.
pub fn standardize(rows: &[[f64; 8]]) -> Vec<[f64; 8]> {
    if rows.is_empty() {
        return Vec::new();
    }
    let n = rows.len() as f64;
    let mut scaled = rows.to_vec();

    for col in 0..8 {
        let mean = rows.iter().map(|r| r[col]).sum::<f64>() / n;
        let variance = rows.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        for row in scaled.iter_mut() {
            row[col] = if std_dev > 0.0 { (row[col] - mean) / std_dev } else { 0.0 };
        }
    }
    scaled
}

/// Label each group, preferring a majority flag over the id-based name
pub fn identify_patterns(
    clusters: &BTreeMap<String, Vec<String>>,
    features: &[FileFeatures],
) -> BTreeMap<String, String> {
    let by_path: BTreeMap<&str, &FileFeatures> = features.iter().map(|f| (f.path.as_str(), f)).collect();

    clusters
        .iter()
        .map(|(id, paths)| {
            let count = |pick: fn(&FileFeatures) -> bool| {
                paths
                    .iter()
                    .filter(|p| by_path.get(p.as_str()).map_or(false, |f| pick(f)))
                    .count()
            };
            let half = paths.len() as f64 * 0.5;

            let label = if count(|f| f.is_config) as f64 > half {
                "Configuration & Setup".to_string()
            } else if count(|f| f.is_test) as f64 > half {
                "Testing & Validation".to_string()
            } else if count(|f| f.is_util) as f64 > half {
                "Utilities & Helpers".to_string()
            } else {
                id.parse::<usize>()
                    .ok()
                    .and_then(|idx| PATTERN_NAMES.get(idx))
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| format!("Group {}", id))
            };
            (id.clone(), label)
        })
        .collect()
}

/// Rule-based bucketing by path substrings
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClusterer;

impl HeuristicClusterer {
    const BUCKETS: [(&'static str, &'static str); 4] = [
        ("config", "Configuration & Setup"),
        ("tests", "Testing & Validation"),
        ("utils", "Utilities & Helpers"),
        ("core", "Core Logic"),
    ];

    fn bucket_for(path: &str) -> &'static str {
        let lower = path.to_lowercase();
        if ["config", "setup", "requirements", "dockerfile"].iter().any(|k| lower.contains(k)) {
            "config"
        } else if lower.contains("test") {
            "tests"
        } else if ["util", "helper", "common"].iter().any(|k| lower.contains(k)) {
            "utils"
        } else {
            "core"
        }
    }
}

impl ClusterStrategy for HeuristicClusterer {
    fn method(&self) -> ClusterMethod {
        ClusterMethod::Heuristic
    }

    fn cluster(&self, files: &[FileEntry], _n_clusters: Option<usize>) -> ClusterResult {
        let mut result = ClusterResult::empty(Self::BUCKETS.len(), ClusterMethod::Heuristic);
        for (id, label) in Self::BUCKETS {
            result.clusters.insert(id.to_string(), Vec::new());
            result.patterns.insert(id.to_string(), label.to_string());
        }

        for entry in files.iter().filter(|f| f.is_file()) {
            if let Some(members) = result.clusters.get_mut(Self::bucket_for(&entry.path)) {
                members.push(entry.path.clone());
            }
        }
        result
    }
}

/// Seeded k-means over standardized file features
#[cfg(feature = "clustering")]
#[derive(Debug, Clone)]
pub struct KMeansClusterer {
    pub seed: u64,
    pub restarts: usize,
    pub max_iterations: usize,
}

#[cfg(feature = "clustering")]
impl Default for KMeansClusterer {
    fn default() -> Self {
        Self {
            seed: 42,
            restarts: 10,
            max_iterations: 300,
        }
    }
}

#[cfg(feature = "clustering")]
impl ClusterStrategy for KMeansClusterer {
    fn method(&self) -> ClusterMethod {
        ClusterMethod::KMeans
    }

    fn cluster(&self, files: &[FileEntry], n_clusters: Option<usize>) -> ClusterResult {
        let features = extract_features(files);
        let n_clusters = effective_cluster_count(features.len(), n_clusters);
        if features.is_empty() {
            return ClusterResult::empty(n_clusters, ClusterMethod::KMeans);
        }

        let rows: Vec<[f64; 8]> = features.iter().map(FileFeatures::to_vector).collect();
        let scaled = standardize(&rows);
        let k = n_clusters.min(scaled.len()).max(1);
        let labels = relabel_by_first_appearance(&self.fit(&scaled, k));

        let mut clusters: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (feature, label) in features.iter().zip(&labels) {
            clusters
                .entry(label.to_string())
                .or_default()
                .push(feature.path.clone());
        }
        let patterns = identify_patterns(&clusters, &features);

        ClusterResult {
            clusters,
            patterns,
            n_clusters,
            method: ClusterMethod::KMeans,
        }
    }
}

#[cfg(feature = "clustering")]
impl KMeansClusterer {
    /// Best labelling over all restarts, by inertia
    fn fit(&self, points: &[[f64; 8]], k: usize) -> Vec<usize> {
        let mut rng = fastrand::Rng::with_seed(self.seed);
        let mut best: Option<(f64, Vec<usize>)> = None;

        for _ in 0..self.restarts.max(1) {
            let centroids = kmeans_plus_plus(points, k, &mut rng);
            let (labels, inertia) = lloyd(points, centroids, self.max_iterations);
            if best.as_ref().map_or(true, |(best_inertia, _)| inertia < *best_inertia) {
                best = Some((inertia, labels));
            }
        }
        best.map(|(_, labels)| labels).unwrap_or_default()
    }
}

#[cfg(feature = "clustering")]
fn squared_distance(a: &[f64; 8], b: &[f64; 8]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(feature = "clustering")]
fn nearest(point: &[f64; 8], centroids: &[[f64; 8]]) -> (usize, f64) {
    centroids
        .iter()
        .enumerate()
        .map(|(idx, c)| (idx, squared_distance(point, c)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

/// k-means++ seeding: spread initial centroids by squared distance
#[cfg(feature = "clustering")]
fn kmeans_plus_plus(points: &[[f64; 8]], k: usize, rng: &mut fastrand::Rng) -> Vec<[f64; 8]> {
    let mut centroids = vec![points[rng.usize(0..points.len())]];

    while centroids.len() < k {
        let distances: Vec<f64> = points.iter().map(|p| nearest(p, &centroids).1).collect();
        let total: f64 = distances.iter().sum();

        let next = if total > 0.0 {
            let mut target = rng.f64() * total;
            let mut chosen = points.len() - 1;
            for (idx, d) in distances.iter().enumerate() {
                if target < *d {
                    chosen = idx;
                    break;
                }
                target -= d;
            }
            chosen
        } else {
            rng.usize(0..points.len())
        };
        centroids.push(points[next]);
    }
    centroids
}

/// Lloyd iterations until assignments settle; returns labels and inertia
#[cfg(feature = "clustering")]
fn lloyd(points: &[[f64; 8]], mut centroids: Vec<[f64; 8]>, max_iterations: usize) -> (Vec<usize>, f64) {
    let k = centroids.len();
    let mut labels = vec![usize::MAX; points.len()];

    for _ in 0..max_iterations.max(1) {
        let mut changed = false;
        for (idx, point) in points.iter().enumerate() {
            let (label, _) = nearest(point, &centroids);
            if labels[idx] != label {
                labels[idx] = label;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![[0.0f64; 8]; k];
        let mut counts = vec![0usize; k];
        for (point, &label) in points.iter().zip(&labels) {
            counts[label] += 1;
            for (sum, value) in sums[label].iter_mut().zip(point) {
                *sum += value;
            }
        }
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            // an emptied cluster keeps its previous centroid
            if counts[cluster] > 0 {
                for (c, sum) in centroid.iter_mut().zip(&sums[cluster]) {
                    *c = sum / counts[cluster] as f64;
                }
            }
        }
    }

    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(p, &label)| squared_distance(p, &centroids[label]))
        .sum();
    (labels, inertia)
}

/// Renumber labels so ids follow first appearance in input order
pub fn relabel_by_first_appearance(labels: &[usize]) -> Vec<usize> {
    let mut mapping: BTreeMap<usize, usize> = BTreeMap::new();
    labels
        .iter()
        .map(|label| {
            let next = mapping.len();
            *mapping.entry(*label).or_insert(next)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::file_entry::Language;

    fn file(path: &str, size: u64) -> FileEntry {
        let name = path.rsplit('/').next().unwrap_or(path);
        FileEntry::file(path, name, size, Language::Python, false)
    }

    fn sample_files() -> Vec<FileEntry> {
        vec![
            file("src/core/engine.py", 12000),
            file("src/core/parser.py", 9000),
            file("src/api/routes.py", 4000),
            file("config/settings.py", 300),
            file("setup.py", 800),
            file("requirements.txt", 100),
            file("tests/test_engine.py", 2000),
            file("tests/test_parser.py", 2100),
            file("src/utils/helpers.py", 700),
            file("README.md", 1500),
        ]
    }

    #[test]
    fn test_default_cluster_count() {
        assert_eq!(default_cluster_count(0), 2);
        assert_eq!(default_cluster_count(7), 2);
        assert_eq!(default_cluster_count(9), 3);
        assert_eq!(default_cluster_count(100), 4);
    }

    #[test]
    fn test_effective_cluster_count_shrinks() {
        assert_eq!(effective_cluster_count(3, Some(4)), 2);
        assert_eq!(effective_cluster_count(10, Some(12)), 5);
        assert_eq!(effective_cluster_count(10, Some(4)), 4);
        assert_eq!(effective_cluster_count(12, None), 4);
    }

    #[test]
    fn test_features() {
        let features = FileFeatures::from_entry(&file("src/Utils/Test_Config.py", 250000));
        assert!(features.is_test);
        assert!(features.is_config);
        assert!(features.is_util);
        assert_eq!(features.depth, 2);
        let vector = features.to_vector();
        assert_eq!(vector[3], 10.0);
        assert_eq!(&vector[..3], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_standardize_zero_variance() {
        let rows = vec![[1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0], [3.0, 0.0, 0.0, 2.0, 1.0, 0.0, 0.0, 1.0]];
        let scaled = standardize(&rows);
        assert_eq!(scaled[0][0], -1.0);
        assert_eq!(scaled[1][0], 1.0);
        assert_eq!(scaled[0][3], 0.0);
        assert_eq!(scaled[1][7], 0.0);
    }

    #[test]
    fn test_identify_patterns_majority() {
        let files = vec![file("config/a.py", 1), file("config/b.py", 1), file("main.py", 1), file("x.py", 1)];
        let features = extract_features(&files);
        let mut clusters = BTreeMap::new();
        clusters.insert("0".to_string(), vec!["config/a.py".to_string(), "config/b.py".to_string(), "main.py".to_string()]);
        clusters.insert("3".to_string(), vec!["x.py".to_string()]);
        clusters.insert("7".to_string(), vec![]);

        let patterns = identify_patterns(&clusters, &features);
        assert_eq!(patterns["0"], "Configuration & Setup");
        assert_eq!(patterns["3"], "Utilities & Helpers");
        assert_eq!(patterns["7"], "Group 7");
    }

    #[test]
    fn test_relabel_by_first_appearance() {
        assert_eq!(relabel_by_first_appearance(&[2, 2, 0, 1, 0]), vec![0, 0, 1, 2, 1]);
    }

    #[test]
    fn test_heuristic_buckets() {
        let result = HeuristicClusterer.cluster(&sample_files(), None);
        assert_eq!(result.method, ClusterMethod::Heuristic);
        assert_eq!(result.n_clusters, 4);
        assert_eq!(result.clusters["config"], vec!["config/settings.py", "setup.py", "requirements.txt"]);
        assert_eq!(result.clusters["tests"], vec!["tests/test_engine.py", "tests/test_parser.py"]);
        assert_eq!(result.clusters["utils"], vec!["src/utils/helpers.py"]);
        assert_eq!(result.patterns["core"], "Core Logic");
        assert_eq!(result.file_count(), 10);
    }

    #[test]
    fn test_heuristic_ignores_directories() {
        let files = vec![FileEntry::directory("tests", "tests"), file("tests/test_a.py", 10)];
        let result = HeuristicClusterer.cluster(&files, None);
        assert_eq!(result.file_count(), 1);
    }

    #[cfg(feature = "clustering")]
    mod kmeans {
        use super::*;

        #[test]
        fn test_every_file_in_exactly_one_cluster() {
            let files = sample_files();
            let result = KMeansClusterer::default().cluster(&files, Some(4));

            assert_eq!(result.method, ClusterMethod::KMeans);
            assert_eq!(result.n_clusters, 4);
            let mut seen: Vec<&String> = result.clusters.values().flatten().collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), files.len());
            assert_eq!(result.file_count(), files.len());
            assert_eq!(result.patterns.len(), result.clusters.len());
        }

        #[test]
        fn test_deterministic() {
            let files = sample_files();
            let first = KMeansClusterer::default().cluster(&files, None);
            let second = KMeansClusterer::default().cluster(&files, None);
            assert_eq!(first, second);
        }

        #[test]
        fn test_first_file_lands_in_cluster_zero() {
            let result = KMeansClusterer::default().cluster(&sample_files(), Some(3));
            assert!(result.clusters["0"].contains(&"src/core/engine.py".to_string()));
        }

        #[test]
        fn test_few_files_shrinks_cluster_count() {
            let files = vec![file("a.py", 10), file("tests/test_a.py", 10), file("setup.py", 10)];
            let result = KMeansClusterer::default().cluster(&files, Some(4));
            assert_eq!(result.n_clusters, 2);
            assert_eq!(result.file_count(), 3);
            assert!(result.clusters.len() <= 2);
        }

        #[test]
        fn test_single_file() {
            let result = KMeansClusterer::default().cluster(&[file("main.py", 10)], None);
            assert_eq!(result.n_clusters, 2);
            assert_eq!(result.clusters.len(), 1);
            assert_eq!(result.file_count(), 1);
        }

        #[test]
        fn test_empty_input() {
            let result = KMeansClusterer::default().cluster(&[], Some(4));
            assert!(result.clusters.is_empty());
            assert!(result.patterns.is_empty());
            assert_eq!(result.n_clusters, 2);
        }
    }
}
