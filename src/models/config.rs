//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for RepoPilot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Glob patterns removed from the walk, matched on relative path and name
    pub exclude_patterns: Vec<String>,

    /// Maximum directory depth to traverse
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links during directory traversal
    pub follow_links: bool,

    /// Output format (text, json, csv, html)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,

    /// Whether to run the pattern clusterer
    pub enable_clustering: bool,

    /// Requested cluster count, derived from the file count when unset
    pub n_clusters: Option<usize>,

    /// Number of most-connected files reported as hot spots
    pub hot_spot_limit: usize,

    /// Number of hot spots that get a per-file summary
    pub file_summary_limit: usize,

    /// Seconds before a clone is aborted
    pub clone_timeout_secs: u64,

    /// History depth for shallow clones
    pub clone_depth: u32,

    /// API key for generative summaries; unset selects heuristic summaries
    pub openai_api_key: Option<String>,

    /// Model used for generative summaries
    pub openai_model: String,

    /// Default log level when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            max_depth: None,
            follow_links: false,
            output_format: OutputFormat::Text,
            output_file: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
            enable_clustering: true,
            n_clusters: None,
            hot_spot_limit: 10,
            file_summary_limit: 5,
            clone_timeout_secs: 60,
            clone_depth: 1,
            openai_api_key: None,
            openai_model: "gpt-4".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
    /// Standalone HTML report
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "html" => Ok(OutputFormat::Html),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub exclude_patterns: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub follow_links: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
    pub enable_clustering: Option<bool>,
    pub n_clusters: Option<usize>,
    pub hot_spot_limit: Option<usize>,
    pub file_summary_limit: Option<usize>,
    pub clone_timeout_secs: Option<u64>,
    pub clone_depth: Option<u32>,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub log_level: Option<String>,
}

/// Overwrite `$target` with `$other` for every listed field that is set
macro_rules! merge_fields {
    ($target:expr, $other:expr, $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $target.$field = $other.$field;
            }
        )+
    };
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        merge_fields!(
            self,
            other,
            exclude_patterns,
            max_depth,
            follow_links,
            output_format,
            output_file,
            quiet,
            verbose,
            use_colors,
            show_progress,
            enable_clustering,
            n_clusters,
            hot_spot_limit,
            file_summary_limit,
            clone_timeout_secs,
            clone_depth,
            openai_api_key,
            openai_model,
            log_level,
        );
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let defaults = Settings::default();
        let this = self.clone();

        Settings {
            exclude_patterns: this.exclude_patterns.unwrap_or(defaults.exclude_patterns),
            max_depth: this.max_depth.or(defaults.max_depth),
            follow_links: this.follow_links.unwrap_or(defaults.follow_links),
            output_format: this.output_format.unwrap_or(defaults.output_format),
            output_file: this.output_file.or(defaults.output_file),
            quiet: this.quiet.unwrap_or(defaults.quiet),
            verbose: this.verbose.unwrap_or(defaults.verbose),
            use_colors: this.use_colors.unwrap_or(defaults.use_colors),
            show_progress: this.show_progress.unwrap_or(defaults.show_progress),
            enable_clustering: this.enable_clustering.unwrap_or(defaults.enable_clustering),
            n_clusters: this.n_clusters.or(defaults.n_clusters),
            hot_spot_limit: this.hot_spot_limit.unwrap_or(defaults.hot_spot_limit),
            file_summary_limit: this.file_summary_limit.unwrap_or(defaults.file_summary_limit),
            clone_timeout_secs: this.clone_timeout_secs.unwrap_or(defaults.clone_timeout_secs),
            clone_depth: this.clone_depth.unwrap_or(defaults.clone_depth),
            openai_api_key: this.openai_api_key.or(defaults.openai_api_key),
            openai_model: this.openai_model.unwrap_or(defaults.openai_model),
            log_level: this.log_level.unwrap_or(defaults.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_merge_from_prefers_other() {
        let mut base = PartialSettings {
            hot_spot_limit: Some(3),
            quiet: Some(true),
            ..Default::default()
        };
        base.merge_from(PartialSettings {
            hot_spot_limit: Some(7),
            ..Default::default()
        });
        assert_eq!(base.hot_spot_limit, Some(7));
        assert_eq!(base.quiet, Some(true));
    }

    #[test]
    fn test_to_settings_uses_defaults() {
        let settings = PartialSettings {
            clone_depth: Some(5),
            ..Default::default()
        }
        .to_settings();
        assert_eq!(settings.clone_depth, 5);
        assert_eq!(settings.clone_timeout_secs, 60);
        assert_eq!(settings.hot_spot_limit, 10);
        assert!(settings.enable_clustering);
    }

    #[test]
    fn test_output_format_deserializes_lowercase() {
        let partial: PartialSettings = toml::from_str("output_format = \"csv\"").unwrap();
        assert_eq!(partial.output_format, Some(OutputFormat::Csv));
    }
}
