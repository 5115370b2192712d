//! Command-line argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::config;

/// RepoPilot - repository structure, dependency and architecture analyzer
#[derive(Parser, Debug)]
#[command(name = "repopilot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map a repository's structure, internal dependencies and architecture")]
#[command(long_about = "RepoPilot walks a local directory or a public GitHub repository, \
extracts import statements, builds an internal dependency graph, groups files into \
architectural clusters and writes a summary report. It can also analyze a CSV list of \
repositories, compare two repositories and generate GitHub Actions workflows.")]
#[command(after_help = "EXAMPLES:

Analysis:
    # Analyze the current directory
    repopilot analyze .

    # Analyze a public GitHub repository
    repopilot analyze https://github.com/user/repo

    # Skip generated code and limit depth
    repopilot --exclude 'generated' --max-depth 4 analyze ./my-project

Output Options:
    # JSON report written to a file
    repopilot --output json --output-file report.json analyze .

    # Standalone HTML report
    repopilot --output html --output-file report.html analyze .

Batch and Comparison:
    # Analyze every repository listed in a CSV file (columns: url,name,description)
    repopilot --output csv batch repos.csv

    # Compare two repositories
    repopilot compare ./service-a https://github.com/user/service-b

CI:
    # Print the GitHub Actions workflows
    repopilot workflows

    # Write them into .github/workflows
    repopilot workflows --out-dir .github/workflows

Configuration:
    # Create a default .repopilot.toml in the current directory
    repopilot init

    # Use a specific configuration file
    repopilot --config ./ci/repopilot.toml analyze .
")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE", help = "Path to configuration file (defaults to .repopilot.toml in the current or home directory)")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, help = "Output format: 'text' for terminals, 'json' for machines, 'csv' for spreadsheets, 'html' for a standalone report")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, global = true, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true, help = "Suppress non-essential output (one-line summaries, warnings only in logs)")]
    pub quiet: bool,

    /// Show detailed output and debug logs
    #[arg(short, long, global = true, help = "Show every dependency edge and issue, and enable debug logging")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output (useful when piping output)")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, global = true, help = "Disable progress bars (useful for CI environments)")]
    pub no_progress: bool,

    /// Skip architectural clustering
    #[arg(long, global = true, help = "Skip architectural clustering")]
    pub no_clustering: bool,

    /// Exclude entries matching these glob patterns
    #[arg(short, long, global = true, value_name = "PATTERN", help = "Glob patterns to exclude, matched on relative path and name (repeatable)")]
    pub exclude: Vec<String>,

    /// Maximum depth for directory traversal
    #[arg(long, global = true, value_name = "DEPTH", help = "Maximum directory depth to traverse")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links during directory traversal
    #[arg(long, global = true, help = "Follow symbolic links during directory traversal")]
    pub follow_links: bool,

    /// Number of clusters
    #[arg(long, global = true, value_name = "N", help = "Number of architectural clusters (derived from the file count when omitted)")]
    pub clusters: Option<usize>,

    /// Number of hot spots to report
    #[arg(long, global = true, value_name = "N", help = "Number of most-connected files to report")]
    pub hot_spots: Option<usize>,

    /// Clone timeout in seconds
    #[arg(long, global = true, value_name = "SECS", help = "Seconds before a GitHub clone is aborted")]
    pub clone_timeout: Option<u64>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Analyze a local directory or GitHub repository
    Analyze {
        /// Local path or https://github.com/owner/repo URL
        #[arg(value_name = "TARGET")]
        target: String,
    },

    /// Analyze every repository listed in a CSV file
    Batch {
        /// CSV file with a header row and a 'url' column
        #[arg(value_name = "CSV")]
        csv: PathBuf,
    },

    /// Compare two repositories
    Compare {
        /// First repository (path or URL)
        #[arg(value_name = "LEFT")]
        left: String,

        /// Second repository (path or URL)
        #[arg(value_name = "RIGHT")]
        right: String,
    },

    /// Print or write the GitHub Actions workflow templates
    Workflows {
        /// Directory to write the workflow files into
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Create a default configuration file
    Init {
        /// Where to write the file
        #[arg(long, value_name = "FILE", default_value = ".repopilot.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
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

impl From<OutputFormat> for config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => config::OutputFormat::Text,
            OutputFormat::Json => config::OutputFormat::Json,
            OutputFormat::Csv => config::OutputFormat::Csv,
            OutputFormat::Html => config::OutputFormat::Html,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
