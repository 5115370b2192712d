//! Command-line argument configuration source

use std::path::{Path, PathBuf};

use super::ConfigSource;
use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Settings-relevant subset of the parsed command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub no_clustering: bool,
    pub n_clusters: Option<usize>,
    pub hot_spot_limit: Option<usize>,
    pub clone_timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from parsed clap arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Explicit config file requested with `--config`
    pub fn config_path(&self) -> Option<&Path> {
        self.args.config.as_deref()
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        CliArgs {
            config: args.config.clone(),
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            max_depth: args.max_depth,
            follow_links: args.follow_links,
            output_format: args.output.map(OutputFormat::from),
            output_file: args.output_file.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            no_clustering: args.no_clustering,
            n_clusters: args.clusters,
            hot_spot_limit: args.hot_spots,
            clone_timeout_secs: args.clone_timeout,
        }
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(exclude) = &self.args.exclude {
            settings.exclude_patterns = Some(exclude.clone());
        }

        if let Some(max_depth) = self.args.max_depth {
            settings.max_depth = Some(max_depth);
        }

        if let Some(format) = self.args.output_format {
            settings.output_format = Some(format);
        }

        if let Some(output_file) = &self.args.output_file {
            settings.output_file = Some(output_file.clone());
        }

        // Flags only ever override in the direction they name
        if self.args.follow_links {
            settings.follow_links = Some(true);
        }

        if self.args.quiet {
            settings.quiet = Some(true);
        }

        if self.args.verbose {
            settings.verbose = Some(true);
        }

        if self.args.no_colors {
            settings.use_colors = Some(false);
        }

        if self.args.no_progress {
            settings.show_progress = Some(false);
        }

        if self.args.no_clustering {
            settings.enable_clustering = Some(false);
        }

        if let Some(n) = self.args.n_clusters {
            settings.n_clusters = Some(n);
        }

        if let Some(limit) = self.args.hot_spot_limit {
            settings.hot_spot_limit = Some(limit);
        }

        if let Some(timeout) = self.args.clone_timeout_secs {
            settings.clone_timeout_secs = Some(timeout);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
