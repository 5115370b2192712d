//! Command implementations

use std::path::{Path, PathBuf};

use super::args::{Args, Commands};
use crate::batch::{compare_targets, read_batch_file, BatchProcessor};
use crate::ci;
use crate::config::FileConfig;
use crate::core::analyzer::{Analyzer, RepositoryTarget};
use crate::error::{ErrorSeverity, RepoPilotError, Result};
use crate::models::config::Settings;
use crate::output::{create_formatter, create_writer, Formatter, OutputWriter};

/// Available commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Analyze one local directory or GitHub repository
    Analyze { target: RepositoryTarget },
    /// Analyze every repository in a CSV file
    Batch { csv: PathBuf },
    /// Compare two repositories
    Compare { left: RepositoryTarget, right: RepositoryTarget },
    /// Print or write the CI workflow templates
    Workflows { out_dir: Option<PathBuf> },
    /// Write a default configuration file
    Init { path: PathBuf, force: bool },
}

/// Result of `init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        match &args.command {
            Commands::Analyze { target } => Command::Analyze {
                target: RepositoryTarget::parse(target),
            },
            Commands::Batch { csv } => Command::Batch { csv: csv.clone() },
            Commands::Compare { left, right } => Command::Compare {
                left: RepositoryTarget::parse(left),
                right: RepositoryTarget::parse(right),
            },
            Commands::Workflows { out_dir } => Command::Workflows {
                out_dir: out_dir.clone(),
            },
            Commands::Init { path, force } => Command::Init {
                path: path.clone(),
                force: *force,
            },
        }
    }

    /// Whether the command reads merged settings
    ///
    /// `init` must work even when an existing config file is broken.
    pub fn needs_settings(&self) -> bool {
        !matches!(self, Command::Init { .. })
    }

    /// Execute the command
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        match self {
            Command::Analyze { target } => run_analyze(target, settings),
            Command::Batch { csv } => run_batch(csv, settings),
            Command::Compare { left, right } => run_compare(left, right, settings),
            Command::Workflows { out_dir } => run_workflows(out_dir.as_deref(), settings),
            Command::Init { path, force } => {
                match run_init(path, *force)? {
                    InitOutcome::Created(path) => {
                        println!("Created default configuration file at: {}", path.display());
                        println!("Edit it to set exclude patterns, output format, clustering and GitHub options.");
                    }
                    InitOutcome::AlreadyExists(path) => {
                        println!("Configuration file already exists at: {}", path.display());
                        println!("Run `repopilot init --force` to overwrite it.");
                    }
                }
                Ok(())
            }
        }
    }
}

fn formatter_for(settings: &Settings) -> Box<dyn Formatter> {
    create_formatter(
        settings.output_format,
        settings.use_colors,
        settings.verbose,
        settings.quiet,
    )
}

fn emit(content: &str, settings: &Settings) -> Result<()> {
    create_writer(settings.output_file.as_ref()).write(content)
}

/// Analyze one target and write the formatted report
pub fn run_analyze(target: &RepositoryTarget, settings: &Settings) -> Result<()> {
    let analyzer = Analyzer::new(settings)?;
    tracing::info!("analyzing {}", target);

    let result = analyzer.analyze(target)?;
    let warnings = result.warning_count();
    if warnings > 0 {
        tracing::warn!("{} issue(s) recorded during analysis", warnings);
    }

    emit(&formatter_for(settings).format(&result)?, settings)
}

/// Analyze every repository in a CSV file and write the batch report
pub fn run_batch(csv: &Path, settings: &Settings) -> Result<()> {
    let entries = read_batch_file(csv)?;
    tracing::info!("batch of {} repositories from {}", entries.len(), csv.display());

    let processor = BatchProcessor::new(settings)?;
    let results = processor.process_batch(&entries);

    emit(&formatter_for(settings).format_batch(&results)?, settings)?;

    if results.successful == 0 && results.total_repos > 0 {
        return Err(RepoPilotError::analysis_error(format!(
            "All {} repositories failed to analyze",
            results.total_repos
        )));
    }
    Ok(())
}

/// Compare two targets and write the comparison report
pub fn run_compare(left: &RepositoryTarget, right: &RepositoryTarget, settings: &Settings) -> Result<()> {
    let analyzer = Analyzer::new(settings)?;
    let report = compare_targets(&analyzer, left, right)?;
    emit(&formatter_for(settings).format_comparison(&report)?, settings)
}

/// Print the workflow templates, or write them into `out_dir`
pub fn run_workflows(out_dir: Option<&Path>, settings: &Settings) -> Result<()> {
    match out_dir {
        Some(dir) => {
            for path in ci::write_workflows(dir)? {
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        None => emit(&render_workflows(), settings),
    }
}

/// All templates as one document, each preceded by a header comment
pub fn render_workflows() -> String {
    let mut out = String::new();
    for template in ci::workflow_templates() {
        out.push_str(&format!("# .github/workflows/{}\n", template.file_name));
        out.push_str(&format!("# {}: {}\n", template.name, template.description));
        out.push_str(template.content);
        if !template.content.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Write a default configuration file unless one exists
pub fn run_init(path: &Path, force: bool) -> Result<InitOutcome> {
    if path.exists() && !force {
        return Ok(InitOutcome::AlreadyExists(path.to_path_buf()));
    }
    FileConfig::with_path(path).create_default()?;
    Ok(InitOutcome::Created(path.to_path_buf()))
}

/// Process exit code for an error
pub fn exit_code(err: &RepoPilotError) -> i32 {
    match err.severity() {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}
