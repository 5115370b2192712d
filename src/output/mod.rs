//! Output formatting and writing functionality

mod formatters;
mod progress;
#[cfg(test)]
mod tests;
mod writers;

pub use self::formatters::escape_html;
pub use self::progress::ProgressReporter;
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::analysis::AnalysisResult;
use crate::models::batch::{BatchResults, ComparisonReport};
use crate::models::config::OutputFormat;

/// Trait for different output formatters
pub trait Formatter {
    /// Format a single repository analysis
    fn format(&self, result: &AnalysisResult) -> Result<String>;

    /// Format the results of a batch run
    fn format_batch(&self, results: &BatchResults) -> Result<String>;

    /// Format a two-repository comparison
    fn format_comparison(&self, report: &ComparisonReport) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        if self.quiet {
            return Ok(formatters::format_analysis_quiet(result));
        }
        Ok(formatters::format_analysis_text(result, self.use_colors, self.verbose))
    }

    fn format_batch(&self, results: &BatchResults) -> Result<String> {
        Ok(formatters::format_batch_text(results, self.use_colors))
    }

    fn format_comparison(&self, report: &ComparisonReport) -> Result<String> {
        Ok(formatters::format_comparison_text(report, self.use_colors))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json + "\n")
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        self.render(result)
    }

    fn format_batch(&self, results: &BatchResults) -> Result<String> {
        self.render(results)
    }

    fn format_comparison(&self, report: &ComparisonReport) -> Result<String> {
        self.render(report)
    }
}

/// CSV formatter for spreadsheet analysis
#[derive(Debug, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Create a new CSV formatter
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        formatters::format_analysis_csv(result)
    }

    fn format_batch(&self, results: &BatchResults) -> Result<String> {
        formatters::format_batch_csv(results)
    }

    fn format_comparison(&self, report: &ComparisonReport) -> Result<String> {
        formatters::format_comparison_csv(report)
    }
}

/// HTML formatter producing standalone report pages
#[derive(Debug, Default)]
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for HtmlFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        Ok(formatters::format_analysis_html(result))
    }

    fn format_batch(&self, results: &BatchResults) -> Result<String> {
        Ok(formatters::format_batch_html(results))
    }

    fn format_comparison(&self, report: &ComparisonReport) -> Result<String> {
        Ok(formatters::format_comparison_html(report))
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, use_colors: bool, verbose: bool, quiet: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
        OutputFormat::Html => Box::new(HtmlFormatter::new()),
    }
}
