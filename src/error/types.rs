//! Error types and definitions for RepoPilot
//!
//! One error enum covers configuration, filesystem, output, clone and batch
//! failures. Each variant carries a severity so callers can decide whether to
//! keep going or stop.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for RepoPilot operations
#[derive(Debug, Error)]
pub enum RepoPilotError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// File could not be read during import extraction
    #[error("Error reading {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// TOML serialization errors
    #[error("TOML serialization error: {source}")]
    TomlSerialize {
        #[source]
        source: toml::ser::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Regular expression compile errors
    #[error("Regex error: {source}")]
    Regex {
        #[source]
        source: regex::Error,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Generic analysis failure with context
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// URL that is not a GitHub repository URL
    #[error("Invalid GitHub URL: {url}")]
    InvalidGitHubUrl { url: String },

    /// Repository clone failure
    #[error("Clone failed for {url}: {message}")]
    Clone { url: String, message: String },

    /// Batch CSV validation failure
    #[error("Batch validation error: {message}")]
    BatchValidation { message: String },

    /// Generative summary backend failure
    #[error("Summary generation error: {message}")]
    SummaryGeneration { message: String },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl RepoPilotError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            RepoPilotError::PermissionDenied { .. } => ErrorSeverity::Warning,
            RepoPilotError::FileRead { .. } => ErrorSeverity::Warning,
            RepoPilotError::DirectoryTraversal { .. } => ErrorSeverity::Warning,
            RepoPilotError::SummaryGeneration { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            RepoPilotError::Config { .. } => ErrorSeverity::Critical,
            RepoPilotError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            RepoPilotError::ConfigRead { .. } => ErrorSeverity::Critical,
            RepoPilotError::ConfigParse { .. } => ErrorSeverity::Critical,
            RepoPilotError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            RepoPilotError::StdoutWrite { .. } => ErrorSeverity::Critical,
            RepoPilotError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,
            RepoPilotError::BatchValidation { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RepoPilotError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            RepoPilotError::FileRead { path, source } => {
                format!("Could not read '{}': {}. Skipping file.", path.display(), source)
            }
            RepoPilotError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            RepoPilotError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide an existing repository directory.", path.display())
            }
            RepoPilotError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Run `repopilot init` or drop the --config option.", path.display())
            }
            RepoPilotError::InvalidGitHubUrl { url } => {
                format!("Invalid GitHub URL format: '{}'. Expected: https://github.com/user/repo", url)
            }
            RepoPilotError::Clone { message, .. } => message.clone(),
            RepoPilotError::BatchValidation { message } => message.clone(),
            RepoPilotError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Short hint printed after the error message, when one applies
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            RepoPilotError::InvalidPath { .. } => Some("Check that the path exists and is accessible"),
            RepoPilotError::ConfigNotFound { .. } => {
                Some("Create a .repopilot.toml file with `repopilot init` or specify one with --config")
            }
            RepoPilotError::PermissionDenied { .. } => Some("Check file permissions on the repository"),
            RepoPilotError::OutputDirectoryNotFound { .. } => {
                Some("Create the output directory first or specify a different path")
            }
            RepoPilotError::Clone { .. } => Some("Check the repository URL and that git is installed"),
            RepoPilotError::BatchValidation { .. } => {
                Some("The CSV needs a header row with a `url` column of GitHub repository URLs")
            }
            _ => None,
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        RepoPilotError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        RepoPilotError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        RepoPilotError::PermissionDenied { path: path.into() }
    }

    /// Create a generic analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        RepoPilotError::Analysis {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        RepoPilotError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a batch validation error
    pub fn batch_validation(message: impl Into<String>) -> Self {
        RepoPilotError::BatchValidation {
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for RepoPilotError {
    fn from(err: std::io::Error) -> Self {
        RepoPilotError::io_error(err)
    }
}

impl From<toml::de::Error> for RepoPilotError {
    fn from(err: toml::de::Error) -> Self {
        RepoPilotError::TomlParse { source: err }
    }
}

impl From<toml::ser::Error> for RepoPilotError {
    fn from(err: toml::ser::Error) -> Self {
        RepoPilotError::TomlSerialize { source: err }
    }
}

impl From<csv::Error> for RepoPilotError {
    fn from(err: csv::Error) -> Self {
        RepoPilotError::Csv { source: err }
    }
}

impl From<glob::PatternError> for RepoPilotError {
    fn from(err: glob::PatternError) -> Self {
        RepoPilotError::GlobPattern { source: err }
    }
}

impl From<regex::Error> for RepoPilotError {
    fn from(err: regex::Error) -> Self {
        RepoPilotError::Regex { source: err }
    }
}

impl From<serde_json::Error> for RepoPilotError {
    fn from(err: serde_json::Error) -> Self {
        RepoPilotError::JsonSerialize { source: err }
    }
}

impl<W> From<csv::IntoInnerError<W>> for RepoPilotError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        RepoPilotError::io_error(err.into_error())
    }
}

/// Result type alias for RepoPilot operations
pub type Result<T> = std::result::Result<T, RepoPilotError>;
