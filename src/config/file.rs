//! File and environment configuration sources

use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{parser, ConfigSource};
use crate::error::{RepoPilotError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".repopilot.toml";

/// Default prefix for environment overrides
pub const DEFAULT_ENV_PREFIX: &str = "REPOPILOT";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(RepoPilotError::ConfigNotFound {
                path: self.path.clone(),
            });
        }
        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_<KEY>` variables. Values that fail to parse are logged
/// and skipped.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

const ENV_KEYS: &[&str] = &[
    "EXCLUDE",
    "MAX_DEPTH",
    "FOLLOW_LINKS",
    "OUTPUT_FORMAT",
    "OUTPUT_FILE",
    "ENABLE_CLUSTERING",
    "N_CLUSTERS",
    "HOT_SPOT_LIMIT",
    "CLONE_TIMEOUT_SECS",
    "CLONE_TIMEOUT",
    "CLONE_DEPTH",
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "LOG_LEVEL",
];

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
        }
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    fn read<F>(&self, lookup: &F, suffix: &str) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(&self.key(suffix)).filter(|value| !value.trim().is_empty())
    }

    fn read_parsed<T, F>(&self, lookup: &F, suffix: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
        F: Fn(&str) -> Option<String>,
    {
        self.read(lookup, suffix)
            .and_then(|raw| parse_value(&self.key(suffix), &raw))
    }

    fn read_bool<F>(&self, lookup: &F, suffix: &str) -> Option<bool>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.read(lookup, suffix)
            .and_then(|raw| parse_bool(&self.key(suffix), &raw))
    }

    /// Build settings from an arbitrary variable lookup
    pub fn load_with<F>(&self, lookup: F) -> PartialSettings
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = PartialSettings::default();

        if let Some(exclude) = self.read(&lookup, "EXCLUDE") {
            settings.exclude_patterns = Some(
                exclude
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        settings.max_depth = self.read_parsed(&lookup, "MAX_DEPTH");
        settings.follow_links = self.read_bool(&lookup, "FOLLOW_LINKS");
        settings.output_format = self.read_parsed(&lookup, "OUTPUT_FORMAT");
        settings.output_file = self.read(&lookup, "OUTPUT_FILE").map(PathBuf::from);
        settings.enable_clustering = self.read_bool(&lookup, "ENABLE_CLUSTERING");
        settings.n_clusters = self.read_parsed(&lookup, "N_CLUSTERS");
        settings.hot_spot_limit = self.read_parsed(&lookup, "HOT_SPOT_LIMIT");
        settings.clone_timeout_secs = self
            .read_parsed(&lookup, "CLONE_TIMEOUT_SECS")
            .or_else(|| self.read_parsed(&lookup, "CLONE_TIMEOUT"));
        settings.clone_depth = self.read_parsed(&lookup, "CLONE_DEPTH");
        settings.openai_api_key = self.read(&lookup, "OPENAI_API_KEY");
        settings.openai_model = self.read(&lookup, "OPENAI_MODEL");
        settings.log_level = self.read(&lookup, "LOG_LEVEL");

        settings
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("ignoring {}={}: {}", key, raw, e);
            None
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!("ignoring {}={}: expected a boolean", key, raw);
            None
        }
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        Ok(self.load_with(|key| std::env::var(key).ok()))
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|suffix| std::env::var(self.key(suffix)).is_ok())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_PREFIX)
    }
}
