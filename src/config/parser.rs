//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RepoPilotError, Result};
use crate::models::config::PartialSettings;

use super::file::DEFAULT_CONFIG_FILE;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RepoPilotError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| RepoPilotError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|source| RepoPilotError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();
    let invalid = |what: String| RepoPilotError::config_error(format!("{} in config file: {}", what, path.display()));

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(invalid("Empty exclude pattern".to_string()));
            }
            glob::Pattern::new(pattern)
                .map_err(|e| invalid(format!("Invalid exclude pattern '{}' ({})", pattern, e)))?;
        }
    }

    if settings.max_depth == Some(0) {
        return Err(invalid("Invalid max_depth 0".to_string()));
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(invalid("Invalid empty output_file".to_string()));
        }
    }

    if let Some(n) = settings.n_clusters {
        if n < 2 {
            return Err(invalid(format!("n_clusters must be at least 2, got {}", n)));
        }
    }

    if settings.clone_timeout_secs == Some(0) {
        return Err(invalid("Invalid clone_timeout_secs 0".to_string()));
    }

    if let Some(key) = &settings.openai_api_key {
        if key.trim().is_empty() {
            return Err(invalid("Empty openai_api_key".to_string()));
        }
    }

    Ok(())
}

/// Candidate configuration paths, most specific first
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("repopilot").join("config.toml"));
    }
    locations
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            tracing::debug!("using config file {}", location.display());
            return Ok(Some(parse_config_file(location)?));
        }
    }
    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(RepoPilotError::io_error)?;
        }
    }

    fs::write(path, default_config_template()).map_err(|source| RepoPilotError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// The commented configuration template written by `repopilot init`
pub fn default_config_template() -> &'static str {
    include_str!("default_config.toml")
}
