//! Validation of fully merged settings

use std::path::Path;

use crate::error::{RepoPilotError, Result};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                RepoPilotError::config_error(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }

        if settings.max_depth == Some(0) {
            return Err(RepoPilotError::config_error("Max depth must be at least 1"));
        }

        if settings.hot_spot_limit == 0 {
            return Err(RepoPilotError::config_error("Hot spot limit must be at least 1"));
        }

        if settings.clone_timeout_secs == 0 {
            return Err(RepoPilotError::config_error("Clone timeout must be at least 1 second"));
        }

        if settings.clone_depth == 0 {
            return Err(RepoPilotError::config_error("Clone depth must be at least 1"));
        }

        if let Some(n) = settings.n_clusters {
            if n < 2 {
                return Err(RepoPilotError::config_error(format!(
                    "Cluster count must be at least 2, got {}",
                    n
                )));
            }
        }

        if settings.openai_model.trim().is_empty() {
            return Err(RepoPilotError::config_error("OpenAI model name cannot be empty"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// The output file's directory must already exist
    fn validate_output_path(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(RepoPilotError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }
}
