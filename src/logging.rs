//! Logging setup for the `repopilot` binary
//!
//! Diagnostics go through `tracing` to stderr so stdout carries only the
//! formatted report. `RUST_LOG` wins over every flag.

use crate::error::{RepoPilotError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(level: &str, verbose: bool, quiet: bool) -> String {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        level
    };
    format!("repopilot={}", level)
}

/// Initialize the global tracing subscriber
pub fn init_logging(level: &str, verbose: bool, quiet: bool, use_colors: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(level, verbose, quiet))
            .map_err(|e| RepoPilotError::config_error(format!("Invalid log level '{}': {}", level, e)))?,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(use_colors)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| RepoPilotError::config_error(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("info", false, false), "repopilot=info");
        assert_eq!(default_directive("info", true, false), "repopilot=debug");
        assert_eq!(default_directive("error", false, true), "repopilot=warn");
        assert_eq!(default_directive("trace", true, true), "repopilot=debug");
    }
}
