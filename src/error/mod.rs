//! Error handling for RepoPilot
//!
//! Error types, the crate-wide result alias and a helper for attaching
//! path context to foreign errors.

pub mod context;
pub mod types;

pub use context::ResultExt;
pub use types::{ErrorSeverity, RepoPilotError, Result};
