//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{Args, Commands, OutputFormat};
pub use commands::{exit_code, Command, InitOutcome};
