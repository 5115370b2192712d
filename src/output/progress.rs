//! Progress reporting for batch runs
//!
//! Bars and messages go to stderr so piped JSON or CSV output stays clean.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a new progress reporter; quiet mode draws nothing
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let bar = if quiet {
            None
        } else {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            let style = ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .map(|style| style.progress_chars("#>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            Some(bar)
        };

        Self { quiet, verbose, bar }
    }

    /// Reporter that never draws, for tests and piped runs
    pub fn hidden() -> Self {
        Self {
            quiet: true,
            verbose: false,
            bar: None,
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if let Some(bar) = &self.bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
        }
        if self.verbose {
            eprintln!("Starting: {}", operation);
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
            bar.set_message(message.to_string());
        }
        if self.verbose {
            eprintln!("[{}/{}] {}", current, total, message);
        }
    }

    /// Finish the progress operation
    pub fn finish(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
        if self.verbose {
            eprintln!("Finished: {}", message);
        }
    }

    /// Print a status line unless quiet
    pub fn print(&self, message: &str) {
        if !self.quiet {
            match &self.bar {
                Some(bar) => bar.println(message),
                None => eprintln!("{}", message),
            }
        }
    }

    /// Print a warning message (always printed, even in quiet mode)
    pub fn print_warning(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    /// Print an error message (always printed, even in quiet mode)
    pub fn print_error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
