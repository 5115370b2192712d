//! Error context utilities for RepoPilot
//!
//! Attaches a path to foreign errors so they surface as repository issues.

use crate::error::{RepoPilotError, Result};
use std::io;
use std::path::Path;

/// Extension trait for Result to add path context to errors
pub trait ResultExt<T> {
    /// Attach the path being read when the error happened
    ///
    /// A permission problem anywhere in the source chain becomes
    /// `PermissionDenied`; anything else is a traversal error.
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| file_error(path.as_ref(), &err))
    }
}

fn file_error(path: &Path, err: &(dyn std::error::Error + 'static)) -> RepoPilotError {
    let mut current = Some(err);
    while let Some(cause) = current {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::PermissionDenied {
                return RepoPilotError::permission_denied(path);
            }
        }
        current = cause.source();
    }
    RepoPilotError::directory_traversal_error(path, err.to_string())
}
