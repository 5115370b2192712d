//! Regex-based import extraction
//!
//! Dependency strings are returned exactly as written in the source. Relative
//! paths are not resolved and extensions are not stripped.

use crate::error::{RepoPilotError, Result};
use crate::models::dependency_graph::DependencySet;
use crate::models::file_entry::{FileEntry, Language};
use crate::parsers::import_patterns;
use std::fs;
use std::path::Path;

/// Extracts raw dependency strings from source files
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyExtractor;

impl DependencyExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract dependencies of one walked file, logging read failures
    ///
    /// Unreadable files yield an empty set.
    pub fn extract(&self, entry: &FileEntry, root: &Path) -> DependencySet {
        match self.try_extract(entry, root) {
            Ok(deps) => deps,
            Err(err) => {
                tracing::warn!("{}", err);
                DependencySet::new()
            }
        }
    }

    /// Extract dependencies, surfacing read failures to the caller
    pub fn try_extract(&self, entry: &FileEntry, root: &Path) -> Result<DependencySet> {
        let language = entry.language_or_unknown();
        if !entry.is_file() || !import_patterns::has_patterns(language) {
            return Ok(DependencySet::new());
        }

        let path = root.join(&entry.path);
        let bytes = fs::read(&path).map_err(|source| RepoPilotError::FileRead {
            path: path.clone(),
            source,
        })?;

        Ok(self.extract_from_source(language, &decode_lossy(&bytes)))
    }

    /// Apply a language's patterns to source text
    pub fn extract_from_source(&self, language: Language, text: &str) -> DependencySet {
        let mut deps = DependencySet::new();
        for pattern in import_patterns::patterns_for(language) {
            for captures in pattern.captures_iter(text) {
                if let Some(dep) = captures.get(1) {
                    deps.insert(dep.as_str().to_string());
                }
            }
        }
        for (block, item) in import_patterns::block_patterns_for(language) {
            for body in block.captures_iter(text).filter_map(|c| c.get(1)) {
                for captures in item.captures_iter(body.as_str()) {
                    if let Some(dep) = captures.get(1) {
                        deps.insert(dep.as_str().to_string());
                    }
                }
            }
        }
        deps
    }
}

/// Decode UTF-8, dropping invalid byte sequences
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
