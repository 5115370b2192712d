//! Batch CSV parsing and validation
//!
//! Expected layout, header row first:
//!
//! ```text
//! url,name,description
//! https://github.com/user/repo,repo-name,optional description
//! ```
//!
//! Validation stops at the first bad row and finishes before any clone is
//! attempted.

use crate::error::{RepoPilotError, Result};
use crate::github::validate_github_url;
use crate::models::batch::BatchEntry;
use std::fs;
use std::path::Path;

/// Parse and validate batch CSV content
pub fn validate_csv(content: &str) -> Result<Vec<BatchEntry>> {
    if content.trim().is_empty() {
        return Err(RepoPilotError::batch_validation("CSV is empty"));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.trim().as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| RepoPilotError::batch_validation(format!("CSV parsing error: {}", e)))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (url_col, name_col, description_col) = (column("url"), column("name"), column("description"));

    let mut entries = Vec::new();
    // header is row 1
    for (index, record) in reader.records().enumerate() {
        let row = index + 2;
        let record = record.map_err(|e| RepoPilotError::batch_validation(format!("CSV parsing error: {}", e)))?;
        let cell = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("").trim();

        let url = cell(url_col);
        if url.is_empty() {
            return Err(RepoPilotError::batch_validation(format!("Row {}: Missing 'url' column", row)));
        }
        if !validate_github_url(url) {
            return Err(RepoPilotError::batch_validation(format!(
                "Row {}: Invalid GitHub URL: {}",
                row, url
            )));
        }

        let name = match cell(name_col) {
            "" => url.trim_end_matches('/').rsplit('/').next().unwrap_or(url).to_string(),
            name => name.to_string(),
        };
        entries.push(BatchEntry {
            url: url.to_string(),
            name,
            description: cell(description_col).to_string(),
        });
    }

    if entries.is_empty() {
        return Err(RepoPilotError::batch_validation("No valid repositories found in CSV"));
    }
    tracing::debug!("validated {} batch entries", entries.len());
    Ok(entries)
}

/// Read a batch CSV file and validate it
pub fn read_batch_file(path: &Path) -> Result<Vec<BatchEntry>> {
    let content = fs::read_to_string(path).map_err(|source| RepoPilotError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    validate_csv(&content)
}
