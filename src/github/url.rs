//! GitHub repository URL validation and parsing

use crate::error::{RepoPilotError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static REPO_URL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^https?://github\.com/([\w\-\.]+)/([\w\-\.]+)/?$").ok());

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
    /// Normalized URL without a trailing slash
    pub url: String,
}

impl GitHubRepo {
    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Whether `url` looks like `https://github.com/<owner>/<repo>`
pub fn validate_github_url(url: &str) -> bool {
    REPO_URL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(url.trim()))
}

/// Split a GitHub URL into owner and repository name
pub fn parse_github_url(url: &str) -> Result<GitHubRepo> {
    let trimmed = url.trim().trim_end_matches('/');
    let invalid = || RepoPilotError::InvalidGitHubUrl { url: url.trim().to_string() };

    let captures = REPO_URL_RE
        .as_ref()
        .and_then(|re| re.captures(trimmed))
        .ok_or_else(invalid)?;

    let owner = captures.get(1).map(|m| m.as_str().to_string()).ok_or_else(invalid)?;
    let repo = captures.get(2).map(|m| m.as_str().to_string()).ok_or_else(invalid)?;

    Ok(GitHubRepo {
        owner,
        repo,
        url: trimmed.to_string(),
    })
}

/// Whether a target string should be treated as a GitHub URL rather than a path
pub fn looks_like_url(target: &str) -> bool {
    let target = target.trim();
    target.starts_with("http://") || target.starts_with("https://")
}
