//! GitHub repository access

pub mod clone;
pub mod url;

pub use clone::{
    classify_failure, CloneFailure, CloneFailureKind, CloneOutcome, ClonedRepository, GitCommandClient, GitHubCloner,
    VcsClient, VcsError,
};
pub use url::{looks_like_url, parse_github_url, validate_github_url, GitHubRepo};
