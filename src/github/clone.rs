//! Shallow cloning of GitHub repositories into temporary directories
//!
//! Every clone goes into a fresh `repopilot_<repo>_*` directory owned by a
//! [`TempDir`] guard, so it is removed when the [`ClonedRepository`] is
//! dropped and on every failure path. Failures are returned as values and
//! never escape as errors.

use crate::error::RepoPilotError;
use crate::github::url::{parse_github_url, validate_github_url, GitHubRepo};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Default time allowed for one clone
pub const DEFAULT_CLONE_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw failure reported by a version-control client
#[derive(Debug)]
pub enum VcsError {
    /// The clone did not finish in time and was killed
    TimedOut(Duration),
    /// The client ran and failed; carries its error output
    CommandFailed(String),
    /// The client could not be started
    Io(std::io::Error),
}

/// Version-control client able to make a shallow clone
pub trait VcsClient {
    fn shallow_clone(&self, url: &str, destination: &Path, depth: u32, timeout: Duration) -> Result<(), VcsError>;
}

/// Client that runs the `git` executable
#[derive(Debug, Clone, Default)]
pub struct GitCommandClient;

impl VcsClient for GitCommandClient {
    fn shallow_clone(&self, url: &str, destination: &Path, depth: u32, timeout: Duration) -> Result<(), VcsError> {
        let mut child = Command::new("git")
            .arg("clone")
            .arg("--depth")
            .arg(depth.max(1).to_string())
            .arg("--single-branch")
            .arg(url)
            .arg(destination)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(VcsError::Io)?;

        // drain stderr on its own thread so a chatty git cannot fill the pipe
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut output = String::new();
                let _ = stderr.read_to_string(&mut output);
                output
            })
        });
        let collect_stderr = |reader: Option<thread::JoinHandle<String>>| {
            reader.and_then(|handle| handle.join().ok()).unwrap_or_default()
        };

        let started = Instant::now();
        loop {
            match child.try_wait().map_err(VcsError::Io)? {
                Some(status) if status.success() => return Ok(()),
                Some(_) => return Err(VcsError::CommandFailed(collect_stderr(stderr_reader))),
                None if started.elapsed() >= timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(VcsError::TimedOut(timeout));
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        }
    }
}

/// Why a clone failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneFailureKind {
    InvalidUrl,
    NotFound,
    AuthRequired,
    Timeout,
    GitFailure,
}

/// A failed clone with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneFailure {
    pub kind: CloneFailureKind,
    pub url: String,
    pub message: String,
}

impl CloneFailure {
    fn new(kind: CloneFailureKind, url: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.trim().to_string(),
            message: message.into(),
        }
    }

    /// Convert into the crate error type
    pub fn into_error(self) -> RepoPilotError {
        match self.kind {
            CloneFailureKind::InvalidUrl => RepoPilotError::InvalidGitHubUrl { url: self.url },
            _ => RepoPilotError::Clone {
                url: self.url,
                message: self.message,
            },
        }
    }
}

/// A repository checked out into a temporary directory
#[derive(Debug)]
pub struct ClonedRepository {
    pub repo: GitHubRepo,
    pub message: String,
    dir: TempDir,
}

impl ClonedRepository {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the checkout now, reporting any error
    pub fn cleanup(self) -> std::io::Result<()> {
        self.dir.close()
    }
}

/// Result of a clone attempt
#[derive(Debug)]
pub enum CloneOutcome {
    Cloned(ClonedRepository),
    Failed(CloneFailure),
}

impl CloneOutcome {
    pub fn success(&self) -> bool {
        matches!(self, CloneOutcome::Cloned(_))
    }

    pub fn message(&self) -> &str {
        match self {
            CloneOutcome::Cloned(cloned) => &cloned.message,
            CloneOutcome::Failed(failure) => &failure.message,
        }
    }

    /// Checkout directory, present only on success
    pub fn path(&self) -> Option<&Path> {
        match self {
            CloneOutcome::Cloned(cloned) => Some(cloned.path()),
            CloneOutcome::Failed(_) => None,
        }
    }

    /// Convert to a `Result`, for callers that treat failure as an error
    pub fn into_result(self) -> crate::error::Result<ClonedRepository> {
        match self {
            CloneOutcome::Cloned(cloned) => Ok(cloned),
            CloneOutcome::Failed(failure) => Err(failure.into_error()),
        }
    }
}

/// Map a client failure onto a failure kind and message
pub fn classify_failure(url: &str, error: &VcsError) -> CloneFailure {
    match error {
        VcsError::TimedOut(timeout) => CloneFailure::new(
            CloneFailureKind::Timeout,
            url,
            format!("Clone timed out after {}s: {}", timeout.as_secs(), url.trim()),
        ),
        VcsError::Io(err) => CloneFailure::new(
            CloneFailureKind::GitFailure,
            url,
            format!("Failed to run git: {}", err),
        ),
        VcsError::CommandFailed(stderr) => {
            let lower = stderr.to_lowercase();
            if ["not found", "404", "could not read username"].iter().any(|k| lower.contains(k)) {
                CloneFailure::new(
                    CloneFailureKind::NotFound,
                    url,
                    format!("Repository not found: {}", url.trim()),
                )
            } else if ["private", "authentication failed", "403", "permission denied"]
                .iter()
                .any(|k| lower.contains(k))
            {
                CloneFailure::new(
                    CloneFailureKind::AuthRequired,
                    url,
                    "Cannot access private repository without authentication",
                )
            } else {
                CloneFailure::new(
                    CloneFailureKind::GitFailure,
                    url,
                    format!("Failed to clone repository: {}", stderr.trim()),
                )
            }
        }
    }
}

/// Clones GitHub repositories through a [`VcsClient`]
#[derive(Debug, Clone)]
pub struct GitHubCloner<C: VcsClient = GitCommandClient> {
    client: C,
    depth: u32,
    timeout: Duration,
}

impl Default for GitHubCloner<GitCommandClient> {
    fn default() -> Self {
        Self::new(GitCommandClient)
    }
}

impl<C: VcsClient> GitHubCloner<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            depth: 1,
            timeout: DEFAULT_CLONE_TIMEOUT,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate `url` and shallow-clone it into a fresh temporary directory
    pub fn clone_repository(&self, url: &str) -> CloneOutcome {
        if !validate_github_url(url) {
            return CloneOutcome::Failed(CloneFailure::new(
                CloneFailureKind::InvalidUrl,
                url,
                "Invalid GitHub URL format. Expected: https://github.com/user/repo",
            ));
        }
        let repo = match parse_github_url(url) {
            Ok(repo) => repo,
            Err(_) => {
                return CloneOutcome::Failed(CloneFailure::new(
                    CloneFailureKind::InvalidUrl,
                    url,
                    "Could not parse GitHub repository information",
                ))
            }
        };

        let dir = match tempfile::Builder::new()
            .prefix(&format!("repopilot_{}_", repo.repo))
            .tempdir()
        {
            Ok(dir) => dir,
            Err(err) => {
                return CloneOutcome::Failed(CloneFailure::new(
                    CloneFailureKind::GitFailure,
                    url,
                    format!("Failed to create temporary directory: {}", err),
                ))
            }
        };

        tracing::info!(repository = %repo, path = %dir.path().display(), "cloning");
        match self.client.shallow_clone(&repo.url, dir.path(), self.depth, self.timeout) {
            Ok(()) => {
                let message = format!("Cloned {} successfully", repo.full_name());
                CloneOutcome::Cloned(ClonedRepository { repo, message, dir })
            }
            Err(err) => {
                let failure = classify_failure(url, &err);
                if let Err(cleanup_err) = dir.close() {
                    tracing::warn!("failed to remove clone directory: {}", cleanup_err);
                }
                tracing::warn!(repository = %repo, "{}", failure.message);
                CloneOutcome::Failed(failure)
            }
        }
    }
}
