//! File and repository summaries
//!
//! The default summaries are template text built from simple statistics.
//! A [`SummaryGenerator`] can be plugged in for generated prose; any failure
//! from it falls back to the template text.

use crate::error::{RepoPilotError, Result};
use crate::models::analysis::RepositoryStructure;
use crate::models::file_entry::{FileEntry, Language};
use crate::parsers::dependency_extractor::{decode_lossy, DependencyExtractor};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Maximum characters of file content handed to a generator
pub const MAX_GENERATOR_CHARS: usize = 10_000;

const LARGE_FILE_BYTES: usize = 5000;
const SMALL_FILE_BYTES: usize = 500;

static FUNCTION_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:def|fn|func)\s+\w+|\bfunction\b").ok()
});

static CLASS_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:export\s+)?(?:pub(?:\([^)]*\))?\s+)?(?:public\s+|abstract\s+|final\s+)*(?:class|struct|interface|trait|enum)\s+\w+").ok()
});

static COMMENT_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?m)^\s*(?://|#[^!\[]|#$|/\*|--\s)").ok());

fn count_matches(re: &Lazy<Option<Regex>>, text: &str) -> usize {
    re.as_ref().map_or(0, |re| re.find_iter(text).count())
}

/// Explicit settings for the summarizer
#[derive(Debug, Clone, Default)]
pub struct SummarizerConfig {
    /// Key for the generative backend; `None` selects template summaries
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// A backend that writes prose summaries
pub trait SummaryGenerator {
    /// Summarize one file from its (possibly truncated) content
    fn summarize_file(&self, path: &str, content: &str, language: Language) -> Result<String>;

    /// Write an overview of the repository
    fn repo_overview(&self, structure: &RepositoryStructure) -> Result<String>;
}

/// Produces per-file and repository summaries
pub struct Summarizer {
    generator: Option<Box<dyn SummaryGenerator>>,
    extractor: DependencyExtractor,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::heuristic()
    }
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("generative", &self.generator.is_some())
            .finish()
    }
}

impl Summarizer {
    /// Template-only summarizer
    pub fn heuristic() -> Self {
        Self {
            generator: None,
            extractor: DependencyExtractor::new(),
        }
    }

    /// Summarizer using a custom generator
    pub fn with_generator(generator: Box<dyn SummaryGenerator>) -> Self {
        Self {
            generator: Some(generator),
            extractor: DependencyExtractor::new(),
        }
    }

    /// Build from configuration; no API key means template summaries
    pub fn from_config(config: &SummarizerConfig) -> Self {
        match config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            None => Self::heuristic(),
            Some(key) => Self::generative(key, config.model.as_deref()),
        }
    }

    #[cfg(feature = "generative")]
    fn generative(key: &str, model: Option<&str>) -> Self {
        tracing::debug!("using generative summaries");
        Self::with_generator(Box::new(OpenAiGenerator::new(key, model)))
    }

    #[cfg(not(feature = "generative"))]
    fn generative(_key: &str, _model: Option<&str>) -> Self {
        tracing::warn!("API key configured but generative summaries are not compiled in; using template summaries");
        Self::heuristic()
    }

    pub fn is_generative(&self) -> bool {
        self.generator.is_some()
    }

    /// Summarize one file's content
    pub fn summarize_file(&self, path: &str, content: &str, language: Language) -> String {
        if let Some(generator) = &self.generator {
            match generator.summarize_file(path, &truncate_content(content), language) {
                Ok(summary) => return summary,
                Err(err) => tracing::warn!(path, "summary generation failed, using template: {}", err),
            }
        }
        self.heuristic_file_summary(content, language)
    }

    /// Read a walked file under `root` and summarize it
    pub fn summarize_entry(&self, root: &Path, entry: &FileEntry) -> Result<String> {
        let full_path = root.join(&entry.path);
        let bytes = std::fs::read(&full_path).map_err(|source| RepoPilotError::FileRead {
            path: full_path.clone(),
            source,
        })?;
        Ok(self.summarize_file(&entry.path, &decode_lossy(&bytes), entry.language_or_unknown()))
    }

    /// Overview of the whole repository
    pub fn generate_repo_overview(&self, structure: &RepositoryStructure) -> String {
        if let Some(generator) = &self.generator {
            match generator.repo_overview(structure) {
                Ok(overview) => return overview,
                Err(err) => tracing::warn!("overview generation failed, using template: {}", err),
            }
        }
        heuristic_overview(structure)
    }

    fn heuristic_file_summary(&self, content: &str, language: Language) -> String {
        let mut clauses = Vec::new();

        if content.contains("\"\"\"") || content.contains("'''") || content.contains("/**") || content.contains("///") {
            clauses.push("Documented with docstrings".to_string());
        } else if count_matches(&COMMENT_RE, content) > 0 {
            clauses.push("Contains comments".to_string());
        }

        let functions = count_matches(&FUNCTION_RE, content);
        if functions > 0 {
            clauses.push(format!("Defines {} function(s)", functions));
        }
        let classes = count_matches(&CLASS_RE, content);
        if classes > 0 {
            clauses.push(format!("{} class/type definition(s)", classes));
        }
        let imports = self.extractor.extract_from_source(language, content).len();
        if imports > 0 {
            clauses.push(format!("{} import(s)", imports));
        }

        if content.len() > LARGE_FILE_BYTES {
            clauses.push("Large file (>5KB)".to_string());
        } else if content.len() < SMALL_FILE_BYTES {
            clauses.push("Small utility file (<500B)".to_string());
        }

        let tag = language.as_str().to_uppercase();
        if clauses.is_empty() {
            format!("[{}] No notable structure detected", tag)
        } else {
            format!("[{}] {}", tag, clauses.join(". "))
        }
    }
}

/// Cut content to the generator limit on a character boundary
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(MAX_GENERATOR_CHARS) {
        Some((idx, _)) => format!("{}\n... (truncated)", &content[..idx]),
        None => content.to_string(),
    }
}

/// Project kinds implied by key file names, in first-seen order
pub fn project_types(key_files: &[String]) -> Vec<&'static str> {
    let mut types = Vec::new();
    for path in key_files {
        let name = path.rsplit('/').next().unwrap_or(path);
        let kind = match name {
            "package.json" => Some("Node.js/JavaScript project"),
            "requirements.txt" | "setup.py" | "pyproject.toml" => Some("Python project"),
            "Cargo.toml" => Some("Rust crate"),
            "go.mod" => Some("Go module"),
            "pom.xml" | "build.gradle" => Some("Java/JVM project"),
            "tsconfig.json" => Some("TypeScript project"),
            "Dockerfile" => Some("Containerized with Docker"),
            "Makefile" | "CMakeLists.txt" => Some("Make/CMake build"),
            other if other.starts_with("docker-compose.") => Some("Multi-container setup"),
            _ => None,
        };
        if let Some(kind) = kind {
            if !types.contains(&kind) {
                types.push(kind);
            }
        }
    }
    types
}

/// Template overview built from structure statistics
pub fn heuristic_overview(structure: &RepositoryStructure) -> String {
    let mut lines = vec![format!(
        "Repository with {} files across {} directories.",
        structure.total_files, structure.total_directories
    )];

    match &structure.primary_language {
        Some(language) => lines.push(format!("Primary language: {}.", language)),
        None => lines.push("Primary language: none detected.".to_string()),
    }

    let types = project_types(&structure.key_files);
    if !types.is_empty() {
        lines.push(format!("Project type: {}.", types.join(", ")));
    }

    let stack: Vec<String> = structure
        .languages_by_count()
        .into_iter()
        .take(3)
        .map(|(language, count)| format!("{} ({})", language, count))
        .collect();
    if !stack.is_empty() {
        lines.push(format!("Tech stack: {}.", stack.join(", ")));
    }

    if !structure.key_files.is_empty() {
        let shown: Vec<&str> = structure.key_files.iter().take(5).map(String::as_str).collect();
        lines.push(format!("Key files: {}.", shown.join(", ")));
    }

    lines.join("\n")
}

#[cfg(feature = "generative")]
pub use openai::OpenAiGenerator;

#[cfg(feature = "generative")]
mod openai {
    use super::SummaryGenerator;
    use crate::error::{RepoPilotError, Result};
    use crate::models::analysis::RepositoryStructure;
    use crate::models::file_entry::Language;
    use serde::{Deserialize, Serialize};

    const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

    /// Chat-completions backed generator
    pub struct OpenAiGenerator {
        client: reqwest::blocking::Client,
        api_key: String,
        model: String,
    }

    #[derive(Debug, Serialize)]
    struct ChatRequest {
        model: String,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct ChatMessage {
        role: String,
        content: String,
    }

    #[derive(Debug, Deserialize)]
    struct ChatResponse {
        choices: Vec<ChatChoice>,
    }

    #[derive(Debug, Deserialize)]
    struct ChatChoice {
        message: ChatMessage,
    }

    fn generation_error(message: impl Into<String>) -> RepoPilotError {
        RepoPilotError::SummaryGeneration {
            message: message.into(),
        }
    }

    impl OpenAiGenerator {
        pub fn new(api_key: &str, model: Option<&str>) -> Self {
            Self {
                client: reqwest::blocking::Client::new(),
                api_key: api_key.to_string(),
                model: model.unwrap_or("gpt-4").to_string(),
            }
        }

        fn complete(&self, system: &str, prompt: String, max_tokens: u32) -> Result<String> {
            let request = ChatRequest {
                model: self.model.clone(),
                messages: vec![
                    ChatMessage {
                        role: "system".to_string(),
                        content: system.to_string(),
                    },
                    ChatMessage {
                        role: "user".to_string(),
                        content: prompt,
                    },
                ],
                temperature: 0.3,
                max_tokens,
            };

            let response = self
                .client
                .post(ENDPOINT)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .map_err(|e| generation_error(format!("request failed: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().unwrap_or_default();
                return Err(generation_error(format!("API error {}: {}", status, body)));
            }

            let parsed: ChatResponse = response
                .json()
                .map_err(|e| generation_error(format!("invalid response: {}", e)))?;
            parsed
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content.trim().to_string())
                .ok_or_else(|| generation_error("response contained no choices"))
        }
    }

    impl SummaryGenerator for OpenAiGenerator {
        fn summarize_file(&self, path: &str, content: &str, language: Language) -> Result<String> {
            let prompt = format!(
                "Provide a concise summary of the {} file `{}`.\n\
                 Cover what it does, its main functions or types, key dependencies \
                 and its purpose in the codebase.\n\nFile content:\n{}\n\nSummary:",
                language, path, content
            );
            self.complete("You are an expert code analyzer.", prompt, 300)
        }

        fn repo_overview(&self, structure: &RepositoryStructure) -> Result<String> {
            let key_files: Vec<&str> = structure.key_files.iter().take(5).map(String::as_str).collect();
            let prompt = format!(
                "Generate a concise overview of this repository.\n\n\
                 - Total Files: {}\n- Languages: {:?}\n- Key Files: {}\n\n\
                 Describe the project purpose, the tech stack, the role of the key files, \
                 a getting-started tip and the areas to explore first.\n\nOverview:",
                structure.total_files,
                structure.languages,
                key_files.join(", ")
            );
            self.complete("You are an expert code architect.", prompt, 500)
        }
    }
}
