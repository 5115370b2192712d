//! File and directory entries produced by the repository walk

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Language inferred from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Go,
    Rust,
    Cpp,
    C,
    Sql,
    Json,
    Yaml,
    Markdown,
    Html,
    Css,
    Shell,
    Unknown,
}

/// Extension table, matched against the lowercased extension
const EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("js", Language::JavaScript),
    ("jsx", Language::JavaScript),
    ("mjs", Language::JavaScript),
    ("cjs", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("tsx", Language::TypeScript),
    ("java", Language::Java),
    ("go", Language::Go),
    ("rs", Language::Rust),
    ("cpp", Language::Cpp),
    ("cc", Language::Cpp),
    ("cxx", Language::Cpp),
    ("hpp", Language::Cpp),
    ("c", Language::C),
    ("h", Language::C),
    ("sql", Language::Sql),
    ("json", Language::Json),
    ("yml", Language::Yaml),
    ("yaml", Language::Yaml),
    ("md", Language::Markdown),
    ("html", Language::Html),
    ("htm", Language::Html),
    ("css", Language::Css),
    ("sh", Language::Shell),
    ("bash", Language::Shell),
];

impl Language {
    /// Detect the language of a file from its extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .and_then(|ext| {
                EXTENSIONS
                    .iter()
                    .find(|(candidate, _)| *candidate == ext)
                    .map(|(_, language)| *language)
            })
            .unwrap_or(Language::Unknown)
    }

    /// Lowercase identifier used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Sql => "sql",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Markdown => "markdown",
            Language::Html => "html",
            Language::Css => "css",
            Language::Shell => "shell",
            Language::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an entry is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One file or directory found under the repository root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Repository-relative path with `/` separators
    pub path: String,
    pub name: String,
    /// Size in bytes, zero for directories
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// `None` for directories
    pub language: Option<Language>,
    pub is_key_file: bool,
}

impl FileEntry {
    /// Build a file entry
    pub fn file(path: impl Into<String>, name: impl Into<String>, size: u64, language: Language, is_key_file: bool) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size,
            kind: EntryKind::File,
            language: Some(language),
            is_key_file,
        }
    }

    /// Build a directory entry
    pub fn directory(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size: 0,
            kind: EntryKind::Directory,
            language: None,
            is_key_file: false,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Language of a file entry, `Unknown` for directories
    pub fn language_or_unknown(&self) -> Language {
        self.language.unwrap_or(Language::Unknown)
    }
}
