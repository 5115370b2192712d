//! Per-language import patterns
//!
//! Each language maps to an ordered list of regular expressions. The first
//! capture group of every match is the raw dependency string. Supporting a
//! new language means adding a row here.
//!
//! Block patterns cover syntax where items only count inside an enclosing
//! statement, such as Go's `import ( ... )`. The block regex captures the
//! body and the item regex runs over that body alone.

use crate::models::file_entry::Language;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

const JS_PATTERNS: &[&str] = &[
    r#"require\(['"]([^'"]+)['"]\)"#,
    r#"import\s+.*from\s+['"]([^'"]+)['"]"#,
    r#"import\s+['"]([^'"]+)['"]"#,
];

const C_PATTERNS: &[&str] = &[r#"^\s*#\s*include\s*[<"]([^>"]+)[>"]"#];

/// Import pattern sources by language, applied in order
pub const IMPORT_PATTERNS: &[(Language, &[&str])] = &[
    (
        Language::Python,
        &[
            r"^\s*import\s+([a-zA-Z0-9_\.]+)",
            r"^\s*from\s+([a-zA-Z0-9_\.]+)\s+import",
        ],
    ),
    (Language::JavaScript, JS_PATTERNS),
    (Language::TypeScript, JS_PATTERNS),
    (Language::Java, &[r"^\s*import\s+(?:static\s+)?([\w\.\*]+)\s*;"]),
    (Language::Go, &[r#"^\s*import\s+(?:[\w\.]+\s+)?"([^"]+)""#]),
    (
        Language::Rust,
        &[
            r"^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+(\w+(?:::\w+)*)",
            r"^\s*(?:pub(?:\([^)]*\))?\s+)?mod\s+(\w+)\s*;",
        ],
    ),
    (Language::C, C_PATTERNS),
    (Language::Cpp, C_PATTERNS),
];

/// Block and item pattern sources by language
pub const BLOCK_IMPORT_PATTERNS: &[(Language, &str, &str)] = &[(
    Language::Go,
    r"^\s*import\s*\(([^)]*)\)",
    r#"^\s*(?:[\w\.]+\s+)?"([^"]+)""#,
)];

fn compile(language: Language, source: &str) -> Option<Regex> {
    match Regex::new(&format!("(?m){}", source)) {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::error!(%language, "invalid import pattern {}: {}", source, err);
            None
        }
    }
}

/// Compiled patterns, multi-line mode so `^` anchors at each line
static COMPILED: Lazy<HashMap<Language, Vec<Regex>>> = Lazy::new(|| {
    IMPORT_PATTERNS
        .iter()
        .map(|(language, sources)| {
            let compiled = sources
                .iter()
                .filter_map(|source| compile(*language, source))
                .collect();
            (*language, compiled)
        })
        .collect()
});

static COMPILED_BLOCKS: Lazy<HashMap<Language, Vec<(Regex, Regex)>>> = Lazy::new(|| {
    let mut compiled: HashMap<Language, Vec<(Regex, Regex)>> = HashMap::new();
    for (language, block, item) in BLOCK_IMPORT_PATTERNS {
        if let (Some(block), Some(item)) = (compile(*language, block), compile(*language, item)) {
            compiled.entry(*language).or_default().push((block, item));
        }
    }
    compiled
});

/// Compiled patterns for a language, empty when none are registered
pub fn patterns_for(language: Language) -> &'static [Regex] {
    COMPILED.get(&language).map(Vec::as_slice).unwrap_or(&[])
}

/// Compiled `(block, item)` pattern pairs for a language
pub fn block_patterns_for(language: Language) -> &'static [(Regex, Regex)] {
    COMPILED_BLOCKS.get(&language).map(Vec::as_slice).unwrap_or(&[])
}

/// Whether a language has any registered import patterns
pub fn has_patterns(language: Language) -> bool {
    !patterns_for(language).is_empty() || !block_patterns_for(language).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_compiles() {
        for (language, sources) in IMPORT_PATTERNS {
            assert_eq!(patterns_for(*language).len(), sources.len(), "{}", language);
        }
        for (language, _, _) in BLOCK_IMPORT_PATTERNS {
            assert!(!block_patterns_for(*language).is_empty(), "{}", language);
        }
    }

    #[test]
    fn test_unregistered_languages() {
        assert!(has_patterns(Language::Python));
        assert!(!has_patterns(Language::Json));
        assert!(!has_patterns(Language::Unknown));
    }
}
