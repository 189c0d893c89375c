//! Domain keyword vocabulary and heuristic domain inference.
//!
//! The vocabulary is derived from the directory names of the analyzed tree
//! (so `src/billing/...` contributes `billing`) and followed by a fixed list of
//! common business concepts. Inference walks the vocabulary in order, so
//! project-specific keywords win over the generic ones.

use crate::core::{paths, UNKNOWN_DOMAIN};
use std::collections::HashSet;

/// Business concepts tried after the project vocabulary.
pub const DEFAULT_DOMAIN_KEYWORDS: &[&str] = &[
    "authentication",
    "authorization",
    "payment",
    "invoice",
    "customer",
    "product",
    "order",
    "cart",
    "user",
    "admin",
    "repository",
    "controller",
    "service",
    "config",
    "model",
    "view",
    "auth",
];

/// Directory names that carry no domain meaning.
pub const PATH_STOP_WORDS: &[&str] = &[
    "src",
    "lib",
    "dist",
    "build",
    "node_modules",
    "test",
    "tests",
    "__tests__",
    "spec",
    "e2e",
    "scripts",
    "components",
    "utils",
    "helpers",
    "util",
    "helper",
    "api",
    "apis",
];

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
];

/// Naive English singularization.
///
/// `-ies` becomes `-y`, `-ses` loses two characters, and any other trailing
/// `s` is dropped when the word is longer than three characters.
pub fn singularize(word: &str) -> String {
    if let Some((_, singular)) = IRREGULAR_PLURALS.iter().find(|(plural, _)| *plural == word) {
        return (*singular).to_string();
    }
    singularize_naive(word)
}

/// Singularization without the irregular-plural table.
pub fn singularize_naive(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{}y", stem)
    } else if let Some(stem) = word.strip_suffix("es").filter(|_| word.ends_with("ses")) {
        stem.to_string()
    } else if word.ends_with('s') && word.len() > 3 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Split an identifier on case changes and separators, lowercased.
///
/// `getUserProfile` yields `get, user, profile`; `HTTPServer` yields
/// `http, server`; `user_id` yields `user, id`.
pub fn split_identifier(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush_token(&mut current, &mut tokens);
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                flush_token(&mut current, &mut tokens);
            }
        }

        current.extend(c.to_lowercase());
    }
    flush_token(&mut current, &mut tokens);

    tokens
}

fn flush_token(current: &mut String, tokens: &mut Vec<String>) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

/// Collect singularized directory names from a set of paths.
///
/// Segments containing `.` are file names and are skipped, as is anything in
/// [`PATH_STOP_WORDS`]. First-seen order is kept.
pub fn derive_domain_keywords<'a, I>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for path in paths {
        for segment in path.split('/') {
            let normalized = segment.to_lowercase();
            if normalized.is_empty()
                || normalized.contains('.')
                || PATH_STOP_WORDS.contains(&normalized.as_str())
            {
                continue;
            }
            let singular = singularize(&normalized);
            if seen.insert(singular.clone()) {
                keywords.push(singular);
            }
        }
    }

    keywords
}

/// Ordered keyword list used to infer export domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainVocabulary {
    keywords: Vec<String>,
}

impl Default for DomainVocabulary {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl DomainVocabulary {
    /// Project keywords first, then [`DEFAULT_DOMAIN_KEYWORDS`].
    pub fn new(project_keywords: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let keywords = project_keywords
            .into_iter()
            .chain(DEFAULT_DOMAIN_KEYWORDS.iter().map(|k| k.to_string()))
            .filter(|k| seen.insert(k.clone()))
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn find_keyword<'a>(&'a self, candidate: &str) -> Option<&'a str> {
        self.keywords
            .iter()
            .find(|k| k.as_str() == candidate)
            .map(String::as_str)
    }

    /// Infer the domain of an export.
    ///
    /// Checked in order: a keyword equal to one of the name's tokens, a keyword
    /// contained in the lowercased name, an import path segment, then a
    /// directory of the file's own path. Falls back to `"unknown"`.
    pub fn infer_domain(&self, name: &str, path: &str, imports: &[String]) -> String {
        let tokens = split_identifier(name);
        if let Some(keyword) = self
            .keywords
            .iter()
            .find(|k| tokens.iter().any(|t| t == *k))
        {
            return keyword.clone();
        }

        let lower = name.to_lowercase();
        if let Some(keyword) = self.keywords.iter().find(|k| lower.contains(k.as_str())) {
            return keyword.clone();
        }

        for import in imports {
            for segment in import.split('/') {
                let candidate = singularize(&segment.to_lowercase());
                if let Some(keyword) = self.find_keyword(&candidate) {
                    return keyword.to_string();
                }
            }
        }

        for segment in paths::segments(paths::directory_of(path)) {
            let candidate = singularize(&segment.to_lowercase());
            if let Some(keyword) = self.find_keyword(&candidate) {
                return keyword.to_string();
            }
        }

        UNKNOWN_DOMAIN.to_string()
    }
}
