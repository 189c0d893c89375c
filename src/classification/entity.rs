//! Shared-entity-noun detection.
//!
//! `getUser`, `updateUser` and `UserProfile` all talk about a `user`. Export
//! names are split into tokens, verbs and filler words are dropped, the rest is
//! singularized, and the file passes when every export keeps at least one
//! token in common.

use crate::extraction::{singularize_naive, split_identifier};
use std::collections::BTreeSet;

const MIN_EXPORTS: usize = 2;
const MAX_EXPORTS: usize = 30;

/// Verbs and adjectives that never name an entity.
pub const ENTITY_STOP_WORDS: &[&str] = &[
    "get", "set", "create", "update", "delete", "remove", "add", "fetch", "find", "load",
    "save", "make", "build", "handle", "process", "validate", "check", "use", "init",
    "list", "put", "post", "patch", "send", "format", "parse", "render", "generate",
    "compute", "calculate", "convert", "transform", "map", "filter", "sort", "merge",
    "apply", "run", "start", "stop", "reset", "clear", "read", "write", "open", "close",
    "new", "all", "default", "current", "active", "valid", "invalid", "base", "main",
    "async", "sync", "with", "from", "for", "and", "the", "not", "by", "to", "of", "on",
    "is", "has", "can", "should", "upsert", "insert", "query", "try", "ensure", "extract",
];

/// Entity tokens of one export name.
pub fn entity_tokens(name: &str) -> BTreeSet<String> {
    split_identifier(name)
        .into_iter()
        .filter(|t| t.len() > 2 && !ENTITY_STOP_WORDS.contains(&t.as_str()))
        .map(|t| singularize_naive(&t))
        .collect()
}

/// Tokens shared by every name, or `None` when the set of names is out of
/// range or some name has no entity token at all.
pub fn shared_entity_nouns<S: AsRef<str>>(names: &[S]) -> Option<BTreeSet<String>> {
    if names.len() < MIN_EXPORTS || names.len() > MAX_EXPORTS {
        return None;
    }

    let mut token_sets = names.iter().map(|n| entity_tokens(n.as_ref()));
    let mut shared = token_sets.next()?;
    if shared.is_empty() {
        return None;
    }
    for tokens in token_sets {
        if tokens.is_empty() {
            return None;
        }
        shared.retain(|t| tokens.contains(t));
    }
    Some(shared)
}

pub fn has_shared_entity_noun<S: AsRef<str>>(names: &[S]) -> bool {
    shared_entity_nouns(names).is_some_and(|shared| !shared.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_tokens_drop_verbs_and_short_tokens() {
        let tokens = entity_tokens("getUserById");
        assert_eq!(tokens.into_iter().collect::<Vec<_>>(), vec!["user"]);
    }

    #[test]
    fn test_entity_tokens_singularize() {
        assert!(entity_tokens("listOrders").contains("order"));
        assert!(entity_tokens("fetchCategories").contains("category"));
    }

    #[test]
    fn test_shared_noun_across_exports() {
        assert!(has_shared_entity_noun(&["getUser", "updateUser", "UserProfile"]));
        assert!(!has_shared_entity_noun(&["getUser", "createOrder"]));
    }

    #[test]
    fn test_requires_at_least_two_names() {
        assert!(!has_shared_entity_noun(&["getUser"]));
        assert!(shared_entity_nouns::<&str>(&[]).is_none());
    }

    #[test]
    fn test_name_without_entity_token_fails() {
        assert!(!has_shared_entity_noun(&["getUser", "get"]));
    }

    #[test]
    fn test_too_many_names() {
        let names: Vec<String> = (0..31).map(|i| format!("user{}", i)).collect();
        assert!(!has_shared_entity_noun(&names));
    }
}
