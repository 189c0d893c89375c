//! Regex-based import extraction for JavaScript and TypeScript sources.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// `import x from '...'`, `import { a, b } from "..."`, `import type T from '...'`
static IMPORT_FROM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import\s+[^;'"]*?\s*from\s*['"]([^'"]+)['"]"#).unwrap());

/// Side-effect import: `import './polyfills'`
static IMPORT_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"import\s+['"]([^'"]+)['"]"#).unwrap());

/// CommonJS: `require('...')`
static REQUIRE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"require\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

/// Extract import specifiers from source text.
///
/// Patterns are applied in a fixed order (`import ... from`, bare `import`,
/// `require`). Specifiers starting with `builtin_prefix` are dropped and the
/// rest are deduplicated keeping the first occurrence.
pub fn extract_imports(content: &str, builtin_prefix: &str) -> Vec<String> {
    let patterns: [&Regex; 3] = [&IMPORT_FROM, &IMPORT_BARE, &REQUIRE];
    let mut seen = HashSet::new();

    patterns
        .iter()
        .flat_map(|pattern| pattern.captures_iter(content))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|spec| !is_builtin(spec, builtin_prefix))
        .filter(|spec| seen.insert(*spec))
        .map(str::to_string)
        .collect()
}

fn is_builtin(specifier: &str, builtin_prefix: &str) -> bool {
    !builtin_prefix.is_empty() && specifier.starts_with(builtin_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_extracts_all_three_shapes_in_pattern_order() {
        let source = indoc! {r#"
            const fs = require('fs-extra');
            import './polyfills';
            import { createUser } from "./users/create";
            import React from 'react';
        "#};

        assert_eq!(
            extract_imports(source, "node:"),
            vec!["./users/create", "react", "./polyfills", "fs-extra"]
        );
    }

    #[test]
    fn test_skips_builtins_and_duplicates() {
        let source = indoc! {r#"
            import path from 'node:path';
            import { a } from './shared';
            import { b } from './shared';
            const shared = require('./shared');
        "#};

        assert_eq!(extract_imports(source, "node:"), vec!["./shared"]);
    }

    #[test]
    fn test_multiline_named_import() {
        let source = indoc! {r#"
            import {
              Invoice,
              InvoiceLine,
            } from '../billing/types';
        "#};

        assert_eq!(extract_imports(source, "node:"), vec!["../billing/types"]);
    }

    #[test]
    fn test_type_only_import() {
        let source = "import type { Order } from './order';";
        assert_eq!(extract_imports(source, "node:"), vec!["./order"]);
    }

    #[test]
    fn test_empty_builtin_prefix_keeps_everything() {
        let source = "import fs from 'node:fs';";
        assert_eq!(extract_imports(source, ""), vec!["node:fs"]);
    }

    #[test]
    fn test_no_imports() {
        assert!(extract_imports("export const x = 1;", "node:").is_empty());
    }
}
