//! Resolution of relative import specifiers to files in the graph.

use crate::core::paths::directory_of;
use std::collections::HashSet;

/// Extensions tried, in order, for a specifier written without one.
pub const RESOLVABLE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Join `specifier` onto the directory of `from` and collapse `.`/`..`.
///
/// Returns `None` when the specifier climbs above the root.
pub fn join_relative(from: &str, specifier: &str) -> Option<String> {
    let mut parts: Vec<&str> = directory_of(from)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    for segment in specifier.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}

/// Map a relative specifier to a known file path.
///
/// Tries the joined path itself, then each extension, then `index.<ext>` inside
/// it. Package imports and relative imports that match no file return `None`.
pub fn resolve_import(from: &str, specifier: &str, known: &HashSet<&str>) -> Option<String> {
    if !is_relative_specifier(specifier) {
        return None;
    }
    let joined = join_relative(from, specifier)?;

    if known.contains(joined.as_str()) {
        return Some(joined);
    }

    let with_extension = RESOLVABLE_EXTENSIONS
        .iter()
        .map(|ext| format!("{}.{}", joined, ext));
    let as_directory = RESOLVABLE_EXTENSIONS.iter().map(|ext| {
        if joined.is_empty() {
            format!("index.{}", ext)
        } else {
            format!("{}/index.{}", joined, ext)
        }
    });

    with_extension
        .chain(as_directory)
        .find(|candidate| known.contains(candidate.as_str()))
}
