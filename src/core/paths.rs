//! Path helpers over `/`-separated, root-relative file paths.
//!
//! Paths are treated as plain strings: the engine never touches the file
//! system, and grouping must behave the same on every platform.

/// Directory prefix of a path, excluding the basename (`""` at the root).
pub fn directory_of(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// Final path segment.
pub fn file_name_of(path: &str) -> &str {
    path.rfind('/').map_or(path, |idx| &path[idx + 1..])
}

/// Non-empty path segments from the root.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Number of leading segments two paths have in common.
pub fn shared_prefix_len(a: &[&str], b: &[&str]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
