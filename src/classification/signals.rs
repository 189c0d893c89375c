//! Name and path signals used by the classification rules.
//!
//! All predicates are pure and work on a [`FileSignals`] snapshot, which
//! lowercases the path, file name and export names once per file.

use crate::core::paths::file_name_of;
use crate::core::{ExportKind, FileNode};
use crate::extraction::{singularize_naive, split_identifier};

/// Lowercased views of a file used by every rule.
#[derive(Debug, Clone)]
pub struct FileSignals<'a> {
    pub node: &'a FileNode,
    /// Lowercased path with a leading `/`, so directory checks like
    /// `/types/` also match at the root.
    pub path: String,
    pub file_name: String,
    /// File name without its extensions, lowercased.
    pub stem: String,
    /// Singularized tokens of the original (case-preserving) file stem.
    pub stem_tokens: Vec<String>,
    pub export_names: Vec<String>,
}

impl<'a> FileSignals<'a> {
    pub fn new(node: &'a FileNode) -> Self {
        let normalized = node.path.replace('\\', "/");
        let path = if normalized.starts_with('/') {
            normalized.to_lowercase()
        } else {
            format!("/{}", normalized.to_lowercase())
        };

        let original_name = file_name_of(&normalized);
        let original_stem = original_name.split('.').next().unwrap_or(original_name);
        let stem_tokens = split_identifier(original_stem)
            .iter()
            .map(|t| singularize_naive(t))
            .collect();

        Self {
            node,
            file_name: original_name.to_lowercase(),
            stem: original_stem.to_lowercase(),
            stem_tokens,
            path,
            export_names: node.exports.iter().map(|e| e.name.to_lowercase()).collect(),
        }
    }

    pub fn export_count(&self) -> usize {
        self.node.exports.len()
    }

    pub fn import_count(&self) -> usize {
        self.node.imports.len()
    }

    pub fn path_contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.path.contains(n))
    }

    pub fn stem_contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.stem.contains(n))
    }

    pub fn stem_has_token(&self, tokens: &[&str]) -> bool {
        self.stem_tokens.iter().any(|t| tokens.contains(&t.as_str()))
    }

    pub fn any_export_contains(&self, needles: &[&str]) -> bool {
        self.export_names
            .iter()
            .any(|name| needles.iter().any(|n| name.contains(n)))
    }

    /// Any export whose name split into tokens contains one of `tokens`.
    pub fn any_export_has_token(&self, tokens: &[&str]) -> bool {
        self.node.exports.iter().any(|e| {
            split_identifier(&e.name)
                .iter()
                .any(|t| tokens.contains(&singularize_naive(t).as_str()))
        })
    }

    /// Export names as written, for camelCase-aware tokenizing.
    pub fn export_names_original(&self) -> Vec<&'a str> {
        self.node.exports.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn has_kind(&self, kind: ExportKind) -> bool {
        self.node.exports.iter().any(|e| e.kind == kind)
    }

    pub fn type_export_count(&self) -> usize {
        self.node.exports.iter().filter(|e| e.kind.is_type_like()).count()
    }

    pub fn runtime_export_count(&self) -> usize {
        self.node.exports.iter().filter(|e| e.kind.is_runtime()).count()
    }
}

/// First camelCase token of an export name, lowercased.
pub fn leading_token(name: &str) -> Option<String> {
    split_identifier(name).into_iter().next()
}

pub fn has_leading_token(name: &str, prefixes: &[&str]) -> bool {
    leading_token(name).is_some_and(|t| prefixes.contains(&t.as_str()))
}

pub fn is_index_file(signals: &FileSignals) -> bool {
    matches!(
        signals.file_name.as_str(),
        "index.ts" | "index.js" | "index.tsx" | "index.jsx"
    )
}

pub fn is_declaration_file(signals: &FileSignals) -> bool {
    signals.file_name.ends_with(".d.ts")
}

const TYPE_DIRECTORIES: &[&str] = &["/types/", "/typings/", "/@types/"];

pub fn has_type_path_signal(signals: &FileSignals) -> bool {
    is_declaration_file(signals)
        || signals.stem == "types"
        || signals.stem == "typings"
        || signals.stem.ends_with("-types")
        || signals.stem.ends_with("_types")
        || signals.file_name.contains(".types.")
        || signals.path_contains_any(TYPE_DIRECTORIES)
}

pub fn is_under_utility_directory(signals: &FileSignals) -> bool {
    signals.path_contains_any(&["/utils/", "/helpers/"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExportRecord;

    #[test]
    fn test_signals_lowercase_and_leading_slash() {
        let node = FileNode::new("src/Billing/InvoiceService.ts")
            .with_exports(vec![ExportRecord::new("InvoiceService", ExportKind::Class)]);
        let signals = FileSignals::new(&node);
        assert_eq!(signals.path, "/src/billing/invoiceservice.ts");
        assert_eq!(signals.file_name, "invoiceservice.ts");
        assert_eq!(signals.stem, "invoiceservice");
        assert_eq!(signals.stem_tokens, vec!["invoice", "service"]);
        assert_eq!(signals.export_names, vec!["invoiceservice"]);
    }

    #[test]
    fn test_stem_strips_all_extensions() {
        let node = FileNode::new("types/global.d.ts");
        let signals = FileSignals::new(&node);
        assert_eq!(signals.stem, "global");
        assert!(is_declaration_file(&signals));
        assert!(has_type_path_signal(&signals));
    }

    #[test]
    fn test_nested_types_directory() {
        let node = FileNode::new("src/types/audit/status.ts");
        assert!(has_type_path_signal(&FileSignals::new(&node)));

        let plain = FileNode::new("src/audit/status.ts");
        assert!(!has_type_path_signal(&FileSignals::new(&plain)));
    }

    #[test]
    fn test_leading_token() {
        assert_eq!(leading_token("parseInvoice").as_deref(), Some("parse"));
        assert!(has_leading_token("mapUserRow", &["map"]));
        assert!(!has_leading_token("mapper", &["map"]));
    }

    #[test]
    fn test_export_token_matching() {
        let node = FileNode::new("src/a.ts").with_exports(vec![ExportRecord::new(
            "useSessionStore",
            ExportKind::Function,
        )]);
        let signals = FileSignals::new(&node);
        assert!(signals.any_export_has_token(&["store"]));
        assert!(!signals.any_export_has_token(&["state"]));
    }

    #[test]
    fn test_type_and_runtime_export_counts() {
        let node = FileNode::new("src/order.ts").with_exports(vec![
            ExportRecord::new("Order", ExportKind::Interface),
            ExportRecord::new("OrderStatus", ExportKind::Type),
            ExportRecord::new("createOrder", ExportKind::Function),
            ExportRecord::new("default", ExportKind::Default),
        ]);
        let signals = FileSignals::new(&node);
        assert_eq!(signals.type_export_count(), 2);
        assert_eq!(signals.runtime_export_count(), 2);
    }

    #[test]
    fn test_index_file() {
        let node = FileNode::new("src/index.tsx");
        assert!(is_index_file(&FileSignals::new(&node)));
        assert!(!is_index_file(&FileSignals::new(&FileNode::new("src/indexer.ts"))));
    }
}
