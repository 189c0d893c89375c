//! Export extraction.
//!
//! Structured extraction is delegated to an [`ExportExtractor`] supplied by the
//! caller (an AST-backed parser, typically). When it fails, or none is given,
//! [`RegexExportExtractor`] recovers the common declaration shapes from text.

use crate::core::ExportKind;
use crate::errors::Error;
use once_cell::sync::Lazy;
use regex::Regex;

/// Export as reported by an extractor, before domain inference.
#[derive(Debug, Clone, PartialEq)]
pub struct RawExport {
    pub name: String,
    pub kind: ExportKind,
    pub used_imports: Option<Vec<String>>,
}

impl RawExport {
    pub fn new(name: impl Into<String>, kind: ExportKind) -> Self {
        Self {
            name: name.into(),
            kind,
            used_imports: None,
        }
    }

    pub fn with_used_imports(mut self, imports: Vec<String>) -> Self {
        self.used_imports = Some(imports);
        self
    }
}

/// Source of export records for one file.
pub trait ExportExtractor {
    fn extract_exports(&self, path: &str, content: &str) -> anyhow::Result<Vec<RawExport>>;
}

static EXPORT_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+(?:async\s+)?function\*?\s+(\w+)").unwrap());
static EXPORT_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+(?:abstract\s+)?class\s+(\w+)").unwrap());
static EXPORT_CONST: Lazy<Regex> = Lazy::new(|| Regex::new(r"export\s+const\s+(\w+)").unwrap());
static EXPORT_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"export\s+type\s+(\w+)").unwrap());
static EXPORT_INTERFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+interface\s+(\w+)").unwrap());
static EXPORT_DEFAULT: Lazy<Regex> = Lazy::new(|| Regex::new(r"export\s+default\b").unwrap());

/// Text-pattern extractor used when structured parsing is unavailable.
///
/// Results are grouped by pattern in a fixed order: functions, classes,
/// consts, types, interfaces, then one `default` record per default export.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExportExtractor;

impl RegexExportExtractor {
    pub fn extract(&self, content: &str) -> Vec<RawExport> {
        let named: [(&Regex, ExportKind); 5] = [
            (&EXPORT_FUNCTION, ExportKind::Function),
            (&EXPORT_CLASS, ExportKind::Class),
            (&EXPORT_CONST, ExportKind::Const),
            (&EXPORT_TYPE, ExportKind::Type),
            (&EXPORT_INTERFACE, ExportKind::Interface),
        ];

        let mut exports: Vec<RawExport> = named
            .iter()
            .flat_map(|(pattern, kind)| {
                pattern
                    .captures_iter(content)
                    .filter_map(move |caps| caps.get(1).map(|m| RawExport::new(m.as_str(), *kind)))
            })
            .collect();

        exports.extend(
            EXPORT_DEFAULT
                .find_iter(content)
                .map(|_| RawExport::new("default", ExportKind::Default)),
        );

        exports
    }
}

impl ExportExtractor for RegexExportExtractor {
    fn extract_exports(&self, _path: &str, content: &str) -> anyhow::Result<Vec<RawExport>> {
        Ok(self.extract(content))
    }
}

/// Run the structured extractor, degrading to the regex extractor on failure.
pub fn extract_exports_with_fallback(
    extractor: Option<&dyn ExportExtractor>,
    path: &str,
    content: &str,
) -> Vec<RawExport> {
    match extractor.map(|e| e.extract_exports(path, content)) {
        Some(Ok(exports)) => exports,
        Some(Err(e)) => {
            let error = Error::parse(path, format!("{:#}", e));
            log::debug!("{}. Falling back to regex export extraction.", error);
            RegexExportExtractor.extract(content)
        }
        None => RegexExportExtractor.extract(content),
    }
}
