use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Domain label used when no signal identifies a business concept.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Declaration shape of an exported symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Class,
    Const,
    Type,
    Interface,
    Default,
}

impl ExportKind {
    /// Type-level exports vanish at runtime.
    pub fn is_type_like(self) -> bool {
        matches!(self, ExportKind::Type | ExportKind::Interface)
    }

    pub fn is_runtime(self) -> bool {
        !self.is_type_like()
    }
}

/// One candidate domain for an export, as reported by semantic analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAssignment {
    pub domain: String,
    pub confidence: f64,
}

impl DomainAssignment {
    pub fn new(domain: impl Into<String>, confidence: f64) -> Self {
        Self {
            domain: domain.into(),
            confidence,
        }
    }
}

/// An exported symbol of a file.
///
/// `domains` is filled by the semantic collaborator, ordered by descending
/// confidence. The effective domain is always derived through
/// [`ExportRecord::inferred_domain`], so there is no cached copy to keep in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub name: String,
    pub kind: ExportKind,
    /// Domain guessed from the export name, file path and imports.
    pub heuristic_domain: Option<String>,
    #[serde(default)]
    pub domains: Vec<DomainAssignment>,
    /// Imports referenced by this export, when the extractor knows them.
    pub used_imports: Option<Vec<String>>,
}

impl ExportRecord {
    pub fn new(name: impl Into<String>, kind: ExportKind) -> Self {
        Self {
            name: name.into(),
            kind,
            heuristic_domain: None,
            domains: Vec::new(),
            used_imports: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.heuristic_domain = Some(domain.into());
        self
    }

    pub fn with_domains(mut self, domains: Vec<DomainAssignment>) -> Self {
        self.domains = domains;
        self
    }

    pub fn with_used_imports(mut self, imports: Vec<String>) -> Self {
        self.used_imports = Some(imports);
        self
    }

    /// Semantic domain with the highest confidence, else the heuristic guess.
    pub fn inferred_domain(&self) -> Option<&str> {
        self.domains
            .first()
            .map(|d| d.domain.as_str())
            .or(self.heuristic_domain.as_deref())
    }

    pub fn domain_or_unknown(&self) -> &str {
        self.inferred_domain().unwrap_or(UNKNOWN_DOMAIN)
    }
}

/// A single analyzed source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub path: String,
    /// Deduplicated import specifiers in first-seen order.
    pub imports: Vec<String>,
    pub exports: Vec<ExportRecord>,
    pub token_cost: usize,
    pub lines_of_code: usize,
}

impl FileNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            imports: Vec::new(),
            exports: Vec::new(),
            token_cost: 0,
            lines_of_code: 0,
        }
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exports(mut self, exports: Vec<ExportRecord>) -> Self {
        self.exports = exports;
        self
    }

    pub fn with_token_cost(mut self, token_cost: usize) -> Self {
        self.token_cost = token_cost;
        self
    }

    pub fn with_lines_of_code(mut self, lines_of_code: usize) -> Self {
        self.lines_of_code = lines_of_code;
        self
    }

    /// Domain of the first export, which decides cluster membership.
    pub fn primary_domain(&self) -> &str {
        self.exports
            .first()
            .map(ExportRecord::domain_or_unknown)
            .unwrap_or(UNKNOWN_DOMAIN)
    }

    /// Distinct export domains in first-seen order.
    pub fn domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = Vec::new();
        for export in &self.exports {
            let domain = export.domain_or_unknown();
            if !domains.iter().any(|d| d == domain) {
                domains.push(domain.to_string());
            }
        }
        domains
    }
}

/// Raw input file: a root-relative, `/`-separated path and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Suggested consolidation of a fragmented domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedStructure {
    pub target_files: usize,
    pub consolidation_plan: Vec<String>,
}

/// Files sharing a primary domain, with their dispersion metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCluster {
    pub domain: String,
    /// Always holds at least two paths.
    pub files: Vec<String>,
    pub total_tokens: usize,
    pub fragmentation_score: f64,
    pub path_entropy: f64,
    pub directory_distance: f64,
    pub import_cohesion: f64,
    pub avg_cohesion: f64,
    pub suggested_structure: SuggestedStructure,
}

/// How often two files are imported together: `path -> partner -> count`.
pub type CoUsageMatrix = HashMap<String, HashMap<String, usize>>;

/// Semantic domain candidates keyed by `(path, export name)`.
pub type DomainConfidenceTable = HashMap<(String, String), Vec<DomainAssignment>>;
