use super::resolve::resolve_import;
use super::DependencyGraph;
use crate::config::ExtractionConfig;
use crate::core::{DomainConfidenceTable, ExportRecord, FileNode, SourceFile};
use crate::extraction::{
    count_lines, derive_domain_keywords, extract_exports_with_fallback, extract_imports,
    CharRatioEstimator, DomainVocabulary, ExportExtractor, RawExport, TokenEstimator,
};
use std::collections::HashSet;

/// Builds a [`DependencyGraph`] from source text.
///
/// Collaborators are borrowed and optional: without a structured extractor the
/// regex extractor is used, and without a token estimator costs are
/// `ceil(chars / 4)`.
pub struct GraphBuilder<'a> {
    config: &'a ExtractionConfig,
    extractor: Option<&'a dyn ExportExtractor>,
    estimator: Option<&'a dyn TokenEstimator>,
    domain_table: Option<&'a DomainConfidenceTable>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        Self {
            config,
            extractor: None,
            estimator: None,
            domain_table: None,
        }
    }

    pub fn with_extractor(mut self, extractor: &'a dyn ExportExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_estimator(mut self, estimator: &'a dyn TokenEstimator) -> Self {
        self.estimator = Some(estimator);
        self
    }

    pub fn with_domain_table(mut self, table: &'a DomainConfidenceTable) -> Self {
        self.domain_table = Some(table);
        self
    }

    /// Keyword vocabulary for this file set: configured extras, then directory
    /// names, then the defaults.
    pub fn vocabulary(&self, files: &[SourceFile]) -> DomainVocabulary {
        let mut keywords: Vec<String> = self
            .config
            .extra_domain_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        if self.config.auto_detect_keywords {
            keywords.extend(derive_domain_keywords(files.iter().map(|f| f.path.as_str())));
        }
        DomainVocabulary::new(keywords)
    }

    pub fn build(&self, files: &[SourceFile]) -> DependencyGraph {
        let vocabulary = self.vocabulary(files);
        log::debug!(
            "Building dependency graph for {} files with {} domain keywords",
            files.len(),
            vocabulary.keywords().len()
        );

        let known: HashSet<&str> = files.iter().map(|f| f.path.as_str()).collect();
        let mut graph = DependencyGraph::new();
        for file in files {
            let node = self.build_node(file, &vocabulary);
            let edges = node
                .imports
                .iter()
                .map(|import| {
                    resolve_import(&node.path, import, &known).unwrap_or_else(|| import.clone())
                })
                .collect();
            graph.add_node_with_edges(node, edges);
        }
        graph
    }

    fn build_node(&self, file: &SourceFile, vocabulary: &DomainVocabulary) -> FileNode {
        let imports = extract_imports(&file.content, &self.config.builtin_prefix);
        let exports = extract_exports_with_fallback(self.extractor, &file.path, &file.content)
            .into_iter()
            .map(|raw| self.build_export(raw, &file.path, &imports, vocabulary))
            .collect();
        let token_cost = match self.estimator {
            Some(estimator) => estimator.estimate(&file.content),
            None => CharRatioEstimator::default().estimate(&file.content),
        };

        FileNode::new(file.path.clone())
            .with_imports(imports)
            .with_exports(exports)
            .with_token_cost(token_cost)
            .with_lines_of_code(count_lines(&file.content))
    }

    fn build_export(
        &self,
        raw: RawExport,
        path: &str,
        imports: &[String],
        vocabulary: &DomainVocabulary,
    ) -> ExportRecord {
        let domain = vocabulary.infer_domain(&raw.name, path, imports);
        let semantic = self
            .domain_table
            .and_then(|table| table.get(&(path.to_string(), raw.name.clone())))
            .cloned()
            .unwrap_or_default();

        let mut record = ExportRecord::new(raw.name, raw.kind)
            .with_domain(domain)
            .with_domains(semantic);
        record.used_imports = raw.used_imports;
        record
    }
}

/// Build a graph with default collaborators.
pub fn build_dependency_graph(files: &[SourceFile], config: &ExtractionConfig) -> DependencyGraph {
    GraphBuilder::new(config).build(files)
}
