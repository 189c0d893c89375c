//! Context analysis orchestration.
//!
//! Builds the dependency graph, clusters files by domain, then scores,
//! classifies and adjusts every file. The phases are pure; the only side
//! effects are tracing spans and debug events.

use crate::classification::{
    adjust_cohesion_for_classification, adjust_fragmentation_for_classification,
    classification_recommendations, classify_file, FileClassification,
};
use crate::config::{ContextConfig, ContextThresholds};
use crate::core::{CoUsageMatrix, DomainCluster, DomainConfidenceTable, FileNode, SourceFile};
use crate::extraction::{ExportExtractor, TokenEstimator};
use crate::graph::{
    context_budget, cycles_containing, detect_circular_dependencies, transitive_dependencies,
    DependencyGraph, GraphBuilder, ImportDepths,
};
use crate::metrics::{detect_domain_clusters, file_cohesion_scores, CohesionOptions};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use tracing::{debug, info, info_span};

/// Optional, read-only collaborators for an analysis run.
#[derive(Clone, Copy, Default)]
pub struct AnalysisInputs<'a> {
    /// Structured export extractor; the regex extractor is used when absent
    /// or when it fails for a file.
    pub extractor: Option<&'a dyn ExportExtractor>,
    pub estimator: Option<&'a dyn TokenEstimator>,
    pub co_usage: Option<&'a CoUsageMatrix>,
    pub domain_table: Option<&'a DomainConfidenceTable>,
}

impl<'a> AnalysisInputs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extractor(mut self, extractor: &'a dyn ExportExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_estimator(mut self, estimator: &'a dyn TokenEstimator) -> Self {
        self.estimator = Some(estimator);
        self
    }

    pub fn with_co_usage(mut self, co_usage: &'a CoUsageMatrix) -> Self {
        self.co_usage = Some(co_usage);
        self
    }

    pub fn with_domain_table(mut self, table: &'a DomainConfidenceTable) -> Self {
        self.domain_table = Some(table);
        self
    }

    fn graph_builder<'c>(&self, config: &'c ContextConfig) -> GraphBuilder<'c>
    where
        'a: 'c,
    {
        let mut builder = GraphBuilder::new(&config.extraction);
        if let Some(extractor) = self.extractor {
            builder = builder.with_extractor(extractor);
        }
        if let Some(estimator) = self.estimator {
            builder = builder.with_estimator(estimator);
        }
        if let Some(table) = self.domain_table {
            builder = builder.with_domain_table(table);
        }
        builder
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    CircularDependency,
    ContextBudget,
    ImportDepth,
    LowCohesion,
    Fragmentation,
}

impl IssueKind {
    pub fn recommendation(&self) -> &'static str {
        match self {
            IssueKind::CircularDependency => {
                "Break circular dependencies by extracting shared code into a separate module"
            }
            IssueKind::ContextBudget => {
                "Reduce context budget by splitting the file or trimming its transitive dependencies"
            }
            IssueKind::ImportDepth => "Flatten the import chain by removing intermediate re-exports",
            IssueKind::LowCohesion => {
                "Group related exports together and move unrelated ones to their own modules"
            }
            IssueKind::Fragmentation => {
                "Consolidate files of this domain into fewer directories"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

impl ContextIssue {
    fn new(kind: IssueKind, severity: Severity, message: String) -> Self {
        Self {
            kind,
            severity,
            message,
        }
    }
}

/// The measurements issue detection looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileMeasures {
    pub cycle_count: usize,
    pub context_budget: usize,
    pub import_depth: usize,
    pub cohesion: f64,
    pub fragmentation: f64,
}

/// Threshold checks over adjusted scores, in a fixed order.
pub fn detect_issues(measures: &FileMeasures, thresholds: &ContextThresholds) -> Vec<ContextIssue> {
    let mut issues = Vec::new();

    if measures.cycle_count > 0 {
        issues.push(ContextIssue::new(
            IssueKind::CircularDependency,
            Severity::Critical,
            format!(
                "Part of {} circular dependency chain(s)",
                measures.cycle_count
            ),
        ));
    }

    let max_budget = thresholds.max_context_budget;
    if measures.context_budget > max_budget {
        let severity = if measures.context_budget > max_budget.saturating_mul(2) {
            Severity::Critical
        } else {
            Severity::Major
        };
        issues.push(ContextIssue::new(
            IssueKind::ContextBudget,
            severity,
            format!(
                "Context budget of {} tokens exceeds the limit of {}",
                measures.context_budget, max_budget
            ),
        ));
    }

    let max_depth = thresholds.max_depth;
    if measures.import_depth > max_depth {
        let severity = if measures.import_depth as f64 > max_depth as f64 * 1.5 {
            Severity::Critical
        } else {
            Severity::Major
        };
        issues.push(ContextIssue::new(
            IssueKind::ImportDepth,
            severity,
            format!(
                "Import depth {} exceeds the maximum of {}",
                measures.import_depth, max_depth
            ),
        ));
    }

    let min_cohesion = thresholds.min_cohesion;
    if measures.cohesion < min_cohesion {
        let severity = if measures.cohesion < min_cohesion / 2.0 {
            Severity::Critical
        } else {
            Severity::Major
        };
        issues.push(ContextIssue::new(
            IssueKind::LowCohesion,
            severity,
            format!(
                "Cohesion {:.2} is below the minimum of {:.2}",
                measures.cohesion, min_cohesion
            ),
        ));
    }

    let max_fragmentation = thresholds.max_fragmentation;
    if measures.fragmentation > max_fragmentation {
        let severity = if measures.fragmentation > max_fragmentation + 0.3 {
            Severity::Major
        } else {
            Severity::Minor
        };
        issues.push(ContextIssue::new(
            IssueKind::Fragmentation,
            severity,
            format!(
                "Fragmentation {:.2} exceeds the maximum of {:.2}",
                measures.fragmentation, max_fragmentation
            ),
        ));
    }

    issues
}

/// Everything computed for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContextResult {
    pub file: String,
    pub token_cost: usize,
    pub lines_of_code: usize,
    pub import_depth: usize,
    pub dependency_count: usize,
    pub dependency_list: Vec<String>,
    pub circular_deps: Vec<Vec<String>>,
    pub cohesion_score: f64,
    pub domains: Vec<String>,
    pub export_count: usize,
    pub context_budget: usize,
    pub fragmentation_score: f64,
    pub related_files: Vec<String>,
    pub classification: FileClassification,
    pub adjusted_cohesion: f64,
    pub adjusted_fragmentation: f64,
    pub severity: Severity,
    pub issues: Vec<ContextIssue>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub total_files: usize,
    pub total_tokens: usize,
    pub avg_import_depth: f64,
    pub avg_context_budget: f64,
    pub avg_cohesion: f64,
    pub avg_fragmentation: f64,
    pub severity_counts: BTreeMap<Severity, usize>,
    pub classification_counts: BTreeMap<FileClassification, usize>,
    pub circular_dependency_count: usize,
    /// Most fragmented first.
    pub clusters: Vec<DomainCluster>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextReport {
    pub graph: DependencyGraph,
    pub circular_dependencies: Vec<Vec<String>>,
    /// Sorted by severity, then context budget, then path.
    pub results: Vec<FileContextResult>,
    pub summary: ContextSummary,
}

impl ContextReport {
    pub fn result_for(&self, file: &str) -> Option<&FileContextResult> {
        self.results.iter().find(|r| r.file == file)
    }

    pub fn clusters(&self) -> &[DomainCluster] {
        &self.summary.clusters
    }
}

/// Run the full analysis over already-collected sources.
pub fn analyze_context(
    sources: &[SourceFile],
    inputs: &AnalysisInputs,
    config: &ContextConfig,
) -> ContextReport {
    let span = info_span!("context_analysis", file_count = sources.len());
    let _guard = span.enter();

    info!(file_count = sources.len(), "Starting context analysis");

    let graph = {
        let _span = info_span!("graph_building").entered();
        let graph = inputs.graph_builder(config).build(sources);
        debug!(
            files = graph.len(),
            edges = graph.edge_count(),
            "Dependency graph built"
        );
        graph
    };

    analyze_graph(graph, inputs, config)
}

/// Run clustering and scoring over a prebuilt graph.
pub fn analyze_graph(
    graph: DependencyGraph,
    inputs: &AnalysisInputs,
    config: &ContextConfig,
) -> ContextReport {
    let cohesion_options = CohesionOptions {
        weights: config.cohesion,
        co_usage: inputs.co_usage,
    };

    let cohesion_scores = file_cohesion_scores(&graph, &cohesion_options);

    let (cycles, clusters) = {
        let _span = info_span!("clustering").entered();
        let cycles = detect_circular_dependencies(&graph);
        let clusters = detect_domain_clusters(&graph, &config.fragmentation, &cohesion_scores);
        debug!(
            cycles = cycles.len(),
            clusters = clusters.len(),
            "Domain clustering complete"
        );
        (cycles, clusters)
    };

    let mut results: Vec<FileContextResult> = {
        let _span = info_span!("file_scoring").entered();
        let cluster_of = index_clusters(&clusters);
        let mut depths = ImportDepths::new(&graph);
        let results: Vec<FileContextResult> = graph
            .nodes()
            .map(|node| {
                let path = node.path.as_str();
                let measured = Measured {
                    import_depth: depths.depth(path),
                    cohesion_score: cohesion_scores.get(path).copied().unwrap_or(0.0),
                };
                score_file(
                    &graph,
                    node,
                    measured,
                    cluster_of.get(path).copied(),
                    &cycles,
                    &config.thresholds,
                )
            })
            .collect();
        debug!(files = results.len(), "File scoring complete");
        results
    };

    sort_results(&mut results);
    let summary = summarize(&results, &graph, cycles.len(), clusters);

    ContextReport {
        graph,
        circular_dependencies: cycles,
        results,
        summary,
    }
}

fn index_clusters(clusters: &[DomainCluster]) -> HashMap<&str, &DomainCluster> {
    clusters
        .iter()
        .flat_map(|cluster| cluster.files.iter().map(move |f| (f.as_str(), cluster)))
        .collect()
}

/// Per-file measures computed once per graph and shared with clustering.
#[derive(Debug, Clone, Copy)]
struct Measured {
    import_depth: usize,
    cohesion_score: f64,
}

fn score_file(
    graph: &DependencyGraph,
    node: &FileNode,
    measured: Measured,
    cluster: Option<&DomainCluster>,
    cycles: &[Vec<String>],
    thresholds: &ContextThresholds,
) -> FileContextResult {
    let path = node.path.as_str();
    let Measured {
        import_depth,
        cohesion_score,
    } = measured;
    let dependency_list = transitive_dependencies(graph, path);
    let context_budget = context_budget(graph, path);
    let circular_deps = cycles_containing(cycles, path);

    let domains = node.domains();
    let fragmentation_score = cluster.map_or(0.0, |c| c.fragmentation_score);
    let related_files = cluster
        .map(|c| c.files.iter().filter(|f| f.as_str() != path).cloned().collect())
        .unwrap_or_default();

    let classification = classify_file(node, cohesion_score, &domains);
    let adjusted_cohesion =
        adjust_cohesion_for_classification(cohesion_score, classification, node);
    let adjusted_fragmentation =
        adjust_fragmentation_for_classification(fragmentation_score, classification);

    let issues = detect_issues(
        &FileMeasures {
            cycle_count: circular_deps.len(),
            context_budget,
            import_depth,
            cohesion: adjusted_cohesion,
            fragmentation: adjusted_fragmentation,
        },
        thresholds,
    );
    let severity = issues
        .iter()
        .map(|issue| issue.severity)
        .max()
        .unwrap_or(Severity::Info);
    let recommendations = build_recommendations(classification, &issues);

    FileContextResult {
        file: node.path.clone(),
        token_cost: node.token_cost,
        lines_of_code: node.lines_of_code,
        import_depth,
        dependency_count: dependency_list.len(),
        dependency_list,
        circular_deps,
        cohesion_score,
        domains,
        export_count: node.exports.len(),
        context_budget,
        fragmentation_score,
        related_files,
        classification,
        adjusted_cohesion,
        adjusted_fragmentation,
        severity,
        issues,
        recommendations,
    }
}

/// Classification guidance first, then one line per issue kind, deduplicated.
fn build_recommendations(
    classification: FileClassification,
    issues: &[ContextIssue],
) -> Vec<String> {
    let mut seen = HashSet::new();
    classification_recommendations(classification)
        .into_iter()
        .chain(issues.iter().map(|i| i.kind.recommendation().to_string()))
        .filter(|rec| seen.insert(rec.clone()))
        .collect()
}

fn sort_results(results: &mut [FileContextResult]) {
    results.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.context_budget.cmp(&a.context_budget))
            .then_with(|| a.file.cmp(&b.file))
    });
}

fn average<I: Iterator<Item = f64>>(values: I, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

fn summarize(
    results: &[FileContextResult],
    graph: &DependencyGraph,
    cycle_count: usize,
    clusters: Vec<DomainCluster>,
) -> ContextSummary {
    let n = results.len();
    let mut severity_counts = BTreeMap::new();
    let mut classification_counts = BTreeMap::new();
    for result in results {
        *severity_counts.entry(result.severity).or_insert(0) += 1;
        *classification_counts.entry(result.classification).or_insert(0) += 1;
    }

    ContextSummary {
        total_files: n,
        total_tokens: graph.nodes().map(|node| node.token_cost).sum(),
        avg_import_depth: average(results.iter().map(|r| r.import_depth as f64), n),
        avg_context_budget: average(results.iter().map(|r| r.context_budget as f64), n),
        avg_cohesion: average(results.iter().map(|r| r.adjusted_cohesion), n),
        avg_fragmentation: average(results.iter().map(|r| r.adjusted_fragmentation), n),
        severity_counts,
        classification_counts,
        circular_dependency_count: cycle_count,
        clusters,
    }
}
