//! contextmap: context-cost, cohesion and fragmentation analysis for
//! JavaScript/TypeScript source trees.
//!
//! The engine builds a file-level dependency graph, groups files into domain
//! clusters, and classifies each file so that raw scores are read in light of
//! what kind of file it is (a barrel, a type module, a utility grab bag).

// Export modules for library usage
pub mod analyzer;
pub mod classification;
pub mod config;
pub mod core;
pub mod errors;
pub mod extraction;
pub mod graph;
pub mod io;
pub mod metrics;

// Re-export commonly used types
pub use crate::core::{
    CoUsageMatrix, DomainAssignment, DomainCluster, DomainConfidenceTable, ExportKind,
    ExportRecord, FileNode, SourceFile, SuggestedStructure,
};

pub use crate::analyzer::{
    analyze_context, analyze_graph, detect_issues, AnalysisInputs, ContextIssue, ContextReport,
    ContextSummary, FileContextResult, FileMeasures, IssueKind, Severity,
};

pub use crate::classification::{
    adjust_cohesion_for_classification, adjust_fragmentation_for_classification,
    classification_recommendations, classify_file, FileClassification,
};

pub use crate::config::{load_config, load_config_from, load_config_from_path, ContextConfig};

pub use crate::errors::{Error, Result};

pub use crate::extraction::{ExportExtractor, RawExport, RegexExportExtractor, TokenEstimator};

pub use crate::graph::{
    build_dependency_graph, context_budget, detect_circular_dependencies, import_depth,
    transitive_dependencies, DependencyGraph, GraphBuilder, ImportDepths,
};

pub use crate::io::{collect_sources, SourceWalker};

pub use crate::metrics::{
    calculate_cohesion, calculate_fragmentation, detect_domain_clusters, CohesionOptions,
    FragmentationScale,
};
