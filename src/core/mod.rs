//! Data model shared by every analysis stage.

pub mod paths;
pub mod types;

pub use types::{
    CoUsageMatrix, DomainAssignment, DomainCluster, DomainConfidenceTable, ExportKind,
    ExportRecord, FileNode, SourceFile, SuggestedStructure, UNKNOWN_DOMAIN,
};
