//! File-level dependency graph.
//!
//! Nodes are keyed by file path. Edges hold each file's deduplicated imports,
//! with relative specifiers resolved to graph paths where a matching file
//! exists; targets that are not themselves nodes (packages, unresolved relative
//! paths) stay in the edge lists as opaque leaves.

pub mod builder;
pub mod resolve;
pub mod traversal;

use crate::core::FileNode;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

pub use builder::{build_dependency_graph, GraphBuilder};
pub use resolve::resolve_import;
pub use traversal::{
    context_budget, cycles_containing, detect_circular_dependencies, import_depth,
    transitive_dependencies, ImportDepths,
};

/// Dependency graph for analyzing file relationships
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, FileNode>,
    edges: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from already-constructed nodes
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = FileNode>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    /// Add a file, replacing any earlier node with the same path.
    ///
    /// The node's import list is deduplicated and becomes its edge list.
    pub fn add_node(&mut self, mut node: FileNode) {
        dedup_in_place(&mut node.imports);
        let edges = node.imports.clone();
        self.insert(node, edges);
    }

    /// Add a file whose edges differ from its raw import list, e.g. after
    /// resolving relative specifiers.
    pub fn add_node_with_edges(&mut self, mut node: FileNode, mut edges: Vec<String>) {
        dedup_in_place(&mut node.imports);
        dedup_in_place(&mut edges);
        self.insert(node, edges);
    }

    fn insert(&mut self, node: FileNode, edges: Vec<String>) {
        if self.nodes.contains_key(&node.path) {
            log::warn!("Duplicate file {} in graph input, keeping the last one", node.path);
        }
        self.edges.insert(node.path.clone(), edges);
        self.nodes.insert(node.path.clone(), node);
    }

    pub fn node(&self, path: &str) -> Option<&FileNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    /// Direct dependencies of a file; empty for unknown paths.
    pub fn dependencies(&self, path: &str) -> &[String] {
        self.edges.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Token cost of a file, 0 when it is not part of the graph.
    pub fn token_cost(&self, path: &str) -> usize {
        self.nodes.get(path).map_or(0, |node| node.token_cost)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.nodes.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Get the number of files in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

fn dedup_in_place(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
