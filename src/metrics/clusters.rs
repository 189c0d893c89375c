//! Domain clustering: files grouped by the domain of their first export.

use super::cohesion::{calculate_cohesion, CohesionOptions};
use super::fragmentation::{
    apply_coupling_discount, calculate_directory_distance, calculate_fragmentation,
    calculate_import_coupling, calculate_path_entropy, generate_consolidation_plan,
    FragmentationScale,
};
use crate::config::FragmentationConfig;
use crate::core::{DomainCluster, FileNode};
use crate::graph::DependencyGraph;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Cohesion of every file in the graph, keyed by path.
pub fn file_cohesion_scores<'a>(
    graph: &'a DependencyGraph,
    options: &CohesionOptions,
) -> HashMap<&'a str, f64> {
    graph
        .nodes()
        .map(|node| {
            let path = node.path.as_str();
            (path, calculate_cohesion(&node.exports, path, options))
        })
        .collect()
}

/// Group files by primary domain and score every group of two or more.
///
/// `cohesion_scores` holds each file's cohesion, see [`file_cohesion_scores`];
/// files missing from it count as 0. Clusters come back most fragmented
/// first, ties broken by domain name.
pub fn detect_domain_clusters(
    graph: &DependencyGraph,
    fragmentation: &FragmentationConfig,
    cohesion_scores: &HashMap<&str, f64>,
) -> Vec<DomainCluster> {
    let mut by_domain: BTreeMap<&str, Vec<&FileNode>> = BTreeMap::new();
    for node in graph.nodes() {
        by_domain.entry(node.primary_domain()).or_default().push(node);
    }

    let scale = FragmentationScale::from_config(fragmentation);
    let mut clusters: Vec<DomainCluster> = by_domain
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(domain, members)| {
            build_cluster(
                domain,
                &members,
                scale,
                fragmentation.coupling_discount,
                cohesion_scores,
            )
        })
        .collect();

    clusters.sort_by(|a, b| {
        b.fragmentation_score
            .partial_cmp(&a.fragmentation_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.domain.cmp(&b.domain))
    });

    log::debug!(
        "Detected {} domain clusters from {} files",
        clusters.len(),
        graph.len()
    );
    clusters
}

fn build_cluster(
    domain: &str,
    members: &[&FileNode],
    scale: FragmentationScale,
    coupling_discount: f64,
    cohesion_scores: &HashMap<&str, f64>,
) -> DomainCluster {
    let files: Vec<&str> = members.iter().map(|n| n.path.as_str()).collect();
    let import_lists: Vec<Vec<&str>> = members
        .iter()
        .map(|n| n.imports.iter().map(String::as_str).collect())
        .collect();

    let base = calculate_fragmentation(&files, scale);
    let import_cohesion = calculate_import_coupling(&import_lists);
    let avg_cohesion = members
        .iter()
        .map(|n| cohesion_scores.get(n.path.as_str()).copied().unwrap_or(0.0))
        .sum::<f64>()
        / members.len() as f64;

    DomainCluster {
        domain: domain.to_string(),
        files: files.iter().map(|f| f.to_string()).collect(),
        total_tokens: members.iter().map(|n| n.token_cost).sum(),
        fragmentation_score: apply_coupling_discount(base, import_cohesion, coupling_discount),
        path_entropy: calculate_path_entropy(&files),
        directory_distance: calculate_directory_distance(&files),
        import_cohesion,
        avg_cohesion,
        suggested_structure: generate_consolidation_plan(domain, files.len()),
    }
}
