//! Fragmentation: how scattered a domain's files are across directories.
//!
//! All functions take the cluster's file paths (and, for coupling, their raw
//! import lists). Directory grouping is purely textual, see [`crate::core::paths`].

use super::entropy::{jaccard_similarity, mean_pairwise, normalized_entropy};
use crate::config::FragmentationConfig;
use crate::core::paths::{directory_of, segments, shared_prefix_len};
use crate::core::SuggestedStructure;
use std::collections::{BTreeMap, HashSet};

/// How the directory spread is turned into a base score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FragmentationScale {
    /// `(dirs - 1) / (files - 1)`
    #[default]
    Linear,
    /// `log(dirs) / log(files)` in the given base.
    Logarithmic { base: f64 },
}

impl FragmentationScale {
    pub fn from_config(config: &FragmentationConfig) -> Self {
        if config.use_log_scale {
            FragmentationScale::Logarithmic {
                base: config.log_base,
            }
        } else {
            FragmentationScale::Linear
        }
    }
}

fn unique_directories<S: AsRef<str>>(files: &[S]) -> usize {
    files
        .iter()
        .map(|f| directory_of(f.as_ref()))
        .collect::<HashSet<_>>()
        .len()
}

/// Base fragmentation score in [0, 1]; 0 for fewer than two files.
pub fn calculate_fragmentation<S: AsRef<str>>(files: &[S], scale: FragmentationScale) -> f64 {
    if files.len() <= 1 {
        return 0.0;
    }

    let dirs = unique_directories(files);
    let score = match scale {
        FragmentationScale::Linear => (dirs as f64 - 1.0) / (files.len() as f64 - 1.0),
        FragmentationScale::Logarithmic { base } => {
            if dirs <= 1 {
                return 0.0;
            }
            let denominator = (files.len() as f64).log(base);
            if denominator == 0.0 || !denominator.is_finite() {
                return 0.0;
            }
            (dirs as f64).log(base) / denominator
        }
    };

    score.clamp(0.0, 1.0)
}

/// Normalized Shannon entropy of the per-directory file counts.
pub fn calculate_path_entropy<S: AsRef<str>>(files: &[S]) -> f64 {
    let mut per_directory: BTreeMap<&str, usize> = BTreeMap::new();
    for file in files {
        *per_directory.entry(directory_of(file.as_ref())).or_insert(0) += 1;
    }

    if per_directory.len() <= 1 {
        return 0.0;
    }

    let counts: Vec<usize> = per_directory.values().copied().collect();
    normalized_entropy(&counts, counts.len())
}

/// Mean pairwise `1 - shared / max(depthA, depthB)` over full path segments.
pub fn calculate_directory_distance<S: AsRef<str>>(files: &[S]) -> f64 {
    let split: Vec<Vec<&str>> = files.iter().map(|f| segments(f.as_ref())).collect();

    mean_pairwise(&split, |a, b| {
        let max_depth = a.len().max(b.len());
        if max_depth == 0 {
            return 0.0;
        }
        1.0 - shared_prefix_len(a, b) as f64 / max_depth as f64
    })
    .unwrap_or(0.0)
}

/// Mean pairwise Jaccard similarity of the files' import lists.
///
/// Two files that import nothing share nothing, so that pair scores 0.
pub fn calculate_import_coupling<S: AsRef<str>>(import_lists: &[Vec<S>]) -> f64 {
    let sets: Vec<HashSet<&str>> = import_lists
        .iter()
        .map(|imports| imports.iter().map(|s| s.as_ref()).collect())
        .collect();

    mean_pairwise(&sets, |a, b| jaccard_similarity(a, b).unwrap_or(0.0)).unwrap_or(0.0)
}

/// `base * (1 - discount * coupling)`: tightly coupled files are penalized less
/// for living apart.
pub fn apply_coupling_discount(base: f64, import_coupling: f64, discount: f64) -> f64 {
    base * (1.0 - discount * import_coupling.clamp(0.0, 1.0))
}

/// A third of the files, rounded up, never fewer than one.
pub fn target_file_count(file_count: usize) -> usize {
    file_count.div_ceil(3).max(1)
}

pub fn generate_consolidation_plan(domain: &str, file_count: usize) -> SuggestedStructure {
    let target_files = target_file_count(file_count);

    let consolidation_plan = if file_count > target_files {
        vec![
            format!(
                "Consolidate {} {} files into {} cohesive file(s)",
                file_count, domain, target_files
            ),
            format!("1. Create unified {} module file", domain),
            format!(
                "2. Move related functionality from {} scattered files",
                file_count
            ),
            "3. Update imports in dependent files".to_string(),
            "4. Remove old files after consolidation (verify with tests)".to_string(),
        ]
    } else {
        vec![format!("No consolidation needed for {}", domain)]
    };

    SuggestedStructure {
        target_files,
        consolidation_plan,
    }
}
