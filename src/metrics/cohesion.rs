//! Per-file cohesion: how related are a file's exports?
//!
//! Three independent signals are blended:
//! - **domain**: inverted normalized entropy of the exports' inferred domains
//! - **import**: mean pairwise Jaccard similarity of the imports each export uses
//! - **structural**: inverted normalized entropy of the file's co-usage row
//!
//! The domain signal is always available. The other two only participate when
//! their input exists, and the weights are renormalized over the participants.

use super::entropy::{jaccard_similarity, mean_pairwise, normalized_entropy, shannon_entropy};
use crate::config::CohesionWeights;
use crate::core::{CoUsageMatrix, ExportRecord};
use std::collections::{HashMap, HashSet};

const TEST_PATH_MARKERS: &[&str] = &[
    "test",
    "spec",
    "mock",
    "fixture",
    "__tests__",
    ".test.",
    ".spec.",
];

/// Read-only inputs for cohesion scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct CohesionOptions<'a> {
    pub weights: CohesionWeights,
    pub co_usage: Option<&'a CoUsageMatrix>,
}

impl<'a> CohesionOptions<'a> {
    pub fn new(weights: CohesionWeights) -> Self {
        Self {
            weights,
            co_usage: None,
        }
    }

    pub fn with_co_usage(mut self, co_usage: &'a CoUsageMatrix) -> Self {
        self.co_usage = Some(co_usage);
        self
    }
}

/// Test, spec, mock and fixture files are exempt from cohesion scoring.
pub fn is_test_file(path: &str) -> bool {
    let lower = path.to_lowercase();
    TEST_PATH_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Weighted cohesion score in [0, 1] for the exports of `path`.
pub fn calculate_cohesion(exports: &[ExportRecord], path: &str, options: &CohesionOptions) -> f64 {
    if exports.len() <= 1 || is_test_file(path) {
        return 1.0;
    }

    let weights = &options.weights;
    let mut signals: Vec<(f64, f64)> = Vec::with_capacity(3);

    if has_import_data(exports) {
        signals.push((import_based_cohesion(exports), weights.import_based));
    }
    if let Some(matrix) = options.co_usage {
        signals.push((structural_cohesion(path, matrix), weights.structural));
    }
    let domain_score = domain_cohesion(exports);
    signals.push((domain_score, weights.domain_based));

    let total_weight: f64 = signals.iter().map(|(_, weight)| weight).sum();
    if total_weight <= 0.0 {
        return domain_score;
    }

    signals
        .iter()
        .map(|(score, weight)| score * weight)
        .sum::<f64>()
        / total_weight
}

fn has_import_data(exports: &[ExportRecord]) -> bool {
    exports
        .iter()
        .any(|e| e.used_imports.as_ref().is_some_and(|imports| !imports.is_empty()))
}

/// `1 - H(domains) / log2(export count)`.
pub fn domain_cohesion(exports: &[ExportRecord]) -> f64 {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for export in exports {
        *counts.entry(export.domain_or_unknown()).or_insert(0) += 1;
    }

    let frequencies: Vec<usize> = counts.into_values().collect();
    1.0 - normalized_entropy(&frequencies, exports.len())
}

/// Mean pairwise Jaccard similarity of `used_imports` over the exports that
/// report them. Two empty lists count as identical.
pub fn import_based_cohesion(exports: &[ExportRecord]) -> f64 {
    let import_sets: Vec<HashSet<&str>> = exports
        .iter()
        .filter_map(|e| e.used_imports.as_ref())
        .map(|imports| imports.iter().map(String::as_str).collect())
        .collect();

    mean_pairwise(&import_sets, |a, b| jaccard_similarity(a, b).unwrap_or(1.0)).unwrap_or(1.0)
}

/// Inverted normalized entropy of the co-usage distribution for `path`.
///
/// A file always imported alongside the same partners scores high; one whose
/// co-usage is spread evenly across partners scores 0.
pub fn structural_cohesion(path: &str, matrix: &CoUsageMatrix) -> f64 {
    let Some(row) = matrix.get(path) else {
        return 1.0;
    };

    let counts: Vec<usize> = row.values().copied().filter(|&c| c > 0).collect();
    if counts.len() <= 1 {
        return 1.0;
    }

    let max_entropy = (counts.len() as f64).log2();
    (1.0 - shannon_entropy(&counts) / max_entropy).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExportKind;

    fn export(name: &str, domain: &str) -> ExportRecord {
        ExportRecord::new(name, ExportKind::Function).with_domain(domain)
    }

    fn export_with_imports(name: &str, domain: &str, imports: &[&str]) -> ExportRecord {
        export(name, domain).with_used_imports(imports.iter().map(|s| s.to_string()).collect())
    }

    fn co_usage_row(path: &str, partners: &[(&str, usize)]) -> CoUsageMatrix {
        let row = partners
            .iter()
            .map(|(p, c)| (p.to_string(), *c))
            .collect::<HashMap<_, _>>();
        HashMap::from([(path.to_string(), row)])
    }

    #[test]
    fn test_zero_and_single_export_are_cohesive() {
        let options = CohesionOptions::default();
        assert_eq!(calculate_cohesion(&[], "src/a.ts", &options), 1.0);
        assert_eq!(
            calculate_cohesion(&[export("getUser", "user")], "src/a.ts", &options),
            1.0
        );
    }

    #[test]
    fn test_test_files_are_cohesive() {
        let exports = vec![
            export("a", "user"),
            export("b", "order"),
            export("c", "payment"),
        ];
        let options = CohesionOptions::default();
        assert_eq!(calculate_cohesion(&exports, "src/user.test.ts", &options), 1.0);
        assert_eq!(calculate_cohesion(&exports, "src/__tests__/x.ts", &options), 1.0);
        assert_eq!(calculate_cohesion(&exports, "src/Mocks/x.ts", &options), 1.0);
    }

    #[test]
    fn test_domain_cohesion_single_domain() {
        let exports = vec![export("a", "user"), export("b", "user")];
        assert_eq!(domain_cohesion(&exports), 1.0);
    }

    #[test]
    fn test_domain_cohesion_normalized_by_export_count() {
        let exports = vec![
            export("a", "user"),
            export("b", "user"),
            export("c", "order"),
            export("d", "order"),
        ];
        // entropy 1 bit over log2(4) = 2 bits
        assert!((domain_cohesion(&exports) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_domain_only_score_when_no_other_signals() {
        let exports = vec![export("a", "user"), export("b", "order")];
        let score = calculate_cohesion(&exports, "src/a.ts", &CohesionOptions::default());
        assert!(score.abs() < 1e-12);
    }

    #[test]
    fn test_import_based_cohesion_conventions() {
        let both_empty = vec![
            export_with_imports("a", "x", &[]),
            export_with_imports("b", "x", &[]),
        ];
        assert_eq!(import_based_cohesion(&both_empty), 1.0);

        let one_empty = vec![
            export_with_imports("a", "x", &["react"]),
            export_with_imports("b", "x", &[]),
        ];
        assert_eq!(import_based_cohesion(&one_empty), 0.0);

        let single = vec![export_with_imports("a", "x", &["react"]), export("b", "x")];
        assert_eq!(import_based_cohesion(&single), 1.0);
    }

    #[test]
    fn test_weighted_blend_with_import_signal() {
        let exports = vec![
            export_with_imports("a", "user", &["db"]),
            export_with_imports("b", "order", &["db"]),
        ];
        // import signal 1.0 (w 0.5), domain signal 0.0 (w 0.2)
        let score = calculate_cohesion(&exports, "src/a.ts", &CohesionOptions::default());
        assert!((score - 0.5 / 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_structural_cohesion_balanced_row() {
        let matrix = co_usage_row("src/a.ts", &[("src/b.ts", 5), ("src/c.ts", 5)]);
        assert!(structural_cohesion("src/a.ts", &matrix).abs() < 1e-9);
    }

    #[test]
    fn test_structural_cohesion_skewed_row() {
        let matrix = co_usage_row("src/a.ts", &[("src/b.ts", 8), ("src/c.ts", 2)]);
        let score = structural_cohesion("src/a.ts", &matrix);
        assert!((score - 0.279).abs() < 0.01);
    }

    #[test]
    fn test_structural_cohesion_absent_or_single_partner() {
        let matrix = co_usage_row("src/a.ts", &[("src/b.ts", 3)]);
        assert_eq!(structural_cohesion("src/a.ts", &matrix), 1.0);
        assert_eq!(structural_cohesion("src/z.ts", &matrix), 1.0);
    }

    #[test]
    fn test_structural_signal_participates_when_matrix_supplied() {
        let exports = vec![export("a", "user"), export("b", "order")];
        let matrix = co_usage_row("src/z.ts", &[("src/b.ts", 1)]);
        let options = CohesionOptions::default().with_co_usage(&matrix);
        // structural 1.0 (w 0.3) + domain 0.0 (w 0.2)
        let score = calculate_cohesion(&exports, "src/a.ts", &options);
        assert!((score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_is_test_file() {
        assert!(is_test_file("src/user.spec.ts"));
        assert!(is_test_file("fixtures/data.ts"));
        assert!(!is_test_file("src/billing/invoice.ts"));
    }
}
