//! Statistical building blocks shared by the cohesion and fragmentation scorers.

use std::collections::HashSet;
use std::hash::Hash;

/// Shannon entropy in bits of a frequency distribution.
///
/// Zero counts are ignored; an empty or all-zero distribution has entropy 0.
pub fn shannon_entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

/// Entropy divided by `log2(item_count)`, clamped to [0, 1].
///
/// Returns 0 when `item_count <= 1`, where no dispersion is possible.
pub fn normalized_entropy(counts: &[usize], item_count: usize) -> f64 {
    if item_count <= 1 {
        return 0.0;
    }
    let max_entropy = (item_count as f64).log2();
    (shannon_entropy(counts) / max_entropy).clamp(0.0, 1.0)
}

/// Jaccard similarity of two sets, or `None` when both are empty.
///
/// Callers decide what two empty sets mean: identical exports, or files that
/// simply share nothing.
pub fn jaccard_similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> Option<f64> {
    if a.is_empty() && b.is_empty() {
        return None;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    Some(intersection as f64 / union as f64)
}

/// Mean of `similarity` over every unordered pair; `None` for fewer than two items.
pub fn mean_pairwise<T, F>(items: &[T], mut similarity: F) -> Option<f64>
where
    F: FnMut(&T, &T) -> f64,
{
    if items.len() < 2 {
        return None;
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            total += similarity(&items[i], &items[j]);
            pairs += 1;
        }
    }
    Some(total / pairs as f64)
}
