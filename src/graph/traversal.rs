//! Traversals over the dependency graph.
//!
//! Every traversal keeps its own visited/path sets and an explicit stack, so
//! deep import chains cannot overflow the call stack and independent graphs
//! can be analyzed from different threads.

use super::DependencyGraph;
use std::collections::{HashMap, HashSet};

/// DFS frame: a node, the longest chain found below it so far, and the next
/// edge to follow.
struct Frame<'a> {
    node: &'a str,
    below: usize,
    next: usize,
}

/// Longest import chain starting at `file`.
///
/// Every edge followed adds one level, including edges into external
/// specifiers. An edge back to a node already on the current path counts as
/// reaching it but is not expanded, so cycles never inflate the depth.
pub fn import_depth<'a>(graph: &'a DependencyGraph, file: &'a str) -> usize {
    ImportDepths::new(graph).depth(file)
}

/// Import depths over one graph, sharing work between files.
///
/// A node outside every cycle cannot reach any node on the path that led to
/// it, so its depth is the same from every caller and is computed once. Only
/// nodes inside a strongly connected component still need the path-tracking
/// walk.
pub struct ImportDepths<'a> {
    graph: &'a DependencyGraph,
    cyclic: HashSet<&'a str>,
    memo: HashMap<&'a str, usize>,
}

impl<'a> ImportDepths<'a> {
    pub fn new(graph: &'a DependencyGraph) -> Self {
        Self {
            graph,
            cyclic: cyclic_nodes(graph),
            memo: HashMap::new(),
        }
    }

    /// Longest import chain starting at `file`, see [`import_depth`].
    pub fn depth(&mut self, file: &'a str) -> usize {
        if let Some(&depth) = self.memo.get(file) {
            return depth;
        }

        let graph = self.graph;
        let mut result = 0;
        let mut on_path: HashSet<&str> = HashSet::from([file]);
        let mut stack = vec![Frame {
            node: file,
            below: 0,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let deps = graph.dependencies(frame.node);
            if frame.next < deps.len() {
                let dep = deps[frame.next].as_str();
                frame.next += 1;

                if let Some(&below) = self.memo.get(dep) {
                    frame.below = frame.below.max(1 + below);
                } else if on_path.contains(dep) || graph.dependencies(dep).is_empty() {
                    frame.below = frame.below.max(1);
                } else {
                    on_path.insert(dep);
                    stack.push(Frame {
                        node: dep,
                        below: 0,
                        next: 0,
                    });
                }
                continue;
            }

            let (node, below) = (frame.node, frame.below);
            stack.pop();
            on_path.remove(node);
            if !self.cyclic.contains(node) {
                self.memo.insert(node, below);
            }
            match stack.last_mut() {
                Some(parent) => parent.below = parent.below.max(1 + below),
                None => result = below,
            }
        }

        result
    }
}

/// Nodes that sit on a cycle: members of a multi-node strongly connected
/// component, plus self-importing files. Iterative Tarjan.
fn cyclic_nodes(graph: &DependencyGraph) -> HashSet<&str> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut lowlink: HashMap<&str, usize> = HashMap::new();
    let mut on_stack: HashSet<&str> = HashSet::new();
    let mut component_stack: Vec<&str> = Vec::new();
    let mut cyclic = HashSet::new();

    for root in graph.paths() {
        if index.contains_key(root) {
            continue;
        }

        index.insert(root, index.len());
        lowlink.insert(root, index[root]);
        component_stack.push(root);
        on_stack.insert(root);
        let mut work: Vec<(&str, usize)> = vec![(root, 0)];

        while let Some((node, next)) = work.last_mut() {
            let node = *node;
            let deps = graph.dependencies(node);
            if *next < deps.len() {
                let dep = deps[*next].as_str();
                *next += 1;

                if !index.contains_key(dep) {
                    let order = index.len();
                    index.insert(dep, order);
                    lowlink.insert(dep, order);
                    component_stack.push(dep);
                    on_stack.insert(dep);
                    work.push((dep, 0));
                } else if on_stack.contains(dep) {
                    let low = lowlink[node].min(index[dep]);
                    lowlink.insert(node, low);
                }
                continue;
            }

            work.pop();
            if let Some(&(parent, _)) = work.last() {
                let low = lowlink[parent].min(lowlink[node]);
                lowlink.insert(parent, low);
            }

            if lowlink[node] == index[node] {
                let mut component = Vec::new();
                while let Some(member) = component_stack.pop() {
                    on_stack.remove(member);
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                if component.len() > 1 || deps.iter().any(|d| d == node) {
                    cyclic.extend(component);
                }
            }
        }
    }

    cyclic
}

/// Every specifier reachable from `file`, without duplicates.
///
/// `file` itself is included only when a cycle leads back to it.
pub fn transitive_dependencies(graph: &DependencyGraph, file: &str) -> Vec<String> {
    let mut reached: HashSet<&str> = HashSet::new();
    let mut expanded: HashSet<&str> = HashSet::from([file]);
    let mut result = Vec::new();
    let mut stack: Vec<&str> = graph
        .dependencies(file)
        .iter()
        .rev()
        .map(String::as_str)
        .collect();

    while let Some(dep) = stack.pop() {
        if reached.insert(dep) {
            result.push(dep.to_string());
        }
        if expanded.insert(dep) {
            stack.extend(graph.dependencies(dep).iter().rev().map(String::as_str));
        }
    }

    result
}

/// Tokens needed to load `file` together with everything it reaches.
pub fn context_budget(graph: &DependencyGraph, file: &str) -> usize {
    let Some(node) = graph.node(file) else {
        return 0;
    };

    node.token_cost
        + transitive_dependencies(graph, file)
            .iter()
            .map(|dep| graph.token_cost(dep))
            .sum::<usize>()
}

/// Find import cycles with a white/gray/black DFS over every file.
///
/// Each cycle starts at the node the back-edge points to and ends with that
/// same node again, e.g. `[a, b, c, a]`. Rotations of an already reported
/// cycle are dropped.
pub fn detect_circular_dependencies(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_stack: HashSet<&str> = HashSet::new();
    let mut cycles = Vec::new();
    let mut seen_cycles = HashSet::new();

    for start in graph.paths() {
        if visited.contains(start) {
            continue;
        }

        let mut path: Vec<&str> = vec![start];
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
        visited.insert(start);
        on_stack.insert(start);

        while let Some((node, next)) = stack.last_mut() {
            let deps = graph.dependencies(node);
            if *next >= deps.len() {
                on_stack.remove(*node);
                path.pop();
                stack.pop();
                continue;
            }

            let dep = deps[*next].as_str();
            *next += 1;

            if on_stack.contains(dep) {
                if let Some(idx) = path.iter().position(|n| *n == dep) {
                    try_record_cycle(&mut cycles, &mut seen_cycles, &path[idx..], dep);
                }
            } else if visited.insert(dep) {
                on_stack.insert(dep);
                path.push(dep);
                stack.push((dep, 0));
            }
        }
    }

    cycles
}

/// Record `path + closing` unless a rotation of it was already recorded
fn try_record_cycle(
    cycles: &mut Vec<Vec<String>>,
    seen: &mut HashSet<Vec<String>>,
    path: &[&str],
    closing: &str,
) {
    if seen.insert(normalize_cycle(path)) {
        let mut cycle: Vec<String> = path.iter().map(|n| n.to_string()).collect();
        cycle.push(closing.to_string());
        cycles.push(cycle);
    }
}

/// Rotate the open cycle so its smallest node comes first
fn normalize_cycle(path: &[&str]) -> Vec<String> {
    let pivot = path
        .iter()
        .enumerate()
        .min_by_key(|(_, n)| **n)
        .map_or(0, |(idx, _)| idx);
    path[pivot..]
        .iter()
        .chain(path[..pivot].iter())
        .map(|n| n.to_string())
        .collect()
}

/// Cycles that pass through `file`.
pub fn cycles_containing(cycles: &[Vec<String>], file: &str) -> Vec<Vec<String>> {
    cycles
        .iter()
        .filter(|cycle| cycle.iter().any(|n| n == file))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileNode;

    fn graph_of(edges: &[(&str, &[&str])]) -> DependencyGraph {
        DependencyGraph::from_nodes(edges.iter().map(|(path, deps)| {
            FileNode::new(*path)
                .with_imports(deps.iter().copied())
                .with_token_cost(10)
        }))
    }

    #[test]
    fn test_import_depth_chain() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        assert_eq!(import_depth(&graph, "a"), 2);
        assert_eq!(import_depth(&graph, "b"), 1);
        assert_eq!(import_depth(&graph, "c"), 0);
    }

    #[test]
    fn test_import_depth_counts_external_leaves() {
        let graph = graph_of(&[("a", &["b", "react"]), ("b", &["lodash"])]);
        assert_eq!(import_depth(&graph, "a"), 2);
    }

    #[test]
    fn test_import_depth_takes_longest_branch() {
        let graph = graph_of(&[
            ("a", &["b", "c"]),
            ("b", &[]),
            ("c", &["d"]),
            ("d", &["e"]),
            ("e", &[]),
        ]);
        assert_eq!(import_depth(&graph, "a"), 3);
    }

    #[test]
    fn test_import_depth_cycle_does_not_grow() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["a"])]);
        assert_eq!(import_depth(&graph, "a"), 2);

        let self_loop = graph_of(&[("a", &["a"])]);
        assert_eq!(import_depth(&self_loop, "a"), 1);
    }

    #[test]
    fn test_import_depth_unknown_file() {
        assert_eq!(import_depth(&DependencyGraph::new(), "missing"), 0);
    }

    #[test]
    fn test_import_depth_layered_graph_is_linear() {
        // Every node imports the whole next layer: 3^40 distinct paths
        let width = 3;
        let layers = 40;
        let name = |layer: usize, i: usize| format!("l{}_{}", layer, i);
        let graph = DependencyGraph::from_nodes((0..layers).flat_map(|layer| {
            (0..width).map(move |i| {
                let imports: Vec<String> = if layer + 1 < layers {
                    (0..width).map(|j| name(layer + 1, j)).collect()
                } else {
                    Vec::new()
                };
                FileNode::new(name(layer, i)).with_imports(imports)
            })
        }));

        let started = std::time::Instant::now();
        assert_eq!(import_depth(&graph, "l0_0"), layers - 1);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn test_shared_depths_match_fresh_walks() {
        // A cycle b <-> c hanging off a chain, with a tail below the cycle
        let graph = graph_of(&[
            ("a", &["b", "d"]),
            ("b", &["c"]),
            ("c", &["b", "d"]),
            ("d", &["e"]),
            ("e", &["react"]),
            ("f", &["f", "a"]),
        ]);

        let mut depths = ImportDepths::new(&graph);
        for file in ["e", "d", "c", "b", "a", "f"] {
            assert_eq!(depths.depth(file), import_depth(&graph, file), "{}", file);
        }
        assert_eq!(depths.depth("a"), 5);
        assert_eq!(depths.depth("c"), 3);
        assert_eq!(depths.depth("f"), 6);
    }

    #[test]
    fn test_cyclic_nodes() {
        let graph = graph_of(&[
            ("a", &["b"]),
            ("b", &["c"]),
            ("c", &["b", "d"]),
            ("d", &[]),
            ("s", &["s"]),
        ]);
        let mut cyclic: Vec<&str> = cyclic_nodes(&graph).into_iter().collect();
        cyclic.sort();
        assert_eq!(cyclic, vec!["b", "c", "s"]);
    }

    #[test]
    fn test_transitive_dependencies_dedup() {
        let graph = graph_of(&[
            ("a", &["b", "c"]),
            ("b", &["d"]),
            ("c", &["d"]),
            ("d", &[]),
        ]);
        let mut deps = transitive_dependencies(&graph, "a");
        deps.sort();
        assert_eq!(deps, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_transitive_dependencies_cycle_terminates() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let mut deps = transitive_dependencies(&graph, "a");
        deps.sort();
        assert_eq!(deps, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_context_budget() {
        let graph = graph_of(&[("a", &["b", "react"]), ("b", &[])]);
        assert_eq!(context_budget(&graph, "a"), 20);
        assert_eq!(context_budget(&graph, "b"), 10);
        assert_eq!(context_budget(&graph, "missing"), 0);
    }

    #[test]
    fn test_detect_simple_cycle() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let cycles = detect_circular_dependencies(&graph);
        assert_eq!(cycles, vec![vec!["a", "b", "c", "a"]]);
    }

    #[test]
    fn test_detect_self_cycle() {
        let graph = graph_of(&[("a", &["a"])]);
        assert_eq!(detect_circular_dependencies(&graph), vec![vec!["a", "a"]]);
    }

    #[test]
    fn test_detect_no_cycles() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        assert!(detect_circular_dependencies(&graph).is_empty());
    }

    #[test]
    fn test_detect_independent_cycles() {
        let graph = graph_of(&[
            ("a", &["b"]),
            ("b", &["a"]),
            ("c", &["d"]),
            ("d", &["c"]),
        ]);
        let cycles = detect_circular_dependencies(&graph);
        assert_eq!(cycles, vec![vec!["a", "b", "a"], vec!["c", "d", "c"]]);
    }

    #[test]
    fn test_cycle_slice_starts_at_back_edge_target() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &["b"])]);
        assert_eq!(detect_circular_dependencies(&graph), vec![vec!["b", "c", "b"]]);
    }

    #[test]
    fn test_normalize_cycle_rotation() {
        assert_eq!(normalize_cycle(&["c", "a", "b"]), vec!["a", "b", "c"]);
        assert_eq!(normalize_cycle(&["b", "c", "a"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_try_record_cycle_prevents_rotated_duplicates() {
        let mut cycles = Vec::new();
        let mut seen = HashSet::new();
        try_record_cycle(&mut cycles, &mut seen, &["a", "b"], "a");
        try_record_cycle(&mut cycles, &mut seen, &["b", "a"], "b");
        assert_eq!(cycles.len(), 1);
    }

    #[test]
    fn test_cycles_containing() {
        let cycles = vec![
            vec!["a".to_string(), "b".to_string(), "a".to_string()],
            vec!["c".to_string(), "c".to_string()],
        ];
        assert_eq!(cycles_containing(&cycles, "b").len(), 1);
        assert!(cycles_containing(&cycles, "z").is_empty());
    }
}
