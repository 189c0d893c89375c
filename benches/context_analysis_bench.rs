//! Benchmarks for the context analysis pipeline.
//!
//! Synthetic projects are generated in memory: each domain gets a directory
//! per layer, and every file imports its neighbour so traversal has real work.

use contextmap::{
    analyze_context, build_dependency_graph, detect_circular_dependencies, AnalysisInputs,
    ContextConfig, SourceFile,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const DOMAINS: &[&str] = &["order", "invoice", "customer", "product", "cart"];
const LAYERS: &[&str] = &["api", "services", "models", "views"];

fn synthetic_project(file_count: usize) -> Vec<SourceFile> {
    (0..file_count)
        .map(|i| {
            let domain = DOMAINS[i % DOMAINS.len()];
            let layer = LAYERS[(i / DOMAINS.len()) % LAYERS.len()];
            let path = format!("src/{}/{}/{}{}.ts", layer, domain, domain, i);
            let next = (i + 1) % file_count;
            let next_domain = DOMAINS[next % DOMAINS.len()];
            let next_layer = LAYERS[(next / DOMAINS.len()) % LAYERS.len()];
            let content = format!(
                "import {{ load }} from '../../{}/{}/{}{}';\n\
                 import {{ z }} from 'zod';\n\n\
                 export function get{}{}() {{ return load(); }}\n\
                 export const {}Schema{} = z.object({{}});\n",
                next_layer, next_domain, next_domain, next, domain, i, domain, i
            );
            SourceFile::new(path, content)
        })
        .collect()
}

fn benchmark_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("context_analysis");
    group.sample_size(20);

    for size in [50usize, 200, 500] {
        let sources = synthetic_project(size);
        let config = ContextConfig::default();
        group.bench_with_input(BenchmarkId::new("analyze_context", size), &sources, |b, sources| {
            b.iter(|| {
                let report = analyze_context(black_box(sources), &AnalysisInputs::new(), &config);
                black_box(report);
            });
        });
    }

    group.finish();
}

fn benchmark_graph_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_phases");
    let sources = synthetic_project(500);
    let config = ContextConfig::default();

    group.bench_function("build_dependency_graph", |b| {
        b.iter(|| black_box(build_dependency_graph(black_box(&sources), &config.extraction)));
    });

    let graph = build_dependency_graph(&sources, &config.extraction);
    group.bench_function("detect_circular_dependencies", |b| {
        b.iter(|| black_box(detect_circular_dependencies(black_box(&graph))));
    });

    group.finish();
}

criterion_group!(benches, benchmark_full_analysis, benchmark_graph_phases);
criterion_main!(benches);
