//! Statistic evaluation benchmarks.
//!
//! Graphs are built once during setup so the timings isolate the analyzer:
//! the chromatic number estimate (DSATUR plus the budgeted exact search), the
//! clique cover and the exact independent set, which is exponential and so
//! only runs on small graphs.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use grafstat_benches::{
    error::BenchSetupError,
    params::GraphBenchParams,
    source::{SyntheticConfig, SyntheticSource},
};
use grafstat_core::{Graph, GraphAnalyzer, GraphConstruction, IndependenceMode, SampleSource};

const SEED: u64 = 7;

const COLOURING_POINT_COUNTS: &[usize] = &[100, 500, 2_000];

const EXACT_POINT_COUNTS: &[usize] = &[20, 30, 40];

fn build(point_count: usize, construction: GraphConstruction) -> Result<Graph, BenchSetupError> {
    let sample = SyntheticSource::new(&SyntheticConfig {
        point_count,
        dimensions: 2,
        seed: SEED,
    })?
    .next_sample()?;
    Ok(construction.build(&sample)?)
}

fn colouring_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("chromatic_number");
    group.sample_size(20);
    let construction = GraphConstruction::DistanceThreshold { d: 0.1 };

    for &point_count in COLOURING_POINT_COUNTS {
        let graph = build(point_count, construction)?;
        let params = GraphBenchParams {
            point_count,
            construction: construction.to_string(),
        };
        group.bench_with_input(
            BenchmarkId::new("colouring", &params),
            &graph,
            |b, graph| {
                b.iter(|| GraphAnalyzer::new(graph).chromatic_number());
            },
        );
        group.bench_with_input(
            BenchmarkId::new("clique_cover", &params),
            &graph,
            |b, graph| {
                b.iter(|| GraphAnalyzer::new(graph).min_clique_cover());
            },
        );
    }

    group.finish();
    Ok(())
}

fn exact_independent_set_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("max_independent_set");
    group.sample_size(10);
    let construction = GraphConstruction::Knn { k: 3 };

    for &point_count in EXACT_POINT_COUNTS {
        let graph = build(point_count, construction)?;
        let params = GraphBenchParams {
            point_count,
            construction: construction.to_string(),
        };
        let exact = IndependenceMode::Exact {
            warn_threshold: usize::MAX,
        };
        group.bench_with_input(BenchmarkId::new("exact", &params), &graph, |b, graph| {
            b.iter(|| GraphAnalyzer::new(graph).max_independent_set(exact));
        });
        group.bench_with_input(
            BenchmarkId::new("approximate", &params),
            &graph,
            |b, graph| {
                b.iter(|| GraphAnalyzer::new(graph).max_independent_set(IndependenceMode::Approximate));
            },
        );
    }

    group.finish();
    Ok(())
}

fn chromatic_number(c: &mut Criterion) {
    if let Err(err) = colouring_impl(c) {
        panic!("chromatic_number benchmark setup failed: {err}");
    }
}

fn max_independent_set(c: &mut Criterion) {
    if let Err(err) = exact_independent_set_impl(c) {
        panic!("max_independent_set benchmark setup failed: {err}");
    }
}

criterion_group!(benches, chromatic_number, max_independent_set);
criterion_main!(benches);
