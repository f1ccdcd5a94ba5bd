// Benchmarks for the incremental cluster builder
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use neardup_core::{ClusterBuilder, DuplicatePair};
use rand::prelude::*;

/// Random pairs over a key space sized to produce a mix of fresh clusters,
/// single-member joins, and cross-cluster merges.
fn generate_pairs(count: usize, key_space: usize) -> Vec<DuplicatePair> {
    let mut rng = rand::rng();
    let mut pairs = Vec::with_capacity(count);
    while pairs.len() < count {
        let a = rng.random_range(0..key_space);
        let b = rng.random_range(0..key_space);
        if let Some(pair) = DuplicatePair::new(format!("item-{a}"), format!("item-{b}")) {
            pairs.push(pair);
        }
    }
    pairs
}

/// One growing cluster: every pair extends the previous one by one member.
fn generate_chain(count: usize) -> Vec<DuplicatePair> {
    (0..count)
        .filter_map(|i| DuplicatePair::new(format!("item-{i}"), format!("item-{}", i + 1)))
        .collect()
}

fn benchmark_random_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_random");
    for size in [1_000, 10_000, 100_000].iter() {
        let pairs = generate_pairs(*size, size / 4);
        group.bench_with_input(BenchmarkId::new("pairs", size), &pairs, |b, pairs| {
            b.iter(|| {
                let clusters = ClusterBuilder::build(pairs.iter().cloned());
                black_box(clusters)
            })
        });
    }
    group.finish();
}

fn benchmark_chained_merges(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_chain");
    for size in [1_000, 10_000].iter() {
        let pairs = generate_chain(*size);
        group.bench_with_input(BenchmarkId::new("pairs", size), &pairs, |b, pairs| {
            b.iter(|| {
                let clusters = ClusterBuilder::build(pairs.iter().cloned());
                black_box(clusters)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_random_pairs, benchmark_chained_merges);
criterion_main!(benches);
