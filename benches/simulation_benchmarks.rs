//! Benchmarks for the simulation pipeline (ancestry process, sweep
//! reconstruction, mutation overlay).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ancestree::prelude::*;

fn bench_kingman_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_kingman");
    for &sample_size in &[10usize, 50, 200] {
        group.throughput(Throughput::Elements(sample_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(sample_size),
            &sample_size,
            |b, &n| {
                let params = SimulationParameters::single_locus(n, 1000.0, 42).unwrap();
                b.iter(|| simulate(black_box(&params)).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_recombination_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_recombination");
    for &length in &[1e4, 1e5] {
        group.bench_with_input(
            BenchmarkId::from_parameter(length as u64),
            &length,
            |b, &length| {
                let params =
                    SimulationParameters::new(20, 1000.0, length, 1e-8, 0.0, 42).unwrap();
                b.iter(|| simulate(black_box(&params)).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_tree_sweep(c: &mut Criterion) {
    let params = SimulationParameters::new(20, 1000.0, 1e5, 1e-8, 0.0, 42).unwrap();
    let ts = simulate(&params).unwrap();
    c.bench_function("sweep_all_trees", |b| {
        b.iter(|| {
            let mut leaves = 0usize;
            for tree in ts.trees() {
                let root = tree.root().unwrap();
                leaves += tree.num_leaves(root).unwrap();
            }
            black_box(leaves)
        });
    });
}

fn bench_mutation_overlay(c: &mut Criterion) {
    let params = SimulationParameters::new(20, 1000.0, 1e5, 1e-8, 0.0, 42).unwrap();
    let ts = simulate(&params).unwrap();
    c.bench_function("mutation_overlay", |b| {
        b.iter(|| {
            let mut rng = RandomStream::with_seed(7);
            let mutations = ancestree::trees::generate_mutations(
                ts.node_table(),
                ts.edge_store(),
                black_box(1e-8),
                &mut rng,
            )
            .unwrap();
            black_box(mutations.len())
        });
    });
}

criterion_group!(
    benches,
    bench_kingman_simulation,
    bench_recombination_simulation,
    bench_tree_sweep,
    bench_mutation_overlay
);
criterion_main!(benches);
