// Performance benchmarks for twin search over synthetic rosters
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use twinscout::prelude::*;
use twinscout_similarity::{FeatureTransformer, SimilarityEngine};

fn generate_roster(size: usize) -> FeatureTable {
    let mut rng = StdRng::seed_from_u64(42);
    let records = (0..size)
        .map(|i| {
            let shots: u32 = rng.random_range(1..120);
            let goals: u32 = rng.random_range(0..=shots.min(30));
            PlayerRecord::new(
                format!("Player {}", i),
                if i % 3 == 0 { "FW" } else { "MF" },
                goals,
                rng.random_range(0..20),
                shots,
                rng.random_range(10.0..70.0),
                goals as f64 / shots as f64,
            )
        })
        .collect();
    FeatureTable::new(records).expect("synthetic roster is valid")
}

fn benchmark_find_twins(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_twins");

    for size in [100, 1000, 10000].iter() {
        let scout = Scout::new(generate_roster(*size).into_snapshot());
        group.bench_with_input(BenchmarkId::new("brute_force", size), size, |b, _| {
            b.iter(|| {
                let report = scout.find_twins(black_box("Player 0"), 1.6, 5).unwrap();
                black_box(report);
            });
        });
    }

    group.finish();
}

fn benchmark_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    for size in [100, 1000, 10000].iter() {
        let table = generate_roster(*size);
        let transformer = FeatureTransformer::new(FeatureWeights::assists(2.0));
        group.bench_with_input(BenchmarkId::new("standardize", size), size, |b, _| {
            b.iter(|| black_box(transformer.transform(&table).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_nearest(c: &mut Criterion) {
    let table = generate_roster(10000);
    let space = FeatureTransformer::default().transform(&table).unwrap();
    let engine = SimilarityEngine::new();

    c.bench_function("nearest_10k_k10", |b| {
        b.iter(|| black_box(engine.nearest(&space, black_box(17), 10).unwrap()));
    });
}

criterion_group!(benches, benchmark_find_twins, benchmark_transform, benchmark_nearest);
criterion_main!(benches);
