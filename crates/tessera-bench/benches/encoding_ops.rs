//! Criterion micro-benchmarks for aggregation and decoding.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tessera_core::{StateEncoding, StateIndex};
use tessera_engine::NeighborAggregator;
use tessera_space::{BoundaryPolicy, GridShape, NeighborOffsets};

/// Deterministic pseudo-random grid of codes.
fn grid(encoding: &StateEncoding, cells: usize) -> Vec<u64> {
    (0..cells as u64)
        .map(|i| {
            let state = (i.wrapping_mul(6364136223846793007) >> 33) % encoding.state_count() as u64;
            encoding.codes()[state as usize]
        })
        .collect()
}

/// Benchmark: aggregate a 100x100 grid over the Moore neighborhood.
fn bench_aggregate_2d_10k(c: &mut Criterion) {
    let shape = GridShape::cube(2, 100).unwrap();
    let encoding = StateEncoding::new(2, 3).unwrap();
    let agg = NeighborAggregator::new(&NeighborOffsets::moore(2).unwrap(), BoundaryPolicy::Zero);
    let cells = grid(&encoding, shape.cell_count());
    let mut out = vec![0; shape.cell_count()];

    c.bench_function("aggregate_2d_10k", |b| {
        b.iter(|| {
            agg.aggregate(black_box(&cells), &shape, &mut out);
            black_box(&out);
        });
    });
}

/// Benchmark: aggregate a 30^3 grid with wrapping boundaries.
fn bench_aggregate_3d_wrap(c: &mut Criterion) {
    let shape = GridShape::cube(3, 30).unwrap();
    let encoding = StateEncoding::new(3, 2).unwrap();
    let agg = NeighborAggregator::new(&NeighborOffsets::moore(3).unwrap(), BoundaryPolicy::Wrap);
    let cells = grid(&encoding, shape.cell_count());
    let mut out = vec![0; shape.cell_count()];

    c.bench_function("aggregate_3d_wrap_27k", |b| {
        b.iter(|| {
            agg.aggregate(black_box(&cells), &shape, &mut out);
            black_box(&out);
        });
    });
}

/// Benchmark: decode 10K aggregates and look up 10K codes.
fn bench_decode_and_lookup_10k(c: &mut Criterion) {
    let encoding = StateEncoding::new(2, 4).unwrap();
    let aggregates: Vec<u64> = (0..10_000u32)
        .map(|i| encoding.compose(&[i % 3, (i / 3) % 3, 1, 8 - 4 - (i % 3).min(4)]))
        .collect();
    let codes = grid(&encoding, 10_000);
    let mut counts = [0u32; 4];

    c.bench_function("decode_and_lookup_10k", |b| {
        b.iter(|| {
            for (&agg, &code) in aggregates.iter().zip(&codes) {
                encoding.decode_into(agg, &mut counts);
                black_box(&counts);
                black_box(encoding.index_of(code).unwrap_or(StateIndex(0)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_aggregate_2d_10k,
    bench_aggregate_3d_wrap,
    bench_decode_and_lookup_10k,
);
criterion_main!(benches);
