//! Criterion benchmarks for full simulation steps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tessera_bench::{reference_profile, stress_profile, volume_profile};

/// Benchmark: one Life step on 100x100.
fn bench_step_life_100x100(c: &mut Criterion) {
    let mut sim = reference_profile(42).unwrap();
    c.bench_function("step_life_100x100", |b| {
        b.iter(|| {
            sim.step();
            black_box(sim.tick());
        });
    });
}

/// Benchmark: one prey-predator step on 316x316 with history recording.
fn bench_step_prey_predator_316x316(c: &mut Criterion) {
    let mut sim = stress_profile(42).unwrap();
    c.bench_function("step_prey_predator_316x316", |b| {
        b.iter(|| {
            sim.step();
            black_box(sim.last_metrics().changed_cells);
        });
    });
    sim.clear_history();
}

/// Benchmark: one 3-D Life step on 30^3.
fn bench_step_life_3d_30(c: &mut Criterion) {
    let mut sim = volume_profile(42).unwrap();
    c.bench_function("step_life_3d_30", |b| {
        b.iter(|| {
            sim.step();
            black_box(sim.tick());
        });
    });
}

/// Benchmark: 100 Life steps from the same seed, including construction.
fn bench_run_life_100_steps(c: &mut Criterion) {
    c.bench_function("run_life_100_steps", |b| {
        b.iter(|| {
            let mut sim = reference_profile(7).unwrap();
            sim.run(100);
            black_box(sim.population());
        });
    });
}

criterion_group!(
    benches,
    bench_step_life_100x100,
    bench_step_prey_predator_316x316,
    bench_step_life_3d_30,
    bench_run_life_100_steps,
);
criterion_main!(benches);
