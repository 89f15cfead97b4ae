//! Benchmarks for the discrepancy and layout engines.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lsjac_core::{Baseline, Catalog, FrequencyGrid, GridLayout, compute, place};

fn bench_compute_default_grid(c: &mut Criterion) {
    let axis = FrequencyGrid::default().values();
    let base: Vec<f64> = axis.iter().map(|f| 1.0 / (1.0 + (f - 100.0).powi(2))).collect();
    let perturbed: Vec<f64> = base.iter().map(|v| v * (1.0 + 1e-6)).collect();
    let baseline = Baseline::new(axis, base).unwrap();

    c.bench_function("compute_1001_points", |b| {
        b.iter(|| compute(&baseline, black_box(&perturbed), black_box(1e-4)).unwrap());
    });
}

fn bench_place_builtin(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    c.bench_function("place_builtin_catalog", |b| {
        b.iter(|| place(black_box(&catalog), GridLayout::default()).unwrap());
    });
}

criterion_group!(benches, bench_compute_default_grid, bench_place_builtin);
criterion_main!(benches);
