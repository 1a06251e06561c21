//! Criterion benchmarks for the stochastic generators and one Lloyd step.
//! Sizes: n in {200, 1_000, 4_000} on the unit square and unit disk.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nodegen::api::{
    relax, ClippedVoronoi, Domain, GlassGenerator, GlassParams, NodeGenerator,
    PoissonDiskGenerator, PoissonDiskParams, ReplayToken, VoronoiBuilder,
};

fn domains() -> [(&'static str, Domain); 2] {
    [("square", Domain::unit_square()), ("disk", Domain::unit_disk())]
}

fn bench_poisson(c: &mut Criterion) {
    let mut group = c.benchmark_group("poisson");
    for (label, domain) in domains() {
        for &n in &[200usize, 1_000, 4_000] {
            let g = PoissonDiskGenerator::new(PoissonDiskParams::new(n), domain).unwrap();
            group.bench_with_input(BenchmarkId::new(label, n), &g, |b, g| {
                b.iter(|| g.regenerate(ReplayToken::new(1)).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_glass(c: &mut Criterion) {
    let mut group = c.benchmark_group("glass");
    group.sample_size(10);
    for (label, domain) in domains() {
        for &n in &[200usize, 1_000] {
            let g = GlassGenerator::new(GlassParams::new(n), domain).unwrap();
            group.bench_with_input(BenchmarkId::new(label, n), &g, |b, g| {
                b.iter(|| g.regenerate(ReplayToken::new(2)).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_lloyd(c: &mut Criterion) {
    let mut group = c.benchmark_group("lloyd");
    let vor = ClippedVoronoi::default();
    for (label, domain) in domains() {
        for &n in &[200usize, 1_000, 4_000] {
            let seeds = PoissonDiskGenerator::new(PoissonDiskParams::new(n), domain)
                .unwrap()
                .regenerate(ReplayToken::new(3))
                .unwrap();
            group.bench_with_input(BenchmarkId::new(format!("{label}/cells"), n), &seeds, |b, s| {
                b.iter(|| vor.cells(s.positions(), &domain))
            });
            group.bench_with_input(BenchmarkId::new(format!("{label}/step"), n), &seeds, |b, s| {
                b.iter(|| relax(s.clone(), &domain, 1, &vor).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_poisson, bench_glass, bench_lloyd);
criterion_main!(benches);
