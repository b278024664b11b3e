use criterion::{black_box, criterion_group, criterion_main, Criterion};
use field::{BumpSurface, Grid, Normalize, PlotConfig, Smoothing, SurfaceSampling};

fn bench_evaluate(c: &mut Criterion) {
    let config = PlotConfig::default();
    c.bench_function("bump_200x200", |b| {
        b.iter(|| black_box(config.surface().unwrap()))
    });
}

fn bench_profiles(c: &mut Criterion) {
    let grid = Grid::square(-1.0, 1.0, 0.01).unwrap();
    let mut group = c.benchmark_group("bump_profiles");
    for smoothing in Smoothing::ALL {
        group.bench_function(format!("{smoothing:?}"), |b| {
            b.iter(|| black_box(BumpSurface::evaluate_with(grid.clone(), smoothing)))
        });
    }
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let config = PlotConfig::default();
    let s = config.surface().unwrap();
    c.bench_function("sample_50x50_patches", |b| {
        b.iter(|| {
            let sampling =
                SurfaceSampling::new(&s.grid.x, &s.grid.y, &s.masked, config.rcount, config.ccount)
                    .unwrap();
            black_box(Normalize::autoscale(sampling.means()).unwrap())
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_profiles, bench_sampling);
criterion_main!(benches);
