use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use floating_rock::core::{displace_rock, SphereGeometry};
use floating_rock::math::RngSource;
use floating_rock::scene::{Rock, ROCK_HEIGHT_SEGMENTS, ROCK_RADIUS, ROCK_WIDTH_SEGMENTS};

fn bench_sphere_build(c: &mut Criterion) {
    let geometry = SphereGeometry::new(ROCK_RADIUS, ROCK_WIDTH_SEGMENTS, ROCK_HEIGHT_SEGMENTS);

    c.bench_function("sphere_build_15x10", |b| {
        b.iter(|| black_box(geometry.build()))
    });
}

fn bench_displacement(c: &mut Criterion) {
    let mut group = c.benchmark_group("displace_rock");

    for segments in [(15u32, 10u32), (64, 32), (256, 128)].iter() {
        let base = SphereGeometry::new(ROCK_RADIUS, segments.0, segments.1).build();
        let mut rng = RngSource::seeded(1);

        group.bench_with_input(
            BenchmarkId::new("vertices", base.vertex_count()),
            &base,
            |b, base| {
                b.iter(|| {
                    let mut mesh = base.clone();
                    black_box(displace_rock(&mut mesh, &mut rng));
                })
            },
        );
    }

    group.finish();
}

fn bench_refresh_derived(c: &mut Criterion) {
    let base = SphereGeometry::new(ROCK_RADIUS, 256, 128).build();
    let mut rng = RngSource::seeded(2);

    c.bench_function("refresh_derived_256x128", |b| {
        b.iter(|| {
            let mut mesh = base.clone();
            displace_rock(&mut mesh, &mut rng);
            black_box(mesh.refresh_derived())
        })
    });
}

fn bench_full_rock(c: &mut Criterion) {
    let mut rng = RngSource::thread();

    c.bench_function("rock_generate", |b| {
        b.iter(|| black_box(Rock::generate(&mut rng)))
    });
}

criterion_group!(
    benches,
    bench_sphere_build,
    bench_displacement,
    bench_refresh_derived,
    bench_full_rock
);
criterion_main!(benches);
