//! Benchmarks for GRTS addressing.
//!
//! Run with: cargo bench --package grts --bench addressing_benchmarks

use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grts::{FrameName, FrameRegistry, FrameSpec, GeometryKind, TargetProjection};
use projection::{parse_projection, Projection};
use rand::{Rng, SeedableRng};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/grts_lookup")
}

/// Random WGS84 points scattered over a frame's grid rectangle.
fn random_points(spec: &FrameSpec, count: usize) -> Vec<(f64, f64)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    (0..count)
        .filter_map(|_| {
            let x = rng.gen_range(spec.bounds.min_x..spec.bounds.max_x);
            let y = rng.gen_range(spec.bounds.min_y..spec.bounds.max_y);
            spec.projection.inverse(x, y).ok()
        })
        .collect()
}

// =============================================================================
// PROJECTION BENCHMARKS
// =============================================================================

fn bench_albers(c: &mut Criterion) {
    let mut group = c.benchmark_group("albers");
    let spec = FrameSpec::get(FrameName::Conus);

    group.bench_function("forward", |b| {
        b.iter(|| spec.projection.forward(black_box(-113.8450646), black_box(40.75384858)))
    });
    group.bench_function("inverse", |b| {
        b.iter(|| spec.projection.inverse(black_box(-1485473.143), black_box(2111305.944)))
    });

    group.finish();
}

// =============================================================================
// LOOKUP BENCHMARKS
// =============================================================================

fn bench_coordinate_to_grts(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinate_to_grts");
    let registry = FrameRegistry::with_lookup_dir(fixture_dir());
    registry.preload_all().expect("fixture tables load");

    for frame in [FrameName::Conus, FrameName::Canada, FrameName::PuertoRico] {
        let points = random_points(FrameSpec::get(frame), 1000);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_with_input(BenchmarkId::new("random", frame), &points, |b, points| {
            b.iter(|| {
                for &(lon, lat) in points {
                    // Most random points miss the sparse fixture tables; both paths count
                    let _ = black_box(registry.coordinate_to_grts(lat, lon, frame.as_str()));
                }
            })
        });
    }

    group.finish();
}

fn bench_grts_to_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("grts_to_geometry");
    let registry = FrameRegistry::with_lookup_dir(fixture_dir());
    registry.preload_all().expect("fixture tables load");

    let lcc = parse_projection("+proj=lcc +lat_1=33 +lat_2=45 +lat_0=39 +lon_0=-96")
        .expect("valid definition");
    let targets = [
        ("native", TargetProjection::Native),
        ("wgs84", TargetProjection::Wgs84),
        ("lcc", TargetProjection::Custom(lcc)),
    ];

    for (name, target) in &targets {
        for kind in [GeometryKind::Bounds, GeometryKind::Polygon] {
            group.bench_with_input(
                BenchmarkId::new(*name, format!("{:?}", kind)),
                &kind,
                |b, &kind| b.iter(|| registry.grts_to_geometry(black_box(1005), "conus", target, kind)),
            );
        }
    }

    group.finish();
}

fn bench_table_load(c: &mut Criterion) {
    c.bench_function("load_conus_fixture", |b| {
        b.iter(|| {
            let registry = FrameRegistry::with_lookup_dir(fixture_dir());
            registry.preload(&[FrameName::Conus]).expect("fixture table loads");
        })
    });
}

criterion_group!(
    benches,
    bench_albers,
    bench_coordinate_to_grts,
    bench_grts_to_geometry,
    bench_table_load,
);
criterion_main!(benches);
