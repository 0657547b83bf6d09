//! Benchmarks for the ACES output transform.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use odt_math::Vec3;
use odt_primaries::DisplayPrimaries;
use odt_tonemap::{
    adapt_spline, bake_lut, eval_aces, rrt, rrt_spline, stops_to_linear, OutputMode,
    ReferenceCurve, Shaper, TransformConfig,
};
use odt_transfer::pq;

/// Log-spaced scene values from -12 to +12 stops.
fn scene_values(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| stops_to_linear(-12.0 + 24.0 * i as f32 / n as f32))
        .collect()
}

/// Benchmark spline evaluation and curve adaptation.
fn bench_spline(c: &mut Criterion) {
    let mut group = c.benchmark_group("spline");
    let values = scene_values(10000);
    let odt_curve = ReferenceCurve::Hdr1000.params();

    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("rrt_spline", |b| {
        b.iter(|| values.iter().map(|&x| rrt_spline(black_box(x))).sum::<f32>())
    });
    group.bench_function("odt_spline_1000", |b| {
        b.iter(|| values.iter().map(|&x| odt_curve.eval(black_box(x))).sum::<f32>())
    });
    group.finish();

    c.bench_function("adapt_spline", |b| {
        b.iter(|| {
            adapt_spline(
                black_box(&odt_curve),
                stops_to_linear(-10.0),
                stops_to_linear(8.0),
                600.0,
                1.2,
            )
        })
    });
}

/// Benchmark the full pipeline per output mode.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pixels: Vec<Vec3> = scene_values(4096)
        .into_iter()
        .enumerate()
        .map(|(i, v)| Vec3::new(v, v * (i % 7) as f32 / 7.0, v * 0.3))
        .collect();

    group.throughput(Throughput::Elements(pixels.len() as u64));
    group.bench_function("rrt", |b| {
        b.iter(|| pixels.iter().map(|&p| rrt(black_box(p)).x).sum::<f32>())
    });

    for mode in OutputMode::ALL {
        let cfg = TransformConfig::new(
            ReferenceCurve::Hdr1000.params(),
            DisplayPrimaries::Bt2020,
            mode,
        );
        group.bench_with_input(BenchmarkId::new("eval_aces", mode), &cfg, |b, cfg| {
            b.iter(|| pixels.iter().map(|&p| eval_aces(black_box(p), cfg).y).sum::<f32>())
        });
    }

    let lum = TransformConfig::new(
        ReferenceCurve::Hdr1000.params(),
        DisplayPrimaries::Bt2020,
        OutputMode::Pq,
    )
    .with_luminance_mapping(Some(0.5));
    group.bench_function("eval_aces_luminance", |b| {
        b.iter(|| pixels.iter().map(|&p| eval_aces(black_box(p), &lum).y).sum::<f32>())
    });

    group.finish();
}

/// Benchmark PQ encoding.
fn bench_pq(c: &mut Criterion) {
    let values: Vec<f32> = (0..10000).map(|i| i as f32).collect();
    let mut group = c.benchmark_group("transfer");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("pq_oetf", |b| {
        b.iter(|| values.iter().map(|&x| pq::oetf(black_box(x))).sum::<f32>())
    });
    group.finish();
}

/// Benchmark LUT baking.
fn bench_bake(c: &mut Criterion) {
    let mut group = c.benchmark_group("bake");
    group.sample_size(10);
    let cfg = TransformConfig::new(
        ReferenceCurve::Ldr48.params(),
        DisplayPrimaries::Rec709,
        OutputMode::Ldr,
    );
    for size in [17usize, 33] {
        group.throughput(Throughput::Elements((size * size * size) as u64));
        group.bench_with_input(BenchmarkId::new("log2", size), &size, |b, &size| {
            b.iter(|| bake_lut(&cfg, size, Shaper::Log2))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_spline, bench_pipeline, bench_pq, bench_bake);
criterion_main!(benches);
