//! Benchmark suite for transform pipeline performance.
//!
//! Run with: `cargo bench`
//!
//! This benchmark measures:
//! - Decimation throughput across input sizes
//! - Smoothing filter cost per method
//! - Outlier partitioning overhead
//! - Windowed aggregation throughput
//! - Full preset pipeline performance
//! - Scale mapping cost per rendered point

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use telemetry_charts::prelude::*;
use telemetry_charts::transform;

/// Create a telemetry series with realistic shape: a slow swell with
/// deterministic jitter, 1s cadence.
fn create_test_series(points: usize) -> Series {
    (0..points)
        .map(|i| {
            let jitter = ((i * 7_919) % 23) as f64 * 0.2 - 2.2;
            let value = 50.0 + 25.0 * (i as f64 * 0.002).sin() + jitter;
            Sample::new(i as i64 * 1_000, value)
        })
        .collect()
}

/// Same series with value spikes injected every 250 samples.
fn create_spiky_series(points: usize) -> Series {
    let mut series = create_test_series(points);
    for sample in series.iter_mut().skip(97).step_by(250) {
        sample.value += 400.0;
    }
    series
}

/// Benchmark decimation to a fixed point budget.
fn bench_decimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimate");

    for points in [1_000usize, 10_000, 100_000].iter() {
        let series = create_test_series(*points);

        group.throughput(Throughput::Elements(*points as u64));
        group.bench_with_input(
            BenchmarkId::new("extrema_preserving", points),
            &series,
            |b, series| {
                b.iter_batched(
                    || series.clone(),
                    |s| transform::decimate(black_box(s), 500, true).unwrap(),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark the three smoothing filters at a fixed window.
fn bench_smooth(c: &mut Criterion) {
    let mut group = c.benchmark_group("smooth");
    let series = create_test_series(10_000);

    for method in [
        SmoothingMethod::Simple,
        SmoothingMethod::Exponential,
        SmoothingMethod::Gaussian,
    ] {
        group.throughput(Throughput::Elements(series.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("10k_window_9", format!("{method:?}")),
            &series,
            |b, series| {
                b.iter_batched(
                    || series.clone(),
                    |s| transform::smooth(black_box(s), 9, method),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark outlier partitioning methods.
fn bench_remove_outliers(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_outliers");
    let series = create_spiky_series(10_000);

    for method in [
        OutlierMethod::Iqr,
        OutlierMethod::ZScore,
        OutlierMethod::ModifiedZScore,
    ] {
        group.throughput(Throughput::Elements(series.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("10k", format!("{method:?}")),
            &series,
            |b, series| {
                b.iter_batched(
                    || series.clone(),
                    |s| transform::remove_outliers(black_box(s), method, 1.5),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark windowed aggregation at different compression ratios.
fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let series = create_test_series(100_000);

    for window_ms in [10_000i64, 60_000, 600_000].iter() {
        group.throughput(Throughput::Elements(series.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("mean_100k", window_ms),
            &series,
            |b, series| {
                b.iter_batched(
                    || series.clone(),
                    |s| transform::aggregate_by_window(black_box(s), *window_ms, Reducer::Mean)
                        .unwrap(),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark the dashboard preset end to end.
fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let pipeline = PipelineBuilder::from_preset(ChartPreset::Dashboard)
        .build()
        .unwrap();

    for points in [1_000usize, 10_000, 100_000].iter() {
        let series = create_spiky_series(*points);

        group.throughput(Throughput::Elements(*points as u64));
        group.bench_with_input(
            BenchmarkId::new("dashboard_preset", points),
            &series,
            |b, series| {
                b.iter_batched(
                    || series.clone(),
                    |s| pipeline.apply(black_box(s)),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark scale mapping over a rendered series.
fn bench_scale_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale_mapping");

    let values: Vec<f64> = (0..1_000).map(|i| 1.0 + i as f64).collect();

    let linear = LinearScale::new([0.0, 1_000.0], [0.0, 800.0], false, false).unwrap();
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("linear_1000_points", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &v in &values {
                acc += linear.scale(black_box(v));
            }
            black_box(acc)
        });
    });

    let log = LogScale::new([1.0, 1_001.0], [0.0, 800.0], false, false).unwrap();
    group.bench_function("log_1000_points", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &v in &values {
                acc += log.scale(black_box(v));
            }
            black_box(acc)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_decimate,
    bench_smooth,
    bench_remove_outliers,
    bench_aggregate,
    bench_full_pipeline,
    bench_scale_mapping,
);

criterion_main!(benches);
