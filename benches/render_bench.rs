//! Criterion benchmarks for the heatmap render pass

use activity_heatmap::{ActivityHeatmap, FixedMetrics, HeatmapStyle, MonthLabelStrategy};
use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 12).unwrap_or_default()
}

/// Heatmap with every third day active
fn sample_heatmap(labels: MonthLabelStrategy) -> ActivityHeatmap {
    let style = HeatmapStyle {
        labels,
        ..HeatmapStyle::default()
    };
    let mut heatmap = ActivityHeatmap::new(today(), style);
    let start = heatmap.range_start();
    for offset in (0..heatmap.day_count() as i64).step_by(3) {
        heatmap.set_active(start + Duration::days(offset), true);
    }
    heatmap
}

fn bench_render(c: &mut Criterion) {
    let metrics = FixedMetrics::new(2.0, 2.0);
    let mut group = c.benchmark_group("render");

    for labels in [
        MonthLabelStrategy::Alternating,
        MonthLabelStrategy::EveryMonth,
        MonthLabelStrategy::Spaced,
    ] {
        let heatmap = sample_heatmap(labels);
        group.throughput(Throughput::Elements(heatmap.day_count() as u64));
        group.bench_with_input(
            BenchmarkId::new("frame", format!("{:?}", labels)),
            &heatmap,
            |b, heatmap| {
                b.iter(|| heatmap.render(black_box(1080), &metrics));
            },
        );
    }

    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let metrics = FixedMetrics::default();
    let heatmap = sample_heatmap(MonthLabelStrategy::Alternating);

    let mut group = c.benchmark_group("render");
    group.bench_function("resize_sweep", |b| {
        b.iter(|| {
            for width in (200..=2000).step_by(100) {
                black_box(heatmap.render(black_box(width), &metrics));
            }
        });
    });
    group.finish();
}

fn bench_set_active(c: &mut Criterion) {
    let mut group = c.benchmark_group("calendar");

    group.bench_function("mark_whole_window", |b| {
        b.iter(|| {
            let mut heatmap = ActivityHeatmap::new(today(), HeatmapStyle::default());
            let start = heatmap.range_start();
            for offset in 0..heatmap.day_count() as i64 {
                heatmap.set_active(black_box(start + Duration::days(offset)), true);
            }
            heatmap
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_resize, bench_set_active);
criterion_main!(benches);
