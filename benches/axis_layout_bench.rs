use axis_fit::api::{AxisLayoutConfig, AxisLayoutEngine, AxisLayoutRequest};
use axis_fit::core::{
    AxisAnchor, AxisScale, ClientSize, ContinuousScale, DiscreteScale, ExponentBounds,
    HeuristicTextMeasurer, OverlapMode, nice_step,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_nice_step(c: &mut Criterion) {
    c.bench_function("nice_step", |b| {
        b.iter(|| {
            let _ = nice_step(
                black_box(12_345.678),
                black_box(7),
                ExponentBounds::default(),
            );
        })
    });
}

fn bench_numeric_horizontal_layout(c: &mut Criterion) {
    let engine = AxisLayoutEngine::new(HeuristicTextMeasurer, AxisLayoutConfig::default())
        .expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(-1_250.0, 98_765.4).expect("scale"));
    let request = AxisLayoutRequest::new(ClientSize::new(1_600.0, 40.0));

    c.bench_function("numeric_horizontal_layout", |b| {
        b.iter(|| {
            let _ = engine
                .layout(black_box(&mut scale), black_box(&request))
                .expect("layout should succeed");
        })
    });
}

fn bench_time_series_layout(c: &mut Criterion) {
    let engine = AxisLayoutEngine::new(HeuristicTextMeasurer, AxisLayoutConfig::default())
        .expect("engine init");
    // 2023-01-01 .. 2024-06-30
    let mut scale =
        AxisScale::TimeSeries(ContinuousScale::new(1_672_531_200.0, 1_719_705_600.0).expect("scale"));
    let request = AxisLayoutRequest::new(ClientSize::new(1_200.0, 40.0));

    c.bench_function("time_series_layout", |b| {
        b.iter(|| {
            let _ = engine
                .layout(black_box(&mut scale), black_box(&request))
                .expect("layout should succeed");
        })
    });
}

fn bench_discrete_layout_1k(c: &mut Criterion) {
    let config = AxisLayoutConfig::default()
        .with_anchor(AxisAnchor::Bottom)
        .with_overlap_mode(OverlapMode::RotateThenHide);
    let engine = AxisLayoutEngine::new(HeuristicTextMeasurer, config).expect("engine init");
    let mut scale = AxisScale::Discrete(DiscreteScale::from_keys(
        (0..1_000).map(|i| format!("category-{i}")),
    ));
    let request = AxisLayoutRequest::new(ClientSize::new(1_600.0, 120.0));

    c.bench_function("discrete_layout_1k", |b| {
        b.iter(|| {
            let _ = engine
                .layout(black_box(&mut scale), black_box(&request))
                .expect("layout should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_nice_step,
    bench_numeric_horizontal_layout,
    bench_time_series_layout,
    bench_discrete_layout_1k
);
criterion_main!(benches);
