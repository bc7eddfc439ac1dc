use cartesian_chart::api::{CartesianChart, CartesianChartConfig};
use cartesian_chart::core::{AxisOrientation, Point, Scaler, Size, XySeries, enumerate_separators};
use cartesian_chart::interaction::ZoomDirection;
use cartesian_chart::render::RecordingRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_scaler_round_trip(c: &mut Criterion) {
    let scaler = Scaler::new(
        Point::new(48.0, 12.0),
        Size::new(1920.0, 1080.0),
        AxisOrientation::Y,
        false,
        0.0,
        10_000.0,
    )
    .expect("valid scaler");

    c.bench_function("scaler_round_trip", |b| {
        b.iter(|| {
            let px = scaler.to_pixels(black_box(4_321.123));
            let _ = scaler.to_chart_values(px);
        })
    });
}

fn bench_separator_enumeration(c: &mut Criterion) {
    c.bench_function("separator_enumeration_1k", |b| {
        b.iter(|| {
            let _ = enumerate_separators(black_box(-3.7), black_box(996.1), 1.0, "x")
                .expect("enumerate");
        })
    });
}

fn build_chart(points: usize) -> CartesianChart<RecordingRenderer> {
    let config = CartesianChartConfig::new(Size::new(1920.0, 1080.0));
    let mut chart = CartesianChart::new(RecordingRenderer::default(), config).expect("chart init");
    let data = (0..points)
        .map(|i| {
            let x = i as f64;
            Point::new(x, (x * 0.01).sin() * 250.0 + 500.0)
        })
        .collect();
    chart
        .add_series(Box::new(XySeries::line(data)))
        .expect("add series");
    chart.force_update().expect("first pass");
    chart
}

fn bench_measure_pass_10k(c: &mut Criterion) {
    let mut chart = build_chart(10_000);

    c.bench_function("measure_pass_10k_points", |b| {
        b.iter(|| {
            let _ = chart.force_update().expect("measure");
            chart.renderer_mut().take_events();
        })
    });
}

fn bench_zoom_then_measure(c: &mut Criterion) {
    let mut chart = build_chart(2_000);

    c.bench_function("wheel_zoom_then_measure", |b| {
        b.iter(|| {
            chart
                .wheel(Point::new(900.0, 400.0), ZoomDirection::ZoomIn)
                .expect("zoom in");
            chart
                .wheel(Point::new(900.0, 400.0), ZoomDirection::ZoomOut)
                .expect("zoom out");
            let _ = chart.force_update().expect("measure");
            chart.renderer_mut().complete_animations();
            chart.renderer_mut().take_events();
        })
    });
}

criterion_group!(
    benches,
    bench_scaler_round_trip,
    bench_separator_enumeration,
    bench_measure_pass_10k,
    bench_zoom_then_measure
);
criterion_main!(benches);
