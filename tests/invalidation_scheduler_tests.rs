use std::thread;
use std::time::{Duration, Instant};

use cartesian_chart::api::{
    CartesianChart, CartesianChartConfig, SharedCartesianChart, UpdateStream, UpdateThrottling,
};
use cartesian_chart::core::{
    AxisOrientation, Margin, MarginOverride, Point, SeriesId, Size, XySeries,
};
use cartesian_chart::render::RecordingRenderer;

const MEASURE: Duration = Duration::from_millis(50);
const PANNING: Duration = Duration::from_millis(30);

fn build_chart(auto_update: bool) -> CartesianChart<RecordingRenderer> {
    let config = CartesianChartConfig::new(Size::new(200.0, 200.0))
        .with_draw_margin(MarginOverride::fixed(Margin::new(0.0, 0.0, 100.0, 100.0)))
        .with_auto_update(auto_update);
    let mut chart = CartesianChart::new(RecordingRenderer::default(), config).expect("chart init");
    let points = (0..=10)
        .map(|i| Point::new(f64::from(i) * 10.0, f64::from(i)))
        .collect();
    chart
        .add_series(Box::new(XySeries::line(points)))
        .expect("add series");
    chart
}

#[test]
fn invalidation_runs_one_pass_after_the_measure_window() {
    let mut chart = build_chart(true);
    let t0 = Instant::now();

    let report = chart.tick(t0).expect("tick");
    assert!(report.measured.is_none());
    assert_eq!(chart.next_deadline(), Some(t0 + MEASURE));

    let report = chart.tick(t0 + MEASURE).expect("tick");
    assert!(report.measured.is_some_and(|outcome| outcome.is_completed()));
    assert_eq!(chart.pass_count(), 1);

    let report = chart.tick(t0 + MEASURE * 3).expect("tick");
    assert!(report.measured.is_none(), "nothing invalidated since");
    assert_eq!(chart.pass_count(), 1);
}

#[test]
fn bursts_of_updates_collapse_into_one_pass() {
    let mut chart = build_chart(false);
    let t0 = Instant::now();
    for offset in 0..5u64 {
        chart.update(t0 + Duration::from_millis(offset * 5));
    }

    assert_eq!(chart.scheduler().stream(UpdateStream::Measure).coalesced(), 4);
    chart.tick(t0 + MEASURE).expect("tick");
    chart.tick(t0 + MEASURE * 2).expect("tick");
    assert_eq!(chart.pass_count(), 1);
}

#[test]
fn disabled_auto_update_waits_for_an_explicit_request() {
    let mut chart = build_chart(false);
    let t0 = Instant::now();
    chart.tick(t0 + MEASURE).expect("tick");
    assert_eq!(chart.pass_count(), 0);

    chart.update(t0 + MEASURE);
    chart.tick(t0 + MEASURE * 2).expect("tick");
    assert_eq!(chart.pass_count(), 1);
}

#[test]
fn only_a_found_series_invalidates_the_layout() {
    let mut chart = build_chart(true);
    let id = chart
        .add_series(Box::new(XySeries::line(vec![Point::new(0.0, 0.0)])))
        .expect("add series");
    chart.force_update().expect("first pass");
    let t0 = Instant::now();

    assert!(chart.series_mut(SeriesId::next()).is_none());
    chart.tick(t0).expect("tick");
    assert!(!chart.scheduler().stream(UpdateStream::Measure).is_pending());

    assert!(chart.series_mut(id).is_some());
    chart.tick(t0).expect("tick");
    assert!(chart.scheduler().stream(UpdateStream::Measure).is_pending());
}

#[test]
fn force_update_bypasses_and_drops_the_pending_pass() {
    let mut chart = build_chart(true);
    let t0 = Instant::now();
    chart.update(t0);
    assert!(chart.scheduler().stream(UpdateStream::Measure).is_pending());

    assert!(chart.force_update().expect("force").is_completed());
    assert!(!chart.scheduler().stream(UpdateStream::Measure).is_pending());

    chart.tick(t0 + MEASURE).expect("tick");
    assert_eq!(chart.pass_count(), 1);
}

#[test]
fn drag_deltas_are_applied_on_the_panning_window() {
    let mut chart = build_chart(true);
    chart.force_update().expect("first pass");
    chart
        .set_axis_limits(AxisOrientation::X, 0, 20.0, 60.0, false)
        .expect("limits");
    let t0 = Instant::now();

    chart.pointer_down(Point::new(50.0, 50.0)).expect("down");
    chart.pointer_move(Point::new(45.0, 50.0), t0).expect("move");
    chart
        .pointer_move(Point::new(40.0, 50.0), t0 + Duration::from_millis(10))
        .expect("move");
    assert_eq!(chart.x_axes()[0].visible_range(), (20.0, 60.0));

    let report = chart.tick(t0 + PANNING).expect("tick");
    assert!(report.panned);
    assert_eq!(report.tooltip, None, "tooltip window is longer");
    let (min, max) = chart.x_axes()[0].visible_range();
    assert!((min - 24.0).abs() <= 1e-9 && (max - 64.0).abs() <= 1e-9);

    let report = chart.tick(t0 + MEASURE).expect("tick");
    assert_eq!(report.tooltip, Some(Point::new(40.0, 50.0)));
}

#[test]
fn pointer_leave_drops_the_pending_tooltip() {
    let mut chart = build_chart(true);
    chart.force_update().expect("first pass");
    let t0 = Instant::now();

    chart.pointer_move(Point::new(10.0, 10.0), t0).expect("move");
    chart.pointer_leave();
    let report = chart.tick(t0 + MEASURE).expect("tick");
    assert_eq!(report.tooltip, None);
}

#[test]
fn custom_throttling_windows_are_honored() {
    let config = CartesianChartConfig::new(Size::new(200.0, 200.0)).with_throttling(
        UpdateThrottling {
            measure_ms: 5,
            tooltip_ms: 5,
            panning_ms: 5,
        },
    );
    let mut chart = CartesianChart::new(RecordingRenderer::default(), config).expect("chart init");
    let t0 = Instant::now();
    chart.tick(t0).expect("tick");
    chart.tick(t0 + Duration::from_millis(5)).expect("tick");
    assert_eq!(chart.pass_count(), 1);
}

#[test]
fn shared_handle_serializes_passes_across_threads() {
    let shared = SharedCartesianChart::new(build_chart(false));
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = shared.clone();
            thread::spawn(move || handle.force_update().expect("force"))
        })
        .collect();
    for worker in workers {
        assert!(worker.join().expect("join").is_completed());
    }

    assert_eq!(shared.lock().pass_count(), 4);
    assert_eq!(shared.with(|chart| chart.series_count()), 1);
    assert_eq!(shared.handle_count(), 1);
}
