use approx::assert_relative_eq;
use cartesian_chart::ChartError;
use cartesian_chart::api::{CartesianChart, CartesianChartConfig};
use cartesian_chart::core::{AxisOrientation, Margin, MarginOverride, Point, Size, XySeries};
use cartesian_chart::interaction::{InteractionMode, ZoomAndPanMode, ZoomDirection};
use cartesian_chart::render::RecordingRenderer;

/// 100x100 px draw margin at the origin over data `[0, 100]` on both axes,
/// sampled every 10 units (zoom floor = 30).
fn build_chart(mode: ZoomAndPanMode) -> CartesianChart<RecordingRenderer> {
    let config = CartesianChartConfig::new(Size::new(200.0, 200.0))
        .with_draw_margin(MarginOverride::fixed(Margin::new(0.0, 0.0, 100.0, 100.0)))
        .with_zoom_mode(mode)
        .with_zooming_speed(0.1);
    let mut chart = CartesianChart::new(RecordingRenderer::default(), config).expect("chart init");
    let points = (0..=10)
        .map(|i| {
            let v = f64::from(i) * 10.0;
            Point::new(v, v)
        })
        .collect();
    chart
        .add_series(Box::new(XySeries::line(points)))
        .expect("add series");
    chart.force_update().expect("first pass");
    chart
}

fn x_range(chart: &CartesianChart<RecordingRenderer>) -> (f64, f64) {
    chart.x_axes()[0].visible_range()
}

#[test]
fn speed_zoom_keeps_the_pivot_pixel_on_the_same_value() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    let before = chart.x_scaler(0).expect("scaler").to_chart_values(30.0);

    chart
        .zoom(Point::new(30.0, 50.0), ZoomDirection::ZoomIn, None, false)
        .expect("zoom");

    let (min, max) = x_range(&chart);
    assert_relative_eq!(max - min, 90.0, epsilon = 1e-9);
    assert_relative_eq!(min, 3.0, epsilon = 1e-9);
    let after = chart.x_scaler(0).expect("scaler").to_chart_values(30.0);
    assert_relative_eq!(after, before, epsilon = 1e-9);
    assert_eq!(chart.y_axes()[0].visible_range(), (0.0, 100.0));
}

#[test]
fn zoom_in_stops_at_the_min_zoom_delta() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    for _ in 0..40 {
        chart
            .zoom(Point::new(50.0, 50.0), ZoomDirection::ZoomIn, None, false)
            .expect("zoom");
    }
    let (min, max) = x_range(&chart);
    assert!(max - min >= 30.0);
    assert!(max - min < 30.0 / 0.9);
}

#[test]
fn zoom_out_is_capped_past_the_data_edge() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    for _ in 0..10 {
        chart
            .zoom(Point::new(50.0, 50.0), ZoomDirection::ZoomOut, None, false)
            .expect("zoom");
    }
    let (min, max) = x_range(&chart);
    assert!(min >= -0.05 * (max - min) - 1e-9);
    assert!(max <= 100.0 + 0.05 * (max - min) + 1e-9);
}

#[test]
fn scale_factor_zoom_is_symmetric_and_direction_free() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    chart
        .pinch(Point::new(10.0, 10.0), 1.2, true)
        .expect("pinch in");
    let (min, max) = x_range(&chart);
    assert_relative_eq!(min, 10.0, epsilon = 1e-9);
    assert_relative_eq!(max, 90.0, epsilon = 1e-9);

    chart
        .zoom(
            Point::new(10.0, 10.0),
            ZoomDirection::DefinedByScaleFactor,
            Some(0.9),
            false,
        )
        .expect("zoom out");
    let (min, max) = x_range(&chart);
    assert_relative_eq!(min, 6.0, epsilon = 1e-9);
    assert_relative_eq!(max, 94.0, epsilon = 1e-9);
}

#[test]
fn scale_factor_with_a_fixed_direction_is_a_configuration_error() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    let err = chart
        .zoom(Point::new(10.0, 10.0), ZoomDirection::ZoomIn, Some(1.5), false)
        .expect_err("must fail");
    assert!(matches!(
        err,
        ChartError::ScaleFactorDirectionMismatch {
            direction: ZoomDirection::ZoomIn
        }
    ));

    let err = chart
        .zoom(
            Point::new(10.0, 10.0),
            ZoomDirection::DefinedByScaleFactor,
            None,
            false,
        )
        .expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(x_range(&chart), (0.0, 100.0));
}

#[test]
fn pan_past_the_data_edge_stops_at_the_edge_bound() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    chart
        .set_axis_limits(AxisOrientation::X, 0, 20.0, 60.0, false)
        .expect("limits");

    chart.pan(Point::new(-1000.0, 0.0), false).expect("pan");
    let (min, max) = x_range(&chart);
    assert_relative_eq!(min, 62.0, epsilon = 1e-9);
    assert_relative_eq!(max, 102.0, epsilon = 1e-9);

    assert_eq!(chart.bounce_panning_back().expect("bounce"), 1);
    let (min, max) = x_range(&chart);
    assert_relative_eq!(min, 60.0, epsilon = 1e-9);
    assert_relative_eq!(max, 100.0, epsilon = 1e-9);
}

#[test]
fn active_pan_uses_the_looser_edge_bound() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    chart
        .set_axis_limits(AxisOrientation::X, 0, 20.0, 60.0, false)
        .expect("limits");

    chart.pan(Point::new(1000.0, 0.0), true).expect("pan");
    let (min, max) = x_range(&chart);
    assert_relative_eq!(min, -6.0, epsilon = 1e-9);
    assert_relative_eq!(max, 34.0, epsilon = 1e-9);
    assert!(chart.interaction().is_zooming_or_panning());
}

#[test]
fn small_drag_across_the_data_edge_moves_by_the_drag_only() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    chart
        .set_axis_limits(AxisOrientation::X, 0, 79.0, 99.0, false)
        .expect("limits");

    chart.pan(Point::new(-10.0, 0.0), true).expect("pan");
    let (min, max) = x_range(&chart);
    assert_relative_eq!(min, 81.0, epsilon = 1e-9);
    assert_relative_eq!(max, 101.0, epsilon = 1e-9);

    assert_eq!(chart.bounce_panning_back().expect("bounce"), 1);
    assert_eq!(chart.bounce_panning_back().expect("settled"), 0);
}

#[test]
fn vertical_drag_moves_y_the_other_way_round() {
    let mut chart = build_chart(ZoomAndPanMode::Both);
    chart
        .set_axis_limits(AxisOrientation::Y, 0, 20.0, 60.0, false)
        .expect("limits");
    chart
        .set_axis_limits(AxisOrientation::X, 0, 20.0, 60.0, false)
        .expect("limits");

    chart.pan(Point::new(10.0, 10.0), false).expect("pan");

    let (x_min, _) = x_range(&chart);
    let (y_min, _) = chart.y_axes()[0].visible_range();
    assert_relative_eq!(x_min, 16.0, epsilon = 1e-9);
    assert_relative_eq!(y_min, 24.0, epsilon = 1e-9);
}

#[test]
fn zoom_mode_none_ignores_wheel_and_drag() {
    let mut chart = build_chart(ZoomAndPanMode::None);
    chart
        .wheel(Point::new(50.0, 50.0), ZoomDirection::ZoomIn)
        .expect("wheel");
    assert!(!chart.pointer_down(Point::new(50.0, 50.0)).expect("down"));
    assert_eq!(x_range(&chart), (0.0, 100.0));
}

#[test]
fn release_after_out_of_range_drag_bounces_back() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    chart
        .set_axis_limits(AxisOrientation::X, 0, 0.0, 40.0, false)
        .expect("limits");
    let now = std::time::Instant::now();

    assert!(chart.pointer_down(Point::new(50.0, 50.0)).expect("down"));
    assert_eq!(chart.interaction().mode(), InteractionMode::Panning);
    chart
        .pointer_move(Point::new(60.0, 50.0), now)
        .expect("move");
    chart.pointer_up(Point::new(70.0, 50.0), now).expect("up");

    assert_eq!(chart.interaction().mode(), InteractionMode::Idle);
    assert_eq!(x_range(&chart), (0.0, 40.0));
    assert!(!chart.interaction().is_zooming_or_panning());
}

#[test]
fn reset_zoom_restores_the_data_range() {
    let mut chart = build_chart(ZoomAndPanMode::X);
    chart
        .wheel(Point::new(20.0, 20.0), ZoomDirection::ZoomIn)
        .expect("wheel");
    assert_ne!(x_range(&chart), (0.0, 100.0));

    chart.reset_zoom().expect("reset");
    assert_eq!(chart.x_axes()[0].options().min_limit, None);
    chart.force_update().expect("measure");
    assert_eq!(x_range(&chart), (0.0, 100.0));
}

#[test]
fn zoom_before_the_first_pass_reports_an_unsized_viewport() {
    let config = CartesianChartConfig::new(Size::new(200.0, 200.0));
    let mut chart = CartesianChart::new(RecordingRenderer::default(), config).expect("chart init");
    let err = chart
        .zoom(Point::new(1.0, 1.0), ZoomDirection::ZoomIn, None, false)
        .expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}
