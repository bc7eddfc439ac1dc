use cartesian_chart::ChartError;
use cartesian_chart::api::{
    CartesianChart, CartesianChartConfig, LegendPosition, UpdateThrottling, ZoomEdgeBounds,
};
use cartesian_chart::core::{AxisOptions, MarginOverride, Size};
use cartesian_chart::interaction::ZoomAndPanMode;
use cartesian_chart::render::RecordingRenderer;

#[test]
fn minimal_json_fills_every_default() {
    let config = CartesianChartConfig::from_json_str(
        r#"{ "control_size": { "width": 640.0, "height": 480.0 } }"#,
    )
    .expect("parse");

    assert_eq!(config, CartesianChartConfig::new(Size::new(640.0, 480.0)));
    assert_eq!(config.zoom_mode, ZoomAndPanMode::X);
    assert_eq!(config.zooming_speed, 0.2);
    assert_eq!(config.edge_bounds.active, 0.15);
    assert_eq!(config.edge_bounds.inactive, 0.05);
    assert_eq!(config.throttling.panning_ms, 30);
    assert!(config.auto_update_enabled);
}

#[test]
fn customized_config_survives_json() {
    let config = CartesianChartConfig::new(Size::new(800.0, 600.0))
        .with_draw_margin(MarginOverride {
            left: Some(48.0),
            ..MarginOverride::auto()
        })
        .with_zoom_mode(ZoomAndPanMode::Both)
        .with_zooming_speed(0.5)
        .with_edge_bounds(ZoomEdgeBounds {
            active: 0.25,
            inactive: 0.0,
        })
        .with_throttling(UpdateThrottling {
            measure_ms: 16,
            tooltip_ms: 100,
            panning_ms: 8,
        })
        .with_title(Size::new(300.0, 32.0))
        .with_legend(LegendPosition::Bottom, Size::new(200.0, 24.0));

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"zoom_mode\": \"Both\""));
    let parsed = CartesianChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn malformed_json_reports_a_parse_error() {
    let err = CartesianChartConfig::from_json_str("{ \"control_size\": 12 }")
        .expect_err("must fail");
    match err {
        ChartError::InvalidData(message) => assert!(message.starts_with("failed to parse config")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_values_are_rejected_at_construction() {
    let bad_speed = CartesianChartConfig::new(Size::new(10.0, 10.0)).with_zooming_speed(f64::NAN);
    assert!(CartesianChart::new(RecordingRenderer::default(), bad_speed).is_err());

    let bad_size = CartesianChartConfig::new(Size::new(-1.0, 10.0));
    assert!(matches!(
        CartesianChart::new(RecordingRenderer::default(), bad_size),
        Err(ChartError::InvalidViewport { .. })
    ));

    let bad_margin = CartesianChartConfig::new(Size::new(10.0, 10.0)).with_draw_margin(
        MarginOverride {
            top: Some(-4.0),
            ..MarginOverride::auto()
        },
    );
    assert!(CartesianChart::new(RecordingRenderer::default(), bad_margin).is_err());
}

#[test]
fn axis_options_parse_with_defaults() {
    let options: AxisOptions =
        serde_json::from_str(r#"{ "name": "Time", "min_step": 5.0 }"#).expect("parse");
    assert_eq!(options.name.as_deref(), Some("Time"));
    assert_eq!(options.min_step, 5.0);
    assert_eq!(options.unit_width, 1.0);
    assert!(options.is_visible);
    assert!(options.labels_paint.is_some());
}
