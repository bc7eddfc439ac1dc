use crate::core::{AxisOptions, Margin, MarginOverride, Point, Size};
use crate::error::{ChartError, ChartResult};

use super::CartesianChartConfig;

pub(super) fn validate_control_size(size: Size) -> ChartResult<Size> {
    if !size.width.is_finite()
        || !size.height.is_finite()
        || size.width < 0.0
        || size.height < 0.0
    {
        return Err(ChartError::InvalidViewport {
            width: size.width,
            height: size.height,
        });
    }
    Ok(size)
}

pub(super) fn validate_config(config: CartesianChartConfig) -> ChartResult<CartesianChartConfig> {
    validate_control_size(config.control_size)?;
    validate_margin_override(config.draw_margin)?;

    if !config.zooming_speed.is_finite() || config.zooming_speed <= 0.0 {
        return Err(ChartError::InvalidData(
            "zooming speed must be finite and > 0".to_owned(),
        ));
    }
    for (name, value) in [
        ("active", config.edge_bounds.active),
        ("inactive", config.edge_bounds.inactive),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name} edge bound fraction must be finite and >= 0"
            )));
        }
    }

    let chrome = config.chrome;
    if let Some(title) = chrome.title_size {
        validate_chrome_size("title", title)?;
    }
    validate_chrome_size("legend", chrome.legend_size)?;

    Ok(config)
}

fn validate_chrome_size(name: &str, size: Size) -> ChartResult<()> {
    if !size.width.is_finite() || !size.height.is_finite() || size.width < 0.0 || size.height < 0.0
    {
        return Err(ChartError::InvalidData(format!(
            "{name} size must be finite and >= 0"
        )));
    }
    Ok(())
}

pub(super) fn validate_margin_override(margin: MarginOverride) -> ChartResult<MarginOverride> {
    for (side, value) in [
        ("left", margin.left),
        ("top", margin.top),
        ("right", margin.right),
        ("bottom", margin.bottom),
    ] {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "draw margin `{side}` must be finite and >= 0"
                )));
            }
        }
    }
    Ok(margin)
}

pub(super) fn validate_axis_options(options: &AxisOptions) -> ChartResult<()> {
    if !options.unit_width.is_finite() || options.unit_width <= 0.0 {
        return Err(ChartError::InvalidData(
            "axis unit width must be finite and > 0".to_owned(),
        ));
    }
    if !options.min_step.is_finite() || options.min_step < 0.0 {
        return Err(ChartError::InvalidData(
            "axis min step must be finite and >= 0".to_owned(),
        ));
    }
    if options.force_step_to_min && options.min_step <= 0.0 {
        return Err(ChartError::InvalidData(
            "force_step_to_min requires a min step > 0".to_owned(),
        ));
    }
    if let Some(delta) = options.min_zoom_delta {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis min zoom delta must be finite and > 0".to_owned(),
            ));
        }
    }
    for (name, limit) in [("min", options.min_limit), ("max", options.max_limit)] {
        if limit.is_some_and(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "axis {name} limit must be finite"
            )));
        }
    }
    for (name, size) in [
        ("labels", options.labels_font_size_px),
        ("name", options.name_font_size_px),
    ] {
        if !size.is_finite() || size <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "axis {name} font size must be finite and > 0"
            )));
        }
    }
    if !options.tick_length_px.is_finite() || options.tick_length_px < 0.0 {
        return Err(ChartError::InvalidData(
            "axis tick length must be finite and >= 0".to_owned(),
        ));
    }
    validate_padding(options.padding)?;
    for paint in [
        options.separators_paint,
        options.ticks_paint,
        options.sub_ticks_paint,
        options.labels_paint,
    ]
    .into_iter()
    .flatten()
    {
        paint.validate()?;
    }
    Ok(())
}

fn validate_padding(padding: Margin) -> ChartResult<()> {
    for value in [padding.left, padding.top, padding.right, padding.bottom] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(
                "axis padding must be finite and >= 0".to_owned(),
            ));
        }
    }
    Ok(())
}

pub(super) fn validate_point(name: &str, point: Point) -> ChartResult<Point> {
    if !point.is_finite() {
        return Err(ChartError::InvalidData(format!("{name} must be finite")));
    }
    Ok(point)
}
