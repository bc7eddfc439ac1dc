use crate::core::axis::{AxisOptions, AxisOrientation};
use crate::core::types::Size;
use crate::error::{ChartError, ChartResult};

/// Hard ceiling on separators enumerated for one axis in one pass.
pub const MAX_SEPARATORS: usize = 10_000;

/// Target pixel spacing between Y separators.
const Y_SEPARATION_PX: f64 = 36.0;
/// Target pixel spacing between X separators.
const X_SEPARATION_PX: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStep {
    pub value: f64,
    pub magnitude: f64,
}

/// Picks a 1/2/5 x 10^n step so separators land roughly every
/// [`X_SEPARATION_PX`] / [`Y_SEPARATION_PX`] pixels.
#[must_use]
pub fn resolve_tick_step(
    orientation: AxisOrientation,
    draw_size: Size,
    min: f64,
    max: f64,
) -> TickStep {
    let mut range = max - min;
    if range == 0.0 {
        range = min.abs();
    }
    if !range.is_finite() || range <= 0.0 {
        return TickStep {
            value: 1.0,
            magnitude: 1.0,
        };
    }

    let axis_length_px = match orientation {
        AxisOrientation::X => draw_size.width,
        AxisOrientation::Y => draw_size.height,
    };
    let separation_px = match orientation {
        AxisOrientation::X => X_SEPARATION_PX,
        AxisOrientation::Y => Y_SEPARATION_PX,
    };
    let separations = (axis_length_px / separation_px).round().max(1.0);

    let minimum = range / separations;
    let magnitude = 10f64.powf(minimum.log10().floor());
    let residual = minimum / magnitude;
    let value = if residual > 5.0 {
        10.0 * magnitude
    } else if residual > 2.0 {
        5.0 * magnitude
    } else if residual > 1.0 {
        2.0 * magnitude
    } else {
        magnitude
    };

    TickStep { value, magnitude }
}

/// Step honoring the axis `min_step` / `force_step_to_min` options.
#[must_use]
pub fn resolve_axis_step(options: &AxisOptions, tick: TickStep) -> f64 {
    let min_step = if options.min_step.is_finite() && options.min_step > 0.0 {
        options.min_step
    } else {
        0.0
    };
    if options.force_step_to_min && min_step > 0.0 {
        return min_step;
    }
    tick.value.max(min_step)
}

/// Enumerates separator values from one step before `floor(min / step) * step`
/// up to one step past `max`.
///
/// Fails fast when the range would produce more than [`MAX_SEPARATORS`]
/// separators.
pub fn enumerate_separators(
    min: f64,
    max: f64,
    step: f64,
    axis_name: &str,
) -> ChartResult<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "separator step for axis `{axis_name}` must be finite and > 0"
        )));
    }
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(format!(
            "separator range for axis `{axis_name}` must be finite"
        )));
    }

    let count = (max - min).abs() / step;
    if count > MAX_SEPARATORS as f64 {
        return Err(ChartError::ExcessiveSeparators {
            axis: axis_name.to_owned(),
            count,
            limit: MAX_SEPARATORS,
        });
    }

    let start = (min / step).floor() * step;
    let end = max + step;
    let tolerance = step * 1e-9;
    let mut values = Vec::with_capacity(count as usize + 3);
    let mut index = 0usize;
    loop {
        let value = start + (index as f64 - 1.0) * step;
        if value > end + tolerance {
            break;
        }
        values.push(value);
        index += 1;
    }
    Ok(values)
}
