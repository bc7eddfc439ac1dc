use thiserror::Error;

use crate::core::AxisOrientation;
use crate::interaction::ZoomDirection;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(
        "zoom received an explicit scale factor with direction {direction:?}; \
         use ZoomDirection::DefinedByScaleFactor when a scale factor is supplied"
    )]
    ScaleFactorDirectionMismatch { direction: ZoomDirection },

    #[error(
        "axis `{axis}` would create {count:.0} separators (limit {limit}); \
         set an explicit min_step with force_step_to_min, or a min_zoom_delta on the axis"
    )]
    ExcessiveSeparators {
        axis: String,
        count: f64,
        limit: usize,
    },

    #[error("no {orientation:?} axis at index {index}")]
    AxisNotFound {
        orientation: AxisOrientation,
        index: usize,
    },
}
