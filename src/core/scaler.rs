use crate::core::axis::{Axis, AxisOrientation};
use crate::core::types::{Point, Rect, Size};
use crate::error::{ChartError, ChartResult};

/// Linear transform between data values and pixels for one axis.
///
/// A scaler is an immutable snapshot of a draw-margin rectangle and an axis
/// range. Y scalers grow upwards (larger values map to smaller pixel
/// coordinates) unless the axis is inverted; X scalers grow to the right
/// unless inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    orientation: AxisOrientation,
    inverted: bool,
    min: f64,
    max: f64,
    origin_px: f64,
    length_px: f64,
}

impl Scaler {
    /// Builds a scaler over `[min, max]` inside the draw margin.
    ///
    /// The range must be finite and non-degenerate; callers widen zero-width
    /// ranges before getting here.
    pub fn new(
        draw_location: Point,
        draw_size: Size,
        orientation: AxisOrientation,
        inverted: bool,
        min: f64,
        max: f64,
    ) -> ChartResult<Self> {
        if !draw_size.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: draw_size.width,
                height: draw_size.height,
            });
        }
        if !draw_location.is_finite() {
            return Err(ChartError::InvalidData(
                "draw margin location must be finite".to_owned(),
            ));
        }
        if !min.is_finite() || !max.is_finite() || min == max {
            return Err(ChartError::InvalidData(
                "scaler range must be finite and non-zero".to_owned(),
            ));
        }

        let (origin_px, length_px) = match orientation {
            AxisOrientation::X => (draw_location.x, draw_size.width),
            AxisOrientation::Y => (draw_location.y, draw_size.height),
        };

        Ok(Self {
            orientation,
            inverted,
            min,
            max,
            origin_px,
            length_px,
        })
    }

    /// Builds a scaler for `axis` using its current visible limits.
    pub fn for_axis(draw_margin: Rect, axis: &Axis) -> ChartResult<Self> {
        let (min, max) = axis.visible_range();
        Self::new(
            draw_margin.location(),
            draw_margin.size(),
            axis.orientation(),
            axis.options().inverted,
            min,
            max,
        )
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn length_px(&self) -> f64 {
        self.length_px
    }

    fn flipped(&self) -> bool {
        matches!(self.orientation, AxisOrientation::Y) != self.inverted
    }

    #[must_use]
    pub fn to_pixels(&self, value: f64) -> f64 {
        let ratio = (value - self.min) / (self.max - self.min);
        let ratio = if self.flipped() { 1.0 - ratio } else { ratio };
        self.origin_px + ratio * self.length_px
    }

    #[must_use]
    pub fn to_chart_values(&self, pixel: f64) -> f64 {
        let ratio = (pixel - self.origin_px) / self.length_px;
        let ratio = if self.flipped() { 1.0 - ratio } else { ratio };
        self.min + ratio * (self.max - self.min)
    }

    /// Length in pixels of a data-space delta.
    #[must_use]
    pub fn measure_in_pixels(&self, delta: f64) -> f64 {
        (delta / (self.max - self.min) * self.length_px).abs()
    }
}
