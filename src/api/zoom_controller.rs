use smallvec::SmallVec;
use tracing::debug;

use crate::core::{AxisOrientation, Point, Rect, Scaler, SharedAxisGroup};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ZoomDirection;
use crate::render::Renderer;

use super::CartesianChart;
use super::validation::validate_point;
use super::zoom_resolver::{
    ZoomRequest, resolve_bounce_back, resolve_pan, resolve_scale_factor_zoom, resolve_speed_zoom,
    resolve_zoom_request,
};

impl<R: Renderer> CartesianChart<R> {
    pub(super) fn require_draw_margin(&self) -> ChartResult<Rect> {
        self.draw_margin.ok_or(ChartError::InvalidViewport {
            width: self.config.control_size.width,
            height: self.config.control_size.height,
        })
    }

    /// Axes the current zoom mode acts on. Shared-group members after the
    /// first one are skipped: they receive the same limits by propagation.
    fn zoomable_axes(&self) -> SmallVec<[(AxisOrientation, usize); 4]> {
        let mode = self.config.zoom_mode;
        let mut targets = SmallVec::new();
        for (enabled, orientation) in [
            (mode.has_x(), AxisOrientation::X),
            (mode.has_y(), AxisOrientation::Y),
        ] {
            if !enabled {
                continue;
            }
            let mut seen: SmallVec<[SharedAxisGroup; 2]> = SmallVec::new();
            for (index, axis) in self.axes(orientation).iter().enumerate() {
                if let Some(group) = axis.options().shared_group {
                    if seen.contains(&group) {
                        continue;
                    }
                    seen.push(group);
                }
                targets.push((orientation, index));
            }
        }
        targets
    }

    /// Zooms every axis of the current zoom mode around `pivot` (pixels).
    ///
    /// A `scale_factor` is only accepted together with
    /// [`ZoomDirection::DefinedByScaleFactor`]; any other combination is a
    /// configuration error.
    pub fn zoom(
        &mut self,
        pivot: Point,
        direction: ZoomDirection,
        scale_factor: Option<f64>,
        is_active: bool,
    ) -> ChartResult<()> {
        let request = resolve_zoom_request(direction, scale_factor)?;
        let pivot = validate_point("zoom pivot", pivot)?;
        let draw = self.require_draw_margin()?;
        let edge_fraction = self.config.edge_bounds.fraction(is_active);
        let speed = self.config.zooming_speed;

        let mut changed = 0usize;
        for (orientation, index) in self.zoomable_axes() {
            let scaler = Scaler::for_axis(draw, self.axis(orientation, index)?)?;
            let limit = self.axis_limit(orientation, index)?;
            let target = match request {
                ZoomRequest::Speed { zoom_in } => {
                    let pivot_px = match orientation {
                        AxisOrientation::X => pivot.x,
                        AxisOrientation::Y => pivot.y,
                    };
                    let pivot_value = scaler.to_chart_values(pivot_px);
                    resolve_speed_zoom(limit, pivot_value, speed, zoom_in, edge_fraction)
                }
                ZoomRequest::ScaleFactor { factor } => {
                    resolve_scale_factor_zoom(limit, factor, edge_fraction)
                }
            };
            if let Some((min, max)) = target {
                self.set_axis_limits(orientation, index, min, max, true)?;
                changed += 1;
            }
        }

        self.interaction.set_zooming_or_panning(is_active);
        debug!(
            direction = ?direction,
            scale_factor,
            is_active,
            changed,
            "zoom applied"
        );
        Ok(())
    }

    /// Pans every axis of the current zoom mode by a pixel delta.
    pub fn pan(&mut self, delta: Point, is_active: bool) -> ChartResult<()> {
        let delta = validate_point("pan delta", delta)?;
        let draw = self.require_draw_margin()?;
        let edge_fraction = self.config.edge_bounds.fraction(is_active);

        for (orientation, index) in self.zoomable_axes() {
            let scaler = Scaler::for_axis(draw, self.axis(orientation, index)?)?;
            // Differences of two conversions stay correct for any draw origin.
            let shift = match orientation {
                AxisOrientation::X => {
                    scaler.to_chart_values(-delta.x) - scaler.to_chart_values(0.0)
                }
                AxisOrientation::Y => {
                    -(scaler.to_chart_values(delta.y) - scaler.to_chart_values(0.0))
                }
            };
            if shift == 0.0 || !shift.is_finite() {
                continue;
            }
            let limit = self.axis_limit(orientation, index)?;
            let (min, max) = resolve_pan(limit, shift, edge_fraction);
            self.set_axis_limits(orientation, index, min, max, true)?;
        }

        self.interaction.set_zooming_or_panning(is_active);
        Ok(())
    }

    /// Slides out-of-range axes back inside their data bounds, keeping the
    /// visible span. Returns the number of axes moved.
    pub fn bounce_panning_back(&mut self) -> ChartResult<usize> {
        let mut moved = 0usize;
        for (orientation, index) in self.zoomable_axes() {
            let limit = self.axis_limit(orientation, index)?;
            if let Some((min, max)) = resolve_bounce_back(limit) {
                self.set_axis_limits(orientation, index, min, max, true)?;
                moved += 1;
            }
        }
        if moved > 0 {
            debug!(moved, "panning bounced back");
        }
        Ok(moved)
    }

    /// Drops gesture and user limits on every zoomable axis and its group.
    pub fn reset_zoom(&mut self) -> ChartResult<()> {
        for (orientation, index) in self.zoomable_axes() {
            self.reset_axis_limits(orientation, index, true)?;
        }
        Ok(())
    }
}
