use std::time::Instant;

use crate::core::Point;
use crate::error::ChartResult;
use crate::interaction::{InteractionMode, ZoomAndPanMode, ZoomDirection};
use crate::render::Renderer;

use super::CartesianChart;
use super::scheduler::UpdateStream;
use super::validation::validate_point;

impl<R: Renderer> CartesianChart<R> {
    /// Starts a pan gesture when the pointer goes down inside the plot area.
    pub fn pointer_down(&mut self, point: Point) -> ChartResult<bool> {
        let point = validate_point("pointer", point)?;
        if self.config.zoom_mode == ZoomAndPanMode::None {
            return Ok(false);
        }
        let inside = self
            .draw_margin
            .is_some_and(|draw| draw.contains(point));
        if inside {
            self.interaction.on_pointer_down(point);
        }
        Ok(inside)
    }

    /// Tracks the pointer. Pan deltas and tooltip refreshes are applied by the
    /// throttled streams on a later [`CartesianChart::tick`].
    pub fn pointer_move(&mut self, point: Point, now: Instant) -> ChartResult<()> {
        let point = validate_point("pointer", point)?;
        self.interaction.on_pointer_move(point);
        self.scheduler.request(UpdateStream::Tooltip, now);
        if self.interaction.mode() == InteractionMode::Panning {
            self.scheduler.request(UpdateStream::Panning, now);
        }
        Ok(())
    }

    /// Ends a gesture: flushes the pending pan delta, then bounces the
    /// released window back inside the data bounds.
    pub fn pointer_up(&mut self, point: Point, now: Instant) -> ChartResult<()> {
        let point = validate_point("pointer", point)?;
        self.interaction.on_pointer_move(point);
        self.scheduler.cancel(UpdateStream::Panning);
        if let Some(delta) = self.interaction.take_pending_pan() {
            self.pan(delta, false)?;
        }
        if self.interaction.on_pointer_up(point) {
            self.bounce_panning_back()?;
            if self.config.auto_update_enabled {
                self.update(now);
            }
        }
        Ok(())
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
        self.scheduler.cancel(UpdateStream::Tooltip);
    }

    /// Mouse-wheel zoom around `pivot`.
    pub fn wheel(&mut self, pivot: Point, direction: ZoomDirection) -> ChartResult<()> {
        if self.config.zoom_mode == ZoomAndPanMode::None {
            return Ok(());
        }
        self.zoom(pivot, direction, None, false)
    }

    /// Pinch zoom; `scale_factor > 1` zooms in.
    pub fn pinch(&mut self, pivot: Point, scale_factor: f64, is_active: bool) -> ChartResult<()> {
        if self.config.zoom_mode == ZoomAndPanMode::None {
            return Ok(());
        }
        self.zoom(
            pivot,
            ZoomDirection::DefinedByScaleFactor,
            Some(scale_factor),
            is_active,
        )?;
        if !is_active {
            self.bounce_panning_back()?;
        }
        Ok(())
    }
}
