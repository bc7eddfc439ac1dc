use indexmap::IndexSet;
use tracing::debug;

use crate::core::{
    Axis, AxisId, AxisOptions, AxisOrientation, ChartSeries, MarginOverride, Rect, SeriesId, Size,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionState, ZoomAndPanMode};
use crate::render::Renderer;

use super::scheduler::ChartScheduler;
use super::validation::{
    validate_axis_options, validate_config, validate_control_size, validate_margin_override,
};
use super::{CartesianChartConfig, MeasureOutcome};

/// Identity of a chart-owned element drawn by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum ElementKey {
    Axis(AxisId),
    Series(SeriesId),
}

/// Cartesian chart facade consumed by host applications.
///
/// `CartesianChart` owns the axes, the series and the layout state, and
/// forwards every visual change to its [`Renderer`].
pub struct CartesianChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: CartesianChartConfig,
    pub(super) x_axes: Vec<Axis>,
    pub(super) y_axes: Vec<Axis>,
    pub(super) series: Vec<Box<dyn ChartSeries>>,
    pub(super) retired_axes: Vec<Axis>,
    pub(super) retired_series: Vec<Box<dyn ChartSeries>>,
    pub(super) drawn: IndexSet<ElementKey>,
    pub(super) draw_margin: Option<Rect>,
    pub(super) scheduler: ChartScheduler,
    pub(super) interaction: InteractionState,
    pub(super) invalidated: bool,
    pub(super) pass_count: u64,
    pub(super) last_outcome: Option<MeasureOutcome>,
}

impl<R: Renderer> CartesianChart<R> {
    /// Creates a chart with one default X axis and one default Y axis.
    pub fn new(renderer: R, config: CartesianChartConfig) -> ChartResult<Self> {
        let config = validate_config(config)?;
        Ok(Self {
            renderer,
            config,
            x_axes: vec![Axis::x(AxisOptions::default())],
            y_axes: vec![Axis::y(AxisOptions::default())],
            series: Vec::new(),
            retired_axes: Vec::new(),
            retired_series: Vec::new(),
            drawn: IndexSet::new(),
            draw_margin: None,
            scheduler: ChartScheduler::new(config.throttling),
            interaction: InteractionState::default(),
            invalidated: true,
            pass_count: 0,
            last_outcome: None,
        })
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn config(&self) -> CartesianChartConfig {
        self.config
    }

    #[must_use]
    pub fn control_size(&self) -> Size {
        self.config.control_size
    }

    pub fn set_control_size(&mut self, size: Size) -> ChartResult<()> {
        self.config.control_size = validate_control_size(size)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_draw_margin_override(&mut self, margin: MarginOverride) -> ChartResult<()> {
        self.config.draw_margin = validate_margin_override(margin)?;
        self.invalidate();
        Ok(())
    }

    #[must_use]
    pub fn zoom_mode(&self) -> ZoomAndPanMode {
        self.config.zoom_mode
    }

    pub fn set_zoom_mode(&mut self, mode: ZoomAndPanMode) {
        self.config.zoom_mode = mode;
    }

    pub fn set_zooming_speed(&mut self, speed: f64) -> ChartResult<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ChartError::InvalidData(
                "zooming speed must be finite and > 0".to_owned(),
            ));
        }
        self.config.zooming_speed = speed;
        Ok(())
    }

    /// Plot-area rectangle of the last completed pass.
    #[must_use]
    pub fn draw_margin(&self) -> Option<Rect> {
        self.draw_margin
    }

    #[must_use]
    pub fn pass_count(&self) -> u64 {
        self.pass_count
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<MeasureOutcome> {
        self.last_outcome
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn scheduler(&self) -> &ChartScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn x_axes(&self) -> &[Axis] {
        &self.x_axes
    }

    #[must_use]
    pub fn y_axes(&self) -> &[Axis] {
        &self.y_axes
    }

    pub(super) fn axes(&self, orientation: AxisOrientation) -> &[Axis] {
        match orientation {
            AxisOrientation::X => &self.x_axes,
            AxisOrientation::Y => &self.y_axes,
        }
    }

    pub(super) fn axes_mut(&mut self, orientation: AxisOrientation) -> &mut Vec<Axis> {
        match orientation {
            AxisOrientation::X => &mut self.x_axes,
            AxisOrientation::Y => &mut self.y_axes,
        }
    }

    pub fn axis(&self, orientation: AxisOrientation, index: usize) -> ChartResult<&Axis> {
        self.axes(orientation)
            .get(index)
            .ok_or(ChartError::AxisNotFound { orientation, index })
    }

    /// Mutable access to one axis. Limit changes made here bypass shared-group
    /// propagation; use [`CartesianChart::set_axis_limits`] for that.
    pub fn axis_mut(
        &mut self,
        orientation: AxisOrientation,
        index: usize,
    ) -> ChartResult<&mut Axis> {
        self.invalidated = true;
        self.axes_mut(orientation)
            .get_mut(index)
            .ok_or(ChartError::AxisNotFound { orientation, index })
    }

    pub fn set_x_axes(&mut self, axes: Vec<Axis>) -> ChartResult<()> {
        self.replace_axes(AxisOrientation::X, axes)
    }

    pub fn set_y_axes(&mut self, axes: Vec<Axis>) -> ChartResult<()> {
        self.replace_axes(AxisOrientation::Y, axes)
    }

    fn replace_axes(&mut self, orientation: AxisOrientation, axes: Vec<Axis>) -> ChartResult<()> {
        if axes.is_empty() {
            return Err(ChartError::InvalidData(format!(
                "a chart needs at least one {orientation:?} axis"
            )));
        }
        for axis in &axes {
            if axis.orientation() != orientation {
                return Err(ChartError::InvalidData(format!(
                    "axis `{}` is not a {orientation:?} axis",
                    axis.display_name()
                )));
            }
            validate_axis_options(axis.options())?;
        }
        let previous = std::mem::replace(self.axes_mut(orientation), axes);
        debug!(
            orientation = ?orientation,
            retired = previous.len(),
            "axes replaced"
        );
        self.retired_axes.extend(previous);
        self.invalidate();
        Ok(())
    }

    /// Adds a series; its axis indices must exist.
    pub fn add_series(&mut self, series: Box<dyn ChartSeries>) -> ChartResult<SeriesId> {
        self.axis(AxisOrientation::X, series.x_axis_index())?;
        self.axis(AxisOrientation::Y, series.y_axis_index())?;
        let id = series.id();
        self.series.push(series);
        self.invalidate();
        Ok(id)
    }

    /// Removes a series; its visuals fade out on the next pass.
    pub fn remove_series(&mut self, id: SeriesId) -> bool {
        let Some(position) = self.series.iter().position(|series| series.id() == id) else {
            return false;
        };
        let removed = self.series.remove(position);
        self.retired_series.push(removed);
        self.invalidate();
        true
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Mutable access to one series; only a found series dirties the layout.
    pub fn series_mut(&mut self, id: SeriesId) -> Option<&mut (dyn ChartSeries + 'static)> {
        let position = self.series.iter().position(|series| series.id() == id)?;
        self.invalidated = true;
        Some(self.series[position].as_mut())
    }

    /// Marks the layout dirty; the next [`CartesianChart::tick`] schedules a pass.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }
}
