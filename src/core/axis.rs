use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::bounds::{Bounds, degenerate_half_width};
use crate::core::separators::{AxisFrame, SeparatorPool};
use crate::core::types::{Margin, Rect, Size};
use crate::error::ChartResult;
use crate::render::Color;

/// Fallible label formatter. Errors degrade to an empty label.
pub type LabelerFn = Arc<dyn Fn(f64) -> ChartResult<String> + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrientation {
    X,
    Y,
}

/// Side of the draw margin the axis is placed on.
///
/// `Start` is bottom for X axes and left for Y axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisPosition {
    #[default]
    Start,
    End,
}

/// Axes carrying the same group id keep identical limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SharedAxisGroup(pub u32);

/// Process-unique axis identity, stable for the lifetime of the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(u64);

impl AxisId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Immutable limits snapshot used by zoom/pan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimit {
    pub min: f64,
    pub max: f64,
    pub min_zoom_delta: f64,
    pub data_min: f64,
    pub data_max: f64,
}

impl AxisLimit {
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Extents of both snapshots; the tighter zoom floor wins.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            min_zoom_delta: self.min_zoom_delta.min(other.min_zoom_delta),
            data_min: self.data_min.min(other.data_min),
            data_max: self.data_max.max(other.data_max),
        }
    }
}

/// Serializable axis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_name_font_size_px")]
    pub name_font_size_px: f64,
    /// Shares the labels band with the axis name instead of stacking them.
    #[serde(default)]
    pub in_line_name_placement: bool,
    #[serde(default)]
    pub position: AxisPosition,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub min_limit: Option<f64>,
    #[serde(default)]
    pub max_limit: Option<f64>,
    #[serde(default = "default_unit_width")]
    pub unit_width: f64,
    #[serde(default)]
    pub min_step: f64,
    #[serde(default)]
    pub force_step_to_min: bool,
    #[serde(default)]
    pub min_zoom_delta: Option<f64>,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub custom_separators: Option<Vec<f64>>,
    #[serde(default)]
    pub shared_group: Option<SharedAxisGroup>,
    #[serde(default = "default_labels_font_size_px")]
    pub labels_font_size_px: f64,
    #[serde(default = "default_labels_padding")]
    pub padding: Margin,
    #[serde(default = "default_separators_paint")]
    pub separators_paint: Option<Color>,
    #[serde(default)]
    pub ticks_paint: Option<Color>,
    #[serde(default)]
    pub sub_ticks_paint: Option<Color>,
    #[serde(default = "default_labels_paint")]
    pub labels_paint: Option<Color>,
    #[serde(default)]
    pub sub_separators_count: usize,
    #[serde(default = "default_tick_length_px")]
    pub tick_length_px: f64,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            name: None,
            name_font_size_px: default_name_font_size_px(),
            in_line_name_placement: false,
            position: AxisPosition::Start,
            is_visible: true,
            min_limit: None,
            max_limit: None,
            unit_width: default_unit_width(),
            min_step: 0.0,
            force_step_to_min: false,
            min_zoom_delta: None,
            inverted: false,
            custom_separators: None,
            shared_group: None,
            labels_font_size_px: default_labels_font_size_px(),
            padding: default_labels_padding(),
            separators_paint: default_separators_paint(),
            ticks_paint: None,
            sub_ticks_paint: None,
            labels_paint: default_labels_paint(),
            sub_separators_count: 0,
            tick_length_px: default_tick_length_px(),
        }
    }
}

impl AxisOptions {
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: AxisPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, min_limit: Option<f64>, max_limit: Option<f64>) -> Self {
        self.min_limit = min_limit;
        self.max_limit = max_limit;
        self
    }

    #[must_use]
    pub fn with_min_step(mut self, min_step: f64, force_step_to_min: bool) -> Self {
        self.min_step = min_step;
        self.force_step_to_min = force_step_to_min;
        self
    }

    #[must_use]
    pub fn with_shared_group(mut self, group: SharedAxisGroup) -> Self {
        self.shared_group = Some(group);
        self
    }

    #[must_use]
    pub fn with_custom_separators(mut self, separators: Vec<f64>) -> Self {
        self.custom_separators = Some(separators);
        self
    }

    #[must_use]
    pub fn with_ticks_paint(mut self, paint: Option<Color>) -> Self {
        self.ticks_paint = paint;
        self
    }

    #[must_use]
    pub fn with_sub_separators(mut self, count: usize, paint: Option<Color>) -> Self {
        self.sub_separators_count = count;
        self.sub_ticks_paint = paint;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }
}

/// Space reserved for an axis by the last measure pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisLayout {
    pub labels_size: Size,
    pub name_size: Size,
    pub labels_desired: Rect,
    pub name_desired: Rect,
    /// Center line of the labels band: a Y pixel for X axes, an X pixel for Y axes.
    pub labels_origin_px: f64,
}

pub struct Axis {
    id: AxisId,
    orientation: AxisOrientation,
    options: AxisOptions,
    labeler: Option<LabelerFn>,
    data_bounds: Bounds,
    visible_data_bounds: Bounds,
    layout: AxisLayout,
    pub(crate) separators: SeparatorPool,
    pub(crate) previous_frame: Option<AxisFrame>,
}

impl fmt::Debug for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Axis")
            .field("id", &self.id)
            .field("orientation", &self.orientation)
            .field("options", &self.options)
            .field("has_labeler", &self.labeler.is_some())
            .field("data_bounds", &self.data_bounds)
            .field("visible_data_bounds", &self.visible_data_bounds)
            .field("layout", &self.layout)
            .field("separators", &self.separators.len())
            .finish()
    }
}

impl Axis {
    #[must_use]
    pub fn new(orientation: AxisOrientation, options: AxisOptions) -> Self {
        Self {
            id: AxisId::next(),
            orientation,
            options,
            labeler: None,
            data_bounds: Bounds::empty(),
            visible_data_bounds: Bounds::empty(),
            layout: AxisLayout::default(),
            separators: SeparatorPool::default(),
            previous_frame: None,
        }
    }

    #[must_use]
    pub fn x(options: AxisOptions) -> Self {
        Self::new(AxisOrientation::X, options)
    }

    #[must_use]
    pub fn y(options: AxisOptions) -> Self {
        Self::new(AxisOrientation::Y, options)
    }

    #[must_use]
    pub fn with_labeler<F>(mut self, labeler: F) -> Self
    where
        F: Fn(f64) -> ChartResult<String> + Send + Sync + 'static,
    {
        self.labeler = Some(Arc::new(labeler));
        self
    }

    pub fn set_labeler(&mut self, labeler: Option<LabelerFn>) {
        self.labeler = labeler;
    }

    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn options(&self) -> &AxisOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut AxisOptions {
        &mut self.options
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.options.is_visible
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.options.name {
            Some(name) => name.clone(),
            None => format!("{:?} axis #{}", self.orientation, self.id.raw()),
        }
    }

    #[must_use]
    pub fn data_bounds(&self) -> &Bounds {
        &self.data_bounds
    }

    #[must_use]
    pub fn visible_data_bounds(&self) -> &Bounds {
        &self.visible_data_bounds
    }

    pub(crate) fn data_bounds_mut(&mut self) -> &mut Bounds {
        &mut self.data_bounds
    }

    pub(crate) fn visible_data_bounds_mut(&mut self) -> &mut Bounds {
        &mut self.visible_data_bounds
    }

    #[must_use]
    pub fn layout(&self) -> &AxisLayout {
        &self.layout
    }

    pub(crate) fn layout_mut(&mut self) -> &mut AxisLayout {
        &mut self.layout
    }

    /// Number of separators currently held in the axis pool.
    #[must_use]
    pub fn separator_count(&self) -> usize {
        self.separators.len()
    }

    #[must_use]
    pub fn separators(&self) -> &SeparatorPool {
        &self.separators
    }

    pub(crate) fn reset_bounds(&mut self) {
        self.data_bounds = Bounds::empty();
        self.visible_data_bounds = Bounds::empty();
    }

    fn half_unit_width(&self) -> f64 {
        if self.options.unit_width.is_finite() && self.options.unit_width > 0.0 {
            self.options.unit_width * 0.5
        } else {
            0.5
        }
    }

    /// Range used for scaling: user limits first, then visible bounds, then
    /// data bounds. Always finite and non-degenerate.
    #[must_use]
    pub fn visible_range(&self) -> (f64, f64) {
        let base = if self.visible_data_bounds.is_empty() {
            &self.data_bounds
        } else {
            &self.visible_data_bounds
        };
        let (fallback_min, fallback_max) = if base.is_empty() {
            (0.0, 20.0 * self.half_unit_width())
        } else {
            (base.min(), base.max())
        };

        let mut min = self.options.min_limit.unwrap_or(fallback_min);
        let mut max = self.options.max_limit.unwrap_or(fallback_max);
        if !min.is_finite() {
            min = fallback_min;
        }
        if !max.is_finite() {
            max = fallback_max;
        }
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        if min == max {
            let half = degenerate_half_width(min, self.half_unit_width());
            min -= half;
            max += half;
        }
        (min, max)
    }

    /// Limits snapshot of this axis alone, without shared-group members.
    #[must_use]
    pub fn own_limit(&self) -> AxisLimit {
        let (min, max) = self.visible_range();
        let (data_min, data_max) = if self.data_bounds.is_empty() {
            (min, max)
        } else {
            (self.data_bounds.min(), self.data_bounds.max())
        };
        let min_zoom_delta = self
            .options
            .min_zoom_delta
            .unwrap_or(self.data_bounds.min_delta() * 3.0);

        if !min_zoom_delta.is_finite() {
            // No data gaps to derive a floor from: the current window is both
            // the zoomable span and the data range.
            return AxisLimit {
                min,
                max,
                min_zoom_delta: max - min,
                data_min: min,
                data_max: max,
            };
        }

        AxisLimit {
            min,
            max,
            min_zoom_delta,
            data_min,
            data_max,
        }
    }

    /// Sets user limits; inverted pairs are swapped.
    pub fn set_limits(&mut self, min: f64, max: f64) {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        self.options.min_limit = Some(min);
        self.options.max_limit = Some(max);
    }

    pub fn reset_limits(&mut self) {
        self.options.min_limit = None;
        self.options.max_limit = None;
    }

    /// Formats one tick value, degrading to an empty label on labeler failure.
    #[must_use]
    pub fn label(&self, value: f64) -> String {
        match &self.labeler {
            Some(labeler) => match labeler(value) {
                Ok(text) => text,
                Err(err) => {
                    warn!(
                        axis = %self.display_name(),
                        value,
                        error = %err,
                        "axis labeler failed; using empty label"
                    );
                    String::new()
                }
            },
            None => default_label(value),
        }
    }
}

/// Default tick label: shortest representation after rounding away float noise.
#[must_use]
pub fn default_label(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let rounded = (value * 1e9).round() / 1e9;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    format!("{rounded}")
}

fn default_true() -> bool {
    true
}

fn default_unit_width() -> f64 {
    1.0
}

fn default_name_font_size_px() -> f64 {
    14.0
}

fn default_labels_font_size_px() -> f64 {
    12.0
}

fn default_labels_padding() -> Margin {
    Margin::uniform(3.0)
}

fn default_separators_paint() -> Option<Color> {
    Some(Color::rgba(0.82, 0.82, 0.82, 1.0))
}

fn default_labels_paint() -> Option<Color> {
    Some(Color::rgb(0.35, 0.35, 0.35))
}

fn default_tick_length_px() -> f64 {
    5.0
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisLimit, AxisOptions, default_label};
    use crate::error::ChartError;

    #[test]
    fn default_label_hides_float_noise() {
        assert_eq!(default_label(0.1 + 0.2), "0.3");
        assert_eq!(default_label(-0.0), "0");
        assert_eq!(default_label(110.0), "110");
        assert_eq!(default_label(0.00001), "0.00001");
    }

    #[test]
    fn failing_labeler_degrades_to_empty_text() {
        let axis = Axis::x(AxisOptions::default())
            .with_labeler(|_| Err(ChartError::InvalidData("boom".to_owned())));
        assert_eq!(axis.label(3.0), "");
    }

    #[test]
    fn visible_range_prefers_user_limits_and_never_degenerates() {
        let mut axis = Axis::y(AxisOptions::default());
        axis.visible_data_bounds_mut().set_range(2.0, 8.0);
        assert_eq!(axis.visible_range(), (2.0, 8.0));

        axis.set_limits(5.0, 5.0);
        assert_eq!(axis.visible_range(), (4.5, 5.5));

        axis.set_limits(9.0, 1.0);
        assert_eq!(axis.visible_range(), (1.0, 9.0));
    }

    #[test]
    fn own_limit_without_data_gaps_falls_back_to_current_window() {
        let mut axis = Axis::x(AxisOptions::default());
        axis.data_bounds_mut().set_range(0.0, 10.0);
        let limit = axis.own_limit();
        assert_eq!(
            limit,
            AxisLimit {
                min: 0.0,
                max: 10.0,
                min_zoom_delta: 10.0,
                data_min: 0.0,
                data_max: 10.0,
            }
        );
    }

    #[test]
    fn own_limit_uses_three_times_min_delta_as_zoom_floor() {
        let mut axis = Axis::x(AxisOptions::default());
        axis.data_bounds_mut().set_range(0.0, 10.0);
        axis.data_bounds_mut().set_min_delta(0.5);
        assert_eq!(axis.own_limit().min_zoom_delta, 1.5);
    }
}
