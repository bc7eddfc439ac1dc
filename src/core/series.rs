use std::sync::atomic::{AtomicU64, Ordering};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::axis::Axis;
use crate::core::bounds::Bounds;
use crate::core::scaler::Scaler;
use crate::core::types::{Point, Rect};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, Renderer, VisualGeometry, VisualHandle, VisualKind, VisualState,
    VisualUpdateMode,
};

/// Process-unique series identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u64);

impl SeriesId {
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    /// Columns grow from zero; a Y axis fed only by columns keeps zero in view.
    Column,
    Scatter,
}

/// Value-space contribution of one series to its X (secondary) and
/// Y (primary) axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeriesBounds {
    pub secondary: Bounds,
    pub primary: Bounds,
    pub visible_secondary: Bounds,
    pub visible_primary: Bounds,
}

/// Final geometry handed to a series during invalidation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesContext {
    pub draw_margin: Rect,
    pub x_scaler: Scaler,
    pub y_scaler: Scaler,
}

impl SeriesContext {
    #[must_use]
    pub fn to_pixels(&self, point: Point) -> Point {
        Point::new(
            self.x_scaler.to_pixels(point.x),
            self.y_scaler.to_pixels(point.y),
        )
    }
}

/// A series as seen by the layout core.
///
/// The core only asks for bounds and hands back scalers; how a series turns
/// them into geometry is its own business.
pub trait ChartSeries: Send {
    fn id(&self) -> SeriesId;

    fn kind(&self) -> SeriesKind;

    fn is_visible(&self) -> bool {
        true
    }

    fn x_axis_index(&self) -> usize {
        0
    }

    fn y_axis_index(&self) -> usize {
        0
    }

    /// Bounds contribution for the current pass. `x_axis` carries the
    /// previous pass limits, used to decide which points are visible.
    fn bounds(&self, x_axis: &Axis, y_axis: &Axis) -> SeriesBounds;

    fn invalidate(
        &mut self,
        context: &SeriesContext,
        renderer: &mut dyn Renderer,
    ) -> ChartResult<()>;

    /// Fades out every visual this series owns.
    fn remove_from_ui(&mut self, renderer: &mut dyn Renderer) -> ChartResult<()>;
}

/// Reference series over `(x, y)` points.
///
/// Lines connect consecutive points, columns are drawn as thick strokes from
/// zero and scatter points as short marks of `geometry_size_px`.
#[derive(Debug)]
pub struct XySeries {
    id: SeriesId,
    kind: SeriesKind,
    points: Vec<Point>,
    x_axis_index: usize,
    y_axis_index: usize,
    is_visible: bool,
    geometry_size_px: f64,
    stroke: Color,
    visuals: Vec<VisualHandle>,
    previous: Option<SeriesContext>,
}

impl XySeries {
    #[must_use]
    pub fn line(points: Vec<Point>) -> Self {
        Self::new(SeriesKind::Line, points)
    }

    #[must_use]
    pub fn column(points: Vec<Point>) -> Self {
        Self::new(SeriesKind::Column, points)
    }

    #[must_use]
    pub fn scatter(points: Vec<Point>) -> Self {
        Self::new(SeriesKind::Scatter, points)
    }

    /// Builds a series; points are sorted by `x` and non-finite ones dropped.
    #[must_use]
    pub fn new(kind: SeriesKind, points: Vec<Point>) -> Self {
        let mut series = Self {
            id: SeriesId::next(),
            kind,
            points: Vec::new(),
            x_axis_index: 0,
            y_axis_index: 0,
            is_visible: true,
            geometry_size_px: default_geometry_size_px(kind),
            stroke: Color::rgb(0.13, 0.45, 0.82),
            visuals: Vec::new(),
            previous: None,
        };
        series.set_points(points);
        series
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis_index: usize, y_axis_index: usize) -> Self {
        self.x_axis_index = x_axis_index;
        self.y_axis_index = y_axis_index;
        self
    }

    pub fn with_geometry_size_px(mut self, size_px: f64) -> ChartResult<Self> {
        if !size_px.is_finite() || size_px < 0.0 {
            return Err(ChartError::InvalidData(
                "series geometry size must be finite and >= 0".to_owned(),
            ));
        }
        self.geometry_size_px = size_px;
        Ok(self)
    }

    pub fn with_stroke(mut self, stroke: Color) -> ChartResult<Self> {
        stroke.validate()?;
        self.stroke = stroke;
        Ok(self)
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        let mut points: Vec<Point> = points.into_iter().filter(|p| p.is_finite()).collect();
        points.sort_by_key(|point| OrderedFloat(point.x));
        self.points = points;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.is_visible = visible;
    }

    #[must_use]
    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    fn visible_points(&self, x_axis: &Axis) -> &[Point] {
        let options = x_axis.options();
        let min = options.min_limit.unwrap_or(f64::NEG_INFINITY);
        let max = options.max_limit.unwrap_or(f64::INFINITY);
        let start = self.points.partition_point(|p| p.x < min);
        let end = self.points.partition_point(|p| p.x <= max);
        if start >= end {
            return &[];
        }
        &self.points[start..end]
    }

    fn geometries(&self, context: &SeriesContext, color: Color) -> Vec<VisualGeometry> {
        match self.kind {
            SeriesKind::Line => self
                .points
                .windows(2)
                .map(|pair| {
                    let a = context.to_pixels(pair[0]);
                    let b = context.to_pixels(pair[1]);
                    VisualGeometry::Line(LinePrimitive::new(a.x, a.y, b.x, b.y, 1.5, color))
                })
                .collect(),
            SeriesKind::Column => {
                let width = self.geometry_size_px.max(1.0);
                let zero = context.y_scaler.to_pixels(0.0);
                self.points
                    .iter()
                    .map(|point| {
                        let top = context.to_pixels(*point);
                        VisualGeometry::Line(LinePrimitive::new(
                            top.x, zero, top.x, top.y, width, color,
                        ))
                    })
                    .collect()
            }
            SeriesKind::Scatter => {
                let half = self.geometry_size_px.max(1.0) * 0.5;
                self.points
                    .iter()
                    .map(|point| {
                        let at = context.to_pixels(*point);
                        VisualGeometry::Line(LinePrimitive::new(
                            at.x - half,
                            at.y,
                            at.x + half,
                            at.y,
                            half * 2.0,
                            color,
                        ))
                    })
                    .collect()
            }
        }
    }
}

fn default_geometry_size_px(kind: SeriesKind) -> f64 {
    match kind {
        SeriesKind::Line => 0.0,
        SeriesKind::Column => 12.0,
        SeriesKind::Scatter => 8.0,
    }
}

impl ChartSeries for XySeries {
    fn id(&self) -> SeriesId {
        self.id
    }

    fn kind(&self) -> SeriesKind {
        self.kind
    }

    fn is_visible(&self) -> bool {
        self.is_visible
    }

    fn x_axis_index(&self) -> usize {
        self.x_axis_index
    }

    fn y_axis_index(&self) -> usize {
        self.y_axis_index
    }

    fn bounds(&self, x_axis: &Axis, _y_axis: &Axis) -> SeriesBounds {
        let mut secondary = Bounds::from_values(self.points.iter().map(|p| p.x));
        let mut primary = Bounds::from_values(self.points.iter().map(|p| p.y));

        let visible = self.visible_points(x_axis);
        let visible_secondary = Bounds::from_values(visible.iter().map(|p| p.x));
        let visible_primary = Bounds::from_values(visible.iter().map(|p| p.y));

        if self.kind == SeriesKind::Column {
            let half_unit = x_axis.options().unit_width * 0.5;
            secondary.set_padding(half_unit, half_unit);
        }
        secondary.set_requested_geometry_size(self.geometry_size_px);
        primary.set_requested_geometry_size(self.geometry_size_px);

        SeriesBounds {
            secondary,
            primary,
            visible_secondary,
            visible_primary,
        }
    }

    fn invalidate(
        &mut self,
        context: &SeriesContext,
        renderer: &mut dyn Renderer,
    ) -> ChartResult<()> {
        let targets = self.geometries(context, self.stroke);
        let origins = self
            .previous
            .map(|previous| self.geometries(&previous, self.stroke))
            .unwrap_or_else(|| targets.clone());

        for (index, target) in targets.iter().enumerate() {
            match self.visuals.get(index).copied() {
                Some(handle) => {
                    renderer.update_visual(
                        handle,
                        VisualState::visible(target.clone()),
                        VisualUpdateMode::Update,
                    )?;
                }
                None => {
                    let handle = renderer.create_visual(VisualKind::SeriesSegment);
                    let born = origins.get(index).unwrap_or(target).clone();
                    renderer.update_visual(
                        handle,
                        VisualState::faded(born),
                        VisualUpdateMode::UpdateAndComplete,
                    )?;
                    renderer.update_visual(
                        handle,
                        VisualState::visible(target.clone()),
                        VisualUpdateMode::Update,
                    )?;
                    self.visuals.push(handle);
                }
            }
        }

        if self.visuals.len() > targets.len() {
            let stale = self.visuals.split_off(targets.len());
            let corner = context.draw_margin.location();
            let fallback = targets.last().cloned().unwrap_or_else(|| {
                VisualGeometry::Line(LinePrimitive::new(
                    corner.x,
                    corner.y,
                    corner.x,
                    corner.y,
                    1.0,
                    self.stroke,
                ))
            });
            for handle in stale {
                renderer.update_visual(
                    handle,
                    VisualState::faded(fallback.clone()),
                    VisualUpdateMode::UpdateAndRemove,
                )?;
            }
        }

        self.previous = Some(*context);
        Ok(())
    }

    fn remove_from_ui(&mut self, renderer: &mut dyn Renderer) -> ChartResult<()> {
        let Some(previous) = self.previous.take() else {
            self.visuals.clear();
            return Ok(());
        };
        let geometries = self.geometries(&previous, self.stroke);
        for (index, handle) in std::mem::take(&mut self.visuals).into_iter().enumerate() {
            if let Some(geometry) = geometries.get(index) {
                renderer.update_visual(
                    handle,
                    VisualState::faded(geometry.clone()),
                    VisualUpdateMode::UpdateAndRemove,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartSeries, SeriesContext, SeriesKind, XySeries};
    use crate::core::axis::{Axis, AxisOptions, AxisOrientation};
    use crate::core::scaler::Scaler;
    use crate::core::types::{Point, Rect};
    use crate::render::{RecordingRenderer, VisualKind};

    fn points(ys: &[f64]) -> Vec<Point> {
        ys.iter()
            .enumerate()
            .map(|(i, y)| Point::new(i as f64, *y))
            .collect()
    }

    fn context(max_x: f64) -> SeriesContext {
        let draw_margin = Rect::new(0.0, 0.0, 100.0, 100.0);
        SeriesContext {
            draw_margin,
            x_scaler: Scaler::new(
                draw_margin.location(),
                draw_margin.size(),
                AxisOrientation::X,
                false,
                0.0,
                max_x,
            )
            .expect("x scaler"),
            y_scaler: Scaler::new(
                draw_margin.location(),
                draw_margin.size(),
                AxisOrientation::Y,
                false,
                0.0,
                10.0,
            )
            .expect("y scaler"),
        }
    }

    #[test]
    fn points_are_sorted_and_non_finite_values_dropped() {
        let series = XySeries::line(vec![
            Point::new(3.0, 1.0),
            Point::new(f64::NAN, 2.0),
            Point::new(1.0, 5.0),
        ]);
        let xs: Vec<f64> = series.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
    }

    #[test]
    fn visible_bounds_follow_x_axis_limits() {
        let series = XySeries::line(points(&[1.0, 9.0, 4.0, 2.0]));
        let x_axis = Axis::x(AxisOptions::default().with_limits(Some(1.0), Some(2.0)));
        let y_axis = Axis::y(AxisOptions::default());

        let bounds = series.bounds(&x_axis, &y_axis);
        assert_eq!((bounds.primary.min(), bounds.primary.max()), (1.0, 9.0));
        assert_eq!(
            (bounds.visible_primary.min(), bounds.visible_primary.max()),
            (4.0, 9.0)
        );
        assert_eq!(bounds.secondary.min_delta(), 1.0);
    }

    #[test]
    fn column_bounds_pad_half_a_unit_on_x() {
        let series = XySeries::column(points(&[1.0, 2.0]));
        let bounds = series.bounds(
            &Axis::x(AxisOptions::default()),
            &Axis::y(AxisOptions::default()),
        );
        assert_eq!(bounds.secondary.padding_min(), 0.5);
        assert_eq!(bounds.secondary.padding_max(), 0.5);
        assert_eq!(series.kind(), SeriesKind::Column);
    }

    #[test]
    fn shrinking_series_fades_out_extra_segments() {
        let mut renderer = RecordingRenderer::default();
        let mut series = XySeries::line(points(&[1.0, 2.0, 3.0, 4.0]));
        series.invalidate(&context(3.0), &mut renderer).expect("first pass");
        assert_eq!(renderer.live_count_of(VisualKind::SeriesSegment), 3);

        series.set_points(points(&[1.0, 2.0]));
        series.invalidate(&context(3.0), &mut renderer).expect("second pass");
        assert_eq!(series.visual_count(), 1);
        assert_eq!(renderer.pending_removal_count(), 2);
        assert_eq!(renderer.complete_animations(), 2);
        assert_eq!(renderer.live_count(), 1);
    }
}
