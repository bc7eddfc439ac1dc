use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use crate::core::separators::{invalidate_separators, remove_separators, separator_values};
use crate::core::{
    Axis, AxisLayout, AxisOrientation, AxisPosition, Margin, Rect, Scaler, SeriesContext,
    SeriesKind, Size,
};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::chart::ElementKey;
use super::shared_axes::share_group_bounds;
use super::{CartesianChart, ChromeLayout, LegendPosition};

/// Result of one measure pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureOutcome {
    Completed {
        draw_margin: Rect,
        /// Separators enumerated across every visible axis.
        separators: usize,
    },
    /// The draw margin collapsed; visuals of the previous pass were kept.
    Aborted { control_size: Size },
}

impl MeasureOutcome {
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Space an axis needs outside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct AxisFootprint {
    labels: Size,
    /// Already rotated for Y axes.
    name: Size,
    thickness: f64,
    /// Distance from the draw-margin edge to the inner side of the band.
    offset: f64,
}

/// Additive per-side margin. Axis bands stack outwards from the plot edge;
/// title and legend sit outside of them.
#[derive(Debug, Clone, Copy, Default)]
struct MarginAccumulator {
    axes: Margin,
    chrome: Margin,
}

impl MarginAccumulator {
    fn seed_chrome(chrome: ChromeLayout) -> Self {
        let mut reserved = Margin::default();
        if let Some(title) = chrome.title_size {
            reserved.top += title.height;
        }
        let legend = chrome.legend_size;
        match chrome.legend_position {
            LegendPosition::Hidden => {}
            LegendPosition::Top => reserved.top += legend.height,
            LegendPosition::Bottom => reserved.bottom += legend.height,
            LegendPosition::Left => reserved.left += legend.width,
            LegendPosition::Right => reserved.right += legend.width,
        }
        Self {
            axes: Margin::default(),
            chrome: reserved,
        }
    }

    /// Reserves a band and returns its offset from the plot edge.
    fn reserve_axis(
        &mut self,
        orientation: AxisOrientation,
        position: AxisPosition,
        thickness: f64,
    ) -> f64 {
        let side = match (orientation, position) {
            (AxisOrientation::X, AxisPosition::Start) => &mut self.axes.bottom,
            (AxisOrientation::X, AxisPosition::End) => &mut self.axes.top,
            (AxisOrientation::Y, AxisPosition::Start) => &mut self.axes.left,
            (AxisOrientation::Y, AxisPosition::End) => &mut self.axes.right,
        };
        let offset = *side;
        *side += thickness;
        offset
    }

    fn total(self) -> Margin {
        Margin::new(
            self.axes.left + self.chrome.left,
            self.axes.top + self.chrome.top,
            self.axes.right + self.chrome.right,
            self.axes.bottom + self.chrome.bottom,
        )
    }
}

/// Measures labels and name of `axis` with a scaler over the provisional
/// (previous pass) draw margin.
fn axis_footprint(
    axis: &Axis,
    provisional: Rect,
    renderer: &dyn Renderer,
) -> ChartResult<AxisFootprint> {
    let options = axis.options();
    let padding = options.padding;

    let mut labels = Size::zero();
    if options.labels_paint.is_some() {
        let scaler = Scaler::for_axis(provisional, axis)?;
        let (min, max) = scaler.range();
        let (values, _) = separator_values(axis, provisional.size(), min, max)?;
        for value in values {
            let size = renderer.measure_text(&axis.label(value), options.labels_font_size_px);
            labels.width = labels.width.max(size.width);
            labels.height = labels.height.max(size.height);
        }
        labels.width += padding.left + padding.right;
        labels.height += padding.top + padding.bottom;
    }

    let mut name = Size::zero();
    if let Some(text) = options.name.as_deref().filter(|text| !text.is_empty()) {
        let size = renderer.measure_text(text, options.name_font_size_px);
        name = Size::new(
            size.width + padding.left + padding.right,
            size.height + padding.top + padding.bottom,
        );
        if axis.orientation() == AxisOrientation::Y {
            name = Size::new(name.height, name.width);
        }
    }

    let (label_side, name_side) = match axis.orientation() {
        AxisOrientation::X => (labels.height, name.height),
        AxisOrientation::Y => (labels.width, name.width),
    };
    let thickness = if options.in_line_name_placement {
        label_side.max(name_side)
    } else {
        label_side + name_side
    };

    Ok(AxisFootprint {
        labels,
        name,
        thickness,
        offset: 0.0,
    })
}

/// Labels and name rectangles of one axis around the final draw margin.
/// Labels sit next to the plot, the name further out unless placed in line.
fn axis_layout(
    orientation: AxisOrientation,
    position: AxisPosition,
    in_line: bool,
    footprint: AxisFootprint,
    draw: Rect,
) -> AxisLayout {
    let AxisFootprint {
        labels,
        name,
        offset,
        ..
    } = footprint;

    let (labels_desired, name_desired) = match (orientation, position) {
        (AxisOrientation::X, AxisPosition::Start) => {
            let band = draw.bottom() + offset;
            let name_y = if in_line { band } else { band + labels.height };
            (
                Rect::new(draw.x, band, draw.width, labels.height),
                Rect::new(draw.x, name_y, draw.width, name.height),
            )
        }
        (AxisOrientation::X, AxisPosition::End) => {
            let band = draw.y - offset;
            let labels_y = band - labels.height;
            let name_y = if in_line { band - name.height } else { labels_y - name.height };
            (
                Rect::new(draw.x, labels_y, draw.width, labels.height),
                Rect::new(draw.x, name_y, draw.width, name.height),
            )
        }
        (AxisOrientation::Y, AxisPosition::Start) => {
            let band = draw.x - offset;
            let labels_x = band - labels.width;
            let name_x = if in_line { band - name.width } else { labels_x - name.width };
            (
                Rect::new(labels_x, draw.y, labels.width, draw.height),
                Rect::new(name_x, draw.y, name.width, draw.height),
            )
        }
        (AxisOrientation::Y, AxisPosition::End) => {
            let band = draw.right() + offset;
            let name_x = if in_line { band } else { band + labels.width };
            (
                Rect::new(band, draw.y, labels.width, draw.height),
                Rect::new(name_x, draw.y, name.width, draw.height),
            )
        }
    };

    let labels_origin_px = match orientation {
        AxisOrientation::X => labels_desired.center().y,
        AxisOrientation::Y => labels_desired.center().x,
    };

    AxisLayout {
        labels_size: labels,
        name_size: name,
        labels_desired,
        name_desired,
        labels_origin_px,
    }
}

/// Expands unset limit sides by the series marker footprint converted to
/// data units. A Y axis fed only by columns keeps zero in view instead when
/// every value shares a sign.
fn pad_axis_bounds(axis: &mut Axis, draw: Rect, keep_zero: bool) -> ChartResult<()> {
    let options = axis.options();
    let pad_min = options.min_limit.is_none();
    let pad_max = options.max_limit.is_none();
    if !pad_min && !pad_max {
        return Ok(());
    }

    let scaler = Scaler::for_axis(draw, axis)?;
    let bounds = *axis.data_bounds();
    let footprint = scaler.to_chart_values(bounds.requested_geometry_size())
        - scaler.to_chart_values(0.0);
    let geometry = footprint.abs() * 0.5;

    let mut below = if pad_min { geometry.max(bounds.padding_min()) } else { 0.0 };
    let mut above = if pad_max { geometry.max(bounds.padding_max()) } else { 0.0 };
    if keep_zero {
        if pad_min && bounds.min() >= 0.0 {
            below = bounds.min();
        }
        if pad_max && bounds.max() <= 0.0 {
            above = -bounds.max();
        }
    }

    axis.data_bounds_mut().expand(below, above);
    axis.visible_data_bounds_mut().expand(below, above);
    trace!(
        axis = %axis.display_name(),
        below,
        above,
        min = axis.data_bounds().min(),
        max = axis.data_bounds().max(),
        "axis bounds padded"
    );
    Ok(())
}

fn seed_axis_bounds(axis: &mut Axis) {
    let unit_width = axis.options().unit_width;
    if axis.data_bounds().is_empty() {
        axis.data_bounds_mut().set_range(0.0, 10.0 * unit_width);
    }
    axis.data_bounds_mut().widen_if_degenerate(unit_width * 0.5);
    axis.visible_data_bounds_mut().widen_if_degenerate(unit_width * 0.5);
}

impl<R: Renderer> CartesianChart<R> {
    /// Runs one full measure pass.
    ///
    /// Configuration errors (such as an excessive separator count) bubble up.
    /// A collapsed draw margin aborts the pass before any visual is touched.
    pub fn measure(&mut self) -> ChartResult<MeasureOutcome> {
        let control = self.config.control_size;
        if !control.is_valid() {
            return Ok(self.abort_pass(control));
        }

        let column_only_y = self.collect_bounds();

        let provisional = self
            .draw_margin
            .unwrap_or_else(|| Rect::from_size(control));
        let mut margins = MarginAccumulator::seed_chrome(self.config.chrome);
        let x_footprints = self.measure_axes(AxisOrientation::X, provisional, &mut margins)?;
        let y_footprints = self.measure_axes(AxisOrientation::Y, provisional, &mut margins)?;

        let margin = self.config.draw_margin.resolve(margins.total());
        let draw = margin.inset(control);
        if !(draw.width > 0.0 && draw.height > 0.0) {
            return Ok(self.abort_pass(control));
        }

        for (axis, footprint) in self.x_axes.iter_mut().zip(&x_footprints) {
            if let Some(footprint) = footprint {
                let position = axis.options().position;
                let in_line = axis.options().in_line_name_placement;
                *axis.layout_mut() =
                    axis_layout(AxisOrientation::X, position, in_line, *footprint, draw);
            }
        }
        for (axis, footprint) in self.y_axes.iter_mut().zip(&y_footprints) {
            if let Some(footprint) = footprint {
                let position = axis.options().position;
                let in_line = axis.options().in_line_name_placement;
                *axis.layout_mut() =
                    axis_layout(AxisOrientation::Y, position, in_line, *footprint, draw);
            }
        }

        for axis in &mut self.x_axes {
            pad_axis_bounds(axis, draw, false)?;
        }
        for (index, axis) in self.y_axes.iter_mut().enumerate() {
            let keep_zero = column_only_y.get(index).copied().unwrap_or(false);
            pad_axis_bounds(axis, draw, keep_zero)?;
        }

        let mut drawn = IndexSet::new();
        let separators = self.invalidate_elements(draw, &mut drawn)?;
        self.retire_elements(&drawn)?;
        self.drawn = drawn;

        self.draw_margin = Some(draw);
        self.pass_count += 1;
        let outcome = MeasureOutcome::Completed {
            draw_margin: draw,
            separators,
        };
        self.last_outcome = Some(outcome);
        debug!(
            pass = self.pass_count,
            x = draw.x,
            y = draw.y,
            width = draw.width,
            height = draw.height,
            x_axes = self.x_axes.len(),
            y_axes = self.y_axes.len(),
            series = self.series.len(),
            separators,
            "measure pass completed"
        );
        Ok(outcome)
    }

    fn abort_pass(&mut self, control_size: Size) -> MeasureOutcome {
        warn!(
            width = control_size.width,
            height = control_size.height,
            "draw margin is not positive; measure pass aborted"
        );
        let outcome = MeasureOutcome::Aborted { control_size };
        self.last_outcome = Some(outcome);
        outcome
    }

    /// Steps 1 to 3 of the pass: reset, accumulate series bounds, share them
    /// across groups and seed empty axes. Returns, per Y axis, whether every
    /// series drawing to it is a column series.
    fn collect_bounds(&mut self) -> Vec<bool> {
        for axis in self.x_axes.iter_mut().chain(self.y_axes.iter_mut()) {
            axis.reset_bounds();
        }

        let mut column_only: Vec<Option<bool>> = vec![None; self.y_axes.len()];
        for series in &self.series {
            if !series.is_visible() {
                continue;
            }
            let (x_index, y_index) = (series.x_axis_index(), series.y_axis_index());
            let (Some(x_axis), Some(y_axis)) = (self.x_axes.get(x_index), self.y_axes.get(y_index))
            else {
                warn!(
                    series = series.id().raw(),
                    x_index, y_index, "series points to a missing axis; skipped"
                );
                continue;
            };
            let bounds = series.bounds(x_axis, y_axis);

            let x_axis = &mut self.x_axes[x_index];
            x_axis.data_bounds_mut().append_bounds(&bounds.secondary);
            x_axis
                .visible_data_bounds_mut()
                .append_bounds(&bounds.visible_secondary);

            let y_axis = &mut self.y_axes[y_index];
            y_axis.data_bounds_mut().append_bounds(&bounds.primary);
            y_axis
                .visible_data_bounds_mut()
                .append_bounds(&bounds.visible_primary);

            let is_column = series.kind() == SeriesKind::Column;
            column_only[y_index] = Some(column_only[y_index].unwrap_or(true) && is_column);
        }

        share_group_bounds(&mut self.x_axes);
        share_group_bounds(&mut self.y_axes);

        for axis in self.x_axes.iter_mut().chain(self.y_axes.iter_mut()) {
            seed_axis_bounds(axis);
        }

        column_only
            .into_iter()
            .map(|flag| flag.unwrap_or(false))
            .collect()
    }

    fn measure_axes(
        &self,
        orientation: AxisOrientation,
        provisional: Rect,
        margins: &mut MarginAccumulator,
    ) -> ChartResult<Vec<Option<AxisFootprint>>> {
        let mut footprints = Vec::with_capacity(self.axes(orientation).len());
        for axis in self.axes(orientation) {
            if !axis.is_visible() {
                footprints.push(None);
                continue;
            }
            let mut footprint = axis_footprint(axis, provisional, &self.renderer)?;
            footprint.offset =
                margins.reserve_axis(orientation, axis.options().position, footprint.thickness);
            trace!(
                axis = %axis.display_name(),
                thickness = footprint.thickness,
                offset = footprint.offset,
                "axis footprint measured"
            );
            footprints.push(Some(footprint));
        }
        Ok(footprints)
    }

    /// Step 9: separators of every axis, then every series.
    fn invalidate_elements(
        &mut self,
        draw: Rect,
        drawn: &mut IndexSet<ElementKey>,
    ) -> ChartResult<usize> {
        let mut separators = 0;
        for axis in self.x_axes.iter_mut().chain(self.y_axes.iter_mut()) {
            if axis.is_visible() {
                separators += invalidate_separators(axis, draw, &mut self.renderer)?;
                drawn.insert(ElementKey::Axis(axis.id()));
            } else {
                remove_separators(axis, &mut self.renderer)?;
            }
        }

        for series in &mut self.series {
            if !series.is_visible() {
                series.remove_from_ui(&mut self.renderer)?;
                continue;
            }
            let (Some(x_axis), Some(y_axis)) = (
                self.x_axes.get(series.x_axis_index()),
                self.y_axes.get(series.y_axis_index()),
            ) else {
                continue;
            };
            let context = SeriesContext {
                draw_margin: draw,
                x_scaler: Scaler::for_axis(draw, x_axis)?,
                y_scaler: Scaler::for_axis(draw, y_axis)?,
            };
            series.invalidate(&context, &mut self.renderer)?;
            drawn.insert(ElementKey::Series(series.id()));
        }
        Ok(separators)
    }

    /// Step 10: fades out elements drawn before but absent from this pass.
    fn retire_elements(&mut self, drawn: &IndexSet<ElementKey>) -> ChartResult<()> {
        let retired_axes = std::mem::take(&mut self.retired_axes);
        let retired_series = std::mem::take(&mut self.retired_series);
        let mut removed = 0usize;

        for mut axis in retired_axes {
            if !drawn.contains(&ElementKey::Axis(axis.id())) {
                remove_separators(&mut axis, &mut self.renderer)?;
                removed += 1;
            }
        }
        for mut series in retired_series {
            if !drawn.contains(&ElementKey::Series(series.id())) {
                series.remove_from_ui(&mut self.renderer)?;
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(removed, "retired chart elements faded out");
        }
        Ok(())
    }
}
