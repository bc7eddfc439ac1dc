use std::collections::HashSet;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::axis::{Axis, AxisOrientation, AxisPosition};
use crate::core::scaler::Scaler;
use crate::core::ticks::{enumerate_separators, resolve_axis_step, resolve_tick_step};
use crate::core::types::{Rect, Size};
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, Renderer, TextHAlign, TextPrimitive, VisualGeometry, VisualHandle,
    VisualKind, VisualState, VisualUpdateMode,
};

const SEPARATOR_STROKE_PX: f64 = 1.0;

/// Geometry an axis was last drawn with; the animation origin of the next pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    pub scaler: Scaler,
    pub draw_margin: Rect,
    pub labels_origin_px: f64,
    pub step: Option<f64>,
}

/// Drawables of one rendered tick value.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualSeparator {
    value: f64,
    line: Option<VisualHandle>,
    tick: Option<VisualHandle>,
    sub_ticks: SmallVec<[VisualHandle; 4]>,
    label: Option<VisualHandle>,
}

impl VisualSeparator {
    fn new(value: f64) -> Self {
        Self {
            value,
            line: None,
            tick: None,
            sub_ticks: SmallVec::new(),
            label: None,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn line(&self) -> Option<VisualHandle> {
        self.line
    }

    #[must_use]
    pub fn tick(&self) -> Option<VisualHandle> {
        self.tick
    }

    #[must_use]
    pub fn sub_ticks(&self) -> &[VisualHandle] {
        &self.sub_ticks
    }

    #[must_use]
    pub fn label(&self) -> Option<VisualHandle> {
        self.label
    }
}

/// Separators of one axis keyed by label text.
///
/// Keys are labels rather than values so ticks that format identically
/// collapse into one drawable set.
#[derive(Debug, Default)]
pub struct SeparatorPool {
    entries: IndexMap<String, VisualSeparator>,
}

impl SeparatorPool {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&VisualSeparator> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VisualSeparator)> {
        self.entries.iter().map(|(key, sep)| (key.as_str(), sep))
    }
}

/// Per-pass style snapshot, detached from the axis borrow.
#[derive(Debug, Clone, Copy)]
struct SeparatorStyle {
    orientation: AxisOrientation,
    position: AxisPosition,
    separators_paint: Option<Color>,
    ticks_paint: Option<Color>,
    sub_ticks_paint: Option<Color>,
    labels_paint: Option<Color>,
    labels_font_size_px: f64,
    tick_length_px: f64,
    sub_separators_count: usize,
}

impl SeparatorStyle {
    fn of(axis: &Axis) -> Self {
        let options = axis.options();
        Self {
            orientation: axis.orientation(),
            position: options.position,
            separators_paint: options.separators_paint,
            ticks_paint: options.ticks_paint,
            sub_ticks_paint: options.sub_ticks_paint,
            labels_paint: options.labels_paint,
            labels_font_size_px: options.labels_font_size_px,
            tick_length_px: options.tick_length_px,
            sub_separators_count: options.sub_separators_count,
        }
    }

    fn line(&self, frame: &AxisFrame, value: f64, color: Color) -> VisualGeometry {
        let at = frame.scaler.to_pixels(value);
        let dm = frame.draw_margin;
        let line = match self.orientation {
            AxisOrientation::X => {
                LinePrimitive::new(at, dm.y, at, dm.bottom(), SEPARATOR_STROKE_PX, color)
            }
            AxisOrientation::Y => {
                LinePrimitive::new(dm.x, at, dm.right(), at, SEPARATOR_STROKE_PX, color)
            }
        };
        VisualGeometry::Line(line)
    }

    fn tick(&self, frame: &AxisFrame, value: f64, length: f64, color: Color) -> VisualGeometry {
        let at = frame.scaler.to_pixels(value);
        let dm = frame.draw_margin;
        let line = match (self.orientation, self.position) {
            (AxisOrientation::X, AxisPosition::Start) => LinePrimitive::new(
                at,
                dm.bottom(),
                at,
                dm.bottom() + length,
                SEPARATOR_STROKE_PX,
                color,
            ),
            (AxisOrientation::X, AxisPosition::End) => {
                LinePrimitive::new(at, dm.y - length, at, dm.y, SEPARATOR_STROKE_PX, color)
            }
            (AxisOrientation::Y, AxisPosition::Start) => {
                LinePrimitive::new(dm.x - length, at, dm.x, at, SEPARATOR_STROKE_PX, color)
            }
            (AxisOrientation::Y, AxisPosition::End) => LinePrimitive::new(
                dm.right(),
                at,
                dm.right() + length,
                at,
                SEPARATOR_STROKE_PX,
                color,
            ),
        };
        VisualGeometry::Line(line)
    }

    fn label(&self, frame: &AxisFrame, value: f64, text: &str, color: Color) -> VisualGeometry {
        let at = frame.scaler.to_pixels(value);
        let (x, y) = match self.orientation {
            AxisOrientation::X => (at, frame.labels_origin_px),
            AxisOrientation::Y => (frame.labels_origin_px, at),
        };
        VisualGeometry::Text(TextPrimitive::new(
            text,
            x,
            y,
            self.labels_font_size_px,
            color,
            TextHAlign::Center,
        ))
    }

    fn sub_tick_value(&self, frame: &AxisFrame, value: f64, index: usize) -> f64 {
        let step = frame.step.unwrap_or(0.0);
        value + step * (index as f64 + 1.0) / (self.sub_separators_count as f64 + 1.0)
    }
}

/// Keeps one optional drawable in sync with its paint.
///
/// New visuals are born faded at the previous frame's position and snap
/// there before animating to the current frame; unpainted ones fade out.
fn sync_visual<F>(
    renderer: &mut dyn Renderer,
    slot: &mut Option<VisualHandle>,
    kind: VisualKind,
    paint: Option<Color>,
    previous: &AxisFrame,
    current: &AxisFrame,
    geometry: F,
) -> ChartResult<()>
where
    F: Fn(&AxisFrame, Color) -> VisualGeometry,
{
    match (paint, *slot) {
        (Some(color), None) => {
            let handle = renderer.create_visual(kind);
            renderer.update_visual(
                handle,
                VisualState::faded(geometry(previous, color)),
                VisualUpdateMode::UpdateAndComplete,
            )?;
            renderer.update_visual(
                handle,
                VisualState::visible(geometry(current, color)),
                VisualUpdateMode::Update,
            )?;
            *slot = Some(handle);
        }
        (Some(color), Some(handle)) => {
            renderer.update_visual(
                handle,
                VisualState::visible(geometry(current, color)),
                VisualUpdateMode::Update,
            )?;
        }
        (None, Some(handle)) => {
            // Paint was removed: fade with a neutral color at the current spot.
            renderer.update_visual(
                handle,
                VisualState::faded(geometry(current, Color::rgba(0.0, 0.0, 0.0, 0.0))),
                VisualUpdateMode::UpdateAndRemove,
            )?;
            *slot = None;
        }
        (None, None) => {}
    }
    Ok(())
}

fn sync_separator(
    renderer: &mut dyn Renderer,
    separator: &mut VisualSeparator,
    text: &str,
    style: &SeparatorStyle,
    previous: &AxisFrame,
    current: &AxisFrame,
) -> ChartResult<()> {
    let value = separator.value;

    sync_visual(
        renderer,
        &mut separator.line,
        VisualKind::SeparatorLine,
        style.separators_paint,
        previous,
        current,
        |frame, color| style.line(frame, value, color),
    )?;
    sync_visual(
        renderer,
        &mut separator.tick,
        VisualKind::Tick,
        style.ticks_paint,
        previous,
        current,
        |frame, color| style.tick(frame, value, style.tick_length_px, color),
    )?;

    let sub_count = if current.step.is_some() {
        style.sub_separators_count
    } else {
        0
    };
    let slots = sub_count.max(separator.sub_ticks.len());
    let mut kept: SmallVec<[VisualHandle; 4]> = SmallVec::new();
    for index in 0..slots {
        let mut slot = separator.sub_ticks.get(index).copied();
        let paint = if index < sub_count {
            style.sub_ticks_paint
        } else {
            None
        };
        sync_visual(
            renderer,
            &mut slot,
            VisualKind::SubTick,
            paint,
            previous,
            current,
            |frame, color| {
                let at = style.sub_tick_value(frame, value, index);
                style.tick(frame, at, style.tick_length_px * 0.5, color)
            },
        )?;
        if let Some(handle) = slot {
            kept.push(handle);
        }
    }
    separator.sub_ticks = kept;

    sync_visual(
        renderer,
        &mut separator.label,
        VisualKind::Label,
        style.labels_paint,
        previous,
        current,
        |frame, color| style.label(frame, value, text, color),
    )
}

fn fade_out_separator(
    renderer: &mut dyn Renderer,
    separator: &mut VisualSeparator,
    text: &str,
    style: &SeparatorStyle,
    frame: &AxisFrame,
) -> ChartResult<()> {
    let unpainted = SeparatorStyle {
        separators_paint: None,
        ticks_paint: None,
        sub_ticks_paint: None,
        labels_paint: None,
        ..*style
    };
    sync_separator(renderer, separator, text, &unpainted, frame, frame)
}

/// Tick values for `axis` over `[min, max]` and the step used, if any.
///
/// Custom separators bypass step enumeration entirely.
pub(crate) fn separator_values(
    axis: &Axis,
    draw_size: Size,
    min: f64,
    max: f64,
) -> ChartResult<(Vec<f64>, Option<f64>)> {
    if let Some(custom) = &axis.options().custom_separators {
        let values = custom.iter().copied().filter(|v| v.is_finite()).collect();
        return Ok((values, None));
    }

    let tick = resolve_tick_step(axis.orientation(), draw_size, min, max);
    let step = resolve_axis_step(axis.options(), tick);
    let values = enumerate_separators(min, max, step, &axis.display_name())?;
    Ok((values, Some(step)))
}

/// Runs the separator lifecycle for one axis against the final draw margin.
///
/// Returns the number of separators enumerated in this pass.
pub(crate) fn invalidate_separators(
    axis: &mut Axis,
    draw_margin: Rect,
    renderer: &mut dyn Renderer,
) -> ChartResult<usize> {
    let scaler = Scaler::for_axis(draw_margin, axis)?;
    let (min, max) = scaler.range();
    let (values, step) = separator_values(axis, draw_margin.size(), min, max)?;

    let current = AxisFrame {
        scaler,
        draw_margin,
        labels_origin_px: axis.layout().labels_origin_px,
        step,
    };
    let previous = axis.previous_frame.unwrap_or(current);
    let style = SeparatorStyle::of(axis);

    let labeled: Vec<(f64, String)> = values
        .iter()
        .copied()
        .map(|value| (value, axis.label(value)))
        .collect();

    let pool = &mut axis.separators.entries;
    let mut measured: HashSet<String> = HashSet::with_capacity(labeled.len());
    for (value, text) in &labeled {
        let separator = pool
            .entry(text.clone())
            .or_insert_with(|| VisualSeparator::new(*value));
        separator.value = *value;
        sync_separator(renderer, separator, text, &style, &previous, &current)?;
        measured.insert(text.clone());
    }

    let stale: Vec<String> = pool
        .keys()
        .filter(|key| !measured.contains(*key))
        .cloned()
        .collect();
    for key in &stale {
        if let Some(mut separator) = pool.shift_remove(key) {
            fade_out_separator(renderer, &mut separator, key, &style, &current)?;
        }
    }

    trace!(
        axis = %axis.display_name(),
        enumerated = labeled.len(),
        kept = axis.separators.len(),
        removed = stale.len(),
        "separators invalidated"
    );

    axis.previous_frame = Some(current);
    Ok(labeled.len())
}

/// Fades out every separator of an axis that is hidden or no longer part of
/// the chart.
pub(crate) fn remove_separators(axis: &mut Axis, renderer: &mut dyn Renderer) -> ChartResult<()> {
    let Some(frame) = axis.previous_frame.take() else {
        return Ok(());
    };
    let style = SeparatorStyle::of(axis);
    let entries = std::mem::take(&mut axis.separators.entries);
    for (key, mut separator) in entries {
        fade_out_separator(renderer, &mut separator, &key, &style, &frame)?;
    }
    Ok(())
}
