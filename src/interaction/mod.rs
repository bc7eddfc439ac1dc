use serde::{Deserialize, Serialize};

use crate::core::Point;

/// Axes affected by zoom and pan gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZoomAndPanMode {
    None,
    #[default]
    X,
    Y,
    Both,
}

impl ZoomAndPanMode {
    #[must_use]
    pub const fn has_x(self) -> bool {
        matches!(self, Self::X | Self::Both)
    }

    #[must_use]
    pub const fn has_y(self) -> bool {
        matches!(self, Self::Y | Self::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomDirection {
    ZoomIn,
    ZoomOut,
    /// Direction is derived from the sign of `1 - scale_factor`.
    DefinedByScaleFactor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
}

/// Pointer and gesture bookkeeping between input events and throttled
/// application of their effects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    pointer: Point,
    pan_anchor: Point,
    pending_pan: Point,
    tooltip_point: Option<Point>,
    is_zooming_or_panning: bool,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn pointer(self) -> Point {
        self.pointer
    }

    /// Point the tooltip should be resolved at, if the pointer is over the chart.
    #[must_use]
    pub fn tooltip_point(self) -> Option<Point> {
        self.tooltip_point
    }

    #[must_use]
    pub fn is_zooming_or_panning(self) -> bool {
        self.is_zooming_or_panning
    }

    pub fn set_zooming_or_panning(&mut self, active: bool) {
        self.is_zooming_or_panning = active;
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        self.mode = InteractionMode::Panning;
        self.pointer = point;
        self.pan_anchor = point;
        self.pending_pan = Point::default();
        self.is_zooming_or_panning = true;
    }

    /// Tracks the pointer; while panning the movement since the last applied
    /// delta accumulates until [`InteractionState::take_pending_pan`].
    pub fn on_pointer_move(&mut self, point: Point) {
        self.pointer = point;
        self.tooltip_point = Some(point);
        if self.mode == InteractionMode::Panning {
            self.pending_pan = Point::new(point.x - self.pan_anchor.x, point.y - self.pan_anchor.y);
        }
    }

    /// Returns the accumulated pan delta and re-anchors at the current pointer.
    pub fn take_pending_pan(&mut self) -> Option<Point> {
        if self.pending_pan == Point::default() {
            return None;
        }
        let delta = self.pending_pan;
        self.pending_pan = Point::default();
        self.pan_anchor = self.pointer;
        Some(delta)
    }

    /// Ends a gesture. Returns `true` when a pan was in progress.
    pub fn on_pointer_up(&mut self, point: Point) -> bool {
        self.on_pointer_move(point);
        let was_panning = self.mode == InteractionMode::Panning;
        self.mode = InteractionMode::Idle;
        self.is_zooming_or_panning = false;
        was_panning
    }

    pub fn on_pointer_leave(&mut self) {
        self.tooltip_point = None;
    }
}
