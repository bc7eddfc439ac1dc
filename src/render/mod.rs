mod lifecycle;
mod primitives;
mod recording_renderer;

pub use lifecycle::{AnimatedVisual, VisualUpdateMode, apply_update_mode};
pub use primitives::{
    Color, LinePrimitive, TextHAlign, TextPrimitive, VisualGeometry, VisualState,
    estimate_text_size,
};
pub use recording_renderer::{RecordedVisual, RecordingRenderer, RenderEvent};

use serde::{Deserialize, Serialize};

use crate::core::Size;
use crate::error::ChartResult;

/// Opaque identity of a drawable element owned by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(u64);

impl VisualHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Role of a drawable element, so backends can pick z-order and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    SeparatorLine,
    Tick,
    SubTick,
    Label,
    SeriesSegment,
}

/// Contract implemented by any rendering backend.
///
/// The layout core never paints. It creates abstract visuals and hands each
/// one its next state together with a [`VisualUpdateMode`] that tells the
/// backend whether to animate, snap, or animate and then dispose.
pub trait Renderer {
    fn create_visual(&mut self, kind: VisualKind) -> VisualHandle;

    fn update_visual(
        &mut self,
        handle: VisualHandle,
        state: VisualState,
        mode: VisualUpdateMode,
    ) -> ChartResult<()>;

    /// Size of `text` when drawn at `font_size_px`.
    fn measure_text(&self, text: &str, font_size_px: f64) -> Size {
        estimate_text_size(text, font_size_px)
    }
}
