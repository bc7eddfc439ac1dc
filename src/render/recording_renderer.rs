use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};

use super::{
    AnimatedVisual, Renderer, TextPrimitive, VisualGeometry, VisualHandle, VisualKind,
    VisualState, VisualUpdateMode, apply_update_mode,
};

/// Lifecycle notification captured by [`RecordingRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    Created {
        handle: VisualHandle,
        kind: VisualKind,
    },
    Updated {
        handle: VisualHandle,
        mode: VisualUpdateMode,
    },
    Disposed {
        handle: VisualHandle,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedVisual {
    pub kind: VisualKind,
    /// `None` until the first update arrives.
    pub animation: Option<AnimatedVisual>,
}

impl RecordedVisual {
    #[must_use]
    pub fn target(&self) -> Option<&VisualState> {
        self.animation.as_ref().map(|animation| &animation.target)
    }

    #[must_use]
    pub fn is_pending_removal(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|animation| animation.pending_removal)
    }
}

/// Headless backend used by tests and hosts without a drawing surface.
///
/// It validates every state it receives and models the animation system:
/// transitions stay pending until [`RecordingRenderer::complete_animations`]
/// runs, which is also when `UpdateAndRemove` visuals are disposed.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_handle: u64,
    visuals: IndexMap<VisualHandle, RecordedVisual>,
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn visual(&self, handle: VisualHandle) -> Option<&RecordedVisual> {
        self.visuals.get(&handle)
    }

    /// Number of visuals not yet disposed, including ones fading out.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.visuals.len()
    }

    #[must_use]
    pub fn live_count_of(&self, kind: VisualKind) -> usize {
        self.visuals
            .values()
            .filter(|visual| visual.kind == kind)
            .count()
    }

    #[must_use]
    pub fn pending_removal_count(&self) -> usize {
        self.visuals
            .values()
            .filter(|visual| visual.is_pending_removal())
            .count()
    }

    /// Target texts of labels that are not fading out.
    #[must_use]
    pub fn visible_labels(&self) -> Vec<&TextPrimitive> {
        self.visuals
            .values()
            .filter(|visual| !visual.is_pending_removal())
            .filter_map(|visual| match visual.target().map(|state| &state.geometry) {
                Some(VisualGeometry::Text(text)) => Some(text),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Finishes every running transition and disposes visuals flagged for
    /// removal. Returns the number of disposed visuals.
    pub fn complete_animations(&mut self) -> usize {
        let mut disposed = Vec::new();
        for (handle, visual) in &mut self.visuals {
            if let Some(animation) = visual.animation.as_mut() {
                if animation.complete() {
                    disposed.push(*handle);
                }
            }
        }
        for handle in &disposed {
            self.visuals.shift_remove(handle);
            self.events.push(RenderEvent::Disposed { handle: *handle });
        }
        disposed.len()
    }
}

impl Renderer for RecordingRenderer {
    fn create_visual(&mut self, kind: VisualKind) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle::new(self.next_handle);
        self.visuals.insert(
            handle,
            RecordedVisual {
                kind,
                animation: None,
            },
        );
        self.events.push(RenderEvent::Created { handle, kind });
        handle
    }

    fn update_visual(
        &mut self,
        handle: VisualHandle,
        state: VisualState,
        mode: VisualUpdateMode,
    ) -> ChartResult<()> {
        state.validate()?;
        let visual = self.visuals.get_mut(&handle).ok_or_else(|| {
            ChartError::InvalidData(format!("unknown visual handle {}", handle.raw()))
        })?;

        match visual.animation.as_mut() {
            Some(animation) => apply_update_mode(animation, state, mode),
            None => {
                let mut animation = AnimatedVisual::settled(state.clone());
                apply_update_mode(&mut animation, state, mode);
                visual.animation = Some(animation);
            }
        }
        self.events.push(RenderEvent::Updated { handle, mode });
        Ok(())
    }
}
