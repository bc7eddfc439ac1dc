use serde::{Deserialize, Serialize};

use super::VisualState;

/// How the rendering backend must apply a visual update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualUpdateMode {
    /// Animate from the current state to the new one.
    Update,
    /// Jump to the new state with no visible transition.
    UpdateAndComplete,
    /// Animate to the new state, then dispose of the visual.
    UpdateAndRemove,
}

impl VisualUpdateMode {
    #[must_use]
    pub const fn animates(self) -> bool {
        matches!(self, Self::Update | Self::UpdateAndRemove)
    }

    #[must_use]
    pub const fn disposes_on_completion(self) -> bool {
        matches!(self, Self::UpdateAndRemove)
    }
}

/// Current/target pair tracked by an animating backend.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedVisual {
    pub current: VisualState,
    pub target: VisualState,
    pub pending_removal: bool,
}

impl AnimatedVisual {
    /// A visual that has not moved yet; both ends equal `state`.
    #[must_use]
    pub fn settled(state: VisualState) -> Self {
        Self {
            current: state.clone(),
            target: state,
            pending_removal: false,
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }

    /// Finishes the running transition. Returns `true` when the visual must
    /// now be disposed.
    pub fn complete(&mut self) -> bool {
        self.current = self.target.clone();
        self.pending_removal
    }
}

/// Applies one lifecycle transition to `visual`.
///
/// A later `Update` cancels a pending removal, so a separator that reappears
/// before its fade-out finishes is kept.
pub fn apply_update_mode(visual: &mut AnimatedVisual, state: VisualState, mode: VisualUpdateMode) {
    match mode {
        VisualUpdateMode::Update => {
            visual.target = state;
            visual.pending_removal = false;
        }
        VisualUpdateMode::UpdateAndComplete => {
            visual.current = state.clone();
            visual.target = state;
            visual.pending_removal = false;
        }
        VisualUpdateMode::UpdateAndRemove => {
            visual.target = state;
            visual.pending_removal = true;
        }
    }
}
