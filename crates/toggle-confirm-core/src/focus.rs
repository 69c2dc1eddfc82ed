// Focus return to the toggle element after a dialog closes.

use tracing::{debug, warn};

use crate::surface::{ElementId, Surface};

/// Returns input focus to a toggle's interactive element.
#[derive(Debug, Clone, Copy)]
pub struct FocusCoordinator {
    target: ElementId,
}

impl FocusCoordinator {
    pub fn new(target: ElementId) -> Self {
        FocusCoordinator { target }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Focus the target. Returns `false` (and does nothing) when the element
    /// has been removed from the tree.
    pub fn restore<S: Surface>(&self, surface: &mut S) -> bool {
        if !surface.contains(self.target) {
            warn!(element = ?self.target, "focus target detached, skipping focus return");
            return false;
        }
        surface.focus(self.target);
        debug!(element = ?self.target, "focus returned to toggle");
        true
    }
}
