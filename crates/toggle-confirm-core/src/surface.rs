// The host's visual tree, as seen by the confirmation core.
//
// A `Surface` owns elements, focus, overlay nodes, and event listeners. The
// core only ever inserts/removes one overlay, moves focus, and subscribes to
// the toggle element's input.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::dialog::{DialogButton, DialogPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Input channels a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Pointer,
    Key,
}

/// Visual tree operations required by the confirmation core.
///
/// Removal operations must tolerate ids that are already gone.
pub trait Surface {
    /// Whether `element` is currently attached to the tree.
    fn contains(&self, element: ElementId) -> bool;

    /// Move input focus to `element`.
    fn focus(&mut self, element: ElementId);

    /// Insert a dialog overlay at the visual root.
    fn mount_overlay(&mut self, payload: &DialogPayload) -> OverlayId;

    /// Remove an overlay node. No-op if it is not mounted.
    fn unmount_overlay(&mut self, overlay: OverlayId);

    /// Reflect which dialog button holds focus. Hosts without button focus
    /// can ignore this.
    fn focus_overlay_button(&mut self, _overlay: OverlayId, _button: DialogButton) {}

    /// Subscribe to `kind` events on `element`. `None` if the element is not
    /// attached.
    fn listen(&mut self, element: ElementId, kind: EventKind) -> Option<ListenerId>;

    /// Drop a subscription. No-op if it no longer exists.
    fn unlisten(&mut self, listener: ListenerId);
}

// ---------------------------------------------------------------------------
// ListenerGuard
// ---------------------------------------------------------------------------

/// Scoped listener registration on a single element.
///
/// Listeners are attached on construction and detached when the guard is
/// released or dropped, whichever comes first. If the surface itself is gone
/// by then, detachment is silently skipped.
///
/// Detaching needs a mutable borrow of the surface. A `release` that finds
/// the surface borrowed keeps its listeners and can be retried. Drop has no
/// second chance, so hosts must not hold a surface borrow while dropping a
/// guard (or a toggle that owns one).
pub struct ListenerGuard<S: Surface> {
    surface: Weak<RefCell<S>>,
    element: ElementId,
    listeners: Vec<ListenerId>,
}

impl<S: Surface> ListenerGuard<S> {
    pub fn attach(surface: &Rc<RefCell<S>>, element: ElementId, kinds: &[EventKind]) -> Self {
        let listeners: Vec<ListenerId> = {
            let mut surface = surface.borrow_mut();
            kinds
                .iter()
                .filter_map(|kind| surface.listen(element, *kind))
                .collect()
        };
        debug!(?element, count = listeners.len(), "attached toggle listeners");
        ListenerGuard {
            surface: Rc::downgrade(surface),
            element,
            listeners,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Detach all listeners now. Calling this again is a no-op.
    pub fn release(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let Some(surface) = self.surface.upgrade() else {
            self.listeners.clear();
            return;
        };
        let Ok(mut surface) = surface.try_borrow_mut() else {
            warn!(
                element = ?self.element,
                pending = self.listeners.len(),
                "surface busy, listeners not detached"
            );
            return;
        };
        for listener in self.listeners.drain(..) {
            surface.unlisten(listener);
        }
        debug!(element = ?self.element, "detached toggle listeners");
    }
}

impl<S: Surface> Drop for ListenerGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}
