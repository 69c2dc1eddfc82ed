// In-memory surface used by unit tests.

use std::collections::{BTreeSet, HashMap};

use crate::dialog::{DialogButton, DialogPayload};
use crate::surface::{ElementId, EventKind, ListenerId, OverlayId, Surface};

#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub elements: BTreeSet<ElementId>,
    pub focused: Option<ElementId>,
    pub focus_calls: usize,
    pub overlays: Vec<(OverlayId, DialogPayload)>,
    pub overlay_focus: Option<DialogButton>,
    pub unmounted: usize,
    pub listeners: HashMap<ListenerId, (ElementId, EventKind)>,
    next_id: u64,
}

impl RecordingSurface {
    pub fn with_element(element: ElementId) -> Self {
        let mut surface = Self::default();
        surface.elements.insert(element);
        surface
    }

    pub fn listener_count(&self, element: ElementId) -> usize {
        self.listeners.values().filter(|(e, _)| *e == element).count()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Surface for RecordingSurface {
    fn contains(&self, element: ElementId) -> bool {
        self.elements.contains(&element)
    }

    fn focus(&mut self, element: ElementId) {
        self.focus_calls += 1;
        self.focused = Some(element);
    }

    fn mount_overlay(&mut self, payload: &DialogPayload) -> OverlayId {
        let id = OverlayId(self.next());
        self.overlays.push((id, payload.clone()));
        id
    }

    fn unmount_overlay(&mut self, overlay: OverlayId) {
        let before = self.overlays.len();
        self.overlays.retain(|(id, _)| *id != overlay);
        if self.overlays.len() != before {
            self.unmounted += 1;
            self.overlay_focus = None;
        }
    }

    fn focus_overlay_button(&mut self, _overlay: OverlayId, button: DialogButton) {
        self.overlay_focus = Some(button);
    }

    fn listen(&mut self, element: ElementId, kind: EventKind) -> Option<ListenerId> {
        if !self.contains(element) {
            return None;
        }
        let id = ListenerId(self.next());
        self.listeners.insert(id, (element, kind));
        Some(id)
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }
}
