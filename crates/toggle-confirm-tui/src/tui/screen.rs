// In-memory visual tree for the terminal host.
//
// Tracks which toggle elements are attached, which one has focus, the
// mounted dialog overlays, and listener subscriptions. Rendering reads from
// it; the confirmation core mutates it through `Surface`.

use std::collections::{BTreeSet, HashMap};

use toggle_confirm_core::{
    DialogButton, DialogPayload, ElementId, EventKind, ListenerId, OverlayId, Surface,
};

/// A mounted dialog overlay.
#[derive(Debug, Clone)]
pub struct OverlayNode {
    pub id: OverlayId,
    pub payload: DialogPayload,
    pub focused: DialogButton,
}

#[derive(Debug, Default)]
pub struct Screen {
    elements: BTreeSet<ElementId>,
    focused: Option<ElementId>,
    overlays: Vec<OverlayNode>,
    listeners: HashMap<ListenerId, (ElementId, EventKind)>,
    next_id: u64,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_element(&mut self, element: ElementId) {
        self.elements.insert(element);
    }

    /// Detach an element. Its listeners go with it and it loses focus.
    pub fn remove_element(&mut self, element: ElementId) {
        self.elements.remove(&element);
        self.listeners.retain(|_, (e, _)| *e != element);
        if self.focused == Some(element) {
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// The topmost overlay, if any.
    pub fn overlay(&self) -> Option<&OverlayNode> {
        self.overlays.last()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn listener_count(&self, element: ElementId) -> usize {
        self.listeners.values().filter(|(e, _)| *e == element).count()
    }

    pub fn is_listening(&self, element: ElementId, kind: EventKind) -> bool {
        self.listeners
            .values()
            .any(|(e, k)| *e == element && *k == kind)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Surface for Screen {
    fn contains(&self, element: ElementId) -> bool {
        self.elements.contains(&element)
    }

    fn focus(&mut self, element: ElementId) {
        if self.contains(element) {
            self.focused = Some(element);
        }
    }

    fn mount_overlay(&mut self, payload: &DialogPayload) -> OverlayId {
        let id = OverlayId(self.next_id());
        self.overlays.push(OverlayNode {
            id,
            payload: payload.clone(),
            focused: DialogButton::default(),
        });
        id
    }

    fn unmount_overlay(&mut self, overlay: OverlayId) {
        self.overlays.retain(|o| o.id != overlay);
    }

    fn focus_overlay_button(&mut self, overlay: OverlayId, button: DialogButton) {
        if let Some(node) = self.overlays.iter_mut().find(|o| o.id == overlay) {
            node.focused = button;
        }
    }

    fn listen(&mut self, element: ElementId, kind: EventKind) -> Option<ListenerId> {
        if !self.contains(element) {
            return None;
        }
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, (element, kind));
        Some(id)
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }
}
