// Confirmation dialog lifecycle: single-flight open, exactly-once resolution,
// and teardown of the overlay node.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classes::ClassMap;
use crate::surface::{OverlayId, Surface};

/// Everything the renderer needs to draw the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogPayload {
    pub content: String,
    pub title: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub classes: ClassMap,
}

/// How a dialog was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogButton {
    #[default]
    Confirm,
    Cancel,
}

impl DialogButton {
    fn other(self) -> Self {
        match self {
            DialogButton::Confirm => DialogButton::Cancel,
            DialogButton::Cancel => DialogButton::Confirm,
        }
    }
}

/// User input directed at an open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogInput {
    /// The confirm button was pressed.
    Confirm,
    /// The cancel button was pressed.
    Cancel,
    /// The close control was pressed.
    Close,
    /// A press landed on the overlay outside the dialog.
    Dismiss,
    /// Press whichever button currently has focus.
    Activate,
    /// Move button focus.
    FocusNext,
    FocusPrev,
}

/// Identifies one open dialog. Stale handles are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogHandle {
    overlay: OverlayId,
    generation: u64,
}

impl DialogHandle {
    pub fn overlay(&self) -> OverlayId {
        self.overlay
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialogError {
    #[error("a confirmation dialog is already open")]
    AlreadyOpen,
}

#[derive(Debug)]
struct DialogInstance {
    handle: DialogHandle,
    payload: DialogPayload,
    focused: DialogButton,
}

// ---------------------------------------------------------------------------
// DialogLifecycle
// ---------------------------------------------------------------------------

/// The dialog slot shared by every toggle mounted on one surface.
pub type SharedDialogs = Rc<RefCell<DialogLifecycle>>;

/// Owner of at most one live dialog.
#[derive(Debug, Default)]
pub struct DialogLifecycle {
    live: Option<DialogInstance>,
    generation: u64,
}

impl DialogLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh slot to hand to every machine mounted on the same surface.
    pub fn shared() -> SharedDialogs {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Mount a new dialog overlay. Fails if one is already live.
    ///
    /// The confirm button starts with focus.
    pub fn open<S: Surface>(
        &mut self,
        surface: &mut S,
        payload: DialogPayload,
    ) -> Result<DialogHandle, DialogError> {
        if self.live.is_some() {
            warn!("refusing to open a second confirmation dialog");
            return Err(DialogError::AlreadyOpen);
        }

        let overlay = surface.mount_overlay(&payload);
        self.generation += 1;
        let handle = DialogHandle {
            overlay,
            generation: self.generation,
        };
        surface.focus_overlay_button(overlay, DialogButton::Confirm);
        info!(?overlay, title = %payload.title, "confirmation dialog opened");

        self.live = Some(DialogInstance {
            handle,
            payload,
            focused: DialogButton::Confirm,
        });
        Ok(handle)
    }

    pub fn is_open(&self) -> bool {
        self.live.is_some()
    }

    pub fn handle(&self) -> Option<DialogHandle> {
        self.live.as_ref().map(|d| d.handle)
    }

    pub fn payload(&self) -> Option<&DialogPayload> {
        self.live.as_ref().map(|d| &d.payload)
    }

    pub fn focused_button(&self) -> Option<DialogButton> {
        self.live.as_ref().map(|d| d.focused)
    }

    /// Feed one input to the dialog identified by `handle`.
    ///
    /// Returns the resolution the first time a resolving input arrives and
    /// tears the dialog down before returning. Focus moves and inputs for a
    /// stale or closed handle return `None`.
    pub fn deliver<S: Surface>(
        &mut self,
        surface: &mut S,
        handle: DialogHandle,
        input: DialogInput,
    ) -> Option<Resolution> {
        let instance = self.live.as_mut().filter(|d| d.handle == handle)?;

        let resolution = match input {
            DialogInput::Confirm => Resolution::Confirmed,
            DialogInput::Cancel | DialogInput::Close | DialogInput::Dismiss => {
                Resolution::Cancelled
            }
            DialogInput::Activate => match instance.focused {
                DialogButton::Confirm => Resolution::Confirmed,
                DialogButton::Cancel => Resolution::Cancelled,
            },
            DialogInput::FocusNext | DialogInput::FocusPrev => {
                instance.focused = instance.focused.other();
                surface.focus_overlay_button(handle.overlay, instance.focused);
                return None;
            }
        };

        debug!(?input, ?resolution, "confirmation dialog resolved");
        self.close(surface, handle);
        Some(resolution)
    }

    /// Destroy the dialog and its overlay node. Idempotent.
    pub fn close<S: Surface>(&mut self, surface: &mut S, handle: DialogHandle) {
        if self.live.as_ref().is_some_and(|d| d.handle == handle) {
            self.live = None;
            surface.unmount_overlay(handle.overlay);
            debug!(overlay = ?handle.overlay, "confirmation dialog closed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
