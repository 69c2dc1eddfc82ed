// Confirmation state machine: Idle -> AwaitingConfirmation -> Idle.
//
// On a qualifying activation the toggle's state change is suspended and a
// dialog is opened. The pending transition is applied on confirm and dropped
// on cancel; focus returns to the toggle either way.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::classes::ClassOverrides;
use crate::config::ToggleConfig;
use crate::dialog::{DialogHandle, DialogInput, DialogLifecycle, DialogPayload, Resolution, SharedDialogs};
use crate::focus::FocusCoordinator;
use crate::resolver;
use crate::surface::{ElementId, EventKind, ListenerGuard, Surface};
use crate::trigger::{self, InteractionEvent};

/// Snapshot of what the open dialog is asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub content: String,
    pub title: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineState {
    Idle,
    AwaitingConfirmation {
        handle: DialogHandle,
        pending: PendingConfirmation,
    },
}

/// Outcome of offering an input event to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Not an activation gesture.
    Ignored,
    /// An activation the machine does not intercept. The toggle's own
    /// behavior applies.
    PassThrough,
    /// A confirmation dialog was opened. The value is unchanged.
    Intercepted,
    /// A dialog is already open on the surface; the event is dropped.
    Busy,
}

// ---------------------------------------------------------------------------
// ConfirmationStateMachine
// ---------------------------------------------------------------------------

pub struct ConfirmationStateMachine<S: Surface> {
    config: ToggleConfig,
    classes: ClassOverrides,
    surface: Rc<RefCell<S>>,
    focus: FocusCoordinator,
    dialogs: SharedDialogs,
    state: MachineState,
    listeners: Option<ListenerGuard<S>>,
}

impl<S: Surface> ConfirmationStateMachine<S> {
    /// Bind the machine to a toggle element.
    ///
    /// Listeners are only attached when the config has confirmation text;
    /// otherwise the machine passes every activation through. Every machine
    /// mounted on `surface` must share the same `dialogs` slot.
    pub fn mount(
        config: ToggleConfig,
        classes: ClassOverrides,
        element: ElementId,
        surface: &Rc<RefCell<S>>,
        dialogs: &SharedDialogs,
    ) -> Self {
        let listeners = if config.is_enabled() {
            Some(ListenerGuard::attach(
                surface,
                element,
                &[EventKind::Pointer, EventKind::Key],
            ))
        } else {
            debug!(?element, "no confirmation text configured");
            None
        };

        ConfirmationStateMachine {
            config,
            classes,
            surface: Rc::clone(surface),
            focus: FocusCoordinator::new(element),
            dialogs: Rc::clone(dialogs),
            state: MachineState::Idle,
            listeners,
        }
    }

    pub fn config(&self) -> &ToggleConfig {
        &self.config
    }

    pub fn element(&self) -> ElementId {
        self.focus.target()
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, MachineState::AwaitingConfirmation { .. })
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        match &self.state {
            MachineState::AwaitingConfirmation { pending, .. } => Some(pending),
            MachineState::Idle => None,
        }
    }

    pub fn dialog(&self) -> Ref<'_, DialogLifecycle> {
        self.dialogs.borrow()
    }

    /// Whether toggle listeners are currently attached.
    pub fn is_listening(&self) -> bool {
        self.listeners.as_ref().is_some_and(ListenerGuard::is_attached)
    }

    /// Offer an input event on the toggle element. `current` is the toggle's
    /// value before the event.
    pub fn handle_event(&mut self, event: &InteractionEvent, current: bool) -> Activation {
        if !event.is_activation() {
            return Activation::Ignored;
        }
        if self.is_awaiting() || self.dialogs.borrow().is_open() {
            debug!(element = ?self.element(), "activation while dialog open, dropped");
            return Activation::Busy;
        }
        if !self.is_listening() || !trigger::requires_confirmation(event, current, &self.config) {
            return Activation::PassThrough;
        }

        let text = resolver::resolve(current, &self.config);
        let pending = PendingConfirmation {
            content: text.content,
            title: text.title,
            confirm_label: self.config.confirm_label.clone(),
            cancel_label: self.config.cancel_label.clone(),
        };
        let payload = DialogPayload {
            content: pending.content.clone(),
            title: pending.title.clone(),
            confirm_label: pending.confirm_label.clone(),
            cancel_label: pending.cancel_label.clone(),
            classes: self.classes.resolve(),
        };

        let mut surface = self.surface.borrow_mut();
        match self.dialogs.borrow_mut().open(&mut *surface, payload) {
            Ok(handle) => {
                self.state = MachineState::AwaitingConfirmation { handle, pending };
                Activation::Intercepted
            }
            Err(e) => {
                warn!(element = ?self.focus.target(), "{e}");
                Activation::Busy
            }
        }
    }

    /// Feed dialog input. On resolution the pending transition is applied to
    /// `value` (confirm only), the dialog is torn down, and focus returns to
    /// the toggle.
    pub fn resolve_dialog(&mut self, input: DialogInput, value: &mut bool) -> Option<Resolution> {
        let handle = match &self.state {
            MachineState::AwaitingConfirmation { handle, .. } => *handle,
            MachineState::Idle => return None,
        };

        let mut surface = self.surface.borrow_mut();
        let resolution = self
            .dialogs
            .borrow_mut()
            .deliver(&mut *surface, handle, input)?;
        self.state = MachineState::Idle;

        if resolution == Resolution::Confirmed {
            *value = !*value;
        }
        self.focus.restore(&mut *surface);
        info!(element = ?self.focus.target(), ?resolution, value = *value, "confirmation resolved");
        Some(resolution)
    }

    /// Return focus to the toggle element.
    pub fn restore_focus(&self) -> bool {
        self.focus.restore(&mut *self.surface.borrow_mut())
    }

    /// Detach listeners and close any open dialog without applying it.
    ///
    /// The host must not hold a borrow of the surface while calling this or
    /// dropping the machine.
    pub fn unmount(&mut self) {
        if let Some(listeners) = self.listeners.as_mut() {
            listeners.release();
            // Kept when the surface was busy so a later unmount can retry.
            if !listeners.is_attached() {
                self.listeners = None;
            }
        }
        let handle = match &self.state {
            MachineState::AwaitingConfirmation { handle, .. } => *handle,
            MachineState::Idle => return,
        };
        match (self.surface.try_borrow_mut(), self.dialogs.try_borrow_mut()) {
            (Ok(mut surface), Ok(mut dialogs)) => {
                dialogs.close(&mut *surface, handle);
                self.state = MachineState::Idle;
            }
            _ => warn!(element = ?self.element(), "surface busy, dialog overlay left mounted"),
        }
    }
}

impl<S: Surface> Drop for ConfirmationStateMachine<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
