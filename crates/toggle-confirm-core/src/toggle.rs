// A toggle value bound to a confirmation state machine.
//
// The toggle owns its boolean. Activations the machine passes through flip it
// directly; intercepted ones only flip on a confirmed dialog.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::classes::ClassOverrides;
use crate::config::ToggleConfig;
use crate::dialog::{DialogInput, Resolution, SharedDialogs};
use crate::machine::{Activation, ConfirmationStateMachine};
use crate::surface::{ElementId, Surface};
use crate::trigger::InteractionEvent;

pub struct ConfirmToggle<S: Surface> {
    value: bool,
    machine: ConfirmationStateMachine<S>,
}

impl<S: Surface> ConfirmToggle<S> {
    pub fn mount(
        initial: bool,
        config: ToggleConfig,
        classes: ClassOverrides,
        element: ElementId,
        surface: &Rc<RefCell<S>>,
        dialogs: &SharedDialogs,
    ) -> Self {
        ConfirmToggle {
            value: initial,
            machine: ConfirmationStateMachine::mount(config, classes, element, surface, dialogs),
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn machine(&self) -> &ConfirmationStateMachine<S> {
        &self.machine
    }

    pub fn is_awaiting(&self) -> bool {
        self.machine.is_awaiting()
    }

    /// Handle an input event on the toggle element.
    pub fn activate(&mut self, event: &InteractionEvent) -> Activation {
        let activation = self.machine.handle_event(event, self.value);
        if activation == Activation::PassThrough {
            self.value = !self.value;
            self.machine.restore_focus();
            debug!(element = ?self.machine.element(), value = self.value, "toggled directly");
        }
        activation
    }

    /// Handle input on this toggle's open dialog.
    pub fn respond(&mut self, input: DialogInput) -> Option<Resolution> {
        self.machine.resolve_dialog(input, &mut self.value)
    }

    pub fn unmount(&mut self) {
        self.machine.unmount();
    }
}
