// Confirmation gating for boolean toggle controls.
//
// A toggle's activation gesture can be intercepted and routed through a modal
// confirm/cancel dialog before its value is committed. This crate holds the
// UI-agnostic core; hosts plug in through the `Surface` trait.

pub mod classes;
pub mod config;
pub mod dialog;
pub mod focus;
pub mod machine;
pub mod resolver;
pub mod surface;
pub mod toggle;
pub mod trigger;

#[cfg(test)]
mod testing;

pub use classes::{ClassMap, ClassOverrides};
pub use config::{ConfigError, ToggleConfig};
pub use dialog::{
    DialogButton, DialogError, DialogHandle, DialogInput, DialogLifecycle, DialogPayload,
    Resolution, SharedDialogs,
};
pub use focus::FocusCoordinator;
pub use machine::{Activation, ConfirmationStateMachine, MachineState, PendingConfirmation};
pub use resolver::DialogText;
pub use surface::{ElementId, EventKind, ListenerGuard, ListenerId, OverlayId, Surface};
pub use toggle::ConfirmToggle;
pub use trigger::{InteractionEvent, Key, KeyPhase, PointerButton};
