// Activation detection and the confirmation suppression rule.
//
// Events arrive already translated from the host's input system. Only a
// primary-button press or a space key press counts as an activation.

use tracing::debug;

use crate::config::ToggleConfig;
use crate::surface::EventKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Tab,
    BackTab,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Press,
    Repeat,
    Release,
}

/// An input event targeted at the toggle's interactive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerDown(PointerButton),
    PointerUp(PointerButton),
    Scroll,
    Key { key: Key, phase: KeyPhase },
}

impl InteractionEvent {
    pub fn key_press(key: Key) -> Self {
        InteractionEvent::Key {
            key,
            phase: KeyPhase::Press,
        }
    }

    /// Listener kind that receives this event.
    pub fn kind(&self) -> EventKind {
        match self {
            InteractionEvent::PointerDown(_)
            | InteractionEvent::PointerUp(_)
            | InteractionEvent::Scroll => EventKind::Pointer,
            InteractionEvent::Key { .. } => EventKind::Key,
        }
    }

    /// Whether this event is an activation gesture for a toggle.
    pub fn is_activation(&self) -> bool {
        matches!(
            self,
            InteractionEvent::PointerDown(PointerButton::Primary)
                | InteractionEvent::Key {
                    key: Key::Space,
                    phase: KeyPhase::Press,
                }
        )
    }
}

/// Whether confirmation is skipped for an activation in the current state.
///
/// Suppressed when the toggle is on and off-specific text exists, when it is
/// off and on-specific text exists, or when no generic text exists.
// NOTE: per-direction text disables confirmation for that direction, and no
// dialog ever opens without generic text.
pub fn is_suppressed(current: bool, config: &ToggleConfig) -> bool {
    (current && config.confirm_off_text().is_some())
        || (!current && config.confirm_on_text().is_some())
        || config.confirm_text().is_none()
}

/// Whether `event` must be routed through a confirmation dialog.
pub fn requires_confirmation(event: &InteractionEvent, current: bool, config: &ToggleConfig) -> bool {
    if !config.is_enabled() || !event.is_activation() {
        return false;
    }
    let suppressed = is_suppressed(current, config);
    debug!(?event, current, suppressed, "activation on confirm toggle");
    !suppressed
}
