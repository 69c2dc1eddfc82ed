// Terminal input handling.
//
// Translates crossterm events into toggle activations, dialog inputs, or
// local focus movement. While a confirmation dialog is open every event is
// routed to it and nothing else.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use toggle_confirm_core::{DialogInput, InteractionEvent, Key, KeyPhase, PointerButton};

use super::layout::row_at;
use super::widgets::confirm_modal::{dialog_layout, hit_test, DialogHit};
use super::ViewState;

/// Commands that leave the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
}

/// Handle one terminal event.
///
/// Returns `Some(UserCommand)` when the loop should act on it, `None` when
/// it was handled by mutating `ViewState`.
pub fn handle_event(event: &Event, view_state: &mut ViewState) -> Option<UserCommand> {
    match event {
        Event::Key(key_event) => handle_key(*key_event, view_state),
        Event::Mouse(mouse_event) => {
            handle_mouse(*mouse_event, view_state);
            None
        }
        Event::Resize(width, height) => {
            view_state.area = Rect::new(0, 0, *width, *height);
            None
        }
        _ => None,
    }
}

fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let pressed = key_event.kind == KeyEventKind::Press;

    // Ctrl+C always quits, dialog or not
    if pressed
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if let Some(owner) = view_state.dialog_owner() {
        if pressed {
            if let Some(input) = dialog_input(key_event.code) {
                view_state.rows[owner].toggle.respond(input);
            }
        }
        return None;
    }

    if pressed {
        match key_event.code {
            KeyCode::Char('q') => return Some(UserCommand::Quit),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                view_state.focus_prev();
                return None;
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                view_state.focus_next();
                return None;
            }
            _ => {}
        }
    }

    if let Some(index) = view_state.focused_index() {
        view_state.rows[index]
            .toggle
            .activate(&key_interaction(key_event));
    }
    None
}

/// Map a key press inside an open dialog.
///
/// - `y` confirms, `n`/`Esc` cancel
/// - `Enter` presses the focused button
/// - `Tab`/arrows move between buttons
///
/// Space is not mapped: the same key opens the dialog, and terminals report
/// auto-repeat as further presses.
fn dialog_input(code: KeyCode) -> Option<DialogInput> {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(DialogInput::Confirm),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(DialogInput::Cancel),
        KeyCode::Enter => Some(DialogInput::Activate),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(DialogInput::FocusNext),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(DialogInput::FocusPrev),
        _ => None, // Block all other input
    }
}

fn handle_mouse(mouse_event: MouseEvent, view_state: &mut ViewState) {
    if let Some(owner) = view_state.dialog_owner() {
        let MouseEventKind::Down(button) = mouse_event.kind else {
            return;
        };
        let hit = {
            let screen = view_state.screen.borrow();
            let Some(overlay) = screen.overlay() else {
                return;
            };
            let layout = dialog_layout(view_state.area, &overlay.payload);
            hit_test(&layout, mouse_event.column, mouse_event.row)
        };
        let input = match (hit, button) {
            (DialogHit::Outside, _) => Some(DialogInput::Dismiss),
            (DialogHit::Confirm, MouseButton::Left) => Some(DialogInput::Confirm),
            (DialogHit::Cancel, MouseButton::Left) => Some(DialogInput::Cancel),
            (DialogHit::Close, MouseButton::Left) => Some(DialogInput::Close),
            _ => None,
        };
        if let Some(input) = input {
            view_state.rows[owner].toggle.respond(input);
        }
        return;
    }

    let Some(event) = mouse_interaction(mouse_event) else {
        return;
    };
    let layout = view_state.layout();
    if let Some(index) = row_at(&layout, mouse_event.column, mouse_event.row) {
        view_state.rows[index].toggle.activate(&event);
    }
}

// ---------------------------------------------------------------------------
// Event translation
// ---------------------------------------------------------------------------

/// Translate a terminal event into a toggle interaction event.
pub fn to_interaction(event: &Event) -> Option<InteractionEvent> {
    match event {
        Event::Key(key_event) => Some(key_interaction(*key_event)),
        Event::Mouse(mouse_event) => mouse_interaction(*mouse_event),
        _ => None,
    }
}

fn key_interaction(key_event: KeyEvent) -> InteractionEvent {
    let key = match key_event.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    let phase = match key_event.kind {
        KeyEventKind::Press => KeyPhase::Press,
        KeyEventKind::Repeat => KeyPhase::Repeat,
        KeyEventKind::Release => KeyPhase::Release,
    };
    InteractionEvent::Key { key, phase }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}

fn mouse_interaction(mouse_event: MouseEvent) -> Option<InteractionEvent> {
    match mouse_event.kind {
        MouseEventKind::Down(button) => Some(InteractionEvent::PointerDown(pointer_button(button))),
        MouseEventKind::Up(button) => Some(InteractionEvent::PointerUp(pointer_button(button))),
        MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => Some(InteractionEvent::Scroll),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::parse_settings;
    use crossterm::event::KeyEventState;
    use std::path::Path;
    use toggle_confirm_core::{DialogButton, ElementId};

    fn view() -> ViewState {
        let settings = parse_settings(
            r#"
            [[toggle]]
            label = "Wi-Fi"

            [[toggle]]
            label = "Airplane mode"
            confirmText = "Proceed?"

            [[toggle]]
            label = "Auto-update"
            initial = true
            confirmText = "Change updates?"
            confirmOffText = "Sure you want to disable?"
            "#,
            Path::new("test.toml"),
        )
        .unwrap();
        let mut state = ViewState::from_settings(&settings);
        state.area = Rect::new(0, 0, 80, 24);
        state
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn open_dialog_on_row_1(state: &mut ViewState) {
        state.focus_row(1);
        handle_event(&key(KeyCode::Char(' ')), state);
        assert_eq!(state.dialog_owner(), Some(1));
    }

    #[test]
    fn quit_keys() {
        let mut state = view();
        assert_eq!(
            handle_event(&key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::Quit)
        );
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&ctrl_c, &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn q_inside_dialog_does_not_quit() {
        let mut state = view();
        open_dialog_on_row_1(&mut state);
        assert_eq!(handle_event(&key(KeyCode::Char('q')), &mut state), None);
        assert_eq!(state.dialog_owner(), Some(1));
    }

    #[test]
    fn arrows_move_focus() {
        let mut state = view();
        handle_event(&key(KeyCode::Down), &mut state);
        assert_eq!(state.focused_index(), Some(1));
        handle_event(&key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.focused_index(), Some(0));
    }

    #[test]
    fn space_flips_plain_toggle() {
        let mut state = view();
        handle_event(&key(KeyCode::Char(' ')), &mut state);
        assert!(state.rows[0].toggle.value());
        assert!(state.dialog_owner().is_none());
    }

    #[test]
    fn enter_does_not_toggle() {
        let mut state = view();
        handle_event(&key(KeyCode::Enter), &mut state);
        assert!(!state.rows[0].toggle.value());
    }

    #[test]
    fn key_release_does_not_toggle() {
        let mut state = view();
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        handle_event(&release, &mut state);
        assert!(!state.rows[0].toggle.value());
    }

    #[test]
    fn dialog_keys_confirm_and_cancel() {
        let mut state = view();
        open_dialog_on_row_1(&mut state);
        handle_event(&key(KeyCode::Char('y')), &mut state);
        assert!(state.rows[1].toggle.value());
        assert!(state.dialog_owner().is_none());
        assert_eq!(state.focused_index(), Some(1));

        open_dialog_on_row_1(&mut state);
        handle_event(&key(KeyCode::Esc), &mut state);
        assert!(state.rows[1].toggle.value());
        assert_eq!(state.screen.borrow().overlay_count(), 0);
    }

    #[test]
    fn held_space_does_not_confirm() {
        let mut state = view();
        open_dialog_on_row_1(&mut state);
        for _ in 0..3 {
            handle_event(&key(KeyCode::Char(' ')), &mut state);
        }
        assert_eq!(state.dialog_owner(), Some(1));
        assert!(!state.rows[1].toggle.value());
        assert_eq!(state.screen.borrow().overlay_count(), 1);
    }

    #[test]
    fn tab_then_enter_presses_cancel() {
        let mut state = view();
        open_dialog_on_row_1(&mut state);
        handle_event(&key(KeyCode::Tab), &mut state);
        assert_eq!(
            state.screen.borrow().overlay().map(|o| o.focused),
            Some(DialogButton::Cancel)
        );
        handle_event(&key(KeyCode::Enter), &mut state);
        assert!(!state.rows[1].toggle.value());
        assert!(state.dialog_owner().is_none());
    }

    #[test]
    fn click_on_row_activates_it() {
        let mut state = view();
        let layout = state.layout();
        let row = layout.rows[0];
        handle_event(
            &click(MouseEventKind::Down(MouseButton::Left), row.x + 2, row.y),
            &mut state,
        );
        assert!(state.rows[0].toggle.value());
    }

    #[test]
    fn right_click_changes_nothing() {
        let mut state = view();
        let row = state.layout().rows[1];
        handle_event(
            &click(MouseEventKind::Down(MouseButton::Right), row.x + 2, row.y),
            &mut state,
        );
        assert!(!state.rows[1].toggle.value());
        assert!(state.dialog_owner().is_none());
    }

    #[test]
    fn click_outside_dialog_dismisses() {
        let mut state = view();
        open_dialog_on_row_1(&mut state);
        handle_event(&click(MouseEventKind::Down(MouseButton::Left), 0, 0), &mut state);
        assert!(state.dialog_owner().is_none());
        assert!(!state.rows[1].toggle.value());
        assert_eq!(state.screen.borrow().focused(), Some(ElementId(1)));
    }

    #[test]
    fn click_confirm_button() {
        let mut state = view();
        open_dialog_on_row_1(&mut state);
        let layout = {
            let screen = state.screen.borrow();
            dialog_layout(state.area, &screen.overlay().unwrap().payload)
        };
        handle_event(
            &click(
                MouseEventKind::Down(MouseButton::Left),
                layout.confirm.x,
                layout.confirm.y,
            ),
            &mut state,
        );
        assert!(state.rows[1].toggle.value());
        assert!(state.dialog_owner().is_none());
    }

    #[test]
    fn click_inside_dialog_body_keeps_it_open() {
        let mut state = view();
        open_dialog_on_row_1(&mut state);
        let layout = {
            let screen = state.screen.borrow();
            dialog_layout(state.area, &screen.overlay().unwrap().payload)
        };
        handle_event(
            &click(
                MouseEventKind::Down(MouseButton::Left),
                layout.content.x,
                layout.content.y,
            ),
            &mut state,
        );
        assert_eq!(state.dialog_owner(), Some(1));
    }

    #[test]
    fn suppressed_direction_flips_directly() {
        let mut state = view();
        state.focus_row(2);
        handle_event(&key(KeyCode::Char(' ')), &mut state);
        assert!(!state.rows[2].toggle.value());
        assert!(state.dialog_owner().is_none());
    }

    #[test]
    fn resize_updates_area() {
        let mut state = view();
        handle_event(&Event::Resize(100, 30), &mut state);
        assert_eq!(state.area, Rect::new(0, 0, 100, 30));
    }

    #[test]
    fn translation() {
        assert_eq!(
            to_interaction(&key(KeyCode::Char(' '))),
            Some(InteractionEvent::key_press(Key::Space))
        );
        assert_eq!(
            to_interaction(&click(MouseEventKind::Down(MouseButton::Middle), 0, 0)),
            Some(InteractionEvent::PointerDown(PointerButton::Middle))
        );
        assert_eq!(
            to_interaction(&click(MouseEventKind::ScrollDown, 0, 0)),
            Some(InteractionEvent::Scroll)
        );
        assert_eq!(to_interaction(&click(MouseEventKind::Moved, 0, 0)), None);
        assert_eq!(to_interaction(&Event::FocusGained), None);
    }
}
