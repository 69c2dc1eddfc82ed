// TUI: toggle list, confirmation overlay, input handling, and the event loop.
//
// The TUI owns a `ViewState` holding the `Screen` (the visual tree) and one
// `ConfirmToggle` per configured toggle. Terminal events are applied to it
// directly and frames are rendered at ~30 fps.

pub mod input;
pub mod layout;
pub mod screen;
pub mod widgets;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use toggle_confirm_core::{ConfirmToggle, DialogLifecycle, ElementId, Surface};
use tracing::{info, warn};

use crate::settings::Settings;
use input::UserCommand;
use layout::{build_layout, AppLayout};
use screen::Screen;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// A labelled toggle mounted on the screen.
pub struct ToggleRow {
    pub label: String,
    pub toggle: ConfirmToggle<Screen>,
}

/// TUI-local state: the visual tree plus the toggles mounted on it.
pub struct ViewState {
    pub screen: Rc<RefCell<Screen>>,
    pub rows: Vec<ToggleRow>,
    /// Terminal area of the last frame, used for mouse hit-testing.
    pub area: Rect,
}

impl ViewState {
    /// Mount one toggle per settings entry. The first toggle gets focus.
    pub fn from_settings(settings: &Settings) -> Self {
        let screen = Rc::new(RefCell::new(Screen::new()));
        let dialogs = DialogLifecycle::shared();
        let rows: Vec<ToggleRow> = settings
            .toggles
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let element = element_for(i);
                screen.borrow_mut().insert_element(element);
                ToggleRow {
                    label: entry.label.clone(),
                    toggle: ConfirmToggle::mount(
                        entry.initial,
                        entry.confirm.clone(),
                        settings.classes.clone(),
                        element,
                        &screen,
                        &dialogs,
                    ),
                }
            })
            .collect();

        if !rows.is_empty() {
            screen.borrow_mut().focus(element_for(0));
        }
        info!("Mounted {} toggles", rows.len());

        ViewState {
            screen,
            rows,
            area: Rect::default(),
        }
    }

    pub fn layout(&self) -> AppLayout {
        build_layout(self.area, self.rows.len())
    }

    /// Index of the row whose element has focus.
    pub fn focused_index(&self) -> Option<usize> {
        let focused = self.screen.borrow().focused()?;
        self.rows
            .iter()
            .position(|r| r.toggle.machine().element() == focused)
    }

    pub fn focus_row(&mut self, index: usize) {
        if let Some(row) = self.rows.get(index) {
            let element = row.toggle.machine().element();
            self.screen.borrow_mut().focus(element);
        }
    }

    pub fn focus_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let next = self
            .focused_index()
            .map_or(0, |i| (i + 1) % self.rows.len());
        self.focus_row(next);
    }

    pub fn focus_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len();
        let prev = self.focused_index().map_or(len - 1, |i| (i + len - 1) % len);
        self.focus_row(prev);
    }

    /// Index of the row whose confirmation dialog is open.
    pub fn dialog_owner(&self) -> Option<usize> {
        self.rows.iter().position(|r| r.toggle.is_awaiting())
    }
}

fn element_for(index: usize) -> ElementId {
    ElementId(u32::try_from(index).unwrap_or(u32::MAX))
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame: header, toggle list, help bar, and the dialog
/// overlay on top when one is mounted.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area(), state.rows.len());

    render_header(frame, &layout, state);
    widgets::toggle_list::render(frame, &layout, state);
    render_help_bar(frame, &layout, state);

    if let Some(overlay) = state.screen.borrow().overlay() {
        widgets::confirm_modal::render(frame, frame.area(), overlay);
    }
}

fn render_header(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let on = state.rows.iter().filter(|r| r.toggle.value()).count();
    let text = format!(" Toggle confirm | {}/{} on", on, state.rows.len());
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.header);
}

fn help_text(dialog_open: bool) -> &'static str {
    if dialog_open {
        " y:Confirm | n/Esc:Cancel | Tab:Switch button | Enter:Press | click outside:Dismiss"
    } else {
        " Space/click:Toggle | Up/Down:Move | q:Quit | *:asks first"
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state.dialog_owner().is_some()),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// 1. Initializes the terminal (raw mode, alternate screen, mouse capture).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: terminal input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(mut view_state: ViewState) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

    // 2. Chain a restoring panic hook before the original one.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 3. Main loop
    loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(UserCommand::Quit) = input::handle_event(&event, &mut view_state) {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| {
                    view_state.area = frame.area();
                    render_frame(frame, &view_state);
                })?;
            }
        }
    }

    // 4. Restore terminal
    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    info!("TUI exited");

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
