// Confirmation dialog overlay widget.
//
// Renders a centered modal with an optional title, the confirmation text, a
// close control, and confirm/cancel buttons. Displayed on top of the main
// layout while an overlay is mounted on the `Screen`. Styles are derived from
// the payload's class lists.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use toggle_confirm_core::classes::{CANCEL, CLOSE, CONFIRM, CONTENT, OVERLAY, TITLE, WRAPPER};
use toggle_confirm_core::{ClassMap, DialogButton, DialogPayload};

use crate::tui::layout::contains;
use crate::tui::screen::OverlayNode;

const MIN_WIDTH: u16 = 28;
const MAX_WIDTH: u16 = 60;
/// Border plus one column of padding on each side.
const H_CHROME: u16 = 4;
const CLOSE_TEXT: &str = " x ";
const BUTTON_GAP: u16 = 2;

/// Screen areas of the dialog and its controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub dialog: Rect,
    pub content: Rect,
    pub confirm: Rect,
    pub cancel: Rect,
    pub close: Rect,
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogHit {
    Confirm,
    Cancel,
    Close,
    Inside,
    Outside,
}

fn button_text(label: &str) -> String {
    format!("[ {label} ]")
}

fn text_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

/// Number of lines `text` occupies when word-wrapped to `width` columns.
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let mut lines: u16 = 1;
    let mut used: u16 = 0;
    for word in text.split_whitespace() {
        let w = text_width(word);
        if used == 0 {
            used = w;
        } else if used.saturating_add(1).saturating_add(w) <= width {
            used += 1 + w;
        } else {
            lines = lines.saturating_add(1);
            used = w;
        }
        // Words longer than a line spill over.
        while used > width {
            lines = lines.saturating_add(1);
            used -= width;
        }
    }
    lines
}

/// Compute where the dialog and its controls go inside `area`.
pub fn dialog_layout(area: Rect, payload: &DialogPayload) -> DialogLayout {
    let confirm_width = text_width(&button_text(&payload.confirm_label));
    let cancel_width = text_width(&button_text(&payload.cancel_label));
    let buttons_width = confirm_width
        .saturating_add(BUTTON_GAP)
        .saturating_add(cancel_width);

    let desired = text_width(&payload.content)
        .max(buttons_width)
        .max(
            text_width(&payload.title)
                .saturating_add(text_width(CLOSE_TEXT))
                .saturating_add(4),
        )
        .saturating_add(H_CHROME);
    let width = desired.clamp(MIN_WIDTH, MAX_WIDTH);
    let content_lines = wrapped_line_count(&payload.content, width - H_CHROME);
    // top border, content, spacer, buttons, bottom border
    let height = content_lines.saturating_add(4);

    let dialog = centered_rect(width, height, area);
    let inner_x = dialog.x.saturating_add(2);
    let inner_width = dialog.width.saturating_sub(H_CHROME);
    let content = Rect::new(
        inner_x,
        dialog.y.saturating_add(1),
        inner_width,
        content_lines.min(dialog.height.saturating_sub(2)),
    );

    let buttons_y = dialog.y.saturating_add(dialog.height.saturating_sub(2));
    let buttons_x = inner_x.saturating_add(inner_width.saturating_sub(buttons_width));
    let confirm = Rect::new(buttons_x, buttons_y, confirm_width, 1).intersection(dialog);
    let cancel = Rect::new(
        buttons_x
            .saturating_add(confirm_width)
            .saturating_add(BUTTON_GAP),
        buttons_y,
        cancel_width,
        1,
    )
    .intersection(dialog);
    let close_width = text_width(CLOSE_TEXT);
    let close = Rect::new(
        dialog
            .x
            .saturating_add(dialog.width.saturating_sub(close_width.saturating_add(1))),
        dialog.y,
        close_width,
        1,
    )
    .intersection(dialog);

    DialogLayout {
        dialog,
        content,
        confirm,
        cancel,
        close,
    }
}

/// Classify a press at (`column`, `row`).
pub fn hit_test(layout: &DialogLayout, column: u16, row: u16) -> DialogHit {
    if contains(layout.close, column, row) {
        DialogHit::Close
    } else if contains(layout.confirm, column, row) {
        DialogHit::Confirm
    } else if contains(layout.cancel, column, row) {
        DialogHit::Cancel
    } else if contains(layout.dialog, column, row) {
        DialogHit::Inside
    } else {
        DialogHit::Outside
    }
}

/// Style for a dialog role, built from its class tokens.
pub fn role_style(classes: &ClassMap, role: &str) -> Style {
    classes
        .get(role)
        .iter()
        .fold(Style::default(), |style, class| match class.as_str() {
            "is-primary" => style.fg(Color::Green).add_modifier(Modifier::BOLD),
            "is-secondary" => style.fg(Color::Red),
            "is-danger" => style.fg(Color::LightRed).add_modifier(Modifier::BOLD),
            "is-muted" => style.add_modifier(Modifier::DIM),
            _ => style,
        })
}

fn button_style(classes: &ClassMap, role: &str, focused: bool) -> Style {
    let style = role_style(classes, role);
    if focused {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

/// Render the mounted overlay on top of `area`.
pub fn render(frame: &mut Frame, area: Rect, overlay: &OverlayNode) {
    let payload = &overlay.payload;
    let classes = &payload.classes;
    let layout = dialog_layout(area, payload);

    frame.buffer_mut().set_style(
        area,
        Style::default()
            .add_modifier(Modifier::DIM)
            .patch(role_style(classes, OVERLAY)),
    );

    // Clear the area behind the dialog so it renders cleanly on top
    frame.render_widget(Clear, layout.dialog);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow).patch(role_style(classes, WRAPPER)))
        .style(Style::default().bg(Color::Black));
    if !payload.title.is_empty() {
        block = block.title(Span::styled(
            format!(" {} ", payload.title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
                .patch(role_style(classes, TITLE)),
        ));
    }
    frame.render_widget(block, layout.dialog);

    let content = Paragraph::new(payload.content.as_str())
        .style(role_style(classes, CONTENT))
        .wrap(Wrap { trim: true });
    frame.render_widget(content, layout.content);

    frame.render_widget(
        Paragraph::new(Span::styled(CLOSE_TEXT, role_style(classes, CLOSE))),
        layout.close,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            button_text(&payload.confirm_label),
            button_style(classes, CONFIRM, overlay.focused == DialogButton::Confirm),
        )),
        layout.confirm,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            button_text(&payload.cancel_label),
            button_style(classes, CANCEL, overlay.focused == DialogButton::Cancel),
        )),
        layout.cancel,
    );
}

/// Compute a centered rectangle of the given size within `area`.
///
/// If the area is too small, the dialog is clamped to the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use toggle_confirm_core::OverlayId;

    fn payload(content: &str, title: &str) -> DialogPayload {
        DialogPayload {
            content: content.into(),
            title: title.into(),
            confirm_label: "Confirm".into(),
            cancel_label: "Cancel".into(),
            classes: ClassMap::defaults(),
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn dialog_is_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = dialog_layout(area, &payload("Proceed?", ""));
        assert_eq!(layout.dialog.width, MIN_WIDTH);
        assert_eq!(layout.dialog.height, 5);
        let center_x = layout.dialog.x + layout.dialog.width / 2;
        let center_y = layout.dialog.y + layout.dialog.height / 2;
        assert!((center_x as i32 - 40).unsigned_abs() <= 1);
        assert!((center_y as i32 - 12).unsigned_abs() <= 1);
    }

    #[test]
    fn long_content_wraps_within_max_width() {
        let text = "word ".repeat(40);
        let layout = dialog_layout(Rect::new(0, 0, 100, 40), &payload(&text, ""));
        assert_eq!(layout.dialog.width, MAX_WIDTH);
        assert!(layout.content.height > 1);
        assert_eq!(layout.dialog.height, layout.content.height + 4);
    }

    #[test]
    fn dialog_clamps_to_small_area() {
        let area = Rect::new(0, 0, 10, 3);
        let layout = dialog_layout(area, &payload("Proceed?", "Title"));
        assert!(layout.dialog.width <= area.width);
        assert!(layout.dialog.height <= area.height);
    }

    #[test]
    fn oversized_title_and_labels_stay_inside_area() {
        let huge = "x".repeat(70_000);
        let mut p = payload("Proceed?", &huge);
        p.confirm_label = huge.clone();
        p.cancel_label = huge;
        let area = Rect::new(0, 0, 80, 24);
        let layout = dialog_layout(area, &p);
        assert_eq!(layout.dialog.width, MAX_WIDTH);
        assert_eq!(layout.dialog.intersection(area), layout.dialog);
        for rect in [layout.confirm, layout.cancel, layout.close] {
            assert!(rect.width <= layout.dialog.width);
        }
    }

    #[test]
    fn wrapped_line_count_greedy() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("aaa bbb", 7), 1);
        assert_eq!(wrapped_line_count("aaa bbb", 6), 2);
        assert_eq!(wrapped_line_count("aaaaaaaaaaaa", 5), 3);
    }

    #[test]
    fn hit_test_regions() {
        let layout = dialog_layout(Rect::new(0, 0, 80, 24), &payload("Proceed?", ""));
        assert_eq!(
            hit_test(&layout, layout.confirm.x, layout.confirm.y),
            DialogHit::Confirm
        );
        assert_eq!(
            hit_test(&layout, layout.cancel.x + 1, layout.cancel.y),
            DialogHit::Cancel
        );
        assert_eq!(hit_test(&layout, layout.close.x, layout.close.y), DialogHit::Close);
        assert_eq!(
            hit_test(&layout, layout.content.x, layout.content.y),
            DialogHit::Inside
        );
        assert_eq!(hit_test(&layout, 0, 0), DialogHit::Outside);
    }

    #[test]
    fn buttons_do_not_overlap() {
        let layout = dialog_layout(Rect::new(0, 0, 80, 24), &payload("Proceed?", ""));
        assert!(layout.confirm.x + layout.confirm.width < layout.cancel.x);
        assert_eq!(layout.confirm.y, layout.cancel.y);
    }

    #[test]
    fn class_tokens_map_to_styles() {
        let classes = ClassMap::defaults();
        assert_eq!(role_style(&classes, CONFIRM).fg, Some(Color::Green));
        assert_eq!(role_style(&classes, CANCEL).fg, Some(Color::Red));
        assert_eq!(role_style(&classes, CONTENT), Style::default());
    }

    #[test]
    fn render_shows_text_and_labels() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let overlay = OverlayNode {
            id: OverlayId(1),
            payload: payload("Proceed?", "Airplane mode"),
            focused: DialogButton::Confirm,
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &overlay))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Proceed?"));
        assert!(text.contains("Airplane mode"));
        assert!(text.contains("[ Confirm ]"));
        assert!(text.contains("[ Cancel ]"));
    }

    #[test]
    fn render_without_title_does_not_panic() {
        let backend = TestBackend::new(20, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let overlay = OverlayNode {
            id: OverlayId(1),
            payload: payload("A much longer confirmation message", ""),
            focused: DialogButton::Cancel,
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &overlay))
            .unwrap();
    }
}
