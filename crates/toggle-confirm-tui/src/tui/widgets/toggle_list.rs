// Toggle list widget: one row per toggle with its switch state.
//
// The focused row is marked and highlighted. Toggles that ask for
// confirmation carry a dim `*` after their label.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::layout::AppLayout;
use crate::tui::ViewState;

/// Build the line for a single toggle row.
pub fn row_line(label: &str, on: bool, focused: bool, confirms: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let (switch, switch_style) = if on {
        ("[x]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("[ ]", Style::default().fg(Color::DarkGray))
    };
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(switch, switch_style),
        Span::raw(" "),
        Span::styled(label.to_string(), label_style),
    ];
    if confirms {
        spans.push(Span::styled(
            " *",
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    Line::from(spans)
}

/// Render the bordered toggle list.
pub fn render(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    frame.render_widget(
        Block::default().borders(Borders::ALL).title("Toggles"),
        layout.list,
    );

    let focused = state.focused_index();
    for (i, (row, area)) in state.rows.iter().zip(layout.rows.iter()).enumerate() {
        let line = row_line(
            &row.label,
            row.toggle.value(),
            focused == Some(i),
            row.toggle.machine().config().is_enabled(),
        );
        frame.render_widget(Paragraph::new(line), *area);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
