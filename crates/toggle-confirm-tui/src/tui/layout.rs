// Screen layout: panel arrangement and hit-testing.
//
// +--------------------------------------------------+
// | Header (1 row)                                    |
// +--------------------------------------------------+
// | Toggle list (bordered, one row per toggle)        |
// |                                                   |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// The confirmation dialog is drawn on top of the whole area.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub header: Rect,
    /// Bordered panel holding the toggle rows.
    pub list: Rect,
    /// One single-line rect per visible toggle, in order.
    pub rows: Vec<Rect>,
    pub help_bar: Rect,
}

/// Build the layout for `row_count` toggles. Rows that do not fit are left
/// out of `rows`.
pub fn build_layout(area: Rect, row_count: usize) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // toggle list
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let list = vertical[1];
    let inner = Rect::new(
        list.x.saturating_add(1),
        list.y.saturating_add(1),
        list.width.saturating_sub(2),
        list.height.saturating_sub(2),
    );

    let rows = (0..row_count)
        .map_while(|i| {
            let y = inner.y.checked_add(u16::try_from(i).ok()?)?;
            (y < inner.y + inner.height).then(|| Rect::new(inner.x, y, inner.width, 1))
        })
        .collect();

    AppLayout {
        header: vertical[0],
        list,
        rows,
        help_bar: vertical[2],
    }
}

/// Whether the cell at (`column`, `row`) lies inside `rect`.
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Index of the toggle row under the cell, if any.
pub fn row_at(layout: &AppLayout, column: u16, row: u16) -> Option<usize> {
    layout.rows.iter().position(|r| contains(*r, column, row))
}
