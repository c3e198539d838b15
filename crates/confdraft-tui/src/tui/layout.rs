// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Banner (4 rows)                                   |
// +-------------------------+------------------------+
// | Main Panel (60%)         | Sidebar (40%)          |
// |         (together these form the body)            |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: category, pick counter, progress, last message.
    pub status_bar: Rect,
    /// Screen title and who is on the clock.
    pub banner: Rect,
    /// The whole middle section, for full-width screens.
    pub body: Rect,
    /// Left part of the body: the item list.
    pub main_panel: Rect,
    /// Right part of the body: picks in the current category.
    pub sidebar: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(4), // banner
            Constraint::Min(6),    // body
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let body = vertical[2];
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(body);

    AppLayout {
        status_bar: vertical[0],
        banner: vertical[1],
        body,
        main_panel: horizontal[0],
        sidebar: horizontal[1],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
