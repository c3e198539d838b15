// Item list widget: the current category's catalog.
//
// Unclaimed items are selectable; taken items stay in catalog order but are
// dimmed and skipped by the selection.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use confdraft_core::config::Labels;
use confdraft_core::draft::session::CategoryBoard;

/// Render the catalog, highlighting the `selected`-th available item.
pub fn render(frame: &mut Frame, area: Rect, board: &CategoryBoard, selected: usize, labels: &Labels) {
    let rows: Vec<ListItem> = board
        .items
        .iter()
        .map(|item| {
            if item.taken {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        item.name.clone(),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    ),
                    Span::styled(" (taken)", Style::default().fg(Color::DarkGray)),
                ]))
            } else {
                ListItem::new(Line::from(item.name.clone()))
            }
        })
        .collect();

    let title = format!(
        " {} {}s ({}/{} available) ",
        board.name,
        labels.item,
        board.available_count(),
        board.items.len()
    );
    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(selected_row(board, selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Row index of the `selected`-th untaken item.
pub fn selected_row(board: &CategoryBoard, selected: usize) -> Option<usize> {
    board
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.taken)
        .nth(selected)
        .map(|(row, _)| row)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
