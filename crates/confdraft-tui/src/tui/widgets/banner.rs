// Banner widget: screen title plus one line of detail.
//
// On the draft screen the title is the open category and the detail names
// whoever is on the clock.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use confdraft_core::config::Labels;
use confdraft_core::draft::session::CategoryBoard;

pub fn render(frame: &mut Frame, area: Rect, title: &str, detail: &str) {
    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(detail.to_string())),
    ];
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Title and detail for a category board.
pub fn draft_text(board: &CategoryBoard, labels: &Labels) -> (String, String) {
    let title = format!(
        "{}: {} ({} available)",
        labels.category,
        board.name,
        board.available_count()
    );
    let detail = match board.slots.iter().find(|s| s.on_the_clock) {
        Some(slot) => format!(
            "On the clock: {} (pick {} of {})",
            slot.participant,
            slot.turn_position + 1,
            board.slots.len()
        ),
        None if board.complete => format!("{} is complete", board.name),
        None => "Waiting to open".to_string(),
    };
    (title, detail)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
