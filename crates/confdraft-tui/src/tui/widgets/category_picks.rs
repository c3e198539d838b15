// Category picks widget: the rotated turn order for one category and what
// each participant has taken so far.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use confdraft_core::draft::session::{BoardSlot, CategoryBoard};

pub fn render(frame: &mut Frame, area: Rect, board: &CategoryBoard) {
    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Participant"),
        Cell::from("Pick"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = board
        .slots
        .iter()
        .map(|slot| {
            let style = if slot.on_the_clock {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{}", slot.turn_position + 1)),
                Cell::from(slot.participant.clone()),
                Cell::from(slot_text(slot)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(12),
        Constraint::Min(12),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} Picks ", board.name)),
    );
    frame.render_widget(table, area);
}

/// What to show in the pick column.
pub fn slot_text(slot: &BoardSlot) -> String {
    match (&slot.pick, slot.on_the_clock) {
        (Some(item), _) => item.clone(),
        (None, true) => "Picking...".to_string(),
        (None, false) => "-".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
