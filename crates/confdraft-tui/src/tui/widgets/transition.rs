// Transition widget: summary of a category that just filled up.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use confdraft_core::config::Labels;
use confdraft_core::draft::session::CategoryBoard;

/// Render the picks made in the completed category, in turn order.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    board: Option<&CategoryBoard>,
    next: Option<&str>,
    labels: &Labels,
) {
    let header = Row::new(vec![
        Cell::from("Pick #"),
        Cell::from("Participant"),
        Cell::from(labels.item.clone()),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = board
        .map(|b| {
            b.slots
                .iter()
                .map(|slot| {
                    Row::new(vec![
                        Cell::from(format!("{}", slot.turn_position + 1)),
                        Cell::from(slot.participant.clone()),
                        Cell::from(slot.pick.clone().unwrap_or_default()),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();

    let title = match board {
        Some(b) => format!(" {} Picks | {} ", b.name, next_text(next)),
        None => format!(" {} ", next_text(next)),
    };
    let widths = [
        Constraint::Length(8),
        Constraint::Min(14),
        Constraint::Min(14),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

/// "Next Up: X" or the end-of-draft line.
pub fn next_text(next: Option<&str>) -> String {
    match next {
        Some(name) => format!("Next Up: {name}"),
        None => "Draft Complete! Press Enter for results".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::app::UserCommand;

    #[test]
    fn next_text_variants() {
        assert_eq!(next_text(Some("ACC")), "Next Up: ACC");
        assert!(next_text(None).starts_with("Draft Complete!"));
    }

    #[test]
    fn render_lists_completed_picks() {
        let (mut app, _rx) = test_app();
        app.handle_command(UserCommand::SubmitPick("Texas".into()));
        app.handle_command(UserCommand::SubmitPick("Alabama".into()));
        let board = app.session().category_board(0).unwrap();
        assert!(board.complete);

        let backend = ratatui::backend::TestBackend::new(80, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), Some(&board), Some("ACC"), app.labels()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Next Up: ACC"));
        assert!(text.contains("Alabama"));
    }
}
