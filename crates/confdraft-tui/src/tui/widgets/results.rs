// Results widget: one row per participant in pick order, one column per
// category in category order.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use confdraft_core::draft::session::ResultRow;

pub fn render(frame: &mut Frame, area: Rect, rows: &[ResultRow], categories: &[String], scroll: usize) {
    let mut header_cells = vec![Cell::from("Pick #"), Cell::from("Participant")];
    header_cells.extend(categories.iter().map(|c| Cell::from(c.clone())));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = rows
        .iter()
        .skip(scroll)
        .map(|row| {
            let mut cells = vec![
                Cell::from(row.rank.to_string()),
                Cell::from(row.participant.clone()),
            ];
            cells.extend(
                row.cells
                    .iter()
                    .map(|c| Cell::from(c.item.clone().unwrap_or_else(|| "-".to_string()))),
            );
            Row::new(cells)
        })
        .collect();

    let table = Table::new(body, column_widths(categories.len())).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Final Draft Results "),
    );
    frame.render_widget(table, area);
}

/// Fixed columns for rank and name, the rest shared by the categories.
pub fn column_widths(category_count: usize) -> Vec<Constraint> {
    let mut widths = vec![Constraint::Length(7), Constraint::Min(12)];
    widths.extend((0..category_count).map(|_| Constraint::Fill(1)));
    widths
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
    fn one_column_per_category() {
        assert_eq!(column_widths(4).len(), 6);
        assert_eq!(column_widths(0).len(), 2);
    }

    #[test]
    fn render_shows_every_participant() {
        let (mut app, _rx) = test_app();
        app.handle_command(UserCommand::AutoComplete);
        let session = app.session();
        let rows = session.results_matrix();

        let backend = ratatui::backend::TestBackend::new(90, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                render(
                    frame,
                    frame.area(),
                    &rows,
                    session.state().category_order(),
                    0,
                )
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Matt"));
        assert!(text.contains("Joe"));
        assert!(text.contains("SEC"));
        assert!(text.contains("ACC"));
    }
}
