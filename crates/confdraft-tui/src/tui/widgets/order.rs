// Draft order widget: the randomized pick order next to the category order,
// with who leads each category after rotation.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use confdraft_core::config::Labels;
use confdraft_core::draft::rotation::picker_at;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    pick_order: &[String],
    category_order: &[String],
    labels: &Labels,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let picks: Vec<Line> = pick_order
        .iter()
        .enumerate()
        .map(|(i, name)| numbered(i, name))
        .collect();
    frame.render_widget(
        Paragraph::new(picks).block(Block::default().borders(Borders::ALL).title(" Pick Order ")),
        columns[0],
    );

    let categories: Vec<Line> = category_lines(pick_order, category_order)
        .into_iter()
        .enumerate()
        .map(|(i, (name, leader))| {
            let mut line = numbered(i, &name);
            line.spans.push(Span::styled(
                format!("  first pick: {leader}"),
                Style::default().fg(Color::DarkGray),
            ));
            line
        })
        .collect();
    frame.render_widget(
        Paragraph::new(categories).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} Order ", labels.category)),
        ),
        columns[1],
    );
}

fn numbered(index: usize, name: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:>2}. ", index + 1), Style::default().fg(Color::Yellow)),
        Span::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Each category paired with the participant who picks first in it.
pub fn category_lines(pick_order: &[String], category_order: &[String]) -> Vec<(String, String)> {
    category_order
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let leader = picker_at(pick_order, position, 0).cloned().unwrap_or_default();
            (name.clone(), leader)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
