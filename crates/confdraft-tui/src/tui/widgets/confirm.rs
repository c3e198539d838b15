// Confirmation overlay widget.
//
// Renders a centered modal with a message and a (y/n) prompt on top of the
// current screen. Used for pick confirmation and for quitting.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const MIN_WIDTH: u16 = 28;
const DIALOG_HEIGHT: u16 = 6;

/// Render the overlay centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let dialog_area = centered_rect(dialog_width(message), DIALOG_HEIGHT, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(format!(" {message}")),
        Line::from(""),
        Line::from(vec![
            Span::raw(" ("),
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(")"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

/// Wide enough for the message plus borders and padding.
fn dialog_width(message: &str) -> u16 {
    let len = u16::try_from(message.chars().count()).unwrap_or(u16::MAX);
    len.saturating_add(4).max(MIN_WIDTH)
}

/// Compute a centered rectangle of the given size within `area`, clamped
/// to the available space.
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
