// Setup widget: what was loaded, before anything is randomized.
//
// Participants on the left, each category with its item count on the right.
// Catalogs with fewer items than participants are flagged, since auto-complete
// cannot fill them.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use confdraft_core::config::Labels;
use confdraft_core::draft::setup::DraftSetup;

/// One category row in the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub item_count: usize,
    /// Fewer items than participants.
    pub short: bool,
}

/// "N participants • M conferences"
pub fn summary_text(setup: &DraftSetup, labels: &Labels) -> String {
    format!(
        "{} participants • {} {}s",
        setup.participants.len(),
        setup.categories.len(),
        labels.category.to_lowercase()
    )
}

pub fn category_summaries(setup: &DraftSetup) -> Vec<CategorySummary> {
    let needed = setup.participants.len();
    setup
        .categories
        .iter()
        .map(|c| CategorySummary {
            name: c.name.clone(),
            item_count: c.items.len(),
            short: c.items.len() < needed,
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, setup: &DraftSetup, labels: &Labels) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let mut participants: Vec<Line> = setup
        .participants
        .iter()
        .map(|name| Line::from(format!(" {name}")))
        .collect();
    if let Err(e) = setup.validate() {
        participants.push(Line::from(""));
        participants.push(Line::from(Span::styled(
            format!(" {e}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(
        Paragraph::new(participants)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Participants ")),
        columns[0],
    );

    let needed = setup.participants.len();
    let categories: Vec<Line> = category_summaries(setup)
        .into_iter()
        .map(|summary| {
            let mut spans = vec![
                Span::styled(
                    format!(" {}", summary.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} {}s", summary.item_count, labels.item.to_lowercase()),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if summary.short {
                spans.push(Span::styled(
                    format!("  (short: {} < {})", summary.item_count, needed),
                    Style::default().fg(Color::Red),
                ));
            }
            Line::from(spans)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(categories).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {}s ", labels.category)),
        ),
        columns[1],
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
