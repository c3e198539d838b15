// Status bar widget: draft phase, pick counter, progress, last message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use confdraft_core::config::Labels;
use confdraft_core::draft::session::DraftSession;
use confdraft_core::draft::state::DraftPhase;

use crate::app::{App, StatusLevel};

/// Width of the text progress bar, in cells.
const PROGRESS_WIDTH: usize = 12;

/// Render the status bar into the given area.
///
/// Layout: [phase and pick counter] [progress] [last message]
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let mut spans = vec![
        Span::styled(
            format!(" {} ", phase_text(session, app.labels())),
            Style::default().fg(Color::White),
        ),
        Span::styled("| ", Style::default().fg(Color::Gray)),
        Span::styled(
            progress_bar(session.progress(), PROGRESS_WIDTH),
            Style::default().fg(Color::Cyan),
        ),
    ];

    if let Some(status) = &app.status {
        let color = match status.level {
            StatusLevel::Info => Color::Green,
            StatusLevel::Error => Color::Red,
        };
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(status.text.clone(), Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Describe where the draft is, e.g. "Conference 2/4: SEC | Pick 3/4".
pub fn phase_text(session: &DraftSession, labels: &Labels) -> String {
    let state = session.state();
    let describe = |position: usize| {
        let name = state
            .category_order()
            .get(position)
            .map(String::as_str)
            .unwrap_or_default();
        let made = state.ledger().picks_for(name).len();
        format!(
            "{} {}/{}: {} | Pick {}/{}",
            labels.category,
            position + 1,
            state.category_count(),
            name,
            made,
            state.participant_count()
        )
    };

    match session.phase() {
        DraftPhase::NotStarted => "Not started".to_string(),
        DraftPhase::Randomized => "Order randomized".to_string(),
        DraftPhase::InCategory(position) => describe(position),
        DraftPhase::CategoryComplete(position) => format!("{} (complete)", describe(position)),
        DraftPhase::DraftComplete => "Draft complete".to_string(),
    }
}

/// A fixed-width bar with a percentage, e.g. "██████░░░░░░  50%".
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!(
        "{}{} {:>3}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        (ratio * 100.0).round() as u32
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
