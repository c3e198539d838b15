// Terminal UI: screens, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that tracks which screen is showing and any
// pending confirmation. Draft events arrive over an mpsc channel fed by a
// session observer; the TUI applies them to `ViewState` and re-renders at
// ~30 fps. All draft data is read from the `App` at render time.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info};

use confdraft_core::draft::session::DraftEvent;

use crate::app::{App, UserCommand};
use layout::{build_layout, AppLayout};
use widgets::{
    banner, category_picks, confirm, items, order, results, setup, status_bar, transition,
};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which full-screen view is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    /// Loaded participants and catalogs, before anything is randomized.
    #[default]
    Setup,
    /// Randomized pick order and category order, before the first pick.
    Order,
    /// Picking in the current category.
    Draft,
    /// A category just filled up.
    Transition {
        completed: String,
        next: Option<String>,
    },
    /// Final results matrix.
    Results,
}

/// A pick awaiting y/n confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPick {
    pub participant: String,
    pub category: String,
    pub item: String,
}

impl PendingPick {
    pub fn prompt(&self) -> String {
        format!(
            "{} selects {} from the {}?",
            self.participant, self.item, self.category
        )
    }
}

/// TUI-local state. Draft data itself lives in the `App`.
#[derive(Debug, Default)]
pub struct ViewState {
    pub screen: Screen,
    /// Highlighted row among the available items.
    pub selected: usize,
    pub pending_pick: Option<PendingPick>,
    pub confirm_quit: bool,
    /// First visible row of the results table.
    pub results_scroll: usize,
}

impl ViewState {
    /// Keep the selection inside a list of `len` rows.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// DraftEvent processing
// ---------------------------------------------------------------------------

/// Apply a single draft event to the ViewState.
fn apply_draft_event(state: &mut ViewState, event: DraftEvent) {
    match event {
        DraftEvent::Started { .. } => {
            state.screen = Screen::Order;
            state.selected = 0;
            state.pending_pick = None;
            state.results_scroll = 0;
        }
        DraftEvent::Reset => {
            state.screen = Screen::Setup;
            state.selected = 0;
            state.pending_pick = None;
            state.results_scroll = 0;
        }
        DraftEvent::CategoryOpened { .. } => {
            state.screen = Screen::Draft;
            state.selected = 0;
        }
        DraftEvent::PickRecorded { .. } => {
            state.pending_pick = None;
        }
        DraftEvent::CategoryCompleted { category, next, .. } => {
            state.screen = Screen::Transition {
                completed: category,
                next,
            };
            state.pending_pick = None;
        }
        DraftEvent::DraftCompleted => {}
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame for the current screen.
fn render_frame(frame: &mut Frame, state: &ViewState, app: &App) {
    let area = frame.area();
    let layout = build_layout(area);
    let session = app.session();
    let labels = app.labels();

    status_bar::render(frame, layout.status_bar, app);

    match &state.screen {
        Screen::Setup => {
            banner::render(
                frame,
                layout.banner,
                "Draft Setup",
                &setup::summary_text(app.setup(), labels),
            );
            setup::render(frame, layout.body, app.setup(), labels);
        }
        Screen::Order => {
            banner::render(
                frame,
                layout.banner,
                "Draft Order",
                "The order has been randomized. Press Enter to begin.",
            );
            order::render(
                frame,
                layout.body,
                session.state().pick_order(),
                session.state().category_order(),
                labels,
            );
        }
        Screen::Draft => match app.current_board() {
            Some(board) => {
                let (title, subtitle) = banner::draft_text(&board, labels);
                banner::render(frame, layout.banner, &title, &subtitle);
                items::render(frame, layout.main_panel, &board, state.selected, labels);
                category_picks::render(frame, layout.sidebar, &board);
            }
            None => {
                banner::render(frame, layout.banner, "Draft", "No draft in progress");
            }
        },
        Screen::Transition { completed, next } => {
            let position = session
                .state()
                .category_order()
                .iter()
                .position(|c| c == completed);
            let board = position.and_then(|p| session.category_board(p));
            banner::render(
                frame,
                layout.banner,
                &format!("{completed} Complete!"),
                &transition::next_text(next.as_deref()),
            );
            transition::render(frame, layout.body, board.as_ref(), next.as_deref(), labels);
        }
        Screen::Results => {
            banner::render(
                frame,
                layout.banner,
                "Final Draft Results",
                &format!("{} participants", session.state().participant_count()),
            );
            results::render(
                frame,
                layout.body,
                &session.results_matrix(),
                session.state().category_order(),
                state.results_scroll,
            );
        }
    }

    render_help_bar(frame, &layout, &state.screen);

    if let Some(pending) = &state.pending_pick {
        confirm::render(frame, area, " Confirm Pick ", &pending.prompt());
    }
    if state.confirm_quit {
        confirm::render(frame, area, " Quit? ", "Really quit?");
    }
}

/// Key hints for each screen.
pub fn help_text(screen: &Screen) -> &'static str {
    match screen {
        Screen::Setup => " Enter:Start draft | r:Reload | q:Quit",
        Screen::Order => " Enter:Begin | a:Auto-complete | q:Quit",
        Screen::Draft => " j/k:Move | Enter:Pick | a:Auto-complete | e:Export | q:Quit",
        Screen::Transition { next: Some(_), .. } => " Enter:Next | a:Auto-complete | e:Export | q:Quit",
        Screen::Transition { next: None, .. } => " Enter:Results | e:Export | q:Quit",
        Screen::Results => " j/k:Scroll | e:Export | n:New draft | q:Quit",
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, screen: &Screen) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(screen),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the operator quits.
///
/// 1. Initializes the terminal and installs a panic hook that restores it.
/// 2. Runs an async select loop over draft events, keyboard input, and
///    render ticks.
/// 3. Restores the terminal on exit.
pub async fn run(
    mut app: App,
    mut events: mpsc::UnboundedReceiver<DraftEvent>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(event) => {
                        debug!("Draft event: {:?}", event);
                        apply_draft_event(&mut view_state, event);
                    }
                    // The session (and its observer) was dropped.
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(command) = input::handle_key(key_event, &mut view_state, &app) {
                            if command == UserCommand::Quit {
                                info!("Quit requested");
                                break;
                            }
                            app.handle_command(command);
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state, &app))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{test_app, unstarted_app};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn drain(state: &mut ViewState, rx: &mut mpsc::UnboundedReceiver<DraftEvent>) {
        while let Ok(event) = rx.try_recv() {
            apply_draft_event(state, event);
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn view_state_default_is_setup_screen() {
        let state = ViewState::default();
        assert_eq!(state.screen, Screen::Setup);
        assert_eq!(state.selected, 0);
        assert!(state.pending_pick.is_none());
        assert!(!state.confirm_quit);
    }

    #[test]
    fn clamp_selection_handles_empty_lists() {
        let mut state = ViewState {
            selected: 7,
            ..ViewState::default()
        };
        state.clamp_selection(3);
        assert_eq!(state.selected, 2);
        state.clamp_selection(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn category_events_drive_screens() {
        let mut state = ViewState::default();
        apply_draft_event(
            &mut state,
            DraftEvent::CategoryOpened {
                category: "SEC".into(),
                position: 0,
            },
        );
        assert_eq!(state.screen, Screen::Draft);

        apply_draft_event(
            &mut state,
            DraftEvent::CategoryCompleted {
                category: "SEC".into(),
                position: 0,
                next: Some("ACC".into()),
            },
        );
        assert_eq!(
            state.screen,
            Screen::Transition {
                completed: "SEC".into(),
                next: Some("ACC".into())
            }
        );

        apply_draft_event(&mut state, DraftEvent::Reset);
        assert_eq!(state.screen, Screen::Setup);
    }

    #[test]
    fn setup_screen_previews_then_enter_randomizes() {
        let (mut app, mut rx) = unstarted_app();
        let mut state = ViewState::default();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Draft Setup"));
        assert!(text.contains("2 participants • 2 conferences"));
        assert!(text.contains("ACC  2 teams"));
        assert!(text.contains("Enter:Start draft"));

        // Nothing is randomized until the operator confirms.
        drain(&mut state, &mut rx);
        assert_eq!(state.screen, Screen::Setup);

        app.handle_command(UserCommand::StartDraft);
        drain(&mut state, &mut rx);
        assert_eq!(state.screen, Screen::Order);
    }

    #[test]
    fn new_draft_from_results_returns_to_setup() {
        let (mut app, mut rx) = test_app();
        let mut state = ViewState::default();
        app.handle_command(UserCommand::AutoComplete);
        drain(&mut state, &mut rx);
        state.screen = Screen::Results;

        app.handle_command(UserCommand::NewDraft);
        drain(&mut state, &mut rx);
        assert_eq!(state.screen, Screen::Setup);

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
        // The reload picked up the configured preset.
        assert!(screen_text(&terminal).contains("Big Ten"));
    }

    #[test]
    fn auto_complete_lands_on_final_transition() {
        let (mut app, mut rx) = test_app();
        let mut state = ViewState::default();
        app.handle_command(UserCommand::AutoComplete);
        drain(&mut state, &mut rx);
        assert_eq!(
            state.screen,
            Screen::Transition {
                completed: "ACC".into(),
                next: None
            }
        );
    }

    #[test]
    fn help_text_matches_screen() {
        assert!(help_text(&Screen::Setup).contains("Enter:Start draft"));
        assert!(help_text(&Screen::Order).contains("Enter:Begin"));
        assert!(help_text(&Screen::Results).contains("n:New draft"));
        let last = Screen::Transition {
            completed: "ACC".into(),
            next: None,
        };
        assert!(help_text(&last).contains("Enter:Results"));
    }

    #[test]
    fn every_screen_renders() {
        let (mut app, mut rx) = test_app();
        let mut state = ViewState::default();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        drain(&mut state, &mut rx);
        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
        assert!(screen_text(&terminal).contains("Draft Order"));

        app.handle_command(UserCommand::BeginCategory);
        drain(&mut state, &mut rx);
        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
        assert!(screen_text(&terminal).contains("Georgia"));

        app.handle_command(UserCommand::AutoComplete);
        drain(&mut state, &mut rx);
        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
        assert!(screen_text(&terminal).contains("ACC Complete!"));

        state.screen = Screen::Results;
        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
        assert!(screen_text(&terminal).contains("Final Draft Results"));
    }

    #[test]
    fn pending_pick_shows_confirmation() {
        let (app, _rx) = test_app();
        let state = ViewState {
            screen: Screen::Draft,
            pending_pick: Some(PendingPick {
                participant: "Matt".into(),
                category: "SEC".into(),
                item: "Texas".into(),
            }),
            ..ViewState::default()
        };
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_frame(frame, &state, &app))
            .unwrap();
        assert!(screen_text(&terminal).contains("Matt selects Texas from the SEC?"));
    }
}
