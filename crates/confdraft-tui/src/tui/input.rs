// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand values for the app, or
// into local ViewState mutations (selection, scrolling, confirmations).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{PendingPick, Screen, ViewState};
use crate::app::{App, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be applied to the
/// draft. Returns `None` when it was handled locally by mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState, app: &App) -> Option<UserCommand> {
    // On Windows crossterm also emits Release events.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.pending_pick.is_some() {
        return handle_confirm_pick(key_event, view_state);
    }

    if key_event.code == KeyCode::Char('q') {
        view_state.confirm_quit = true;
        return None;
    }

    match view_state.screen.clone() {
        Screen::Setup => handle_setup(key_event),
        Screen::Order => handle_order(key_event),
        Screen::Draft => handle_draft(key_event, view_state, app),
        Screen::Transition { next, .. } => handle_transition(key_event, view_state, next.is_some()),
        Screen::Results => handle_results(key_event, view_state, app),
    }
}

/// In quit confirmation mode `y`/`q` confirm, `n`/`Esc` cancel, and all
/// other keys are blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// `y`/`Enter` submit the pending pick, `n`/`Esc` drop it.
fn handle_confirm_pick(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => view_state
            .pending_pick
            .take()
            .map(|pending| UserCommand::SubmitPick(pending.item)),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.pending_pick = None;
            None
        }
        _ => None,
    }
}

fn handle_setup(key_event: KeyEvent) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => Some(UserCommand::StartDraft),
        KeyCode::Char('r') => Some(UserCommand::ReloadSetup),
        _ => None,
    }
}

fn handle_order(key_event: KeyEvent) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(UserCommand::BeginCategory),
        KeyCode::Char('a') => Some(UserCommand::AutoComplete),
        _ => None,
    }
}

fn handle_draft(key_event: KeyEvent, view_state: &mut ViewState, app: &App) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.selected = view_state.selected.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.selected += 1;
            view_state.clamp_selection(app.available_items().len());
            None
        }
        KeyCode::Home => {
            view_state.selected = 0;
            None
        }
        KeyCode::Enter => {
            view_state.pending_pick = pending_for_selection(view_state, app);
            None
        }
        KeyCode::Char('a') => Some(UserCommand::AutoComplete),
        KeyCode::Char('e') => Some(UserCommand::Export),
        _ => None,
    }
}

/// Build the confirmation for the highlighted item and whoever is on the
/// clock. `None` when there is nothing to pick.
fn pending_for_selection(view_state: &mut ViewState, app: &App) -> Option<PendingPick> {
    let items = app.available_items();
    view_state.clamp_selection(items.len());
    let item = items.get(view_state.selected)?;
    let session = app.session();
    Some(PendingPick {
        participant: session.current_picker().ok()?.to_string(),
        category: session.current_category().ok()?.to_string(),
        item: item.clone(),
    })
}

fn handle_transition(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    has_next: bool,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter | KeyCode::Char(' ') if has_next => Some(UserCommand::BeginCategory),
        KeyCode::Enter | KeyCode::Char(' ') => {
            view_state.screen = Screen::Results;
            view_state.results_scroll = 0;
            None
        }
        KeyCode::Char('a') if has_next => Some(UserCommand::AutoComplete),
        KeyCode::Char('e') => Some(UserCommand::Export),
        _ => None,
    }
}

fn handle_results(key_event: KeyEvent, view_state: &mut ViewState, app: &App) -> Option<UserCommand> {
    let rows = app.session().state().participant_count();
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.results_scroll = view_state.results_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.results_scroll = (view_state.results_scroll + 1).min(rows.saturating_sub(1));
            None
        }
        KeyCode::Char('e') => Some(UserCommand::Export),
        KeyCode::Char('n') => Some(UserCommand::NewDraft),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
