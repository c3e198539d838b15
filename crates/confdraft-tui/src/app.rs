// Application state and command handling.
//
// Owns the draft session and applies user commands to it. Engine events are
// forwarded by a session observer into an unbounded channel that the TUI
// loop drains; the TUI never mutates the session directly.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use confdraft_core::config::{Config, Labels, SourceKind};
use confdraft_core::draft::session::{CategoryBoard, DraftEvent, DraftSession};
use confdraft_core::draft::state::DraftPhase;
use confdraft_core::draft::setup::{DraftSetup, StartOptions};
use confdraft_core::draft::DraftError;
use confdraft_core::{export, import, preset};

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Commands the TUI sends to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Randomize the orders for the loaded setup.
    StartDraft,
    /// Read the data source again (setup screen only).
    ReloadSetup,
    /// Open the pending category.
    BeginCategory,
    /// A confirmed pick for whoever is on the clock.
    SubmitPick(String),
    /// Random picks for everything that is left.
    AutoComplete,
    Export,
    /// Discard the draft, reload the data source, and return to setup.
    NewDraft,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line feedback shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        StatusMessage {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Setup loading
// ---------------------------------------------------------------------------

/// Build the draft setup and start options described by `config`.
///
/// Relative input paths are resolved against `base_dir`.
pub fn load_setup(config: &Config, base_dir: &Path) -> anyhow::Result<(DraftSetup, StartOptions)> {
    let setup = match config.draft.source {
        SourceKind::File => {
            let input = config
                .draft
                .input_path
                .as_deref()
                .context("draft.input_path is required for a file source")?;
            let path = base_dir.join(input);
            import::load_setup(&path)
                .with_context(|| format!("failed to import draft setup from {}", path.display()))?
        }
        SourceKind::Preset => preset::setup_with_participants(&config.draft.participants),
    };
    info!(
        "Setup loaded: {} participants, {} categories",
        setup.participants.len(),
        setup.categories.len()
    );
    Ok((setup, config.draft.start_options()))
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct App {
    pub config: Config,
    /// Directory relative data paths are resolved against.
    base_dir: PathBuf,
    /// The setup the next draft starts from.
    setup: DraftSetup,
    options: StartOptions,
    session: DraftSession,
    rng: StdRng,
    /// Latest feedback for the operator.
    pub status: Option<StatusMessage>,
}

impl App {
    /// Wrap a loaded setup. The draft is not started until
    /// [`UserCommand::StartDraft`]; its events are forwarded to `events`.
    pub fn new(
        config: Config,
        base_dir: PathBuf,
        setup: DraftSetup,
        options: StartOptions,
        events: mpsc::UnboundedSender<DraftEvent>,
        rng: StdRng,
    ) -> Self {
        let mut session = DraftSession::new();
        session.subscribe(move |event: &DraftEvent| {
            // The receiver only goes away while shutting down.
            let _ = events.send(event.clone());
        });

        App {
            config,
            base_dir,
            setup,
            options,
            session,
            rng,
            status: None,
        }
    }

    /// Load the configured data source and wrap it.
    pub fn load(
        config: Config,
        base_dir: PathBuf,
        events: mpsc::UnboundedSender<DraftEvent>,
        rng: StdRng,
    ) -> anyhow::Result<Self> {
        let (setup, options) = load_setup(&config, &base_dir)?;
        Ok(App::new(config, base_dir, setup, options, events, rng))
    }

    /// The setup shown on the setup screen and used by the next start.
    pub fn setup(&self) -> &DraftSetup {
        &self.setup
    }

    pub fn session(&self) -> &DraftSession {
        &self.session
    }

    pub fn labels(&self) -> &Labels {
        &self.config.labels
    }

    /// Board for the category at the cursor, if the draft is active.
    pub fn current_board(&self) -> Option<CategoryBoard> {
        self.session.current_board()
    }

    /// Unclaimed items in the current category, in catalog order.
    pub fn available_items(&self) -> Vec<String> {
        self.current_board()
            .map(|board| {
                board
                    .items
                    .into_iter()
                    .filter(|i| !i.taken)
                    .map(|i| i.name)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Apply a user command. Failures become status messages.
    pub fn handle_command(&mut self, command: UserCommand) {
        match command {
            UserCommand::StartDraft => {
                match self.session.start(self.setup.clone(), self.options.clone(), &mut self.rng) {
                    Ok(()) => {
                        self.status = Some(StatusMessage::info("Draft order randomized"));
                    }
                    Err(e) => self.report_engine_error(e),
                }
            }
            UserCommand::ReloadSetup => {
                if self.session.phase() != DraftPhase::NotStarted {
                    self.report_engine_error(DraftError::AlreadyStarted);
                } else {
                    self.reload_setup();
                }
            }
            UserCommand::BeginCategory => {
                if let Err(e) = self.session.begin_category() {
                    self.report_engine_error(e);
                }
            }
            UserCommand::SubmitPick(item) => match self.session.submit_pick(&item) {
                Ok(outcome) => {
                    self.status = Some(StatusMessage::info(outcome.pick.to_string()));
                }
                Err(e) => self.report_engine_error(e),
            },
            UserCommand::AutoComplete => match self.session.simulate_remaining(&mut self.rng) {
                Ok(made) => {
                    self.status = Some(StatusMessage::info(format!("Auto-completed {made} picks")));
                }
                Err(e) => self.report_engine_error(e),
            },
            UserCommand::Export => self.export(),
            UserCommand::NewDraft => {
                self.session.reset();
                self.reload_setup();
            }
            UserCommand::Quit => {}
        }
    }

    /// Re-read the data source. On failure the previous setup is kept.
    fn reload_setup(&mut self) {
        match load_setup(&self.config, &self.base_dir) {
            Ok((setup, options)) => {
                self.setup = setup;
                self.options = options;
                self.status = Some(StatusMessage::info("Setup loaded; press Enter to start"));
            }
            Err(e) => {
                error!("Reloading setup failed: {:#}", e);
                self.status = Some(StatusMessage::error(format!(
                    "Reload failed, keeping previous setup: {e:#}"
                )));
            }
        }
    }

    fn export(&mut self) {
        let dir = Path::new(&self.config.export.dir);
        match export::export_to_dir(dir, &self.session, &self.config.labels) {
            Ok(paths) => {
                self.status = Some(StatusMessage::info(format!(
                    "Exported {} and {}",
                    paths.results.display(),
                    paths.pick_details.display()
                )));
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.status = Some(StatusMessage::error(format!("Export failed: {e}")));
            }
        }
    }

    fn report_engine_error(&mut self, e: DraftError) {
        if e.is_rejected_pick() {
            warn!("Pick rejected: {}", e);
        } else {
            error!("Draft command failed: {}", e);
        }
        self.status = Some(StatusMessage::error(e.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
