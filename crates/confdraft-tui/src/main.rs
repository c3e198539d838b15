// Conference draft entry point.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Build the draft setup from the configured source
// 4. Wire the session's events into a channel
// 5. Run the TUI until the operator quits (the draft starts from the setup screen)

use confdraft_core::config::{self, LoggingConfig};
use confdraft_tui::app::App;
use confdraft_tui::tui;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;
    info!("Conference draft starting up");

    // 3 + 4. Build the draft setup and wire its events
    let base_dir = std::env::current_dir()?;
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let app = App::load(config, base_dir, event_tx, StdRng::from_entropy())
        .context("failed to load the draft setup")?;

    // 5. Run the TUI
    tui::run(app, event_rx).await?;

    info!("Conference draft shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join(&logging.dir);
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("confdraft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
