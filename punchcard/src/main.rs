//! Punchcard — terminal time tracker for a remote REST backend.
//!
//! Launches the TUI and talks to the tracker API configured via CLI
//! flags, environment variables, or config file
//! (`~/.config/punchcard/config.toml`).
//!
//! ```bash
//! # Against a local backend
//! cargo run --bin punchcard
//!
//! # Against a deployed backend
//! cargo run --bin punchcard -- --server-url https://tracker.example.com/tracker
//!
//! # Or via environment variable
//! PUNCHCARD_SERVER_URL=https://tracker.example.com/tracker cargo run
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use punchcard::api::{self, ApiCommand, ApiEvent};
use punchcard::app::App;
use punchcard::config::{CliArgs, ClientConfig};
use punchcard::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return Err(io::Error::other(e.to_string()));
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(server = %config.base_url, "punchcard starting");

    // Spawn the API background tasks before taking over the terminal so a
    // bad base URL fails with a readable message.
    let (cmd_tx, evt_rx) = match api::spawn_api(&config) {
        Ok(handles) => handles,
        Err(e) => {
            eprintln!("Error: {e}");
            return Err(io::Error::other(e.to_string()));
        }
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, cmd_tx, evt_rx, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("punchcard exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("punchcard.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cmd_tx: mpsc::Sender<ApiCommand>,
    mut evt_rx: mpsc::Receiver<ApiEvent>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new();

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending ApiEvents (non-blocking). An event may
        // call for a follow-up command (the post-login fetch).
        while let Ok(event) = evt_rx.try_recv() {
            if let Some(follow_up) = app.apply_api_event(event) {
                dispatch(&mut app, &cmd_tx, follow_up);
            }
        }

        // Step 3: Advance display timers.
        app.tick();

        // Step 4: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(ApiCommand) when a user action
            // requires a network request.
            if let Some(cmd) = app.handle_key_event(key) {
                dispatch(&mut app, &cmd_tx, cmd);
            }
        }

        if app.should_quit {
            // Stop the API dispatcher; in-flight requests are not awaited.
            let _ = cmd_tx.try_send(ApiCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Send a command to the API dispatcher, surfacing channel pressure in
/// the status line instead of blocking the UI.
fn dispatch(app: &mut App, cmd_tx: &mpsc::Sender<ApiCommand>, cmd: ApiCommand) {
    match cmd_tx.try_send(cmd) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(_)) => {
            app.set_status("Network busy, action dropped");
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            app.set_status("Network unavailable");
        }
    }
}
