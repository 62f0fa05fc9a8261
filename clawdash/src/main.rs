//! clawdash - operator dashboard for an agent gateway
//!
//! Terminal UI for chatting with the agent, answering tool approvals,
//! tailing gateway logs, and browsing memory, jobs and extensions.

mod app;
mod message_format;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use clawdash_core::{Config, GatewayClient, Session, Update};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::App;

#[derive(Parser)]
#[command(name = "clawdash")]
#[command(about = "Operator dashboard for an agent gateway")]
#[command(version)]
struct Args {
    /// Gateway base URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Bearer token (overrides CLAWDASH_TOKEN and the config file)
    #[arg(short, long)]
    token: Option<String>,

    /// Path to an alternative config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    if let Some(url) = args.url {
        config.gateway.url = url;
    }
    config.validate().context("invalid configuration")?;

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        clawdash_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!(url = %config.gateway.url, "clawdash TUI starting up");

    let Some(token) = config.resolve_token(args.token.as_deref()) else {
        anyhow::bail!("Token required: pass --token or set CLAWDASH_TOKEN");
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let client = GatewayClient::new(&config.gateway, &token).context("failed to build client")?;

    // Authentication gate: the thread list doubles as a token check.
    runtime
        .block_on(client.threads())
        .context("Invalid token")?;
    tracing::info!("Authenticated with gateway");

    let (mut session, mut updates) = Session::new(
        client,
        config.gateway.reconnect_delay(),
        runtime.handle().clone(),
    );
    let mut app = App::new(&config);
    session.execute_all(app.start());

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &mut session, &mut updates);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    session.shutdown();
    runtime.shutdown_timeout(Duration::from_secs(1));

    tracing::info!("clawdash TUI shutting down");

    result
}

/// Run the main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
    updates: &mut UnboundedReceiver<Update>,
) -> Result<()> {
    loop {
        // Drain everything the background tasks produced since the last frame
        while let Ok(update) = updates.try_recv() {
            if let Some(update) = session.admit(update) {
                let commands = app.dashboard.apply(update);
                session.execute_all(commands);
            }
        }

        // Fire due timers (debounced memory search)
        let commands = app.tick(Instant::now());
        session.execute_all(commands);

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let commands = app.handle_key(key);
                    session.execute_all(commands);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
