//! Perfect Tic-Tac-Toe - terminal front-end.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod input;
mod selfplay;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use cli::{Cli, Command};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use perfect_tictactoe::{GameController, GameEvent, PlayConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "perfect_tictactoe.log";
const FRAME_INTERVAL: Duration = Duration::from_millis(30);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging()?;

    let config = cli.apply(PlayConfig::load_or_default(&cli.config)?);
    info!(command = ?cli.command(), ?config, "Starting perfect_tictactoe");

    match cli.command() {
        Command::Play => run_tui(config).await,
        Command::Selfplay => {
            let session = selfplay::play_out(*config.search())?;
            println!("{}", selfplay::report(&session));
            Ok(())
        }
    }
}

/// Logs go to a file so they don't interfere with the terminal UI.
fn init_logging() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,perfect_tictactoe=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Runs the interactive game until the user quits.
#[instrument(skip(config))]
async fn run_tui(config: PlayConfig) -> Result<()> {
    let (controller, mut events) = GameController::new(&config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &controller, &mut events).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &GameController,
    events: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    let mut app = App::new();

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(&event);
        }

        let session = controller.snapshot();
        terminal.draw(|f| ui::draw(f, &session, &app))?;

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, controller);
                }
            }
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        // Computer moves run on the same runtime.
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
}
