//! Task tracker terminal client.
//!
//! # Environment Variables
//!
//! - `TASKTRACKER_API_URL`: server base URL (default: `http://127.0.0.1:3000`)
//! - `TASKTRACKER_LOG`: write logs to this file; nothing is logged when unset
//! - `RUST_LOG`: log filter (e.g. `tasktracker_client=debug`)

use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use tasktracker_client::view::{self, Input, ViewState};
use tasktracker_client::{ClientConfig, HttpTaskApi, Intent, TaskApi, TaskBoard};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ClientConfig::from_env();
    init_tracing(&config)?;

    tracing::info!(api_url = %config.api_url, "Starting task tracker client");

    let mut board = TaskBoard::new(HttpTaskApi::new(config.api_url));
    board.run(Intent::Load).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_loop(&mut terminal, &mut board).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<A: TaskApi>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    board: &mut TaskBoard<A>,
) -> anyhow::Result<()> {
    let mut view_state = ViewState::default();

    loop {
        view_state.clamp(board.state().tasks.len());
        terminal.draw(|frame| view::render(frame, board.state(), &view_state))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match view::handle_key(key, board.state(), &mut view_state) {
            Some(Input::Quit) => return Ok(()),
            Some(Input::Local(action)) => board.dispatch(action),
            Some(Input::Remote(intent)) => board.run(intent).await,
            None => {}
        }
    }
}

/// Logs go to a file, since the terminal belongs to the UI.
fn init_tracing(config: &ClientConfig) -> anyhow::Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tasktracker_client=debug,info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
