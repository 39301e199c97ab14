//! IntervalLab TUI — symbol form, interval averages table, summary metrics.
//!
//! Layout:
//! - Sidebar: symbol input, interval legend
//! - Metrics: one card per interval
//! - Results: one row per trading day, most recent first
//! - Status bar: key hints, last status message

mod app;
mod input;
mod theme;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use intervallab_core::{AlphaVantageProvider, ProviderConfig};

use crate::app::AppState;

const LOG_FILE: &str = "intervallab-tui.log";

fn main() -> Result<()> {
    init_logging()?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config = ProviderConfig::default().with_process_env();
    if config.uses_default_key() {
        log::warn!(
            "no API key configured; set {}",
            intervallab_core::config::API_KEY_ENV
        );
    }
    let provider = AlphaVantageProvider::new(config)?;
    let export_dir = std::env::current_dir().context("resolving working directory")?;
    let mut app = AppState::new(Box::new(provider), export_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Log to a file so records never draw over the UI.
fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join(LOG_FILE);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("intervallab-tui started");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. A queued calculation runs after its "Fetching..." frame is on screen.
        if app.is_busy() {
            app.run_pending(Utc::now());
            continue;
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
