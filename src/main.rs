mod app;
mod config;
mod domain;
mod error;
mod input;
mod logging;
mod menu;
mod notifications;
mod persistence;
mod report;
mod session;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use config::{Config, DEFAULT_RECENT_DAYS, MAX_RECENT_DAYS};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use menu::Menu;
use persistence::{LogStore, DEFAULT_LOG_FILE};
use ratatui::{backend::CrosstermBackend, Terminal};
use session::StudySession;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use ticker::Ticker;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "studylog")]
#[command(
    about = "A terminal study timer that keeps a CSV log of your sessions",
    long_about = None
)]
struct Cli {
    /// Session log file
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Diagnostic log level (error, warn, info, debug, trace, off)
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full-screen timer window (the default)
    Window,
    /// Prompt-driven text menu
    Menu,
    /// Create the session log with its header if it doesn't exist
    Init,
    /// Print the total study time for a day
    Today {
        /// Day to report (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Print per-day totals for the last N days
    Recent {
        /// Number of days, ending today
        #[arg(short, long, default_value_t = DEFAULT_RECENT_DAYS,
              value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_RECENT_DAYS)))]
        days: u32,
        /// Also draw a text bar chart
        #[arg(short, long)]
        chart: bool,
        /// Print JSON instead of text
        #[arg(long, conflicts_with = "chart")]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::default()
        .with_log_file(cli.log_file)
        .with_log_level(cli.log_level);

    init_diagnostics(&config);
    let store = LogStore::new(config.log_file.clone());

    match cli.command.unwrap_or(Commands::Window) {
        Commands::Window => run_tui(store, &config),
        Commands::Menu => run_menu(store, &config),
        Commands::Init => {
            store.ensure()?;
            println!("Session log ready: {}", store.path().display());
            Ok(())
        }
        Commands::Today { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let total = report::today_total(&store, date)?;
            println!("{}", report::today_summary(&total));
            Ok(())
        }
        Commands::Recent { days, chart, json } => {
            let totals = report::recent_totals(&store, days, Local::now().date_naive())?;
            if json {
                println!("{}", report::recent_json(&totals)?);
            } else {
                println!("{}", report::recent_summary(&totals));
                if chart {
                    println!();
                    print!("{}", report::text_chart(&totals));
                }
            }
            Ok(())
        }
    }
}

/// Diagnostics are best-effort: a read-only data dir must not stop the timer
fn init_diagnostics(config: &Config) {
    let Some(dir) = Config::diagnostics_dir() else {
        return;
    };
    if let Err(e) = logging::enable_logging(&dir, config.log_level) {
        eprintln!("Warning: diagnostic logging disabled: {:#}", e);
    }
}

fn run_menu(store: LogStore, config: &Config) -> Result<()> {
    // Ctrl+C only raises the flag; the menu decides what stopping means, so a
    // finished session waiting for its note is never lost to the signal
    let interrupted = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&interrupted))
        .context("Failed to install Ctrl+C handler")?;

    info!(log = %config.log_file.display(), "text menu started");
    let session = StudySession::new(store, config);
    let mut menu = Menu::new(session, config, io::stdin().lock(), io::stdout(), interrupted);
    menu.run()
}

fn run_tui(store: LogStore, config: &Config) -> Result<()> {
    store.ensure()?;
    info!(log = %store.path().display(), "timer window started");

    let session = StudySession::new(store, config);
    let mut app = AppState::new(session, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, config.window_tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Time still on the clock is saved without a note
    if let Err(e) = app.session.save_on_exit() {
        error!(error = %e, "could not save session on exit");
        eprintln!("Error saving session: {:#}", e);
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick: Duration,
) -> Result<()> {
    let mut ticker = Ticker::new(tick, Instant::now());

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Wait for input, but never past the next tick
        if event::poll(ticker.time_until_due(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        if ticker.poll(Instant::now()) {
            app.tick();
        }
    }
}
