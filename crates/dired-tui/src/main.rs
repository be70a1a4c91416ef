//! dired: a directory panel for the terminal, built with ratatui.
//!
//! This binary initialises logging and the terminal, opens the panel through
//! the core registry, runs the event loop, and restores the terminal on exit
//! or panic.

mod app;
mod dispatch;
mod host;
mod input;
mod render;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dired_core::config::settings::{Config, LogConfig};
use dired_core::fs::ops::LocalFs;
use dired_core::nav::controller::ControllerOptions;
use dired_core::nav::registry::{create_or_show, PanelRegistry};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use crate::app::App;
use crate::dispatch::apply;
use crate::host::TerminalHost;
use crate::input::handle_key;
use crate::render::{render, PanelView};

/// The terminal the panel draws on.
pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Sends `tracing` output to the configured log file so it never lands on
/// the terminal the panel draws on.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log.path)
        .with_context(|| format!("failed to open log file {}", log.path.display()))?;
    let level = log
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::DEBUG);

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_max_level(level)
        .with_ansi(false)
        .init();
    Ok(())
}

/// Resolves the command-line argument into the directory to list and the
/// entry to focus. A file argument opens its parent with the file focused.
fn start_target(arg: Option<PathBuf>, cwd: &Path) -> (PathBuf, Option<PathBuf>) {
    let Some(arg) = arg else {
        return (cwd.to_path_buf(), None);
    };
    let path = cwd.join(arg);
    if path.is_dir() {
        return (path, None);
    }
    match path.parent() {
        Some(parent) => (parent.to_path_buf(), Some(path)),
        None => (path, None),
    }
}

fn main() -> anyhow::Result<()> {
    let (config, config_error) = Config::load_or_default(Config::default_path().as_deref());
    init_logging(&config.log)?;
    if let Some(e) = config_error {
        warn!(error = %e, "config not loaded, using defaults");
    }

    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let (dir, focus) = start_target(std::env::args().nth(1).map(PathBuf::from), &cwd);
    info!(dir = %dir.display(), "starting");

    let mut registry = PanelRegistry::new();
    create_or_show(
        &mut registry,
        LocalFs,
        dir,
        focus,
        ControllerOptions::from(&config.general),
    )?;

    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &mut registry);

    registry.dispose();
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Reads one key at a time and runs it to completion before the next.
fn run_app(terminal: &mut Tui, registry: &mut PanelRegistry<LocalFs>) -> anyhow::Result<()> {
    let mut app = App::new();

    loop {
        let Some(controller) = registry.active_mut() else {
            return Ok(());
        };
        let view = PanelView::from_state(controller.state());
        terminal.draw(|f| render(f, &view, &app, None))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let input = handle_key(key, app.mode(), app.keymap(), app.search_keymap());
        let mut host = TerminalHost::new(terminal, app.clone(), view);
        app = apply(app, input, controller, &mut host);

        if app.should_quit() {
            info!("quitting");
            return Ok(());
        }
    }
}
