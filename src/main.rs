//! admin-table binary entry point.
//!
//! Parses the command line, initializes logging and the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.

use admin_table::app::{self, Options};
use admin_table::error::Result;
use admin_table::source::DEFAULT_MEMBERS_URL;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "admin-table", version, about = "TUI admin dashboard for member records")]
struct Cli {
    /// URL of the JSON array of member records
    #[arg(long, env = "ADMIN_TABLE_URL", default_value = DEFAULT_MEMBERS_URL)]
    url: String,

    /// Load members from a local JSON file instead of the network
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Theme configuration file (created with defaults if missing)
    #[arg(long, default_value = "theme.conf")]
    theme: String,

    /// Keybinding configuration file (created with defaults if missing)
    #[arg(long, default_value = "keybinds.conf")]
    keybinds: String,

    /// Write logs to this file; stdout belongs to the TUI
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn init_logging(path: &PathBuf) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path).map_err(|e| format!("init logging: {}", e))?;
    }

    let opts = Options {
        url: cli.url,
        data_file: cli.data_file,
        theme_path: cli.theme,
        keybinds_path: cli.keybinds,
    };

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, &opts);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
