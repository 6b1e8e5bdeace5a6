//! ---
//! ipcmon_section: "04-dashboard"
//! ipcmon_subsection: "binary"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Terminal dashboard launcher."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
mod app;
mod view;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ipcmon_common::config::{AppConfig, DEFAULT_CONFIG_CANDIDATES};
use ipcmon_common::version::VersionInfo;
use ipcmon_common::init_tracing;
use ipcmon_sim::TelemetryStore;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use crate::app::App;
use crate::view::draw_ui;

#[derive(Parser, Debug)]
#[command(
    author,
    disable_version_flag = true,
    about = "Watch simulated IPC telemetry in a terminal dashboard",
    propagate_version = false
)]
struct Cli {
    /// Configuration file (defaults to IPCMON_CONFIG, then ipcmon.toml, then configs/ipcmon.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory that JSON and CSV exports are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Override the simulation seed
    #[arg(long)]
    seed: Option<u64>,
    /// Redraw interval in milliseconds
    #[arg(long, default_value_t = 250)]
    refresh: u64,

    /// Print extended version information and exit
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    version: bool,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::load_with_source(&DEFAULT_CONFIG_CANDIDATES)?.config,
    };
    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }
    if let Some(dir) = &cli.export_dir {
        config.export.directory = dir.clone();
    }
    // stdout belongs to the terminal while the dashboard is up
    config.logging.stdout = false;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", VersionInfo::current().extended());
        return Ok(());
    }
    let config = load_config(&cli)?;
    init_tracing("ui", &config.logging)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let store = {
        let _guard = runtime.enter();
        TelemetryStore::spawn(&config.simulation)
    };
    info!(export_dir = %config.export.directory.display(), "dashboard starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let app = App::new(store.current(), config.export.directory.clone());
    let result = run_app(&mut terminal, &store, app, cli.refresh);
    cleanup_terminal(&mut terminal)?;
    runtime.block_on(store.shutdown());
    info!("dashboard stopped");
    if let Err(err) = result {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
    Ok(())
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    store: &TelemetryStore,
    mut app: App,
    refresh: u64,
) -> Result<()> {
    let tick_rate = Duration::from_millis(refresh.max(50));
    loop {
        app.refresh(store.current());
        terminal.draw(|frame| draw_ui(frame, &app))?;
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = app.handle_key(key);
                if app.dispatch(action, store) {
                    break;
                }
            }
        }
    }
    Ok(())
}
