use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use liveclass_core::{AppState, Brand, Config, Role};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Topic, Tui};

#[derive(Parser, Debug)]
#[command(name = "liveclass")]
#[command(about = "Terminal client for EagleWise / MedQuiz Pro live classes")]
struct Cli {
    /// Product branding: eaglewise or medquiz
    #[arg(short, long, value_parser = parse_brand)]
    brand: Option<Brand>,
    /// Role preselected on the login form: student or teacher
    #[arg(short, long, value_parser = parse_role)]
    role: Option<Role>,
    /// Simulated login delay in milliseconds
    #[arg(long)]
    login_delay_ms: Option<u64>,
    /// Start in dark mode
    #[arg(long)]
    dark: bool,
    /// Config file (defaults to <config dir>/liveclass/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Log file (defaults to <data dir>/liveclass/liveclass.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Write the effective settings back to the config file before starting
    #[arg(long)]
    save_config: bool,
}

fn parse_brand(s: &str) -> Result<Brand, String> {
    Brand::from_str(s).ok_or_else(|| format!("unknown brand '{}', expected eaglewise or medquiz", s))
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::from_str(s).ok_or_else(|| format!("unknown role '{}', expected student or teacher", s))
}

impl Cli {
    /// Flags take precedence over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(brand) = self.brand {
            config.brand = brand;
        }
        if let Some(role) = self.role {
            config.default_role = role;
        }
        if let Some(delay) = self.login_delay_ms {
            config.login_delay_ms = delay;
        }
        if self.dark {
            config.dark_mode = true;
        }
    }
}

fn default_log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("Could not determine data directory"))?;
    Ok(data_dir.join("liveclass").join("liveclass.log"))
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Config {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load config, using defaults");
        Config::new()
    });
    cli.apply(&mut config);
    config
}

fn save_config(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.config {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    tracing::info!("saved config");
    Ok(())
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;
        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match &cli.log_file {
        Some(path) => path.clone(),
        None => default_log_path()?,
    };
    init_logging(&log_path)?;

    let config = load_config(&cli);
    if cli.save_config {
        save_config(&cli, &config)?;
    }
    tracing::info!(
        brand = config.brand.as_str(),
        login_delay_ms = config.login_delay_ms,
        "starting liveclass"
    );

    let state = AppState::new(&config);
    let mut events = EventHandler::new();
    events.forward(state.subscribe_session(), Topic::Session);
    events.forward(state.subscribe_announcement(), Topic::Announcement);
    events.forward(state.subscribe_doubts(), Topic::Doubts);
    events.forward(state.subscribe_theme(), Topic::Theme);

    let mut app = App::new(state, config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app, &mut events).await;
    tui::restore()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    tracing::info!("bye");
    result
}
