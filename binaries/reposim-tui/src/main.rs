//! GitHub Repo Clone Simulator
//!
//! Terminal front end: type a repository URL, get a generated frontend and
//! backend breakdown with a browsable file tree.

mod app;
mod events;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use events::EventHandler;
use ratatui::prelude::*;
use reposim_config::{Config, CONFIG_PATH_VAR};
use reposim_gemini::GeminiClient;
use reposim_view::AnalysisWorker;
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use theme::Theme;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "reposim", version, about = "GitHub Repo Clone Simulator")]
struct Args {
    /// YAML config file (overrides $REPOSIM_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model id (overrides config and $REPOSIM_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Start with the light theme
    #[arg(long)]
    light: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_override = args.config.as_ref().map(|p| p.to_string_lossy().into_owned());
    let mut config = Config::load_with(|name| {
        if name == CONFIG_PATH_VAR && config_override.is_some() {
            return config_override.clone();
        }
        std::env::var(name).ok()
    })
    .context("failed to load configuration")?;
    if let Some(model) = args.model {
        config.model = model;
    }

    init_logging(&config)?;
    tracing::info!(model = %config.model, base_url = %config.base_url, "starting");

    let client = GeminiClient::from_config(&config).context("failed to build Gemini client")?;
    let worker = AnalysisWorker::new(Arc::new(client), config.model.clone());
    let theme = if args.light { Theme::Light } else { Theme::Dark };
    let mut app = App::new(worker, config.step_interval, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(config.tick_rate);
    let result = run_app(&mut terminal, &mut app, event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "application error");
    }
    result
}

/// Log lines would corrupt the alternate screen, so they only go to a file
/// and only when one is configured.
fn init_logging(config: &Config) -> Result<()> {
    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut event_handler: EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match event_handler.next().await? {
            events::Event::Tick => app.on_tick(),
            events::Event::Key(key) => {
                if app.handle_key(key) {
                    return Ok(());
                }
            }
            // Next draw picks up the new size
            events::Event::Resize(_, _) => {}
        }
    }
}
