use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

mod controller;
mod dates;
mod domain;
mod escape;
mod inputter;
mod loader;
mod model;
mod query;
mod ui;

use clap::Parser;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use controller::Controller;
use domain::{AppConfig, AppError};
use model::{Model, Status};
use ui::SearchUI;

#[derive(Parser, Debug)]
#[command(name = "hashfind", about = "A tui based package checksum search tool.")]
struct Args {
    /// CSV sources with Name,Version,Sha256,Date columns
    #[arg(default_values_t = [
        "debian.csv".to_string(),
        "ubuntu.csv".to_string(),
        "ubuntu-server.csv".to_string(),
    ])]
    sources: Vec<String>,

    /// Quiet window in ms before a keystroke triggers filtering
    #[arg(long, default_value_t = 300)]
    debounce_ms: u64,

    /// Event poll timeout in ms for the UI loop
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Append tracing output to this file (the terminal is in raw mode)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = args.log_file.clone()
        && let Err(e) = init_logging(&path)
    {
        eprintln!("Error setting up logging: {:?}", e);
        return ExitCode::FAILURE;
    }

    let result = run(args);
    ratatui::restore();
    match result {
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn expand_sources(sources: &[String]) -> Result<Vec<PathBuf>, AppError> {
    sources
        .iter()
        .map(|s| {
            shellexpand::full(s)
                .map(|expanded| PathBuf::from(expanded.as_ref()))
                .map_err(|e| AppError::LoadingFailed(format!("Bad source path {s}: {e}")))
        })
        .collect()
}

fn run(args: Args) -> Result<(), AppError> {
    info!("Starting hashfind!");

    let sources = expand_sources(&args.sources)?;
    let cfg = AppConfig {
        event_poll_time: args.poll_ms,
        debounce_ms: args.debounce_ms,
    };

    let mut terminal = ratatui::init();
    let size = terminal.size()?;

    let mut model = Model::init(&cfg, size.width as usize, size.height as usize);
    model.load_sources(&sources);

    let ui = SearchUI::new();
    let controller = Controller::new(&cfg);

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(model.get_uidata(), f))?;

        // Handle events and map to a Message; update also fires any
        // pending debounced recompute when no event arrived.
        let message = controller.handle_event(&model)?;
        model.update(message)?;
    }

    Ok(())
}
