mod anilist;
mod app;
mod config;
mod error;
mod genre;
mod recommend;
mod state;
mod ui;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app::App;
use crate::config::Config;
use crate::error::Result;

fn setup_logging() -> Result<()> {
    let data_dir = config::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    let file_appender = tracing_appender::rolling::daily(&data_dir, "anirec.log");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("anirec=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file, the terminal belongs to the UI
    if let Err(e) = setup_logging() {
        eprintln!("Warning: Could not set up logging: {}", e);
    }

    info!("Starting anirec");

    let config = Config::load()?;
    info!(endpoint = %config.anilist.endpoint, "Loaded config");

    let mut terminal = app::init_terminal()?;

    let mut app = App::new(config);
    let result = app.run(&mut terminal).await;

    app::restore_terminal()?;

    result
}
