//! Pixelforge CLI
//!
//! Command-line front end for the image generation backend.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pixelforge")]
#[command(about = "Pixelforge image generation CLI", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(
        long,
        env = "PIXELFORGE_BACKEND_URL",
        default_value = "http://localhost:1420"
    )]
    backend_url: String,

    /// Milliseconds between two refreshes of active jobs
    #[arg(long, env = "PIXELFORGE_POLL_INTERVAL_MS", default_value_t = 2000)]
    poll_interval_ms: u64,

    /// Directory holding local settings (defaults to the platform config dir)
    #[arg(long, env = "PIXELFORGE_SETTINGS_DIR")]
    settings_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelforge=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        backend_url: cli.backend_url,
        poll_interval: Duration::from_millis(cli.poll_interval_ms),
        settings_dir: cli.settings_dir.unwrap_or_else(config::default_settings_dir),
    };
    config.validate()?;
    debug!(?config, "Configuration loaded");

    handle_command(cli.command, &config).await
}
