//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod cost;
mod job;
mod key;
mod submit;
mod theme;

pub use job::JobCommands;
pub use key::KeyCommands;
pub use submit::SubmitCommands;
pub use theme::ThemeCommands;

use anyhow::Result;
use clap::Subcommand;
use pixelforge_core::domain::job::OutputSize;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Job management
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Create generation jobs
    Submit {
        #[command(subcommand)]
        command: SubmitCommands,
    },
    /// API key management
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Theme preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
    /// Estimate the price of a job
    Cost {
        /// Output size (1K, 2K or 4K)
        #[arg(short, long, default_value_t = OutputSize::OneK)]
        size: OutputSize,

        /// Number of images
        count: u32,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Submit { command } => submit::handle_submit_command(command, config).await,
        Commands::Key { command } => key::handle_key_command(command, config).await,
        Commands::Theme { command } => theme::handle_theme_command(command, config),
        Commands::Cost { size, count } => {
            cost::print_cost(size, count);
            Ok(())
        }
    }
}
