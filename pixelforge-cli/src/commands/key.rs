//! API key command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use pixelforge_client::HttpBackend;
use pixelforge_store::ConfigStore;
use std::sync::Arc;

use crate::config::Config;

/// API key subcommands
#[derive(Subcommand)]
pub enum KeyCommands {
    /// Show whether a key is stored
    Show,
    /// Store a new API key
    Set {
        /// The API key (starts with "AI")
        key: String,
    },
    /// Remove the stored API key
    Remove,
}

/// Handle API key commands
pub async fn handle_key_command(command: KeyCommands, config: &Config) -> Result<()> {
    let store = ConfigStore::new(Arc::new(HttpBackend::new(&config.backend_url)));

    match command {
        KeyCommands::Show => {
            store.load().await;
            print_status(&store);
        }
        KeyCommands::Set { key } => {
            store.save(&key).await.context("Failed to save API key")?;
            println!("{} API key saved", "✓".green());
            print_status(&store);
        }
        KeyCommands::Remove => {
            store.remove().await.context("Failed to remove API key")?;
            println!("{} API key removed", "✓".green());
        }
    }

    Ok(())
}

fn print_status(store: &ConfigStore) {
    let status = store.status();
    if status.has_key {
        println!(
            "API key: {}",
            status.masked.as_deref().unwrap_or("(set)").cyan()
        );
    } else {
        println!("{}", "No API key configured.".yellow());
    }
}
