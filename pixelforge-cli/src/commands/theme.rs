//! Theme command handlers
//!
//! The terminal has no appearance setting of its own, so the system
//! preference is read from `PIXELFORGE_SYSTEM_DARK` (any of "1", "true",
//! "dark"), defaulting to light.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use pixelforge_core::domain::theme::Theme;
use pixelforge_store::ThemeStore;
use pixelforge_store::theme::SystemAppearance;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;

const SYSTEM_DARK_ENV: &str = "PIXELFORGE_SYSTEM_DARK";

/// Theme subcommands
#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Show the preference and the appearance it resolves to
    Show,
    /// Set the preference (light, dark or system)
    Set { theme: Theme },
    /// Cycle light, dark, system
    Toggle,
}

/// Handle theme commands
pub fn handle_theme_command(command: ThemeCommands, config: &Config) -> Result<()> {
    let path = config.theme_path();
    debug!("Theme settings at {}", path.display());
    let store = ThemeStore::open(&path, system_probe());

    match command {
        ThemeCommands::Show => {}
        ThemeCommands::Set { theme } => store
            .set(theme)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        ThemeCommands::Toggle => {
            store
                .toggle()
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    println!(
        "Theme: {} ({})",
        store.theme().to_string().cyan(),
        format!("{:?}", store.appearance()).to_lowercase().dimmed()
    );
    Ok(())
}

fn system_probe() -> SystemAppearance {
    Arc::new(|| {
        std::env::var(SYSTEM_DARK_ENV)
            .map(|value| prefers_dark(&value))
            .unwrap_or(false)
    })
}

fn prefers_dark(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "dark")
}
