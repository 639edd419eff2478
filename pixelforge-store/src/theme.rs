//! Theme store
//!
//! Holds the light/dark/system preference, persists it to a JSON settings
//! file, and publishes the resolved appearance.

use pixelforge_core::domain::theme::{Appearance, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::Result;

/// Reports whether the operating system currently prefers a dark appearance
pub type SystemAppearance = Arc<dyn Fn() -> bool + Send + Sync>;

/// On-disk settings
#[derive(Debug, Default, Serialize, Deserialize)]
struct ThemeSettings {
    theme: Theme,
}

pub struct ThemeStore {
    path: PathBuf,
    system_prefers_dark: SystemAppearance,
    theme: watch::Sender<Theme>,
    appearance: watch::Sender<Appearance>,
}

impl ThemeStore {
    /// Opens the store backed by the settings file at `path`
    ///
    /// A missing or unreadable file starts from the system preference.
    pub fn open(path: impl Into<PathBuf>, system_prefers_dark: SystemAppearance) -> Self {
        let path = path.into();
        let theme = read_theme(&path);
        let appearance = theme.resolve(system_prefers_dark());
        debug!(%theme, ?appearance, "Theme loaded");

        Self {
            path,
            system_prefers_dark,
            theme: watch::channel(theme).0,
            appearance: watch::channel(appearance).0,
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme.borrow()
    }

    pub fn appearance(&self) -> Appearance {
        *self.appearance.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.theme.subscribe()
    }

    pub fn subscribe_appearance(&self) -> watch::Receiver<Appearance> {
        self.appearance.subscribe()
    }

    /// Persists and applies a preference
    pub fn set(&self, theme: Theme) -> Result<()> {
        self.persist(theme)?;
        self.theme.send_replace(theme);
        self.apply(theme);
        Ok(())
    }

    /// Moves to the next preference (light -> dark -> system -> light)
    pub fn toggle(&self) -> Result<Theme> {
        let next = self.theme().next();
        self.set(next)?;
        Ok(next)
    }

    /// Re-applies the preference after the system appearance changed
    ///
    /// Only a `system` preference follows the operating system.
    pub fn system_appearance_changed(&self) {
        let theme = self.theme();
        if theme == Theme::System {
            self.apply(theme);
        }
    }

    fn apply(&self, theme: Theme) {
        let appearance = theme.resolve((self.system_prefers_dark)());
        self.appearance.send_if_modified(|current| {
            let changed = *current != appearance;
            *current = appearance;
            changed
        });
    }

    fn persist(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&ThemeSettings { theme })?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

fn read_theme(path: &Path) -> Theme {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return Theme::default(),
    };

    match serde_json::from_str::<ThemeSettings>(&contents) {
        Ok(settings) => settings.theme,
        Err(e) => {
            warn!("Ignoring malformed theme settings {:?}: {}", path, e);
            Theme::default()
        }
    }
}
