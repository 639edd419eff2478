//! Configuration module
//!
//! Handles CLI configuration: where the backend lives, how often jobs are
//! polled, and where local settings are kept.

use anyhow::bail;
use pixelforge_store::PollConfig;
use std::path::PathBuf;
use std::time::Duration;

/// File name of the persisted theme preference
const THEME_FILE: &str = "theme.json";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the backend (e.g., "http://localhost:1420")
    pub backend_url: String,

    /// How often active jobs are refreshed while watching
    pub poll_interval: Duration,

    /// Directory holding local settings files
    pub settings_dir: PathBuf,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backend_url.is_empty() {
            bail!("backend_url cannot be empty");
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            bail!("backend_url must start with http:// or https://");
        }

        self.poll_config().validate()?;

        Ok(())
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new(self.poll_interval)
    }

    pub fn theme_path(&self) -> PathBuf {
        self.settings_dir.join(THEME_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:1420".to_string(),
            poll_interval: PollConfig::default().interval,
            settings_dir: default_settings_dir(),
        }
    }
}

/// `<platform config dir>/pixelforge`, or `./.pixelforge` when there is none
pub fn default_settings_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("pixelforge"))
        .unwrap_or_else(|| PathBuf::from(".pixelforge"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.backend_url = String::new();
        assert!(config.validate().is_err());

        config.backend_url = "localhost:1420".to_string();
        assert!(config.validate().is_err());

        config.backend_url = "https://forge.example.com".to_string();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_theme_path() {
        let config = Config {
            settings_dir: PathBuf::from("/tmp/pixelforge"),
            ..Config::default()
        };
        assert_eq!(config.theme_path(), PathBuf::from("/tmp/pixelforge/theme.json"));
    }
}
