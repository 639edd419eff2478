//! API key store
//!
//! Mirrors the backend's API key status. The key itself never lives here,
//! only whether one is set and its masked form.

use pixelforge_client::Backend;
use pixelforge_core::domain::config::ConfigStatus;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

use crate::error::{Result, StoreError};

/// Prefix every valid API key starts with
const API_KEY_PREFIX: &str = "AI";

pub struct ConfigStore {
    backend: Arc<dyn Backend>,
    status: watch::Sender<ConfigStatus>,
}

impl ConfigStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (status, _) = watch::channel(ConfigStatus::default());
        Self { backend, status }
    }

    pub fn status(&self) -> ConfigStatus {
        self.status.borrow().clone()
    }

    pub fn has_key(&self) -> bool {
        self.status.borrow().has_key
    }

    pub fn subscribe(&self) -> watch::Receiver<ConfigStatus> {
        self.status.subscribe()
    }

    /// Refreshes the status from the backend
    ///
    /// On failure the error is logged, the held status is kept, and the
    /// default "no key" status is returned.
    pub async fn load(&self) -> ConfigStatus {
        match self.backend.get_config().await {
            Ok(status) => {
                self.status.send_replace(status.clone());
                status
            }
            Err(e) => {
                error!("Failed to load config: {}", e);
                ConfigStatus::default()
            }
        }
    }

    /// Saves a new API key and reloads the status
    pub async fn save(&self, api_key: &str) -> Result<ConfigStatus> {
        let api_key = api_key.trim();
        if !api_key.starts_with(API_KEY_PREFIX) {
            return Err(StoreError::InvalidApiKey);
        }

        self.backend.save_config(api_key).await?;
        info!("API key saved");
        Ok(self.load().await)
    }

    /// Removes the stored API key
    pub async fn remove(&self) -> Result<()> {
        self.backend.delete_config().await?;
        self.status.send_replace(ConfigStatus::default());
        info!("API key removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;

    #[tokio::test]
    async fn test_load_reports_key() {
        let backend = Arc::new(MockBackend::new());
        backend.set_config(ConfigStatus {
            has_key: true,
            masked: Some("AI...key".to_string()),
        });
        let store = ConfigStore::new(backend.clone());

        let status = store.load().await;

        assert!(status.has_key);
        assert_eq!(store.status(), status);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_state() {
        let backend = Arc::new(MockBackend::new());
        backend.set_config(ConfigStatus {
            has_key: true,
            masked: Some("AI...key".to_string()),
        });
        let store = ConfigStore::new(backend.clone());
        store.load().await;

        backend.fail_all(true);
        let status = store.load().await;

        assert_eq!(status, ConfigStatus::default());
        assert!(store.has_key());
    }

    #[tokio::test]
    async fn test_save_rejects_malformed_key() {
        let backend = Arc::new(MockBackend::new());
        let store = ConfigStore::new(backend.clone());

        let err = store.save("invalid-key").await.unwrap_err();

        assert!(matches!(err, StoreError::InvalidApiKey));
        assert!(backend.calls_to("save_config").is_empty());
    }

    #[tokio::test]
    async fn test_save_then_reload() {
        let backend = Arc::new(MockBackend::new());
        let store = ConfigStore::new(backend.clone());

        let status = store.save("AIzaSyTestKey").await.unwrap();

        assert_eq!(backend.calls_to("save_config"), vec!["save_config:AIzaSyTestKey"]);
        assert_eq!(backend.calls_to("get_config").len(), 1);
        assert!(status.has_key);
        assert_eq!(status.masked.as_deref(), Some("AI...Key"));
        assert!(store.has_key());
    }

    #[tokio::test]
    async fn test_save_propagates_backend_error() {
        let backend = Arc::new(MockBackend::new());
        backend.fail_all(true);
        let store = ConfigStore::new(backend.clone());

        let err = store.save("AIzaSyTestKey").await.unwrap_err();

        assert!(matches!(err, StoreError::Client(_)));
    }

    #[tokio::test]
    async fn test_remove_resets_status() {
        let backend = Arc::new(MockBackend::new());
        let store = ConfigStore::new(backend.clone());
        store.save("AIzaSyTestKey").await.unwrap();
        let rx = store.subscribe();

        store.remove().await.unwrap();

        assert_eq!(backend.calls_to("delete_config").len(), 1);
        assert!(!rx.borrow().has_key);
        assert_eq!(store.status(), ConfigStatus::default());
    }
}
