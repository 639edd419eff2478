//! Config-related backend commands

use crate::HttpBackend;
use crate::error::Result;
use pixelforge_core::domain::config::ConfigStatus;
use pixelforge_core::dto::config::SaveConfigArgs;

impl HttpBackend {
    /// Get whether an API key is configured (`get_config`)
    pub async fn fetch_config(&self) -> Result<ConfigStatus> {
        self.invoke("get_config", &serde_json::json!({})).await
    }

    /// Store the API key (`save_config`)
    ///
    /// The backend validates the key format and rejects malformed keys.
    pub async fn store_api_key(&self, api_key: &str) -> Result<()> {
        self.invoke_unit(
            "save_config",
            &SaveConfigArgs {
                api_key: api_key.to_string(),
            },
        )
        .await
    }

    /// Remove the stored API key (`delete_config`)
    pub async fn clear_api_key(&self) -> Result<()> {
        self.invoke_unit("delete_config", &serde_json::json!({}))
            .await
    }
}
