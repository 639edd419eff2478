//! Config DTOs

use serde::{Deserialize, Serialize};

/// Arguments of `save_config`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigArgs {
    pub api_key: String,
}
