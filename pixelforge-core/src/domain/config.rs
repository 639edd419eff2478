//! Config domain types

use serde::{Deserialize, Serialize};

/// Whether an API key is stored on the backend, and its masked form
///
/// The backend never hands the full key back to the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStatus {
    pub has_key: bool,
    pub masked: Option<String>,
}
