//! Upload DTOs

use serde::{Deserialize, Serialize};

/// Arguments of `upload_images`: local paths to stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadImagesArgs {
    pub files: Vec<String>,
}
