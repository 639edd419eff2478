//! Upload domain types

use serde::{Deserialize, Serialize};

/// An image staged by the backend before an image-to-image job is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    /// Backend-side path, passed back in `CreateI2IJobRequest::image_paths`
    pub path: String,
    /// Original file name, for display
    pub name: String,
}
