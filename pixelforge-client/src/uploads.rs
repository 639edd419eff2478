//! Upload-related backend commands

use crate::HttpBackend;
use crate::error::Result;
use pixelforge_core::domain::upload::UploadedFile;
use pixelforge_core::dto::upload::UploadImagesArgs;

impl HttpBackend {
    /// Stage local images on the backend (`upload_images`)
    ///
    /// # Arguments
    /// * `files` - Local paths; the backend validates type and size
    ///
    /// # Returns
    /// The staged files, in the order given
    pub async fn stage_images(&self, files: Vec<String>) -> Result<Vec<UploadedFile>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        self.invoke("upload_images", &UploadImagesArgs { files })
            .await
    }
}
