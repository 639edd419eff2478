//! Backend command surface
//!
//! The command names are part of the wire contract and must not change:
//! `get_jobs`, `get_job`, `create_t2i_job`, `create_i2i_job`, `delete_job`,
//! `upload_images`, `get_config`, `save_config`, `delete_config`.

use async_trait::async_trait;
use pixelforge_core::domain::config::ConfigStatus;
use pixelforge_core::domain::job::{Job, JobWithItems};
use pixelforge_core::domain::upload::UploadedFile;
use pixelforge_core::dto::job::{CreateI2IJobRequest, CreateT2IJobRequest, JobFilter};

use crate::HttpBackend;
use crate::error::Result;

/// Commands exposed by the generation backend
///
/// Implemented over HTTP by [`HttpBackend`]; tests provide in-memory fakes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Lists jobs, newest first; `Some(JobFilter::Active)` limits the list
    /// to pending and processing jobs
    async fn get_jobs(&self, filter: Option<JobFilter>) -> Result<Vec<Job>>;

    /// Fetches one job with its items
    async fn get_job(&self, id: &str) -> Result<JobWithItems>;

    /// Creates a text-to-image job
    async fn create_t2i_job(&self, request: CreateT2IJobRequest) -> Result<JobWithItems>;

    /// Creates an image-to-image job from previously uploaded images
    async fn create_i2i_job(&self, request: CreateI2IJobRequest) -> Result<JobWithItems>;

    /// Deletes a job and its items
    async fn delete_job(&self, id: &str) -> Result<()>;

    /// Stages local images so they can be referenced by a job
    async fn upload_images(&self, files: Vec<String>) -> Result<Vec<UploadedFile>>;

    /// Reports whether an API key is configured
    async fn get_config(&self) -> Result<ConfigStatus>;

    /// Stores the API key
    async fn save_config(&self, api_key: &str) -> Result<()>;

    /// Removes the stored API key
    async fn delete_config(&self) -> Result<()>;
}

#[async_trait]
impl Backend for HttpBackend {
    async fn get_jobs(&self, filter: Option<JobFilter>) -> Result<Vec<Job>> {
        self.list_jobs(filter).await
    }

    async fn get_job(&self, id: &str) -> Result<JobWithItems> {
        self.fetch_job(id).await
    }

    async fn create_t2i_job(&self, request: CreateT2IJobRequest) -> Result<JobWithItems> {
        self.create_text_to_image(request).await
    }

    async fn create_i2i_job(&self, request: CreateI2IJobRequest) -> Result<JobWithItems> {
        self.create_image_to_image(request).await
    }

    async fn delete_job(&self, id: &str) -> Result<()> {
        self.remove_job(id).await
    }

    async fn upload_images(&self, files: Vec<String>) -> Result<Vec<UploadedFile>> {
        self.stage_images(files).await
    }

    async fn get_config(&self) -> Result<ConfigStatus> {
        self.fetch_config().await
    }

    async fn save_config(&self, api_key: &str) -> Result<()> {
        self.store_api_key(api_key).await
    }

    async fn delete_config(&self) -> Result<()> {
        self.clear_api_key().await
    }
}
