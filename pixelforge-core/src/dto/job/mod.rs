//! Job DTOs for the backend command surface

use serde::{Deserialize, Serialize};

use crate::domain::job::OutputSize;

/// Request to create a text-to-image job, one item per prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateT2IJobRequest {
    pub prompts: Vec<String>,
    pub output_size: OutputSize,
    pub temperature: f64,
    pub aspect_ratio: String,
}

/// Request to create an image-to-image job, one item per staged image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateI2IJobRequest {
    pub prompt: String,
    pub image_paths: Vec<String>,
    pub output_size: OutputSize,
    pub temperature: f64,
    pub aspect_ratio: String,
}

/// Server-side filter for `get_jobs`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobFilter {
    /// Pending and processing jobs only
    Active,
}

/// Arguments of `get_jobs`; an absent status lists every job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetJobsArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobFilter>,
}

/// Arguments of `get_job` and `delete_job`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobIdArgs {
    pub id: String,
}

/// Envelope for the create commands: `{ "request": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobArgs<R> {
    pub request: R,
}
