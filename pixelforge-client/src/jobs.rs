//! Job-related backend commands

use crate::HttpBackend;
use crate::error::{ClientError, Result};
use pixelforge_core::domain::job::{Job, JobWithItems};
use pixelforge_core::dto::job::{
    CreateI2IJobRequest, CreateJobArgs, CreateT2IJobRequest, GetJobsArgs, JobFilter, JobIdArgs,
};

impl HttpBackend {
    // =============================================================================
    // Job Queries
    // =============================================================================

    /// List jobs (`get_jobs`)
    ///
    /// # Arguments
    /// * `filter` - `Some(JobFilter::Active)` for pending and processing jobs only
    ///
    /// # Returns
    /// Jobs ordered newest first
    pub async fn list_jobs(&self, filter: Option<JobFilter>) -> Result<Vec<Job>> {
        self.invoke("get_jobs", &GetJobsArgs { status: filter })
            .await
    }

    /// Get a job and its items (`get_job`)
    ///
    /// A 404 from the backend is reported as [`ClientError::NotFound`].
    pub async fn fetch_job(&self, id: &str) -> Result<JobWithItems> {
        self.invoke("get_job", &JobIdArgs { id: id.to_string() })
            .await
            .map_err(|e| match e {
                ClientError::ApiError { status: 404, .. } => ClientError::NotFound(id.to_string()),
                other => other,
            })
    }

    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Create a text-to-image job (`create_t2i_job`)
    ///
    /// # Example
    /// ```no_run
    /// # use pixelforge_client::HttpBackend;
    /// # use pixelforge_core::domain::job::OutputSize;
    /// # use pixelforge_core::dto::job::CreateT2IJobRequest;
    /// # async fn example() -> anyhow::Result<()> {
    /// let backend = HttpBackend::new("http://localhost:1420");
    /// let created = backend.create_text_to_image(CreateT2IJobRequest {
    ///     prompts: vec!["A sunset over mountains".to_string()],
    ///     output_size: OutputSize::OneK,
    ///     temperature: 1.0,
    ///     aspect_ratio: "1:1".to_string(),
    /// }).await?;
    /// println!("Created job {}", created.job.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_text_to_image(&self, request: CreateT2IJobRequest) -> Result<JobWithItems> {
        if request.prompts.is_empty() {
            return Err(ClientError::InvalidRequest(
                "at least one prompt is required".to_string(),
            ));
        }

        self.invoke("create_t2i_job", &CreateJobArgs { request })
            .await
    }

    /// Create an image-to-image job (`create_i2i_job`)
    pub async fn create_image_to_image(&self, request: CreateI2IJobRequest) -> Result<JobWithItems> {
        if request.image_paths.is_empty() {
            return Err(ClientError::InvalidRequest(
                "at least one image is required".to_string(),
            ));
        }

        self.invoke("create_i2i_job", &CreateJobArgs { request })
            .await
    }

    /// Delete a job and its items (`delete_job`)
    pub async fn remove_job(&self, id: &str) -> Result<()> {
        self.invoke_unit("delete_job", &JobIdArgs { id: id.to_string() })
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_server::serve_once;
    use crate::{Backend, ClientError, HttpBackend, JobFilter};
    use pixelforge_core::domain::job::JobStatus;

    const JOB_LIST: &str = r#"[{
        "id": "job-1",
        "status": "processing",
        "mode": "text-to-image",
        "prompt": "A beautiful sunset",
        "output_size": "1K",
        "temperature": 1.0,
        "aspect_ratio": "1:1",
        "batch_job_name": null,
        "batch_temp_file": null,
        "total_items": 3,
        "completed_items": 1,
        "failed_items": 0,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    }]"#;

    #[tokio::test]
    async fn test_get_jobs_active_filter() {
        let (url, server) = serve_once(200, JOB_LIST).await;
        let backend = HttpBackend::new(url);

        let jobs = backend.get_jobs(Some(JobFilter::Active)).await.unwrap();
        let captured = server.await.unwrap();

        assert_eq!(captured.path, "/invoke/get_jobs");
        assert_eq!(captured.body, serde_json::json!({ "status": "active" }));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].status, JobStatus::Processing);
    }

    #[tokio::test]
    async fn test_get_job_not_found() {
        let (url, server) = serve_once(404, r#""Job not found""#).await;
        let backend = HttpBackend::new(url);

        let err = backend.get_job("missing").await.unwrap_err();
        let captured = server.await.unwrap();

        assert_eq!(captured.body, serde_json::json!({ "id": "missing" }));
        assert!(err.is_not_found());
        assert!(matches!(err, ClientError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_delete_job_server_error() {
        let (url, server) = serve_once(500, r#""database locked""#).await;
        let backend = HttpBackend::new(url);

        let err = backend.delete_job("job-1").await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.status(), Some(500));
        assert!(!err.is_not_found());
    }
}
