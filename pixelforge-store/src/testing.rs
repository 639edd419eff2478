//! In-memory backend used by the store tests

use async_trait::async_trait;
use parking_lot::Mutex;
use pixelforge_client::{Backend, ClientError, JobFilter, Result};
use pixelforge_core::domain::config::ConfigStatus;
use pixelforge_core::domain::job::{Job, JobMode, JobStatus, JobWithItems, OutputSize};
use pixelforge_core::domain::upload::UploadedFile;
use pixelforge_core::dto::job::{CreateI2IJobRequest, CreateT2IJobRequest};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Builds a job with the given id and status
pub fn job(id: &str, status: JobStatus) -> Job {
    Job {
        id: id.to_string(),
        status,
        mode: JobMode::TextToImage,
        prompt: "A beautiful sunset".to_string(),
        output_size: OutputSize::OneK,
        temperature: 1.0,
        aspect_ratio: "1:1".to_string(),
        batch_job_name: None,
        batch_temp_file: None,
        total_items: 3,
        completed_items: 0,
        failed_items: 0,
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

/// Scripted backend that records every command it receives
#[derive(Default)]
pub struct MockBackend {
    calls: Mutex<Vec<String>>,
    /// Served by `get_job`; unknown ids fail with not found
    served: Mutex<HashMap<String, Job>>,
    /// Served by `get_jobs`
    job_list: Mutex<Vec<Job>>,
    config: Mutex<ConfigStatus>,
    fetch_delay: Mutex<Option<Duration>>,
    failing: AtomicBool,
    created: Mutex<u32>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve_job(&self, job: Job) {
        self.served.lock().insert(job.id.clone(), job);
    }

    pub fn set_job_list(&self, jobs: Vec<Job>) {
        *self.job_list.lock() = jobs;
    }

    pub fn set_config(&self, status: ConfigStatus) {
        *self.config.lock() = status;
    }

    /// Delays every `get_job` response
    pub fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.lock() = Some(delay);
    }

    /// Makes every command fail with a server error
    pub fn fail_all(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Recorded calls whose command name is `command`
    pub fn calls_to(&self, command: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.split(':').next() == Some(command))
            .cloned()
            .collect()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::api_error(500, "backend unavailable"));
        }
        Ok(())
    }

    fn created_job(&self, mode: JobMode, prompt: String, total: usize, size: OutputSize) -> Job {
        let mut counter = self.created.lock();
        *counter += 1;

        Job {
            id: format!("created-{}", *counter),
            mode,
            prompt,
            output_size: size,
            total_items: total as u32,
            ..job("", JobStatus::Pending)
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn get_jobs(&self, filter: Option<JobFilter>) -> Result<Vec<Job>> {
        match filter {
            Some(JobFilter::Active) => self.record("get_jobs:active".to_string())?,
            None => self.record("get_jobs".to_string())?,
        }

        let jobs = self.job_list.lock().clone();
        Ok(match filter {
            Some(JobFilter::Active) => jobs.into_iter().filter(Job::is_active).collect(),
            None => jobs,
        })
    }

    async fn get_job(&self, id: &str) -> Result<JobWithItems> {
        self.record(format!("get_job:{}", id))?;

        let delay = *self.fetch_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.served
            .lock()
            .get(id)
            .cloned()
            .map(|job| JobWithItems {
                job,
                items: Vec::new(),
            })
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }

    async fn create_t2i_job(&self, request: CreateT2IJobRequest) -> Result<JobWithItems> {
        self.record(format!("create_t2i_job:{}", request.prompts.join("|")))?;

        let job = self.created_job(
            JobMode::TextToImage,
            request.prompts.first().cloned().unwrap_or_default(),
            request.prompts.len(),
            request.output_size,
        );
        Ok(JobWithItems {
            job,
            items: Vec::new(),
        })
    }

    async fn create_i2i_job(&self, request: CreateI2IJobRequest) -> Result<JobWithItems> {
        self.record(format!("create_i2i_job:{}", request.image_paths.join("|")))?;

        let job = self.created_job(
            JobMode::ImageToImage,
            request.prompt,
            request.image_paths.len(),
            request.output_size,
        );
        Ok(JobWithItems {
            job,
            items: Vec::new(),
        })
    }

    async fn delete_job(&self, id: &str) -> Result<()> {
        self.record(format!("delete_job:{}", id))
    }

    async fn upload_images(&self, files: Vec<String>) -> Result<Vec<UploadedFile>> {
        self.record(format!("upload_images:{}", files.join("|")))?;

        Ok(files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let name = path.rsplit('/').next().unwrap_or(path).to_string();
                UploadedFile {
                    id: format!("file-{}", i + 1),
                    path: format!("/uploads/{}", name),
                    name,
                }
            })
            .collect())
    }

    async fn get_config(&self) -> Result<ConfigStatus> {
        self.record("get_config".to_string())?;
        Ok(self.config.lock().clone())
    }

    async fn save_config(&self, api_key: &str) -> Result<()> {
        self.record(format!("save_config:{}", api_key))?;
        *self.config.lock() = ConfigStatus {
            has_key: true,
            masked: Some(format!("{}...{}", &api_key[..2], &api_key[api_key.len() - 3..])),
        };
        Ok(())
    }

    async fn delete_config(&self) -> Result<()> {
        self.record("delete_config".to_string())?;
        *self.config.lock() = ConfigStatus::default();
        Ok(())
    }
}
