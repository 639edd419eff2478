//! Job submission
//!
//! Form state for the two generation modes. Submitting calls the backend's
//! create command directly and hands the created job to the [`JobStore`],
//! which starts polling it.

use pixelforge_client::Backend;
use pixelforge_core::domain::job::{Job, OutputSize};
use pixelforge_core::domain::upload::UploadedFile;
use pixelforge_core::dto::job::{CreateI2IJobRequest, CreateT2IJobRequest};
use pixelforge_core::pricing::{DEFAULT_ASPECT_RATIO, DEFAULT_TEMPERATURE, calculate_cost};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::jobs::JobStore;

/// Maximum number of images on one image-to-image job
pub const MAX_FILES: usize = 20;

/// Settings shared by both generation modes
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub output_size: OutputSize,
    pub temperature: f64,
    pub aspect_ratio: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            output_size: OutputSize::default(),
            temperature: DEFAULT_TEMPERATURE,
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
        }
    }
}

/// Text-to-image form: a queue of prompts plus the prompt being typed
#[derive(Debug, Clone, Default)]
pub struct TextToImageForm {
    pub settings: GenerationSettings,
    queue: Vec<String>,
    draft: String,
}

impl TextToImageForm {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Moves the draft into the queue; blank drafts are ignored
    pub fn queue_prompt(&mut self) -> bool {
        let prompt = self.draft.trim();
        if prompt.is_empty() {
            return false;
        }
        self.queue.push(prompt.to_string());
        self.draft.clear();
        true
    }

    pub fn remove_prompt(&mut self, index: usize) -> Option<String> {
        (index < self.queue.len()).then(|| self.queue.remove(index))
    }

    pub fn queued(&self) -> &[String] {
        &self.queue
    }

    /// Every prompt that would be submitted: the queue, then the draft
    pub fn prompts(&self) -> Vec<String> {
        let mut prompts = self.queue.clone();
        let draft = self.draft.trim();
        if !draft.is_empty() {
            prompts.push(draft.to_string());
        }
        prompts
    }

    pub fn cost(&self) -> f64 {
        calculate_cost(self.settings.output_size, self.prompts().len() as u32)
    }

    pub fn can_submit(&self, has_key: bool) -> bool {
        has_key && !self.prompts().is_empty()
    }

    pub fn request(&self) -> Result<CreateT2IJobRequest> {
        let prompts = self.prompts();
        if prompts.is_empty() {
            return Err(StoreError::EmptyForm("enter at least one prompt"));
        }

        Ok(CreateT2IJobRequest {
            prompts,
            output_size: self.settings.output_size,
            temperature: self.settings.temperature,
            aspect_ratio: self.settings.aspect_ratio.clone(),
        })
    }

    /// Creates the job, adds it to `store`, and clears the prompts
    ///
    /// The form is left untouched when the backend rejects the job.
    pub async fn submit(&mut self, store: &JobStore) -> Result<Job> {
        let request = self.request()?;
        let count = request.prompts.len();

        let created = store.backend().create_t2i_job(request).await?;
        info!(job_id = %created.job.id, "Created text-to-image job with {} prompt(s)", count);

        self.queue.clear();
        self.draft.clear();
        store.add_job(created.job.clone());
        Ok(created.job)
    }
}

/// Image-to-image form: staged images plus one transformation prompt
#[derive(Debug, Clone, Default)]
pub struct ImageToImageForm {
    pub settings: GenerationSettings,
    pub prompt: String,
    files: Vec<UploadedFile>,
}

impl ImageToImageForm {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Uploads local images and stages them on the form
    pub async fn add_files(&mut self, backend: &dyn Backend, paths: Vec<String>) -> Result<()> {
        if self.files.len() + paths.len() > MAX_FILES {
            return Err(StoreError::TooManyFiles { max: MAX_FILES });
        }

        let uploaded = backend.upload_images(paths).await?;
        info!("Staged {} image(s)", uploaded.len());
        self.files.extend(uploaded);
        Ok(())
    }

    pub fn remove_file(&mut self, id: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        self.files.len() != before
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn cost(&self) -> f64 {
        calculate_cost(self.settings.output_size, self.files.len() as u32)
    }

    pub fn can_submit(&self, has_key: bool) -> bool {
        has_key && !self.files.is_empty() && !self.prompt.trim().is_empty()
    }

    pub fn request(&self) -> Result<CreateI2IJobRequest> {
        if self.files.is_empty() {
            return Err(StoreError::EmptyForm("add at least one image"));
        }
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(StoreError::EmptyForm("describe the transformation"));
        }

        Ok(CreateI2IJobRequest {
            prompt: prompt.to_string(),
            image_paths: self.files.iter().map(|f| f.path.clone()).collect(),
            output_size: self.settings.output_size,
            temperature: self.settings.temperature,
            aspect_ratio: self.settings.aspect_ratio.clone(),
        })
    }

    /// Creates the job, adds it to `store`, and clears prompt and images
    pub async fn submit(&mut self, store: &JobStore) -> Result<Job> {
        let request = self.request()?;
        let count = request.image_paths.len();

        let created = store.backend().create_i2i_job(request).await?;
        info!(job_id = %created.job.id, "Created image-to-image job with {} image(s)", count);

        self.files.clear();
        self.prompt.clear();
        store.add_job(created.job.clone());
        Ok(created.job)
    }
}

/// Deletes a job on the backend, then drops it from the store
pub async fn delete_job(store: &JobStore, id: &str) -> Result<()> {
    store.backend().delete_job(id).await?;
    store.remove_job(id);
    info!(job_id = id, "Deleted job");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::PollConfig;
    use crate::testing::{MockBackend, job};
    use pixelforge_core::domain::job::{JobMode, JobStatus};
    use std::sync::Arc;

    fn setup() -> (Arc<MockBackend>, JobStore) {
        let backend = Arc::new(MockBackend::new());
        let store = JobStore::new(backend.clone(), PollConfig::default());
        (backend, store)
    }

    #[test]
    fn test_queue_and_remove_prompts() {
        let mut form = TextToImageForm::default();

        form.set_draft("   ");
        assert!(!form.queue_prompt());

        form.set_draft("First prompt");
        assert!(form.queue_prompt());
        form.set_draft("Second prompt");
        assert!(form.queue_prompt());
        form.set_draft("Draft prompt");

        assert_eq!(form.prompts(), vec!["First prompt", "Second prompt", "Draft prompt"]);
        assert_eq!(form.remove_prompt(0).as_deref(), Some("First prompt"));
        assert_eq!(form.remove_prompt(5), None);
        assert_eq!(form.queued(), ["Second prompt".to_string()]);
    }

    #[test]
    fn test_text_form_cost_and_gate() {
        let mut form = TextToImageForm::new(GenerationSettings {
            output_size: OutputSize::TwoK,
            ..GenerationSettings::default()
        });
        assert!(!form.can_submit(true));

        form.set_draft("A");
        form.queue_prompt();
        form.set_draft("B");
        form.queue_prompt();
        form.set_draft("C");

        assert!((form.cost() - 0.21).abs() < 1e-9);
        assert!(form.can_submit(true));
        assert!(!form.can_submit(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_submit_adds_job_and_polls() {
        let (backend, store) = setup();
        let mut form = TextToImageForm::default();
        form.set_draft("Test prompt");

        let created = form.submit(&store).await.unwrap();

        assert_eq!(backend.calls_to("create_t2i_job"), vec!["create_t2i_job:Test prompt"]);
        assert_eq!(created.mode, JobMode::TextToImage);
        assert_eq!(store.snapshot(), vec![created]);
        assert!(store.is_polling());
        assert!(form.prompts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_submit_empty_form() {
        let (backend, store) = setup();
        let mut form = TextToImageForm::default();

        let err = form.submit(&store).await.unwrap_err();

        assert!(matches!(err, StoreError::EmptyForm(_)));
        assert!(backend.calls_to("create_t2i_job").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_submit_failure_keeps_form() {
        let (backend, store) = setup();
        backend.fail_all(true);
        let mut form = TextToImageForm::default();
        form.set_draft("Keep me");

        assert!(form.submit(&store).await.is_err());

        assert_eq!(form.prompts(), vec!["Keep me"]);
        assert!(store.is_empty());
        assert!(!store.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn test_image_form_upload_and_submit() {
        let (backend, store) = setup();
        let mut form = ImageToImageForm::default();

        form.add_files(
            backend.as_ref(),
            vec!["/pics/image1.jpg".to_string(), "/pics/image2.jpg".to_string()],
        )
        .await
        .unwrap();
        assert_eq!(form.files().len(), 2);
        assert!((form.cost() - 0.04).abs() < 1e-9);
        assert!(!form.can_submit(true));

        assert!(form.remove_file("file-2"));
        form.prompt = "Make it watercolor style".to_string();
        assert!(form.can_submit(true));

        let created = form.submit(&store).await.unwrap();

        assert_eq!(
            backend.calls_to("create_i2i_job"),
            vec!["create_i2i_job:/uploads/image1.jpg"]
        );
        assert_eq!(created.mode, JobMode::ImageToImage);
        assert_eq!(created.total_items, 1);
        assert_eq!(store.len(), 1);
        assert!(form.files().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_image_form_requires_prompt() {
        let (backend, store) = setup();
        let mut form = ImageToImageForm::default();
        form.add_files(backend.as_ref(), vec!["/pics/a.png".to_string()])
            .await
            .unwrap();

        let err = form.submit(&store).await.unwrap_err();

        assert!(matches!(err, StoreError::EmptyForm(_)));
        assert!(backend.calls_to("create_i2i_job").is_empty());
    }

    #[tokio::test]
    async fn test_image_form_file_limit() {
        let backend = MockBackend::new();
        let mut form = ImageToImageForm::default();
        let paths: Vec<String> = (0..=MAX_FILES).map(|i| format!("/pics/{}.png", i)).collect();

        let err = form.add_files(&backend, paths).await.unwrap_err();

        assert!(matches!(err, StoreError::TooManyFiles { max: MAX_FILES }));
        assert!(backend.calls_to("upload_images").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_job_removes_locally() {
        let (backend, store) = setup();
        store.add_job(job("job-1", JobStatus::Completed));
        store.add_job(job("job-2", JobStatus::Completed));

        delete_job(&store, "job-1").await.unwrap();

        assert_eq!(backend.calls_to("delete_job"), vec!["delete_job:job-1"]);
        assert!(store.get("job-1").is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_job_failure_keeps_job() {
        let (backend, store) = setup();
        store.add_job(job("job-1", JobStatus::Completed));
        backend.fail_all(true);

        assert!(delete_job(&store, "job-1").await.is_err());
        assert!(store.get("job-1").is_some());
    }
}
