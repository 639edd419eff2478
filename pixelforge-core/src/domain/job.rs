//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pricing::calculate_cost;

/// A generation request, possibly covering several output items
///
/// Jobs are created by the backend and only ever replaced wholesale by a
/// fresher snapshot on the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub mode: JobMode,
    pub prompt: String,
    pub output_size: OutputSize,
    pub temperature: f64,
    pub aspect_ratio: String,
    pub batch_job_name: Option<String>,
    pub batch_temp_file: Option<String>,
    pub total_items: u32,
    pub completed_items: u32,
    pub failed_items: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl Job {
    /// Whether the backend is still working on this job
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Share of items that reached a final state, rounded to a whole percent
    pub fn progress_percent(&self) -> u32 {
        if self.total_items == 0 {
            return 0;
        }
        let done = f64::from(self.completed_items.saturating_add(self.failed_items));
        (done / f64::from(self.total_items) * 100.0).round() as u32
    }

    /// Estimated price of the whole job
    pub fn cost(&self) -> f64 {
        calculate_cost(self.output_size, self.total_items)
    }

    /// Creation time parsed for display, if the backend sent RFC 3339
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&chrono::Utc))
    }
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Pending and processing jobs are still being watched
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Processing)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the job produces its images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobMode {
    TextToImage,
    ImageToImage,
}

impl fmt::Display for JobMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobMode::TextToImage => f.write_str("text-to-image"),
            JobMode::ImageToImage => f.write_str("image-to-image"),
        }
    }
}

/// Output resolution of generated images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputSize {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl OutputSize {
    pub const ALL: [OutputSize; 3] = [OutputSize::OneK, OutputSize::TwoK, OutputSize::FourK];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::OneK => "1K",
            OutputSize::TwoK => "2K",
            OutputSize::FourK => "4K",
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "1K" => Ok(OutputSize::OneK),
            "2K" => Ok(OutputSize::TwoK),
            "4K" => Ok(OutputSize::FourK),
            other => Err(format!("unknown output size '{}' (expected 1K, 2K or 4K)", other)),
        }
    }
}

/// One output item of a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobItem {
    pub id: String,
    pub job_id: String,
    pub input_prompt: Option<String>,
    pub input_image_path: Option<String>,
    pub output_image_path: Option<String>,
    pub status: JobItemStatus,
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Item status; items are never cancelled individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobItemStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// A job together with its items, as returned by `get_job` and the create commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobWithItems {
    pub job: Job,
    pub items: Vec<JobItem>,
}
