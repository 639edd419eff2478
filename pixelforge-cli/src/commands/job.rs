//! Job command handlers
//!
//! Handles all job-related CLI commands including listing, viewing details,
//! deleting, and following active jobs until they finish.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use pixelforge_client::{Backend, HttpBackend, JobFilter};
use pixelforge_core::domain::job::{Job, JobItem, JobItemStatus, JobStatus, JobWithItems};
use pixelforge_store::JobStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::cost::format_cost;
use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// List jobs, newest first
    List {
        /// Only pending and processing jobs
        #[arg(short, long)]
        active: bool,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Get job details and items
    Get {
        /// Job ID
        id: String,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a job
    Delete {
        /// Job ID
        id: String,
    },
    /// Follow active jobs until all of them finish
    Watch,
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let store = job_store(config);

    match command {
        JobCommands::List { active, json } => {
            list_jobs(store.backend().as_ref(), active, json).await
        }
        JobCommands::Get { id, json } => get_job(store.backend().as_ref(), &id, json).await,
        JobCommands::Delete { id } => delete_job(&store, &id).await,
        JobCommands::Watch => {
            store.load_active_jobs().await;
            watch_until_idle(&store).await
        }
    }
}

/// Builds a job store talking to the configured backend
pub(crate) fn job_store(config: &Config) -> JobStore {
    debug!(
        backend_url = %config.backend_url,
        "Using backend (poll interval: {:?})",
        config.poll_interval
    );
    let backend = Arc::new(HttpBackend::new(&config.backend_url));
    JobStore::new(backend, config.poll_config())
}

/// List jobs
async fn list_jobs(backend: &dyn Backend, active: bool, json: bool) -> Result<()> {
    let filter = active.then_some(JobFilter::Active);
    let jobs = backend
        .get_jobs(filter)
        .await
        .context("Failed to fetch jobs")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }

    let kind = if active { "active job" } else { "job" };
    if jobs.is_empty() {
        println!("{}", format!("No {}s found.", kind).yellow());
    } else {
        println!("{}", format!("Found {} {}(s):", jobs.len(), kind).bold());
        println!();
        for job in &jobs {
            print_job_summary(job);
        }
    }

    Ok(())
}

/// Get and display a single job
async fn get_job(backend: &dyn Backend, id: &str, json: bool) -> Result<()> {
    let job = backend
        .get_job(id)
        .await
        .with_context(|| format!("Failed to fetch job {}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&job)?);
    } else {
        print_job_details(&job);
    }

    Ok(())
}

async fn delete_job(store: &JobStore, id: &str) -> Result<()> {
    pixelforge_store::delete_job(store, id)
        .await
        .with_context(|| format!("Failed to delete job {}", id))?;

    println!("{} Deleted job {}", "✓".green(), id.cyan());
    Ok(())
}

/// Polls until no watched job is active, printing every change
///
/// Ctrl-C stops watching without touching the jobs.
pub(crate) async fn watch_until_idle(store: &JobStore) -> Result<()> {
    let mut jobs_rx = store.subscribe();
    let mut watched: HashSet<String> = HashSet::new();

    let initial = jobs_rx.borrow_and_update().clone();
    watched.extend(initial.iter().filter(|j| j.is_active()).map(|j| j.id.clone()));

    if watched.is_empty() {
        println!("{}", "No active jobs.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Watching {} active job(s), Ctrl-C to stop:", watched.len()).bold()
    );
    print_progress(&initial, &watched);
    let mut last = initial;
    store.start_polling();

    loop {
        tokio::select! {
            changed = jobs_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let jobs = jobs_rx.borrow_and_update().clone();
                if jobs != last {
                    watched.extend(jobs.iter().filter(|j| j.is_active()).map(|j| j.id.clone()));
                    print_progress(&jobs, &watched);
                    last = jobs;
                }

                if store.active_jobs_count() == 0 {
                    println!("{}", "All jobs finished.".green());
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("{}", "Stopped watching.".dimmed());
                break;
            }
        }
    }

    store.stop_polling();
    Ok(())
}

fn print_progress(jobs: &[Job], watched: &HashSet<String>) {
    for job in jobs.iter().filter(|j| watched.contains(&j.id)) {
        println!(
            "  {} {} {:>3}% ({}/{} done, {} failed) {}",
            "▸".cyan(),
            job.id.dimmed(),
            job.progress_percent(),
            job.completed_items,
            job.total_items,
            job.failed_items,
            colorize_status(&job.status)
        );
    }
}

/// Print a job summary
fn print_job_summary(job: &Job) {
    println!("  {} Job {}", "▸".cyan(), job.id.dimmed());
    println!("    Mode:     {}", job.mode);
    println!("    Status:   {}", colorize_status(&job.status));
    println!("    Prompt:   {}", truncate(&job.prompt, 60));
    println!(
        "    Progress: {}% of {} item(s)",
        job.progress_percent(),
        job.total_items
    );
    println!("    Created:  {}", format_created(job).dimmed());
    println!();
}

/// Print detailed job information
fn print_job_details(details: &JobWithItems) {
    let job = &details.job;

    println!("{}", "Job Details:".bold());
    println!("  ID:           {}", job.id.cyan());
    println!("  Mode:         {}", job.mode);
    println!("  Status:       {}", colorize_status(&job.status));
    println!("  Prompt:       {}", job.prompt);
    println!("  Output size:  {}", job.output_size);
    println!("  Temperature:  {}", job.temperature);
    println!("  Aspect ratio: {}", job.aspect_ratio);
    println!(
        "  Progress:     {}% ({} completed, {} failed, {} total)",
        job.progress_percent(),
        job.completed_items,
        job.failed_items,
        job.total_items
    );
    println!("  Cost:         {}", format_cost(job.cost()));
    println!("  Created:      {}", format_created(job));
    println!("  Updated:      {}", job.updated_at);

    if let Some(batch) = &job.batch_job_name {
        println!("  Batch:        {}", batch.dimmed());
    }

    if !details.items.is_empty() {
        println!("\n{}", "Items:".bold());
        for item in &details.items {
            print_item(item);
        }
    }
}

fn print_item(item: &JobItem) {
    let input = item
        .input_prompt
        .as_deref()
        .or(item.input_image_path.as_deref())
        .unwrap_or("-");

    println!(
        "  {} {} {}",
        colorize_item_status(&item.status),
        item.id.dimmed(),
        truncate(input, 50)
    );
    if let Some(output) = &item.output_image_path {
        println!("      → {}", output);
    }
    if let Some(error) = &item.error {
        println!("      {}", error.red());
    }
}

fn format_created(job: &Job) -> String {
    job.created_at_utc()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| job.created_at.clone())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Colorize job status for display
fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Processing => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Cancelled => status_str.dimmed(),
    }
}

fn colorize_item_status(status: &JobItemStatus) -> ColoredString {
    match status {
        JobItemStatus::Pending => "•".yellow(),
        JobItemStatus::Processing => "•".cyan(),
        JobItemStatus::Completed => "✓".green(),
        JobItemStatus::Failed => "✗".red(),
    }
}
