//! Submit command handlers
//!
//! Fills a text-to-image or image-to-image form and creates the job.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::*;
use pixelforge_core::domain::job::{Job, OutputSize};
use pixelforge_core::pricing::{
    ASPECT_RATIOS, DEFAULT_ASPECT_RATIO, DEFAULT_TEMPERATURE, TEMPERATURES, is_known_aspect_ratio,
};
use pixelforge_store::submit::GenerationSettings;
use pixelforge_store::{ConfigStore, ImageToImageForm, JobStore, TextToImageForm};

use super::cost::format_cost;
use super::job::{job_store, watch_until_idle};
use crate::config::Config;

/// Submit subcommands
#[derive(Subcommand)]
pub enum SubmitCommands {
    /// Generate one image per prompt
    Text {
        /// Prompts, one image each
        #[arg(required = true)]
        prompts: Vec<String>,

        #[command(flatten)]
        options: GenerationArgs,
    },
    /// Transform local images with one prompt
    Image {
        /// Transformation to apply to every image
        #[arg(short, long)]
        prompt: String,

        /// Image files to transform
        #[arg(required = true)]
        images: Vec<String>,

        #[command(flatten)]
        options: GenerationArgs,
    },
}

/// Options shared by both generation modes
#[derive(Args)]
pub struct GenerationArgs {
    /// Output size (1K, 2K or 4K)
    #[arg(short, long, default_value_t = OutputSize::OneK)]
    size: OutputSize,

    /// Creativity, between 0.0 and 2.0
    #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,

    /// Aspect ratio (1:1, 16:9, 9:16, 4:3 or 3:4)
    #[arg(short, long, default_value = DEFAULT_ASPECT_RATIO)]
    aspect_ratio: String,

    /// Follow the job until it finishes
    #[arg(short, long)]
    watch: bool,
}

impl GenerationArgs {
    fn settings(&self) -> Result<GenerationSettings> {
        let (min, max) = (TEMPERATURES[0], TEMPERATURES[TEMPERATURES.len() - 1]);
        if !(min..=max).contains(&self.temperature) {
            bail!("temperature must be between {} and {}", min, max);
        }

        if !is_known_aspect_ratio(&self.aspect_ratio) {
            let known: Vec<&str> = ASPECT_RATIOS.iter().map(|(r, _)| *r).collect();
            bail!(
                "unknown aspect ratio '{}', expected one of {}",
                self.aspect_ratio,
                known.join(", ")
            );
        }

        Ok(GenerationSettings {
            output_size: self.size,
            temperature: self.temperature,
            aspect_ratio: self.aspect_ratio.clone(),
        })
    }
}

/// Handle submit commands
pub async fn handle_submit_command(command: SubmitCommands, config: &Config) -> Result<()> {
    let store = job_store(config);
    let has_key = ConfigStore::new(store.backend().clone()).load().await.has_key;

    let (job, watch) = match command {
        SubmitCommands::Text { prompts, options } => {
            (submit_text(&store, prompts, &options, has_key).await?, options.watch)
        }
        SubmitCommands::Image {
            prompt,
            images,
            options,
        } => (
            submit_image(&store, prompt, images, &options, has_key).await?,
            options.watch,
        ),
    };

    println!("{} Created job {}", "✓".green(), job.id.cyan());
    println!("  Items: {}", job.total_items);
    println!("  Cost:  {}", format_cost(job.cost()));

    if watch {
        watch_until_idle(&store).await?;
    }

    Ok(())
}

async fn submit_text(
    store: &JobStore,
    prompts: Vec<String>,
    options: &GenerationArgs,
    has_key: bool,
) -> Result<Job> {
    let mut form = TextToImageForm::new(options.settings()?);
    for prompt in prompts {
        form.set_draft(prompt);
        form.queue_prompt();
    }

    ensure_submittable(form.can_submit(has_key), has_key)?;
    println!(
        "Submitting {} prompt(s), estimated {}",
        form.prompts().len(),
        format_cost(form.cost()).bold()
    );

    form.submit(store)
        .await
        .context("Failed to create text-to-image job")
}

async fn submit_image(
    store: &JobStore,
    prompt: String,
    images: Vec<String>,
    options: &GenerationArgs,
    has_key: bool,
) -> Result<Job> {
    let paths = images
        .iter()
        .map(|image| {
            std::fs::canonicalize(image)
                .map(|path| path.to_string_lossy().into_owned())
                .with_context(|| format!("Image not found: {}", image))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut form = ImageToImageForm::new(options.settings()?);
    form.prompt = prompt;
    form.add_files(store.backend().as_ref(), paths)
        .await
        .context("Failed to upload images")?;

    ensure_submittable(form.can_submit(has_key), has_key)?;
    println!(
        "Submitting {} image(s), estimated {}",
        form.files().len(),
        format_cost(form.cost()).bold()
    );

    form.submit(store)
        .await
        .context("Failed to create image-to-image job")
}

fn ensure_submittable(can_submit: bool, has_key: bool) -> Result<()> {
    if !has_key {
        bail!("No API key configured. Run `pixelforge key set <KEY>` first.");
    }
    if !can_submit {
        bail!("Nothing to submit: add a prompt and, for image jobs, at least one image.");
    }
    Ok(())
}
