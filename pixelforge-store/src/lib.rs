//! Pixelforge Stores
//!
//! Client-side state for the image generation front end.
//!
//! Architecture:
//! - Jobs: the authoritative local job list and its self-managing poll loop
//! - Config: API key presence, mirrored from the backend
//! - Theme: light/dark/system preference, persisted to a settings file
//! - Submit: form state that creates jobs and hands them to the job store
//!
//! Every store is an explicit object built around an injected [`Backend`],
//! so independent instances never share state.
//!
//! [`Backend`]: pixelforge_client::Backend

pub mod config;
pub mod error;
pub mod jobs;
pub mod submit;
pub mod theme;

#[cfg(test)]
mod testing;

pub use config::ConfigStore;
pub use error::{Result, StoreError};
pub use jobs::{JobStore, PollConfig};
pub use submit::{ImageToImageForm, TextToImageForm, delete_job};
pub use theme::ThemeStore;
