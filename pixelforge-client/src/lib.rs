//! Pixelforge Backend Client
//!
//! A small, type-safe client for the command surface of the generation backend.
//!
//! The stores depend only on the [`Backend`] trait, so they can run against the
//! HTTP transport in production and against an in-memory fake in tests.
//!
//! # Example
//!
//! ```no_run
//! use pixelforge_client::{Backend, HttpBackend};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = HttpBackend::new("http://localhost:1420");
//!
//!     for job in backend.get_jobs(None).await? {
//!         println!("{} {}", job.id, job.status);
//!     }
//!     Ok(())
//! }
//! ```

mod backend;
mod config;
pub mod error;
mod jobs;
mod uploads;

// Re-export commonly used types
pub use backend::Backend;
pub use error::{ClientError, Result};
pub use pixelforge_core::dto::job::JobFilter;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP transport for the backend command surface
///
/// Every command is a `POST {base_url}/invoke/{command}` whose JSON body is
/// the command's argument object.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Base URL of the backend (e.g., "http://localhost:1420")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HttpBackend {
    /// Create a new backend client
    ///
    /// # Example
    /// ```
    /// use pixelforge_client::HttpBackend;
    ///
    /// let backend = HttpBackend::new("http://localhost:1420");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use pixelforge_client::HttpBackend;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let backend = HttpBackend::with_client("http://localhost:1420", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn command_url(&self, command: &str) -> String {
        format!("{}/invoke/{}", self.base_url, command)
    }

    // =============================================================================
    // Command Invocation
    // =============================================================================

    /// Invoke a command and deserialize its JSON payload
    async fn invoke<A, T>(&self, command: &str, args: &A) -> Result<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(command, "invoking backend command");
        let response = self
            .client
            .post(self.command_url(command))
            .json(args)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Invoke a command that returns no payload
    async fn invoke_unit<A>(&self, command: &str, args: &A) -> Result<()>
    where
        A: Serialize + ?Sized,
    {
        debug!(command, "invoking backend command");
        let response = self
            .client
            .post(self.command_url(command))
            .json(args)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the body of a successful response
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response that carries no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let backend = HttpBackend::new("http://localhost:1420");
        assert_eq!(backend.base_url(), "http://localhost:1420");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:1420/");
        assert_eq!(backend.base_url(), "http://localhost:1420");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let backend = HttpBackend::with_client("http://localhost:1420", http_client);
        assert_eq!(backend.command_url("get_jobs"), "http://localhost:1420/invoke/get_jobs");
    }
}
