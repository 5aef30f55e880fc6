use anyhow::{Context, Result};
use reqwest::Client;
use thiserror::Error;

use crate::models::{ApiError, TrackingResult};

/// Lookup failure taxonomy. `Server` carries the message the tracking
/// API put in its error body; `Transport` covers everything else
/// (connection, timeout, decode, or a bodyless error status).
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Transport(String),
}

/// Seam over the remote tracking service so tests can substitute a mock.
#[async_trait::async_trait]
pub trait TrackingBackend: Send + Sync {
    async fn track(&self, query: &str) -> Result<TrackingResult, LookupError>;
}

pub struct HttpBackend {
    base_url: String,
    http_client: Client,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            http_client,
        })
    }
}

#[async_trait::async_trait]
impl TrackingBackend for HttpBackend {
    async fn track(&self, query: &str) -> Result<TrackingResult, LookupError> {
        let url = format!("{}/requests/track?query={}", self.base_url, query);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Surface the server's message field when the body carries one.
            return match serde_json::from_str::<ApiError>(&body) {
                Ok(api_error) => Err(LookupError::Server(api_error.message)),
                Err(_) => Err(LookupError::Transport(format!(
                    "Tracking API query failed (status {}): {}",
                    status, body
                ))),
            };
        }

        response
            .json::<TrackingResult>()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))
    }
}
