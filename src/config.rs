use anyhow::{Context, Result, bail};
use std::env;

/// Deployment mode, controlling error-message verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    Production,
    Development,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub mode: DeployMode,
    pub debounce_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `TRACKING_API_URL`: Required - Base URL of the tracking API
    /// - `APP_MODE`: Optional - "production" or anything else (default: "development")
    /// - `DEBOUNCE_MS`: Optional - Input debounce window in milliseconds (default: 500)
    pub fn from_env() -> Result<Self> {
        // Parse API base URL (required)
        let api_base_url = env::var("TRACKING_API_URL")
            .context("TRACKING_API_URL not set")?;

        if api_base_url.trim().is_empty() {
            bail!("TRACKING_API_URL cannot be empty");
        }

        // Parse deployment mode (optional, has default)
        let mode = match env::var("APP_MODE")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => DeployMode::Production,
            _ => DeployMode::Development,
        };

        // Parse debounce window (optional, has default)
        let debounce_ms = match env::var("DEBOUNCE_MS") {
            Err(_) => 500,
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("DEBOUNCE_MS is not a valid integer: {}", raw))?,
        };

        Ok(Config {
            api_base_url,
            mode,
            debounce_ms,
        })
    }
}
