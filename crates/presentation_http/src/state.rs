//! Application state shared across handlers

use std::sync::Arc;

use infrastructure::config::UpstreamConfig;
use reqwest::Client;

/// Shared proxy state
#[derive(Clone)]
pub struct AppState {
    /// Outbound HTTP client, built once with the configured timeout
    pub client: Client,
    /// Weatherstack upstream configuration (base URL and access key)
    pub upstream: Arc<UpstreamConfig>,
}

impl AppState {
    /// Build state from the upstream configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(upstream: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(upstream.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            upstream: Arc::new(upstream),
        })
    }
}
