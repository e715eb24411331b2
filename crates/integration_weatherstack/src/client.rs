//! Weatherstack wire client
//!
//! Fetches weather documents from a Weatherstack-shaped endpoint. The
//! service reports most failures inside a 200 response, so the client
//! inspects the body envelope before attempting to parse a document.

use domain::WeatherDocument;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Weatherstack client errors
#[derive(Debug, Error)]
pub enum WeatherstackError {
    /// HTTP client could not be initialized
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// Service answered with a non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Weatherstack rejected the request inside a 200 envelope
    #[error("{info}")]
    Rejected {
        code: Option<i64>,
        kind: Option<String>,
        info: String,
    },

    /// Older envelope: a top-level string `error` with no document
    #[error("{0}")]
    LegacyError(String),

    /// Body could not be parsed as a weather document
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Weatherstack client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherstackConfig {
    /// Base URL of the weather endpoint, normally the proxy's
    /// `/api/weather` prefix (default: <http://localhost:4000/api/weather>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds (default: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:4000/api/weather".to_string()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for WeatherstackConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// HTTP client for the Weatherstack wire shape
#[derive(Debug)]
pub struct WeatherstackClient {
    client: Client,
    config: WeatherstackConfig,
}

impl WeatherstackClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherstackConfig) -> Result<Self, WeatherstackError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| WeatherstackError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherstackError> {
        Self::new(WeatherstackConfig::default())
    }

    /// Fetch a weather document from an endpoint such as `current` or
    /// `forecast`
    ///
    /// `query` and every extra parameter become query-string entries;
    /// repeated names are sent repeatedly. No retries happen here.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, non-success HTTP statuses,
    /// in-band Weatherstack rejections, and unparseable bodies.
    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    pub async fn fetch(
        &self,
        endpoint: &str,
        query: &str,
        params: &[(String, String)],
    ) -> Result<WeatherDocument, WeatherstackError> {
        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));
        debug!(url = %url, "Fetching weather document");

        let mut pairs: Vec<(&str, &str)> = vec![("query", query)];
        pairs.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let response = self
            .client
            .get(&url)
            .query(&pairs)
            .send()
            .await
            .map_err(|e| WeatherstackError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherstackError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(WeatherstackError::Status {
                status: status.as_u16(),
                message: status_message(&body),
            });
        }

        Self::parse_envelope(&body)
    }

    /// Interpret a 200 body: in-band rejection, legacy error, or document
    fn parse_envelope(body: &str) -> Result<WeatherDocument, WeatherstackError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| WeatherstackError::Parse(e.to_string()))?;

        if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            let error = value.get("error");
            return Err(WeatherstackError::Rejected {
                code: error
                    .and_then(|e| e.get("code"))
                    .and_then(serde_json::Value::as_i64),
                kind: error
                    .and_then(|e| e.get("type"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string),
                info: error
                    .and_then(|e| e.get("info"))
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("Weatherstack reported an error.")
                    .to_string(),
            });
        }

        // Compatibility shim: a bare string error without any document body.
        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            if value.get("location").is_none() {
                return Err(WeatherstackError::LegacyError(message.to_string()));
            }
        }

        serde_json::from_value(value).map_err(|e| WeatherstackError::Parse(e.to_string()))
    }
}

/// Best-effort human message from an error response body
fn status_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Unable to fetch data from Weatherstack.".to_string())
}
