//! Upstream weather port
//!
//! Defines the interface for fetching one named upstream endpoint. The
//! acquisition pipeline never talks to HTTP directly; it only sees this port.

use async_trait::async_trait;
use domain::WeatherDocument;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Named upstream endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherEndpoint {
    /// Current observed conditions
    Current,
    /// Daily forecast with hourly breakdown
    Forecast,
}

impl WeatherEndpoint {
    /// Path segment used on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Forecast => "forecast",
        }
    }
}

impl std::fmt::Display for WeatherEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized upstream failure
///
/// Machine-readable `code`/`kind` are preserved from the upstream error
/// envelope when present so they can propagate upward unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UpstreamError {
    /// Upstream numeric error code, if the envelope carried one
    pub code: Option<i64>,
    /// Upstream error type string, if the envelope carried one
    pub kind: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl UpstreamError {
    /// Failure with no machine-readable envelope (transport, parse, status)
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            kind: None,
            message: message.into(),
        }
    }

    /// Failure from an explicit upstream rejection envelope
    pub fn rejected(code: Option<i64>, kind: Option<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            kind,
            message: message.into(),
        }
    }
}

/// Port for upstream weather fetches
///
/// A single fetch of one endpoint; no retries, no fallback. Tiering is the
/// pipeline's job.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch `endpoint` for `query` with extra query parameters
    async fn fetch(
        &self,
        endpoint: WeatherEndpoint,
        query: &str,
        params: Vec<(String, String)>,
    ) -> Result<WeatherDocument, UpstreamError>;
}
