//! Weather gateway - implements `WeatherPort` using `integration_weatherstack`

use application::error::ApplicationError;
use application::ports::{UpstreamError, WeatherEndpoint, WeatherPort};
use async_trait::async_trait;
use domain::WeatherDocument;
use integration_weatherstack::{WeatherstackClient, WeatherstackConfig, WeatherstackError};
use tracing::{debug, instrument};

/// Adapter for upstream weather fetches via the Weatherstack wire client
pub struct WeatherGateway {
    client: WeatherstackClient,
}

impl std::fmt::Debug for WeatherGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherGateway")
            .field("client", &"WeatherstackClient")
            .finish()
    }
}

impl WeatherGateway {
    /// Create a new gateway with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        let client = WeatherstackClient::with_defaults()
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherstackConfig) -> Result<Self, ApplicationError> {
        let client = WeatherstackClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map an integration error to the port's normalized failure
    ///
    /// Rejection envelopes keep their machine-readable code and type; every
    /// other failure carries only its message.
    fn map_error(err: WeatherstackError) -> UpstreamError {
        match err {
            WeatherstackError::Rejected { code, kind, info } => {
                UpstreamError::rejected(code, kind, info)
            },
            WeatherstackError::LegacyError(message) => {
                UpstreamError::rejected(None, None, message)
            },
            WeatherstackError::ConnectionFailed(message)
            | WeatherstackError::Transport(message)
            | WeatherstackError::Parse(message) => UpstreamError::transport(message),
            WeatherstackError::Status { status, message } => {
                UpstreamError::transport(format!("HTTP {status}: {message}"))
            },
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherGateway {
    #[instrument(skip(self, params), fields(endpoint = %endpoint, query = %query))]
    async fn fetch(
        &self,
        endpoint: WeatherEndpoint,
        query: &str,
        params: Vec<(String, String)>,
    ) -> Result<WeatherDocument, UpstreamError> {
        let result = self
            .client
            .fetch(endpoint.as_str(), query, &params)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(document) => {
                debug!(
                    forecast_days = document.forecast.len(),
                    "Retrieved weather document"
                );
            },
            Err(e) => {
                debug!(error = %e, "Upstream fetch failed");
            },
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_gateway() {
        assert!(WeatherGateway::new().is_ok());
    }

    #[test]
    fn debug_impl() {
        let gateway = WeatherGateway::new().unwrap();
        assert!(format!("{gateway:?}").contains("WeatherGateway"));
    }

    #[test]
    fn map_error_rejection_keeps_envelope() {
        let err = WeatherstackError::Rejected {
            code: Some(615),
            kind: Some("request_failed".to_string()),
            info: "Your API request failed.".to_string(),
        };
        let mapped = WeatherGateway::map_error(err);
        assert_eq!(mapped.code, Some(615));
        assert_eq!(mapped.kind.as_deref(), Some("request_failed"));
        assert_eq!(mapped.message, "Your API request failed.");
    }

    #[test]
    fn map_error_legacy_keeps_message_only() {
        let mapped =
            WeatherGateway::map_error(WeatherstackError::LegacyError("no data".to_string()));
        assert!(mapped.code.is_none());
        assert_eq!(mapped.message, "no data");
    }

    #[test]
    fn map_error_status_mentions_code() {
        let mapped = WeatherGateway::map_error(WeatherstackError::Status {
            status: 502,
            message: "Unable to fetch data from Weatherstack.".to_string(),
        });
        assert!(mapped.message.contains("502"));
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WeatherGateway>();
    }
}
