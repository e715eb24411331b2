//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::weather_port::UpstreamError;

/// Errors that can occur in the application layer
///
/// Note that [`crate::WeatherService::acquire`] is total and never surfaces
/// these; they exist for callers that talk to the ports directly.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Upstream weather API failure
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
