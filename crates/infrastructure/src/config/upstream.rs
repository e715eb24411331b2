//! Weatherstack upstream configuration.

use secrecy::SecretString;
use serde::Deserialize;

/// Weatherstack upstream configuration
///
/// The API key never leaves this struct except through the proxy's
/// injected `access_key` parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Weatherstack API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Weatherstack access key; requests fail with a clear error when unset
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Upstream request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://api.weatherstack.com".to_string()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}
