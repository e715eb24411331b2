//! Dashboard client configuration.

use serde::Deserialize;

/// Dashboard-side fetch and cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the weather proxy's `/api/weather` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Cache TTL for acquired weather, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:4000/api/weather".to_string()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_cache_ttl_secs() -> u64 {
    600
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}
