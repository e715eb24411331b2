//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: proxy HTTP server settings
//! - `upstream`: Weatherstack credentials and endpoint
//! - `client`: dashboard-side fetch and cache settings
//! - `storage`: SQLite location store settings

mod client;
mod server;
mod storage;
mod upstream;

use serde::Deserialize;

pub use client::ClientConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
pub use upstream::UpstreamConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Proxy server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weatherstack upstream configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Dashboard client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Location store configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Reads `config.{toml,json,yaml}` from the working directory when
    /// present, then overrides with `WEATHERDECK_*` environment variables
    /// (e.g. `WEATHERDECK_SERVER_PORT`, `WEATHERDECK_UPSTREAM_API_KEY`).
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value fails to
    /// deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("WEATHERDECK")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.upstream.base_url, "http://api.weatherstack.com");
        assert_eq!(config.upstream.timeout_ms, 10_000);
        assert_eq!(config.client.cache_ttl_secs, 600);
        assert_eq!(config.storage.path, "weatherdeck.db");
    }

    #[test]
    fn deserializes_from_empty_document() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(config.upstream.api_key.is_none());
    }

    #[test]
    fn deserializes_partial_override() {
        let config: AppConfig = serde_json::from_str(
            r#"{"server": {"port": 8080}, "client": {"cache_ttl_secs": 30}}"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.client.cache_ttl_secs, 30);
    }
}
