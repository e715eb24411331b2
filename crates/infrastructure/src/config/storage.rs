//! Location store configuration.

use serde::Deserialize;

/// SQLite location store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Database file path, or `:memory:` for an ephemeral store
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "weatherdeck.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
