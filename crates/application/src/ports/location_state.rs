//! Location persistence port
//!
//! Two logical key-value entries back the location store: the serialized
//! ordered location list and the selected location id. Failures here are
//! never fatal; the location service logs and continues in memory.

use domain::Location;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persistence failures (always non-fatal at call sites)
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying storage read/write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored state exists but cannot be decoded
    #[error("Corrupt stored state: {0}")]
    Corrupt(String),
}

/// Snapshot of the persisted location state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedLocationState {
    /// Ordered tracked locations, most recently added first
    pub locations: Vec<Location>,
    /// Id of the currently selected location
    pub selected_id: String,
}

/// Port for persisting the tracked-location state
#[cfg_attr(test, automock)]
pub trait LocationStatePort: Send + Sync {
    /// Load the persisted state, `None` when nothing has been stored yet
    fn load(&self) -> Result<Option<PersistedLocationState>, PersistenceError>;

    /// Overwrite the persisted state with `state`
    fn save(&self, state: &PersistedLocationState) -> Result<(), PersistenceError>;
}
