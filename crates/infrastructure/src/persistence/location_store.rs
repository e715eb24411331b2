//! SQLite location store
//!
//! Persists the tracked-location list and the current selection in a small
//! key/value table. State is stored as JSON under fixed keys; a corrupt
//! value surfaces as `PersistenceError::Corrupt` so the service can fall
//! back to presets.

use std::path::Path;

use application::ports::{LocationStatePort, PersistedLocationState, PersistenceError};
use domain::Location;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, instrument};

const LOCATIONS_KEY: &str = "weatherdeck::locations";
const SELECTED_KEY: &str = "weatherdeck::selected-location";

/// SQLite-backed location state store
pub struct SqliteLocationStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteLocationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteLocationStore").finish_non_exhaustive()
    }
}

impl SqliteLocationStore {
    /// Open (or create) the store at the given path
    ///
    /// `:memory:` opens an ephemeral store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(path: &str) -> Result<Self, PersistenceError> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()
        } else {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| PersistenceError::Storage(e.to_string()))?;
                }
            }
            Connection::open(path)
        }
        .map_err(|e| PersistenceError::Storage(e.to_string()))?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )
        .map_err(|e| PersistenceError::Storage(e.to_string()))?;

        debug!(path, "Opened location store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn read_key(conn: &Connection, key: &str) -> Result<Option<String>, PersistenceError> {
        conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| PersistenceError::Storage(e.to_string()))
    }

    fn write_key(conn: &Connection, key: &str, value: &str) -> Result<(), PersistenceError> {
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e| PersistenceError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl LocationStatePort for SqliteLocationStore {
    #[instrument(skip(self))]
    fn load(&self) -> Result<Option<PersistedLocationState>, PersistenceError> {
        let conn = self.conn.lock();
        let Some(raw_locations) = Self::read_key(&conn, LOCATIONS_KEY)? else {
            return Ok(None);
        };

        let locations: Vec<Location> = serde_json::from_str(&raw_locations)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        let selected_id = Self::read_key(&conn, SELECTED_KEY)?.unwrap_or_default();

        Ok(Some(PersistedLocationState {
            locations,
            selected_id,
        }))
    }

    #[instrument(skip(self, state), fields(locations = state.locations.len()))]
    fn save(&self, state: &PersistedLocationState) -> Result<(), PersistenceError> {
        let raw_locations = serde_json::to_string(&state.locations)
            .map_err(|e| PersistenceError::Storage(e.to_string()))?;

        let conn = self.conn.lock();
        Self::write_key(&conn, LOCATIONS_KEY, &raw_locations)?;
        Self::write_key(&conn, SELECTED_KEY, &state.selected_id)?;
        debug!("Saved location state");
        Ok(())
    }
}
