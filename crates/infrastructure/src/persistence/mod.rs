//! Persistence module
//!
//! SQLite-based storage for the tracked-location state.

mod location_store;

pub use location_store::SqliteLocationStore;
