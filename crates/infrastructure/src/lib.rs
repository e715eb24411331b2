//! Infrastructure layer for Weatherdeck
//!
//! Configuration loading, SQLite persistence for the location store, and
//! the adapter wiring the upstream weather port to the Weatherstack client.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::WeatherGateway;
pub use config::AppConfig;
pub use persistence::SqliteLocationStore;
