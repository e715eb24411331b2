//! Application layer for Weatherdeck
//!
//! Owns the weather acquisition pipeline (tiered fallback + per-query cache),
//! the tracked-location store, the fallback forecast synthesizer, and the
//! stateless display formatting helpers. I/O happens behind the ports in
//! [`ports`]; adapters live in the infrastructure crate.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::location_service::LocationService;
pub use services::weather_service::{AcquiredWeather, WeatherService};
