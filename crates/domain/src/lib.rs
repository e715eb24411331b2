//! Core data model for Weatherdeck
//!
//! Entities and semi-structured upstream payload types shared by every other
//! crate. This layer has no I/O and no knowledge of HTTP or storage.

pub mod errors;
pub mod location;
pub mod weather;

pub use errors::DomainError;
pub use location::Location;
pub use weather::{
    AirQuality, Astro, CurrentConditions, ForecastDay, HourlyEntry, LocationInfo, WeatherDocument,
};
